//! Resource protocol violations.
//!
//! A violation means the scheduler broke its own locking discipline. It
//! is never returned as a recoverable error; the lock table panics with
//! the formatted violation instead.

use std::error::Error;
use std::fmt;

use crate::id::TrainId;

/// A broken invariant of the acquire/release protocol.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProtocolViolation {
    /// A release was attempted on a resource that nobody holds.
    ReleaseUnheld {
        /// Human-readable resource name.
        resource: String,
        /// The train that attempted the release.
        releaser: TrainId,
    },
    /// A release was attempted by a train that is not the holder.
    ReleaseByNonHolder {
        /// Human-readable resource name.
        resource: String,
        /// The train that attempted the release.
        releaser: TrainId,
        /// The train that actually holds the resource.
        holder: TrainId,
    },
    /// A train tried to acquire a second resource while holding one.
    DoubleAcquire {
        /// The offending train.
        train: TrainId,
        /// Resource the train already holds.
        held: String,
        /// Resource the train tried to acquire.
        requested: String,
    },
}

impl fmt::Display for ProtocolViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReleaseUnheld { resource, releaser } => {
                write!(f, "train {releaser} released unheld resource {resource}")
            }
            Self::ReleaseByNonHolder {
                resource,
                releaser,
                holder,
            } => write!(
                f,
                "train {releaser} released resource {resource} held by train {holder}"
            ),
            Self::DoubleAcquire {
                train,
                held,
                requested,
            } => write!(
                f,
                "train {train} requested {requested} while still holding {held}"
            ),
        }
    }
}

impl Error for ProtocolViolation {}
