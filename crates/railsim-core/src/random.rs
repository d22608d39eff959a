//! The injected randomness capability.
//!
//! Dwell times are the only random input to a simulation. Draws are keyed
//! by [`DrawKey`] so that an implementation can produce the same value no
//! matter which worker thread performs the draw or in which order trains
//! are visited inside a phase.

use std::ops::Range;

use crate::id::{TickId, TrainId};

/// Identifies a single random draw: which train, at which tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DrawKey {
    /// Tick during which the draw happens.
    pub tick: TickId,
    /// Train the draw is made for.
    pub train: TrainId,
}

/// A source of uniform random integers.
///
/// Shared read-only across all workers of a phase, hence `Send + Sync`.
pub trait RandomSource: Send + Sync {
    /// Uniform integer in the half-open `range`.
    ///
    /// Callers never pass an empty range; implementations may return
    /// `range.start` if they do.
    fn uniform(&self, key: DrawKey, range: Range<u32>) -> u32;
}
