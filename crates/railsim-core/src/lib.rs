//! Core types and traits for the railsim rail network simulator.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the identifiers shared by every other crate (stations, station sides,
//! lines, nodes, links, trains, ticks), the injected [`RandomSource`]
//! capability, and the [`ProtocolViolation`] raised when the resource
//! locking discipline is broken.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod id;
pub mod random;

pub use error::ProtocolViolation;
pub use id::{Direction, LineId, LinkId, NodeIdx, StationId, StationSide, TickId, TrainId};
pub use random::{DrawKey, RandomSource};
