//! railsim: a tick-synchronised simulation of trains sharing a rail network.
//!
//! This is the top-level crate. It re-exports the sub-crates and adds the
//! text input format ([`input`]) and console output ([`render`]) used by
//! the `railsim` binary.
//!
//! # Quick start
//!
//! ```rust
//! use railsim::prelude::*;
//!
//! let text = "\
//! 2
//! a,b
//! 0 2
//! 2 0
//! 1.0,1.0
//! a,b
//! b,a
//! a,b
//! 4
//! 1,1,1
//! ";
//! let config = railsim::input::parse(text).unwrap();
//! let mut sim = Simulation::new(config).unwrap();
//! let summaries = sim.run(());
//! assert_eq!(summaries.len(), 3);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `railsim-core` | IDs, directions, protocol violations, randomness trait |
//! | [`network`] | `railsim-network` | Stations, link costs, unrolled lines |
//! | [`engine`] | `railsim-engine` | Locks, trains, scheduler, statistics |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod input;
pub mod render;

/// Core ids and traits (`railsim-core`).
pub use railsim_core as types;

/// Network topology (`railsim-network`).
///
/// [`network::RailNetwork`] is the immutable, validated topology shared by
/// every worker.
pub use railsim_network as network;

/// Simulation engine (`railsim-engine`).
///
/// [`engine::Simulation`] drives [`engine::TickScheduler`] over a
/// [`engine::SimConfig`].
pub use railsim_engine as engine;

/// Common imports for typical railsim usage.
pub mod prelude {
    pub use railsim_core::{Direction, LineId, RandomSource, StationId, StationSide, TickId, TrainId};
    pub use railsim_engine::{
        ChaChaSource, ConfigError, DwellConfig, LineConfig, LineWaitSummary, Position, Reporter,
        SimConfig, Simulation, TickSnapshot, TrainStatus, TrainView,
    };
    pub use railsim_network::{RailNetwork, Station};
}
