//! Tick scheduler, resource locks, and wait statistics for railsim.
//!
//! [`Simulation`] is the entry point: it validates a [`SimConfig`],
//! builds the immutable network, spawns trains, and drives the
//! [`TickScheduler`] for the configured number of ticks. Each tick runs
//! three barrier-separated phases over every admitted [`Train`], using
//! the non-blocking [`ResourceLockTable`] to arbitrate loading bays and
//! track links, and folding arrival/departure events into the
//! [`WaitStatsTable`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod locks;
pub mod metrics;
pub mod random;
pub mod scheduler;
pub mod simulation;
pub mod snapshot;
pub mod stats;
pub mod train;

pub use config::{ConfigError, DwellConfig, LineConfig, SimConfig};
pub use locks::{ResourceHandle, ResourceId, ResourceLockTable};
pub use metrics::TickMetrics;
pub use random::ChaChaSource;
pub use scheduler::{TickResult, TickScheduler};
pub use simulation::Simulation;
pub use snapshot::{Position, Reporter, TickSnapshot, TrainView};
pub use stats::{LineWaitSummary, StatEvent, StationWaitStats, WaitAggregate, WaitStatsTable};
pub use train::{Train, TrainStatus};
