//! Station, link, and line topology for railsim simulations.
//!
//! A [`RailNetwork`] is assembled once from a [`StationTable`], a
//! [`LinkCosts`] matrix, and a list of [`LineDef`]s. Construction unrolls
//! every line into its cyclic [`LineNetwork`] node sequence, registers each
//! directed edge a line traverses in the [`LinkRegistry`], and rejects any
//! topology that would leave a traversed edge undefined. Nothing here is
//! mutated after construction, so the whole network is shared by reference
//! across worker threads.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod cost;
pub mod error;
pub mod line;
pub mod link;
pub mod network;
pub mod station;

pub use cost::LinkCosts;
pub use error::NetworkError;
pub use line::{LineDef, LineNetwork, Node};
pub use link::LinkRegistry;
pub use network::RailNetwork;
pub use station::{Station, StationTable};
