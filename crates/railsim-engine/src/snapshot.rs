//! Read-only per-tick views handed to reporters.

use railsim_core::{LineId, NodeIdx, StationSide, TickId, TrainId};

use crate::stats::LineWaitSummary;
use crate::train::TrainStatus;

/// Where a train physically is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Position {
    /// At (or waiting for) a station side's loading bay.
    Station(StationSide),
    /// Travelling a link between two station sides.
    Link {
        /// Departure side.
        from: StationSide,
        /// Destination side.
        to: StationSide,
    },
}

/// One train as seen at the end of a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrainView {
    /// Train id.
    pub id: TrainId,
    /// Status after the tick.
    pub status: TrainStatus,
    /// Node on the train's line.
    pub node: NodeIdx,
    /// Physical position.
    pub position: Position,
    /// Ticks left on the running timer.
    pub time_left: i64,
}

/// All admitted trains after one tick, in line-major, spawn order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TickSnapshot {
    /// The tick that just finished.
    pub tick: TickId,
    /// Admitted trains. Trains not yet admitted are omitted.
    pub trains: Vec<TrainView>,
}

impl TickSnapshot {
    /// Views for one line, in spawn order.
    pub fn line(&self, line: LineId) -> impl Iterator<Item = &TrainView> {
        self.trains.iter().filter(move |t| t.id.line == line)
    }
}

/// Receives simulation output.
///
/// Reporting is kept out of the engine so it can be printed, collected
/// in tests, or shipped to another thread.
pub trait Reporter {
    /// Called once after every tick.
    fn on_tick(&mut self, snapshot: &TickSnapshot);

    /// Called once after the last tick with per-line wait statistics.
    fn on_finish(&mut self, summaries: &[LineWaitSummary]) {
        let _ = summaries;
    }
}

impl<R: Reporter + ?Sized> Reporter for &mut R {
    fn on_tick(&mut self, snapshot: &TickSnapshot) {
        (**self).on_tick(snapshot);
    }

    fn on_finish(&mut self, summaries: &[LineWaitSummary]) {
        (**self).on_finish(summaries);
    }
}

/// Reporter that discards everything.
impl Reporter for () {
    fn on_tick(&mut self, _snapshot: &TickSnapshot) {}
}
