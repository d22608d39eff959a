//! Test utilities and deterministic stubs for railsim development.
//!
//! Provides [`RandomSource`] stubs with predictable draws, a
//! [`RecordingReporter`] that keeps every snapshot, and ready-made
//! configurations in [`fixtures`].

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::ops::Range;

use railsim_core::{DrawKey, RandomSource, TrainId};
use railsim_engine::{LineWaitSummary, Position, Reporter, TickSnapshot, TrainStatus};

/// Always draws the start of the range.
#[derive(Clone, Copy, Debug, Default)]
pub struct MinRandom;

impl RandomSource for MinRandom {
    fn uniform(&self, _key: DrawKey, range: Range<u32>) -> u32 {
        range.start
    }
}

/// Always draws `value`, clamped into the range.
#[derive(Clone, Copy, Debug)]
pub struct FixedRandom(pub u32);

impl RandomSource for FixedRandom {
    fn uniform(&self, _key: DrawKey, range: Range<u32>) -> u32 {
        if range.is_empty() {
            return range.start;
        }
        self.0.clamp(range.start, range.end - 1)
    }
}

/// Keeps every snapshot and the final summaries.
#[derive(Clone, Debug, Default)]
pub struct RecordingReporter {
    pub ticks: Vec<TickSnapshot>,
    pub summaries: Vec<LineWaitSummary>,
    pub finished: bool,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Status and position of `train` at every recorded tick where it was
    /// admitted.
    pub fn history(&self, train: TrainId) -> Vec<(TrainStatus, Position)> {
        self.ticks
            .iter()
            .filter_map(|s| s.trains.iter().find(|t| t.id == train))
            .map(|t| (t.status, t.position))
            .collect()
    }
}

impl Reporter for RecordingReporter {
    fn on_tick(&mut self, snapshot: &TickSnapshot) {
        self.ticks.push(snapshot.clone());
    }

    fn on_finish(&mut self, summaries: &[LineWaitSummary]) {
        self.summaries = summaries.to_vec();
        self.finished = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use railsim_core::{LineId, TickId};

    fn key() -> DrawKey {
        DrawKey {
            tick: TickId(0),
            train: TrainId::new(LineId(0), 0),
        }
    }

    #[test]
    fn fixed_random_clamps() {
        assert_eq!(FixedRandom(100).uniform(key(), 2..11), 10);
        assert_eq!(FixedRandom(0).uniform(key(), 2..11), 2);
        assert_eq!(FixedRandom(5).uniform(key(), 2..11), 5);
    }

    #[test]
    fn min_random_is_range_start() {
        assert_eq!(MinRandom.uniform(key(), 7..9), 7);
    }
}
