//! Incremental station-wait statistics.
//!
//! A *wait* is the number of ticks a loading bay stood empty between one
//! train's departure and the next train's arrival. Each
//! [`StationWaitStats`] keeps a running mean, min, and max over those
//! waits without retaining individual samples.
//!
//! Workers never touch the table directly. They emit [`StatEvent`]s,
//! which the scheduler applies after the phase barrier. Lock exclusivity
//! guarantees at most one event per station side per phase, so the
//! application order inside a phase does not matter.

use railsim_core::{LineId, StationSide, TickId};
use railsim_network::RailNetwork;

/// Wait statistics for one (line, station side).
#[derive(Clone, Debug, PartialEq)]
pub struct StationWaitStats {
    count: u64,
    mean_wait: f64,
    min_wait: u64,
    max_wait: u64,
    last_departure: Option<TickId>,
}

impl Default for StationWaitStats {
    fn default() -> Self {
        Self {
            count: 0,
            mean_wait: 0.0,
            min_wait: u64::MAX,
            max_wait: 0,
            last_departure: None,
        }
    }
}

impl StationWaitStats {
    /// Fresh statistics with no arrivals.
    pub fn new() -> Self {
        Self::default()
    }

    /// A train started loading at `tick`.
    ///
    /// The wait is measured from the previous departure, or from tick 0
    /// if no train has departed yet.
    pub fn record_arrival(&mut self, tick: TickId) {
        let since = self.last_departure.map_or(0, |t| t.0);
        let wait = tick.0.saturating_sub(since);
        self.count += 1;
        self.mean_wait += (wait as f64 - self.mean_wait) / self.count as f64;
        self.min_wait = self.min_wait.min(wait);
        self.max_wait = self.max_wait.max(wait);
    }

    /// A train finished loading at `tick`.
    pub fn record_departure(&mut self, tick: TickId) {
        self.last_departure = Some(tick);
    }

    /// Number of arrivals observed.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Running mean wait; `0.0` before the first arrival.
    pub fn mean_wait(&self) -> f64 {
        self.mean_wait
    }

    /// Shortest wait, `None` before the first arrival.
    pub fn min_wait(&self) -> Option<u64> {
        (self.count > 0).then_some(self.min_wait)
    }

    /// Longest wait; `0` before the first arrival.
    pub fn max_wait(&self) -> u64 {
        self.max_wait
    }

    /// Tick of the most recent departure.
    pub fn last_departure(&self) -> Option<TickId> {
        self.last_departure
    }
}

/// An arrival or departure reported by a train during a phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatEvent {
    /// The train acquired the side's loading bay.
    Arrival {
        /// Line of the reporting train.
        line: LineId,
        /// Loading bay.
        side: StationSide,
        /// Tick of the event.
        tick: TickId,
    },
    /// The train released the side's loading bay.
    Departure {
        /// Line of the reporting train.
        line: LineId,
        /// Loading bay.
        side: StationSide,
        /// Tick of the event.
        tick: TickId,
    },
}

/// Per-line aggregate over all observed station sides.
#[derive(Clone, Debug, PartialEq)]
pub struct LineWaitSummary {
    /// Line id.
    pub line: LineId,
    /// Line display name.
    pub name: String,
    /// Trains configured on the line.
    pub trains: u32,
    /// Station sides with at least one arrival.
    pub sides_observed: usize,
    /// Total arrivals across all sides.
    pub arrivals: u64,
    /// Arrival-weighted mean wait.
    pub mean_wait: f64,
    /// Mean over sides of each side's minimum wait.
    pub mean_min: f64,
    /// Mean over sides of each side's maximum wait.
    pub mean_max: f64,
}

/// Line-level aggregate of [`StationWaitStats`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WaitAggregate {
    /// Station sides with at least one arrival.
    pub sides_observed: usize,
    /// Total arrivals across all sides.
    pub arrivals: u64,
    /// Arrival-weighted mean wait.
    pub mean_wait: f64,
    /// Mean of per-side minimum waits.
    pub mean_min: f64,
    /// Mean of per-side maximum waits.
    pub mean_max: f64,
}

/// Statistics for every (line, station side).
#[derive(Clone, Debug)]
pub struct WaitStatsTable {
    num_stations: u32,
    lines: Vec<Vec<StationWaitStats>>,
}

impl WaitStatsTable {
    /// Empty table for `num_lines` lines over `num_stations` stations.
    pub fn new(num_lines: usize, num_stations: u32) -> Self {
        let sides = 2 * num_stations as usize;
        Self {
            num_stations,
            lines: (0..num_lines)
                .map(|_| vec![StationWaitStats::default(); sides])
                .collect(),
        }
    }

    /// Statistics for one (line, side).
    pub fn get(&self, line: LineId, side: StationSide) -> Option<&StationWaitStats> {
        self.lines
            .get(line.0 as usize)?
            .get(side.index(self.num_stations))
    }

    /// Fold one event into the table. Events for unknown lines or sides
    /// are ignored.
    pub fn apply(&mut self, event: &StatEvent) {
        let (line, side) = match *event {
            StatEvent::Arrival { line, side, .. } | StatEvent::Departure { line, side, .. } => {
                (line, side)
            }
        };
        let idx = side.index(self.num_stations);
        let Some(stats) = self
            .lines
            .get_mut(line.0 as usize)
            .and_then(|l| l.get_mut(idx))
        else {
            return;
        };
        match *event {
            StatEvent::Arrival { tick, .. } => stats.record_arrival(tick),
            StatEvent::Departure { tick, .. } => stats.record_departure(tick),
        }
    }

    /// Aggregate one line.
    ///
    /// `mean_wait` weights each side by its arrival count; `mean_min` and
    /// `mean_max` weight each observed side equally. Everything is zero
    /// when no side has been observed.
    pub fn aggregate(&self, line: LineId) -> WaitAggregate {
        let Some(sides) = self.lines.get(line.0 as usize) else {
            return WaitAggregate::default();
        };
        let observed: Vec<&StationWaitStats> = sides.iter().filter(|s| s.count > 0).collect();
        if observed.is_empty() {
            return WaitAggregate::default();
        }
        let k = observed.len() as f64;
        let arrivals: u64 = observed.iter().map(|s| s.count).sum();
        let weighted: f64 = observed.iter().map(|s| s.mean_wait * s.count as f64).sum();
        let mins: f64 = observed.iter().map(|s| s.min_wait as f64).sum();
        let maxs: f64 = observed.iter().map(|s| s.max_wait as f64).sum();
        WaitAggregate {
            sides_observed: observed.len(),
            arrivals,
            mean_wait: weighted / arrivals as f64,
            mean_min: mins / k,
            mean_max: maxs / k,
        }
    }

    /// Aggregate every line of `network`.
    pub fn summaries(&self, network: &RailNetwork, trains_per_line: &[u32]) -> Vec<LineWaitSummary> {
        network
            .lines()
            .iter()
            .map(|line| {
                let agg = self.aggregate(line.id());
                LineWaitSummary {
                    line: line.id(),
                    name: line.name().to_string(),
                    trains: trains_per_line
                        .get(line.id().0 as usize)
                        .copied()
                        .unwrap_or(0),
                    sides_observed: agg.sides_observed,
                    arrivals: agg.arrivals,
                    mean_wait: agg.mean_wait,
                    mean_min: agg.mean_min,
                    mean_max: agg.mean_max,
                }
            })
            .collect()
    }
}
