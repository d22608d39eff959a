//! Three-phase tick execution.
//!
//! A tick runs three phases over the train array, each one a full barrier:
//!
//! 1. **Early resolve**: trains whose timer was already at zero when the
//!    tick began complete their activity.
//! 2. **Decrement**: running timers count down; those reaching zero
//!    complete their activity.
//! 3. **Advance**: trains that have not acted yet try to take the loading
//!    bay or link their status calls for.
//!
//! Within a phase the array is split into contiguous chunks, one per
//! worker, run on scoped threads. Joining the scope is the barrier. Trains
//! only interact through the lock table; statistics events are collected
//! per worker and applied after the barrier.

use std::time::Instant;

use railsim_core::{RandomSource, TickId, TrainId};
use railsim_network::RailNetwork;
use smallvec::SmallVec;
use tracing::debug;

use crate::config::DwellConfig;
use crate::locks::ResourceLockTable;
use crate::metrics::TickMetrics;
use crate::snapshot::TickSnapshot;
use crate::stats::{StatEvent, WaitStatsTable};
use crate::train::{PhaseContext, StepOutcome, Train};

/// Output of [`TickScheduler::execute_tick`].
#[derive(Clone, Debug)]
pub struct TickResult {
    /// State of every admitted train after the tick.
    pub snapshot: TickSnapshot,
    /// Timings and counters.
    pub metrics: TickMetrics,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    EarlyResolve,
    Decrement,
    Advance,
}

/// What one worker observed during one phase.
#[derive(Debug, Default)]
struct PhaseTally {
    resolutions: u32,
    acquisitions: u32,
    contentions: u32,
    events: SmallVec<[StatEvent; 8]>,
}

impl PhaseTally {
    fn record(&mut self, outcome: StepOutcome) {
        match outcome {
            StepOutcome::Idle | StepOutcome::Counted => {}
            StepOutcome::Resolved(event) => {
                self.resolutions += 1;
                self.events.extend(event);
            }
            StepOutcome::Acquired(event) => {
                self.acquisitions += 1;
                self.events.extend(event);
            }
            StepOutcome::Contended => self.contentions += 1,
        }
    }

    fn merge(&mut self, other: PhaseTally) {
        self.resolutions += other.resolutions;
        self.acquisitions += other.acquisitions;
        self.contentions += other.contentions;
        self.events.extend(other.events);
    }
}

/// Owns all mutable simulation state and advances it one tick at a time.
pub struct TickScheduler {
    network: RailNetwork,
    locks: ResourceLockTable,
    stats: WaitStatsTable,
    trains: Vec<Train>,
    rng: Box<dyn RandomSource>,
    dwell: DwellConfig,
    workers: usize,
    current_tick: TickId,
}

impl TickScheduler {
    /// Spawn `trains_per_line[i]` trains on line `i`, all waiting at node 0.
    ///
    /// Trains are stored line-major, then by local id. Lines beyond the
    /// end of `trains_per_line` get no trains.
    pub fn new(
        network: RailNetwork,
        trains_per_line: &[u32],
        rng: Box<dyn RandomSource>,
        dwell: DwellConfig,
        workers: usize,
    ) -> Self {
        let trains = network
            .lines()
            .iter()
            .zip(trains_per_line)
            .flat_map(|(line, &count)| {
                (0..count).map(move |local| Train::new(TrainId::new(line.id(), local)))
            })
            .collect();
        let locks = ResourceLockTable::for_network(&network);
        let stats = WaitStatsTable::new(network.lines().len(), network.num_stations());
        Self {
            network,
            locks,
            stats,
            trains,
            rng,
            dwell,
            workers: workers.max(1),
            current_tick: TickId(0),
        }
    }

    /// The tick the next call to [`execute_tick`](Self::execute_tick) runs.
    pub fn current_tick(&self) -> TickId {
        self.current_tick
    }

    /// The network being simulated.
    pub fn network(&self) -> &RailNetwork {
        &self.network
    }

    /// Lock table.
    pub fn locks(&self) -> &ResourceLockTable {
        &self.locks
    }

    /// Wait statistics gathered so far.
    pub fn stats(&self) -> &WaitStatsTable {
        &self.stats
    }

    /// All trains, admitted or not.
    pub fn trains(&self) -> &[Train] {
        &self.trains
    }

    /// Worker threads used per phase.
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Run one tick through all three phases.
    pub fn execute_tick(&mut self) -> TickResult {
        let tick = self.current_tick;
        let started = Instant::now();
        let ctx = PhaseContext {
            tick,
            network: &self.network,
            locks: &self.locks,
            rng: &*self.rng,
            dwell: self.dwell,
        };

        let mut metrics = TickMetrics::default();

        let t = Instant::now();
        let early = run_phase(&mut self.trains, &ctx, Phase::EarlyResolve, self.workers);
        metrics.early_resolve_us = t.elapsed().as_micros() as u64;
        metrics.early_resolutions = early.resolutions;
        for event in &early.events {
            self.stats.apply(event);
        }

        let t = Instant::now();
        let decrement = run_phase(&mut self.trains, &ctx, Phase::Decrement, self.workers);
        metrics.decrement_us = t.elapsed().as_micros() as u64;
        metrics.resolutions = decrement.resolutions;
        for event in &decrement.events {
            self.stats.apply(event);
        }

        let t = Instant::now();
        let advance = run_phase(&mut self.trains, &ctx, Phase::Advance, self.workers);
        metrics.advance_us = t.elapsed().as_micros() as u64;
        metrics.acquisitions = advance.acquisitions;
        metrics.contentions = advance.contentions;
        for event in &advance.events {
            self.stats.apply(event);
        }

        let snapshot = self.snapshot();
        for train in &mut self.trains {
            train.end_tick();
        }

        metrics.admitted_trains = snapshot.trains.len();
        metrics.locks_held = self.locks.held_count();
        metrics.total_us = started.elapsed().as_micros() as u64;

        debug!(
            tick = tick.0,
            admitted = metrics.admitted_trains,
            early_resolutions = metrics.early_resolutions,
            resolutions = metrics.resolutions,
            acquisitions = metrics.acquisitions,
            contentions = metrics.contentions,
            locks_held = metrics.locks_held,
            total_us = metrics.total_us,
            "tick complete"
        );

        self.current_tick = tick.next();
        TickResult { snapshot, metrics }
    }

    /// Views of the admitted trains at the current tick.
    pub fn snapshot(&self) -> TickSnapshot {
        let tick = self.current_tick;
        let trains = self
            .trains
            .iter()
            .filter(|t| t.is_admitted(tick))
            .filter_map(|t| self.network.line(t.id().line).map(|line| t.view(line)))
            .collect();
        TickSnapshot { tick, trains }
    }
}

impl std::fmt::Debug for TickScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TickScheduler")
            .field("current_tick", &self.current_tick)
            .field("trains", &self.trains.len())
            .field("workers", &self.workers)
            .field("dwell", &self.dwell)
            .finish_non_exhaustive()
    }
}

fn run_phase(trains: &mut [Train], ctx: &PhaseContext<'_>, phase: Phase, workers: usize) -> PhaseTally {
    if workers <= 1 || trains.len() < 2 {
        return run_chunk(trains, ctx, phase);
    }
    let chunk_len = trains.len().div_ceil(workers);
    std::thread::scope(|scope| {
        let handles: Vec<_> = trains
            .chunks_mut(chunk_len)
            .map(|chunk| scope.spawn(move || run_chunk(chunk, ctx, phase)))
            .collect();
        let mut total = PhaseTally::default();
        for handle in handles {
            match handle.join() {
                Ok(tally) => total.merge(tally),
                Err(payload) => std::panic::resume_unwind(payload),
            }
        }
        total
    })
}

fn run_chunk(trains: &mut [Train], ctx: &PhaseContext<'_>, phase: Phase) -> PhaseTally {
    let mut tally = PhaseTally::default();
    for train in trains.iter_mut().filter(|t| t.is_admitted(ctx.tick)) {
        let outcome = match phase {
            Phase::EarlyResolve => train.resolve_if_matured(ctx),
            Phase::Decrement => train.decrement_and_resolve(ctx),
            Phase::Advance => train.advance(ctx),
        };
        tally.record(outcome);
    }
    tally
}
