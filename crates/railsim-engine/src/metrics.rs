//! Per-tick timing and counters.

/// Timings and event counts for one executed tick.
///
/// Durations are wall-clock microseconds. Counters are summed across all
/// workers of the phase that produced them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickMetrics {
    /// Whole tick, including snapshot.
    pub total_us: u64,
    /// Phase 1: resolving timers that were already at zero.
    pub early_resolve_us: u64,
    /// Phase 2: decrement and resolve.
    pub decrement_us: u64,
    /// Phase 3: acquisitions.
    pub advance_us: u64,
    /// Trains that participated in the tick.
    pub admitted_trains: usize,
    /// Resolutions in phase 1.
    pub early_resolutions: u32,
    /// Resolutions in phase 2.
    pub resolutions: u32,
    /// Successful acquisitions in phase 3.
    pub acquisitions: u32,
    /// Failed acquisitions in phase 3.
    pub contentions: u32,
    /// Locks held at the end of the tick.
    pub locks_held: usize,
}
