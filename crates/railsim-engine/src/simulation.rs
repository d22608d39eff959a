//! Top-level simulation driver.

use railsim_core::RandomSource;
use tracing::info;

use crate::config::{ConfigError, SimConfig};
use crate::random::ChaChaSource;
use crate::scheduler::{TickResult, TickScheduler};
use crate::snapshot::Reporter;
use crate::stats::LineWaitSummary;

/// A validated, ready-to-run simulation.
///
/// # Examples
///
/// ```
/// use railsim_engine::{DwellConfig, LineConfig, SimConfig, Simulation};
/// use railsim_network::Station;
///
/// let config = SimConfig {
///     stations: vec![Station::new("a", 1.0), Station::new("b", 1.0)],
///     link_costs: vec![vec![0, 2], vec![2, 0]],
///     lines: vec![LineConfig {
///         name: "green".into(),
///         stations: vec!["a".into(), "b".into()],
///         trains: 2,
///     }],
///     ticks: 10,
///     seed: 7,
///     dwell: DwellConfig::default(),
///     workers: Some(1),
/// };
/// let mut sim = Simulation::new(config).unwrap();
/// let summaries = sim.run(());
/// assert_eq!(summaries.len(), 1);
/// assert!(sim.is_finished());
/// ```
#[derive(Debug)]
pub struct Simulation {
    scheduler: TickScheduler,
    trains_per_line: Vec<u32>,
    ticks: u64,
}

impl Simulation {
    /// Validate `config` and spawn trains, using a [`ChaChaSource`] seeded
    /// from `config.seed`.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        let rng = ChaChaSource::new(config.seed);
        Self::with_random(config, Box::new(rng))
    }

    /// Validate `config` and spawn trains with an explicit random source.
    pub fn with_random(config: SimConfig, rng: Box<dyn RandomSource>) -> Result<Self, ConfigError> {
        config.validate()?;
        let network = config.build_network()?;
        let trains_per_line = config.trains_per_line();
        let workers = config.resolved_worker_count();
        info!(
            stations = network.num_stations(),
            lines = network.lines().len(),
            links = network.links().len(),
            trains = trains_per_line.iter().sum::<u32>(),
            ticks = config.ticks,
            workers,
            "simulation configured"
        );
        let scheduler = TickScheduler::new(network, &trains_per_line, rng, config.dwell, workers);
        Ok(Self {
            scheduler,
            trains_per_line,
            ticks: config.ticks,
        })
    }

    /// Execute the next tick, or `None` once the configured count is done.
    pub fn step(&mut self) -> Option<TickResult> {
        if self.is_finished() {
            return None;
        }
        Some(self.scheduler.execute_tick())
    }

    /// Run all remaining ticks, feeding `reporter`, and return the final
    /// per-line wait statistics.
    pub fn run<R: Reporter>(&mut self, mut reporter: R) -> Vec<LineWaitSummary> {
        let mut contentions = 0u64;
        while let Some(result) = self.step() {
            contentions += u64::from(result.metrics.contentions);
            reporter.on_tick(&result.snapshot);
        }
        let summaries = self.summaries();
        reporter.on_finish(&summaries);
        info!(
            ticks = self.scheduler.current_tick().0,
            contentions,
            "simulation finished"
        );
        summaries
    }

    /// Per-line wait statistics gathered so far.
    pub fn summaries(&self) -> Vec<LineWaitSummary> {
        self.scheduler
            .stats()
            .summaries(self.scheduler.network(), &self.trains_per_line)
    }

    /// `true` once every configured tick has run.
    pub fn is_finished(&self) -> bool {
        self.scheduler.current_tick().0 >= self.ticks
    }

    /// Configured tick count.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// The underlying scheduler.
    pub fn scheduler(&self) -> &TickScheduler {
        &self.scheduler
    }
}
