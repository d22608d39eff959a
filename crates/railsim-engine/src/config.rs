//! Simulation configuration, validation, and error types.
//!
//! [`SimConfig`] is the builder input for a [`Simulation`](crate::Simulation).
//! [`validate()`](SimConfig::validate) checks every structural invariant
//! before the first tick; the simulation constructor calls
//! [`build_network()`](SimConfig::build_network) to obtain the resolved
//! topology.

use std::error::Error;
use std::fmt;

use railsim_network::{LineDef, LinkCosts, NetworkError, RailNetwork, Station, StationTable};

// ── DwellConfig ────────────────────────────────────────────────────

/// Random dwell-time parameters.
///
/// A train that starts loading draws `r` uniformly from
/// `[min, min + range)` and dwells `floor(popularity × r)` ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DwellConfig {
    /// Lower bound of the draw. Default: 2.
    pub min: u32,
    /// Width of the draw. Must be at least 1. Default: 9.
    pub range: u32,
}

impl Default for DwellConfig {
    fn default() -> Self {
        Self { min: 2, range: 9 }
    }
}

impl DwellConfig {
    /// Half-open draw range `[min, min + range)`.
    pub fn draw_range(&self) -> std::ops::Range<u32> {
        self.min..self.min.saturating_add(self.range)
    }
}

// ── LineConfig ─────────────────────────────────────────────────────

/// One line: its stations in forward order and how many trains run on it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineConfig {
    /// Display name.
    pub name: String,
    /// Station names in forward travel order.
    pub stations: Vec<String>,
    /// Number of trains spawned on this line.
    pub trains: u32,
}

impl LineConfig {
    /// Pair each line definition with its train count.
    ///
    /// Fails with [`ConfigError::TrainCountMismatch`] if the two lists
    /// differ in length.
    pub fn zip(lines: Vec<LineDef>, trains_per_line: &[u32]) -> Result<Vec<Self>, ConfigError> {
        if lines.len() != trains_per_line.len() {
            return Err(ConfigError::TrainCountMismatch {
                lines: lines.len(),
                counts: trains_per_line.len(),
            });
        }
        Ok(lines
            .into_iter()
            .zip(trains_per_line)
            .map(|(def, &trains)| Self {
                name: def.name,
                stations: def.stations,
                trains,
            })
            .collect())
    }

    fn def(&self) -> LineDef {
        LineDef {
            name: self.name.clone(),
            stations: self.stations.clone(),
        }
    }
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`SimConfig::validate()`].
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// Topology could not be resolved.
    Network(NetworkError),
    /// The per-line train counts do not match the number of lines.
    TrainCountMismatch {
        /// Number of lines declared.
        lines: usize,
        /// Number of train counts supplied.
        counts: usize,
    },
    /// The popularity list does not match the station list.
    PopularityCount {
        /// Number of stations.
        stations: usize,
        /// Number of popularity values.
        values: usize,
    },
    /// Dwell configuration is unusable.
    InvalidDwell {
        /// Description of which invariant was violated.
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network(e) => write!(f, "network: {e}"),
            Self::TrainCountMismatch { lines, counts } => {
                write!(f, "{counts} train counts supplied for {lines} lines")
            }
            Self::PopularityCount { stations, values } => {
                write!(f, "{values} popularity values supplied for {stations} stations")
            }
            Self::InvalidDwell { reason } => write!(f, "invalid dwell config: {reason}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Network(e) => Some(e),
            _ => None,
        }
    }
}

impl From<NetworkError> for ConfigError {
    fn from(e: NetworkError) -> Self {
        Self::Network(e)
    }
}

// ── SimConfig ──────────────────────────────────────────────────────

/// Complete configuration for a simulation run.
#[derive(Clone, Debug)]
pub struct SimConfig {
    /// Stations in id order.
    pub stations: Vec<Station>,
    /// Row-major `n × n` transit costs; `0` means no link.
    pub link_costs: Vec<Vec<u32>>,
    /// Lines in declaration order.
    pub lines: Vec<LineConfig>,
    /// Number of ticks to run.
    pub ticks: u64,
    /// Seed for the default random source.
    pub seed: u64,
    /// Dwell-time draw parameters.
    pub dwell: DwellConfig,
    /// Worker threads per phase. `None` = auto-detect.
    pub workers: Option<usize>,
}

impl SimConfig {
    /// Build stations from parallel name and popularity lists.
    pub fn stations_from(names: Vec<String>, popularity: &[f32]) -> Result<Vec<Station>, ConfigError> {
        if names.len() != popularity.len() {
            return Err(ConfigError::PopularityCount {
                stations: names.len(),
                values: popularity.len(),
            });
        }
        Ok(names
            .into_iter()
            .zip(popularity)
            .map(|(name, &p)| Station::new(name, p))
            .collect())
    }

    /// Validate all structural invariants.
    ///
    /// This is a pure validation pass: the resolved network is discarded.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_dwell()?;
        let _ = self.build_network()?;
        Ok(())
    }

    /// Resolve the topology.
    pub fn build_network(&self) -> Result<RailNetwork, ConfigError> {
        let stations = StationTable::new(self.stations.clone())?;
        let costs = LinkCosts::from_rows(self.link_costs.clone())?;
        let defs: Vec<LineDef> = self.lines.iter().map(LineConfig::def).collect();
        Ok(RailNetwork::build(stations, costs, &defs)?)
    }

    /// Train count per line, in line order.
    pub fn trains_per_line(&self) -> Vec<u32> {
        self.lines.iter().map(|l| l.trains).collect()
    }

    /// Resolve the worker count, applying auto-detection if `None`.
    ///
    /// Explicit values are clamped to `[1, 64]`; auto-detection uses the
    /// available parallelism clamped to `[1, 16]`.
    pub fn resolved_worker_count(&self) -> usize {
        match self.workers {
            Some(n) => n.clamp(1, 64),
            None => std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4)
                .clamp(1, 16),
        }
    }

    fn validate_dwell(&self) -> Result<(), ConfigError> {
        if self.dwell.range == 0 {
            return Err(ConfigError::InvalidDwell {
                reason: "range must be at least 1".to_string(),
            });
        }
        if self.dwell.min.checked_add(self.dwell.range).is_none() {
            return Err(ConfigError::InvalidDwell {
                reason: format!(
                    "min ({}) + range ({}) overflows u32",
                    self.dwell.min, self.dwell.range
                ),
            });
        }
        Ok(())
    }
}
