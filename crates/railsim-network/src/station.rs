//! Stations and the name → index table.

use indexmap::IndexMap;
use railsim_core::StationId;

use crate::error::NetworkError;

/// A physical station.
#[derive(Clone, Debug, PartialEq)]
pub struct Station {
    /// Display and lookup name.
    pub name: String,
    /// Multiplier applied to the random dwell time.
    pub popularity: f32,
}

impl Station {
    /// Create a station.
    pub fn new(name: impl Into<String>, popularity: f32) -> Self {
        Self {
            name: name.into(),
            popularity,
        }
    }
}

/// All stations of a network, indexed by [`StationId`] and by name.
///
/// Insertion order defines the ids: the n-th station is `StationId(n)`.
#[derive(Clone, Debug)]
pub struct StationTable {
    stations: Vec<Station>,
    by_name: IndexMap<String, StationId>,
}

impl StationTable {
    /// Build the table, rejecting empty input, duplicate names, and
    /// popularity factors that are NaN, infinite, or negative.
    pub fn new(stations: Vec<Station>) -> Result<Self, NetworkError> {
        if stations.is_empty() {
            return Err(NetworkError::NoStations);
        }
        let mut by_name = IndexMap::with_capacity(stations.len());
        for (i, station) in stations.iter().enumerate() {
            if !station.popularity.is_finite() || station.popularity < 0.0 {
                return Err(NetworkError::InvalidPopularity {
                    station: station.name.clone(),
                    value: station.popularity,
                });
            }
            if by_name
                .insert(station.name.clone(), StationId(i as u32))
                .is_some()
            {
                return Err(NetworkError::DuplicateStation {
                    name: station.name.clone(),
                });
            }
        }
        Ok(Self { stations, by_name })
    }

    /// Number of stations.
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    /// Always `false`; construction rejects an empty table.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Resolve a station name.
    pub fn lookup(&self, name: &str) -> Option<StationId> {
        self.by_name.get(name).copied()
    }

    /// Station by id.
    pub fn get(&self, id: StationId) -> Option<&Station> {
        self.stations.get(id.0 as usize)
    }

    /// Popularity of a station, `1.0` for an out-of-range id.
    pub fn popularity(&self, id: StationId) -> f32 {
        self.get(id).map_or(1.0, |s| s.popularity)
    }

    /// Name of a station, `"?"` for an out-of-range id.
    pub fn name(&self, id: StationId) -> &str {
        self.get(id).map_or("?", |s| s.name.as_str())
    }

    /// Iterate `(id, station)` in id order.
    pub fn iter(&self) -> impl Iterator<Item = (StationId, &Station)> {
        self.stations
            .iter()
            .enumerate()
            .map(|(i, s)| (StationId(i as u32), s))
    }
}
