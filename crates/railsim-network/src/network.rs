//! The assembled network: stations, costs, links, and lines.

use railsim_core::{Direction, LineId, NodeIdx, StationId, StationSide};

use crate::cost::LinkCosts;
use crate::error::NetworkError;
use crate::line::{LineDef, LineNetwork, Node};
use crate::link::LinkRegistry;
use crate::station::StationTable;

/// Immutable network shared by every train for the whole run.
///
/// # Examples
///
/// ```
/// use railsim_network::{LineDef, LinkCosts, RailNetwork, Station, StationTable};
/// use railsim_core::NodeIdx;
///
/// let stations = StationTable::new(vec![
///     Station::new("a", 1.0),
///     Station::new("b", 1.0),
/// ]).unwrap();
/// let costs = LinkCosts::from_rows(vec![vec![0, 3], vec![3, 0]]).unwrap();
/// let net = RailNetwork::build(stations, costs, &[LineDef::new("green", ["a", "b"])]).unwrap();
///
/// let line = &net.lines()[0];
/// assert_eq!(line.size(), 4);
/// assert!(!line.ends_at(NodeIdx(0)));
/// assert!(line.ends_at(NodeIdx(1)));
/// assert_eq!(net.links().len(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct RailNetwork {
    stations: StationTable,
    costs: LinkCosts,
    links: LinkRegistry,
    lines: Vec<LineNetwork>,
}

impl RailNetwork {
    /// Resolve every line against the station table and cost matrix.
    ///
    /// Fails if the cost matrix does not match the station count, if no
    /// lines are declared, or if any line is empty, names an unknown
    /// station, repeats a station consecutively, or traverses an edge
    /// with no cost.
    pub fn build(
        stations: StationTable,
        costs: LinkCosts,
        lines: &[LineDef],
    ) -> Result<Self, NetworkError> {
        if costs.dimension() != stations.len() {
            return Err(NetworkError::CostMatrixShape {
                expected: stations.len(),
                row: None,
                found: costs.dimension(),
            });
        }
        if lines.is_empty() {
            return Err(NetworkError::NoLines);
        }

        let mut links = LinkRegistry::new();
        let mut built = Vec::with_capacity(lines.len());
        for (i, def) in lines.iter().enumerate() {
            let ids = resolve_stations(def, &stations)?;
            let sides = unroll(&ids);
            let len = sides.len();
            let mut nodes = Vec::with_capacity(len);
            for (k, side) in sides.iter().enumerate() {
                let next = (k + 1) % len;
                let to = sides[next].station;
                let (link, transit_cost) = if to == side.station {
                    (None, None)
                } else {
                    let cost = costs.get(side.station, to).ok_or_else(|| {
                        NetworkError::MissingLinkCost {
                            line: def.name.clone(),
                            from: stations.name(side.station).to_string(),
                            to: stations.name(to).to_string(),
                        }
                    })?;
                    (Some(links.register(side.station, to, cost)), Some(cost))
                };
                nodes.push(Node {
                    side: *side,
                    next: NodeIdx(next as u32),
                    link,
                    transit_cost,
                });
            }
            built.push(LineNetwork::from_nodes(
                LineId(i as u32),
                def.name.clone(),
                nodes,
            ));
        }

        Ok(Self {
            stations,
            costs,
            links,
            lines: built,
        })
    }

    /// Station table.
    pub fn stations(&self) -> &StationTable {
        &self.stations
    }

    /// Number of physical stations.
    pub fn num_stations(&self) -> u32 {
        self.stations.len() as u32
    }

    /// Size of the station-side index space, `2 * num_stations`.
    pub fn side_count(&self) -> usize {
        2 * self.stations.len()
    }

    /// Cost matrix as supplied.
    pub fn costs(&self) -> &LinkCosts {
        &self.costs
    }

    /// Registered links.
    pub fn links(&self) -> &LinkRegistry {
        &self.links
    }

    /// All lines in declaration order.
    pub fn lines(&self) -> &[LineNetwork] {
        &self.lines
    }

    /// Line by id.
    pub fn line(&self, id: LineId) -> Option<&LineNetwork> {
        self.lines.get(id.0 as usize)
    }
}

fn resolve_stations(def: &LineDef, stations: &StationTable) -> Result<Vec<StationId>, NetworkError> {
    if def.stations.is_empty() {
        return Err(NetworkError::EmptyLine {
            line: def.name.clone(),
        });
    }
    let mut ids: Vec<StationId> = Vec::with_capacity(def.stations.len());
    for name in &def.stations {
        let id = stations
            .lookup(name)
            .ok_or_else(|| NetworkError::UnknownStation {
                line: def.name.clone(),
                station: name.clone(),
            })?;
        if ids.last() == Some(&id) {
            return Err(NetworkError::ConsecutiveDuplicate {
                line: def.name.clone(),
                station: name.clone(),
            });
        }
        ids.push(id);
    }
    Ok(ids)
}

/// Forward run followed by the reversed backward run.
fn unroll(ids: &[StationId]) -> Vec<StationSide> {
    ids.iter()
        .map(|&s| StationSide::new(s, Direction::Forward))
        .chain(
            ids.iter()
                .rev()
                .map(|&s| StationSide::new(s, Direction::Backward)),
        )
        .collect()
}
