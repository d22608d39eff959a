//! Ready-made simulation configurations.

use railsim_engine::{DwellConfig, LineConfig, SimConfig};
use railsim_network::Station;

fn line(name: &str, stations: &[&str], trains: u32) -> LineConfig {
    LineConfig {
        name: name.to_string(),
        stations: stations.iter().map(|s| s.to_string()).collect(),
        trains,
    }
}

/// One line over two stations `a`/`b`, cost 3 both ways, popularity 1.0.
///
/// With [`MinRandom`](crate::MinRandom) and the dwell range below, every
/// loading lasts exactly one tick after the arrival tick.
pub fn two_station_config(trains: u32, ticks: u64) -> SimConfig {
    SimConfig {
        stations: vec![Station::new("a", 1.0), Station::new("b", 1.0)],
        link_costs: vec![vec![0, 3], vec![3, 0]],
        lines: vec![line("green", &["a", "b"], trains)],
        ticks,
        seed: 0,
        dwell: DwellConfig { min: 2, range: 3 },
        workers: Some(1),
    }
}

/// Two lines that both traverse the `x -> y` edge in the same direction.
pub fn shared_edge_config(trains: u32, ticks: u64) -> SimConfig {
    SimConfig {
        stations: vec![
            Station::new("w", 1.0),
            Station::new("x", 1.0),
            Station::new("y", 1.0),
            Station::new("z", 1.0),
        ],
        link_costs: vec![
            vec![0, 1, 0, 0],
            vec![1, 0, 4, 0],
            vec![0, 4, 0, 1],
            vec![0, 0, 1, 0],
        ],
        lines: vec![
            line("green", &["w", "x", "y"], trains),
            line("yellow", &["x", "y", "z"], trains),
        ],
        ticks,
        seed: 3,
        dwell: DwellConfig { min: 1, range: 3 },
        workers: Some(1),
    }
}

/// The three named lines over a small five-station network.
pub fn three_line_config(trains: [u32; 3], ticks: u64, workers: usize) -> SimConfig {
    let names = ["north", "market", "harbour", "museum", "park"];
    SimConfig {
        stations: names
            .iter()
            .zip([1.0, 1.4, 0.8, 1.1, 0.6])
            .map(|(n, p)| Station::new(*n, p))
            .collect(),
        link_costs: vec![
            vec![0, 2, 0, 3, 0],
            vec![2, 0, 4, 1, 0],
            vec![0, 4, 0, 0, 2],
            vec![3, 1, 0, 0, 5],
            vec![0, 0, 2, 5, 0],
        ],
        lines: vec![
            line("green", &["north", "market", "harbour", "park"], trains[0]),
            line("yellow", &["museum", "market", "north"], trains[1]),
            line("blue", &["north", "museum", "park", "harbour"], trains[2]),
        ],
        ticks,
        seed: 2024,
        dwell: DwellConfig::default(),
        workers: Some(workers),
    }
}
