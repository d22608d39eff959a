//! Benchmark profiles for the railsim simulator.
//!
//! - [`ring_profile`]: `n` stations on a ring, three overlapping lines
//! - [`reference_profile`]: 48 stations, 40 trains per line
//! - [`stress_profile`]: 240 stations, 400 trains per line

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use railsim_engine::{DwellConfig, LineConfig, SimConfig};
use railsim_network::Station;

const LINE_NAMES: [&str; 3] = ["green", "yellow", "blue"];

/// Stations on a ring with links between neighbours only.
///
/// Line `k` starts a third of the way further round than line `k - 1` and
/// covers half of the ring, so neighbouring lines share track.
pub fn ring_profile(num_stations: usize, trains_per_line: u32, seed: u64, workers: usize) -> SimConfig {
    assert!(num_stations >= 4, "ring profile needs at least 4 stations");
    let name = |i: usize| format!("st{i:03}");

    let stations = (0..num_stations)
        .map(|i| Station::new(name(i), 0.5 + (i % 4) as f32 * 0.5))
        .collect();

    let mut link_costs = vec![vec![0u32; num_stations]; num_stations];
    for i in 0..num_stations {
        let j = (i + 1) % num_stations;
        let cost = 1 + (i % 4) as u32;
        link_costs[i][j] = cost;
        link_costs[j][i] = cost;
    }

    let span = num_stations / 2;
    let lines = LINE_NAMES
        .iter()
        .enumerate()
        .map(|(k, line)| {
            let start = k * num_stations / 3;
            LineConfig {
                name: line.to_string(),
                stations: (0..span).map(|s| name((start + s) % num_stations)).collect(),
                trains: trains_per_line,
            }
        })
        .collect();

    SimConfig {
        stations,
        link_costs,
        lines,
        ticks: u64::MAX,
        seed,
        dwell: DwellConfig::default(),
        workers: Some(workers),
    }
}

/// 48 stations, 40 trains per line.
pub fn reference_profile(seed: u64, workers: usize) -> SimConfig {
    ring_profile(48, 40, seed, workers)
}

/// 240 stations, 400 trains per line.
pub fn stress_profile(seed: u64, workers: usize) -> SimConfig {
    ring_profile(240, 400, seed, workers)
}
