//! Property tests over randomly generated networks.

use proptest::prelude::*;
use railsim_engine::{DwellConfig, LineConfig, SimConfig, Simulation, TrainStatus};
use railsim_network::Station;

const MAX_COST: u32 = 5;
const DWELL: DwellConfig = DwellConfig { min: 1, range: 4 };
// floor(2.0 * 4)
const MAX_DWELL: u32 = 8;

fn arb_config() -> impl Strategy<Value = SimConfig> {
    (2usize..6)
        .prop_flat_map(|n| {
            let costs = prop::collection::vec(prop::collection::vec(1..=MAX_COST, n), n);
            let popularity = prop::collection::vec(0.5f32..=2.0, n);
            let route = prop::collection::vec(0..n, 2..7);
            let lines = prop::collection::vec((route, 0u32..6), 1..4);
            (Just(n), costs, popularity, lines, any::<u64>(), 1usize..4)
        })
        .prop_map(|(n, mut costs, popularity, lines, seed, workers)| {
            for (i, row) in costs.iter_mut().enumerate() {
                row[i] = 0;
            }
            let name = |i: usize| format!("s{i}");
            let lines = lines
                .into_iter()
                .enumerate()
                .map(|(li, (mut route, trains))| {
                    route.dedup();
                    if route.len() < 2 {
                        route = vec![0, 1];
                    }
                    LineConfig {
                        name: format!("line{li}"),
                        stations: route.into_iter().map(name).collect(),
                        trains,
                    }
                })
                .collect();
            SimConfig {
                stations: (0..n).zip(popularity).map(|(i, p)| Station::new(name(i), p)).collect(),
                link_costs: costs,
                lines,
                ticks: 80,
                seed,
                dwell: DWELL,
                workers: Some(workers),
            }
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    /// Locks are always released within one activity, so some train makes
    /// progress in every window long enough for every holder to finish.
    #[test]
    fn no_deadlock(config in arb_config()) {
        let any_trains = config.lines.iter().any(|l| l.trains > 0);
        let mut sim = Simulation::new(config).unwrap();
        let window = (MAX_COST.max(MAX_DWELL) + 2) as usize;
        let mut acquisitions = Vec::new();

        while let Some(result) = sim.step() {
            acquisitions.push(result.metrics.acquisitions);
            let trains = sim.scheduler().trains();
            let holders = trains.iter().filter(|t| t.held_resource().is_some()).count();
            prop_assert_eq!(holders, sim.scheduler().locks().held_count());
            for t in trains {
                if matches!(t.status(), TrainStatus::Loading | TrainStatus::Link) {
                    prop_assert!(t.time_left() < i64::from(MAX_COST.max(MAX_DWELL)));
                }
            }
        }

        if any_trains {
            for w in acquisitions.windows(window) {
                prop_assert!(w.iter().any(|&a| a > 0), "no acquisition in {:?}", w);
            }
        }
    }
}
