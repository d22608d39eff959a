//! Input text through simulation to console output.

use railsim::engine::Simulation;
use railsim::input;
use railsim::render::{format_tick, ConsoleReporter};
use railsim_test_utils::{MinRandom, RecordingReporter};

const NETWORK: &str = "\
2
a,b
0 3
3 0
1.0,1.0
a,b
b,a
a,b
5
2,0,0
";

fn config() -> railsim::engine::SimConfig {
    let mut config = input::parse(NETWORK).unwrap();
    config.workers = Some(1);
    config.dwell.min = 2;
    config.dwell.range = 3;
    config
}

#[test]
fn renders_exact_tick_lines() {
    let mut sim = Simulation::with_random(config(), Box::new(MinRandom)).unwrap();
    let mut console = ConsoleReporter::new(Vec::new(), sim.scheduler().network());
    sim.run(&mut console);
    let out = String::from_utf8(console.finish().unwrap()).unwrap();
    let expected = "\
0: g0-s0, g1-s0
1: g0-s0, g1-s0
2: g0-s0->s1, g1-s0
3: g0-s0->s1, g1-s0
4: g0-s1, g1-s0->s1
Average waiting times:
green: 2 trains -> 0.0, 0.0, 0.0
yellow: 0 trains -> 0.0, 0.0, 0.0
blue: 0 trains -> 0.0, 0.0, 0.0
";
    assert_eq!(out, expected);
}

#[test]
fn quiet_output_is_summary_only() {
    let mut sim = Simulation::with_random(config(), Box::new(MinRandom)).unwrap();
    let mut console = ConsoleReporter::new(Vec::new(), sim.scheduler().network()).quiet(true);
    sim.run(&mut console);
    let out = String::from_utf8(console.finish().unwrap()).unwrap();
    assert!(out.starts_with("Average waiting times:\n"));
    assert_eq!(out.lines().count(), 4);
}

#[test]
fn recorded_snapshots_match_rendered_lines() {
    let mut sim = Simulation::new(config()).unwrap();
    let mut rec = RecordingReporter::new();
    sim.run(&mut rec);
    assert_eq!(rec.ticks.len(), 5);
    let first = format_tick(&rec.ticks[0], &['g', 'y', 'b']);
    assert!(first.starts_with("0: g0-s0, g1-s0"));
}
