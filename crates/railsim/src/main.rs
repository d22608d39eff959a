use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

use railsim::engine::{DwellConfig, Simulation};
use railsim::input;
use railsim::render::{drain, ChannelReporter, ConsoleReporter};
use structopt::StructOpt;
use tracing::info;
use tracing_subscriber::EnvFilter;

const REPORT_QUEUE: usize = 64;

#[derive(StructOpt, Debug)]
#[structopt(name = "railsim", about = "Simulate trains sharing a rail network")]
struct Opt {
    /// Input file; reads stdin when omitted
    #[structopt(name = "FILE", parse(from_os_str))]
    input: Option<PathBuf>,

    /// Seed for dwell-time draws
    #[structopt(long, default_value = "0")]
    seed: u64,

    /// Worker threads per phase (default: available parallelism)
    #[structopt(short, long)]
    workers: Option<usize>,

    /// Smallest dwell-time draw
    #[structopt(long)]
    dwell_min: Option<u32>,

    /// Number of distinct dwell-time draws
    #[structopt(long)]
    dwell_range: Option<u32>,

    /// Print only the final summary
    #[structopt(short, long)]
    quiet: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let opt = Opt::from_args();

    let mut config = match &opt.input {
        Some(path) => input::read(File::open(path)?)?,
        None => input::read(io::stdin().lock())?,
    };
    let defaults = DwellConfig::default();
    config.seed = opt.seed;
    config.workers = opt.workers;
    config.dwell = DwellConfig {
        min: opt.dwell_min.unwrap_or(defaults.min),
        range: opt.dwell_range.unwrap_or(defaults.range),
    };
    info!(seed = config.seed, dwell = ?config.dwell, "input loaded");

    let mut sim = Simulation::new(config)?;
    let mut console = ConsoleReporter::new(BufWriter::new(io::stdout()), sim.scheduler().network())
        .quiet(opt.quiet);

    let (reporter, rx) = ChannelReporter::bounded(REPORT_QUEUE);
    let printer = std::thread::spawn(move || {
        drain(&rx, &mut console);
        console.finish().map(drop)
    });

    sim.run(reporter);

    match printer.join() {
        Ok(result) => result?,
        Err(payload) => std::panic::resume_unwind(payload),
    }
    Ok(())
}
