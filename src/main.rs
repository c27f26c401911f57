use anyhow::Result;
use clap::Parser;
use neurochip_core::init_logging;
use neurochip_lib::app::{render_report, App};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Custom config file path (defaults to ./config.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of random stimuli to drive
    #[arg(short, long, default_value_t = 100)]
    steps: u64,

    /// RNG seed, overrides the config file
    #[arg(long)]
    seed: Option<u64>,

    /// Time each stimulus
    #[arg(long)]
    latency: bool,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging();

    let mut config = App::load_config(args.config.as_deref())?;
    if args.seed.is_some() {
        config.simulation.seed = args.seed;
    }
    if args.latency {
        config.simulation.measure_latency = true;
    }

    tracing::info!(
        neurons = config.total_neurons(),
        fingerprint = %config.fingerprint(),
        "Initializing neuromorphic chip"
    );
    let mut app = App::new(config)?;
    let report = app.run(args.steps);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_report(&report));
    }
    Ok(())
}
