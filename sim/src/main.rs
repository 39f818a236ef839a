use clap::Parser;
use std::path::PathBuf;
use swell::TICKS_PER_SECOND;

use crate::scenario::{load_scenario, Scenario};

mod init;
mod scenario;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// RON scenario file; the built-in scenario is used when omitted
    #[arg(short, long)]
    scenario: Option<PathBuf>,

    #[arg(short, long, default_value_t = 10 * TICKS_PER_SECOND)]
    ticks: u64,

    /// Report floater state every N ticks
    #[arg(short, long, default_value_t = TICKS_PER_SECOND)]
    log_every: u64,
}

fn main() {
    let args = Args::parse();

    if args.ticks == 0 {
        eprintln!("Error: ticks must be at least 1.");
        std::process::exit(1);
    }

    let scenario = match &args.scenario {
        Some(path) => match load_scenario(path) {
            Ok(scenario) => scenario,
            Err(err) => {
                eprintln!("Failed to load scenario {}: {err}", path.display());
                std::process::exit(1);
            }
        },
        None => Scenario::default(),
    };

    init::init(scenario, args.ticks, args.log_every);
}
