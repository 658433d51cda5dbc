//! Generate a batch of consensus scenarios into a directory.
//!
//! Usage: `raft-scenarios <target-dir>`
//!
//! Prints the absolute path of each scenario file on stdout, one per line.

use std::path::PathBuf;
use std::process;

use clap::Parser;
use raft_scenarios::{BatchDriver, ScenarioConfig};
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "raft-scenarios", version)]
#[command(about = "Generate randomized, convergence-guaranteeing consensus test scenarios")]
struct Args {
    /// Directory the scenario files are written to (created if absent)
    target_dir: PathBuf,
}

fn main() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .try_init();

    let args = Args::parse();

    match BatchDriver::new(ScenarioConfig::default()).generate(&args.target_dir) {
        Ok(set) => {
            for path in set.paths() {
                println!("{}", path.display());
            }
        }
        Err(err) => {
            error!("{}", err);
            process::exit(1);
        }
    }
}
