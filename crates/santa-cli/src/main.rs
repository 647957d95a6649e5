//! Santa Seal binary.
//!
//! # Usage
//!
//! ```bash
//! # Read assignments.json, write encrypted_assignments.json
//! santa-seal
//!
//! # Explicit paths and a reproducible draw
//! santa-seal --keys keys.json --output sealed.json --seed 2024
//! ```

use std::{path::PathBuf, process::ExitCode};

use clap::Parser;
use santa_cli::{DEFAULT_KEYS_PATH, DEFAULT_OUTPUT_PATH, RunConfig, run};
use santa_core::{DEFAULT_MAX_ATTEMPTS, GeneratorConfig};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Gift exchange assignment sealer
#[derive(Parser, Debug)]
#[command(name = "santa-seal")]
#[command(about = "Draws a gift exchange and encrypts each assignment to its giver's public key")]
#[command(version)]
struct Args {
    /// Key-store document (JSON object of base64 DER public keys)
    #[arg(short, long, default_value = DEFAULT_KEYS_PATH)]
    keys: PathBuf,

    /// Output document for the encrypted assignments
    #[arg(short, long, default_value = DEFAULT_OUTPUT_PATH)]
    output: PathBuf,

    /// Shuffles tried before giving up
    #[arg(long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    max_attempts: u32,

    /// Seed the shuffle for a reproducible draw
    #[arg(long)]
    seed: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Args {
    fn into_config(self) -> RunConfig {
        RunConfig {
            keys_path: self.keys,
            output_path: self.output,
            generator: GeneratorConfig { max_attempts: self.max_attempts },
            seed: self.seed,
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry().with(fmt::layer()).with(filter).init();

    match run(&args.into_config()) {
        Ok(summary) => {
            tracing::info!(
                participants = summary.participants,
                attempts = summary.attempts,
                path = %summary.output_path.display(),
                "done, encrypted assignments saved"
            );
            ExitCode::SUCCESS
        },
        Err(err) => {
            tracing::error!(stage = err.stage(), "{err}");
            ExitCode::FAILURE
        },
    }
}
