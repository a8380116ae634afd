//! Conformance test harness for OpenID Connect relying-party clients.
//!
//! Starts a mock OpenID provider, launches the client with the provider's origin as its only
//! argument and drives it through the scenario list over stdin/stdout.
//!
//! Exit code: `0` if every assertion passed, `1` if any failed, `2` if the harness itself broke.

use clap::Parser;
use figment::providers::Serialized;
use oidc_conformance::harness::{self, HarnessConfig, RunOutcome};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "oidc-conformance")]
#[command(about = "Conformance test harness for OpenID Connect relying-party clients")]
struct Args {
    /// Executable that runs the client
    #[arg(long)]
    bin: Option<PathBuf>,

    /// Log all communication with the client
    #[arg(long)]
    debug: bool,

    /// Name of a scenario not to run (repeatable)
    #[arg(long)]
    skip: Vec<String>,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging();

    let config = match load_config(args) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("invalid configuration: {e}");
            return ExitCode::from(2);
        }
    };

    match harness::run(&config) {
        Ok(RunOutcome::Passed) => ExitCode::SUCCESS,
        Ok(RunOutcome::Failed { .. }) => ExitCode::from(1),
        Err(e) => {
            tracing::error!("fatal: {e}");
            ExitCode::from(2)
        }
    }
}

/// Merges command line values over the environment configuration.
fn load_config(args: Args) -> Result<HarnessConfig, figment::Error> {
    let mut figment = HarnessConfig::figment();
    if let Some(bin) = args.bin {
        figment = figment.merge(Serialized::default("client.bin", bin));
    }
    if args.debug {
        figment = figment.merge(Serialized::default("debug", true));
    }
    if !args.skip.is_empty() {
        figment = figment.merge(Serialized::default("skip", args.skip));
    }
    figment.extract()
}

/// Plain, timestamp-free output at `info`, unless `RUST_LOG` says otherwise.
fn init_logging() {
    tracing_subscriber::fmt()
        .without_time()
        .with_target(false)
        .with_level(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}
