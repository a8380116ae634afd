//! Reference relying-party client for self-testing the conformance harness.
//!
//! Reads protocol commands on stdin and answers on stdout. Diagnostics go to stderr.

use clap::Parser;
use oidc_conformance::reference::ReferenceClient;
use std::process::ExitCode;
use tokio::io::BufReader;

#[derive(Parser, Debug)]
#[command(name = "oidc-reference-client")]
#[command(about = "Reference OpenID Connect client speaking the conformance line protocol")]
struct Args {
    /// Origin of the OpenID provider to trust (e.g. http://[::1]:8080)
    broker: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();

    let http_client = match reqwest::Client::builder().no_proxy().build() {
        Ok(http_client) => http_client,
        Err(e) => {
            tracing::error!("Failed to build HTTP client: {e}");
            return ExitCode::FAILURE;
        }
    };

    let client = match ReferenceClient::new(&args.broker, http_client) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    match client
        .run(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
        .await
    {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
