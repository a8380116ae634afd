mod common;

use common::*;
use oidc_conformance::harness::{self, HarnessError, RunOutcome};
use oidc_conformance::subprocess::SubprocessError;

#[test]
fn reference_client_passes_every_scenario() -> anyhow::Result<()> {
    init_logging();

    let outcome = harness::run(&harness_config(REFERENCE_CLIENT))?;

    assert_eq!(outcome, RunOutcome::Passed);

    Ok(())
}

#[test]
fn skipped_scenarios_are_not_run() -> anyhow::Result<()> {
    init_logging();
    let mut config = harness_config(REFERENCE_CLIENT);
    config.skip = vec!["basic auth".into(), "no such scenario".into()];

    // Without "basic auth" no client ID is established, so tokens carry an empty audience.
    let outcome = harness::run(&config)?;

    assert_eq!(
        outcome,
        RunOutcome::Failed {
            failed_scenarios: vec![
                "expired token, but within leeway",
                "floating point exp",
                "floating point iat",
                "future issue time, but within leeway",
                "server normalization",
                "custom server normalization",
                "nonce reuse",
            ],
        }
    );

    Ok(())
}

#[test]
fn caching_without_authentication_fails() -> anyhow::Result<()> {
    init_logging();
    let mut config = harness_config(REFERENCE_CLIENT);
    config.skip = harness::SCENARIOS
        .iter()
        .map(|scenario| scenario.name.to_owned())
        .filter(|name| name != "caching")
        .collect();

    // The client fetched nothing, so both counters stay at zero.
    let outcome = harness::run(&config)?;

    assert_eq!(
        outcome,
        RunOutcome::Failed {
            failed_scenarios: vec!["caching"],
        }
    );

    Ok(())
}

#[test]
fn missing_client_is_a_harness_error() {
    init_logging();

    assert!(matches!(
        harness::run(&harness_config("/nonexistent/oidc-client")),
        Err(HarnessError::Subprocess(SubprocessError::Spawn { .. }))
    ));
}
