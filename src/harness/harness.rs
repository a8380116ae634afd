use crate::harness::*;
use crate::provider::MockProvider;
use crate::signer::Signer;
use crate::subprocess::Subprocess;

/// Result of a run that was not aborted by a harness fault.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum RunOutcome {
    /// Every assertion passed.
    Passed,

    /// At least one assertion failed.
    Failed {
        /// Names of the scenarios with failed assertions, in run order.
        failed_scenarios: Vec<&'static str>,
    },
}

/// Runs every scenario not listed in `config.skip` against the configured client.
///
/// Generates the keys, starts the mock provider on its own runtime, starts the client, runs the
/// scenarios in order and stops the client. Returns an error only for harness faults; failed
/// assertions yield [RunOutcome::Failed].
///
/// Must not be called from within a Tokio runtime.
pub fn run(config: &HarnessConfig) -> Result<RunOutcome, HarnessError> {
    let signer = Signer::generate()?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(HarnessError::Runtime)?;
    let provider = runtime.block_on(MockProvider::start(&config.provider, signer.jwks()))?;

    let subprocess = Subprocess::spawn(&config.client, provider.origin(), config.debug)?;
    let mut ctx = TestContext::new(subprocess, &signer, &provider);

    for name in &config.skip {
        if !SCENARIOS.iter().any(|scenario| scenario.name == name.as_str()) {
            tracing::warn!("unknown scenario to skip: {name}");
        }
    }

    for scenario in SCENARIOS {
        if config.skip.iter().any(|name| name == scenario.name) {
            tracing::info!("Skipped: {}", scenario.name);
            continue;
        }
        ctx.run(scenario)?;
    }

    ctx.finish()
}
