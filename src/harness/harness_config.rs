use crate::provider::ProviderConfig;
use crate::subprocess::ClientConfig;
use figment::Figment;
use figment::providers::Env;
use serde::Deserialize;

/// Prefix of environment variables read by [HarnessConfig::figment].
pub const ENV_PREFIX: &str = "OIDC_CONFORMANCE__";

/// Harness configuration.
#[derive(Debug, Clone, Deserialize, Eq, PartialEq, bon::Builder)]
pub struct HarnessConfig {
    /// Client under test.
    ///
    /// See [ClientConfig] for deserialization semantics.
    pub client: ClientConfig,

    /// Mock provider settings.
    ///
    /// See [ProviderConfig] for deserialization semantics.
    #[serde(default)]
    #[builder(default)]
    pub provider: ProviderConfig,

    /// Whether to log every protocol line exchanged with the client, at `info` level.
    ///
    /// Defaults to `false` during deserialization.
    #[serde(default)]
    #[builder(default = false)]
    pub debug: bool,

    /// Names of scenarios not to run.
    ///
    /// Defaults to an empty list during deserialization.
    #[serde(default)]
    #[builder(default)]
    pub skip: Vec<String>,
}

impl HarnessConfig {
    /// [Figment] reading `OIDC_CONFORMANCE__`-prefixed environment variables, nested with `__`.
    ///
    /// Further providers (such as command line values) may be merged on top before extracting.
    pub fn figment() -> Figment {
        Figment::new().merge(Env::prefixed(ENV_PREFIX).split("__"))
    }
}
