use oidc_conformance::harness::HarnessConfig;
use oidc_conformance::provider::ProviderConfig;
use oidc_conformance::subprocess::ClientConfig;
use std::path::PathBuf;

/// Path of the reference client built alongside the tests.
pub const REFERENCE_CLIENT: &str = env!("CARGO_BIN_EXE_oidc-reference-client");

/// [ProviderConfig] binding IPv4 loopback, available on every test host.
pub fn provider_config() -> ProviderConfig {
    ProviderConfig::builder().bind_address("127.0.0.1:0").build()
}

/// [ClientConfig] running the reference client.
pub fn reference_client_config() -> ClientConfig {
    ClientConfig::builder().bin(REFERENCE_CLIENT).build()
}

/// [HarnessConfig] running the whole scenario list against `bin`.
pub fn harness_config<T: Into<PathBuf>>(bin: T) -> HarnessConfig {
    HarnessConfig::builder()
        .client(ClientConfig::builder().bin(bin).build())
        .provider(provider_config())
        .build()
}
