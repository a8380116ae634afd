use serde::Deserialize;

/// [crate::provider::MockProvider] configuration.
#[derive(Debug, Clone, Deserialize, Eq, PartialEq, bon::Builder)]
pub struct ProviderConfig {
    /// Address to bind the listener on. Port `0` lets the OS pick one.
    ///
    /// Defaults to `[::1]:0` during deserialization.
    #[serde(default = "default_bind_address")]
    #[builder(into, default = default_bind_address())]
    pub bind_address: String,

    /// Authorization endpoint advertised in the discovery document. Nothing is served there.
    /// Must be an absolute URL, checked by [crate::provider::MockProvider::start].
    ///
    /// Defaults to `http://imaginary-server.test/fake-auth-route` during deserialization.
    #[serde(default = "default_authorization_endpoint")]
    #[builder(into, default = default_authorization_endpoint())]
    pub authorization_endpoint: String,
}

impl Default for ProviderConfig {
    fn default() -> ProviderConfig {
        ProviderConfig {
            bind_address: default_bind_address(),
            authorization_endpoint: default_authorization_endpoint(),
        }
    }
}

/// Default listener address: IPv6 loopback, ephemeral port.
pub fn default_bind_address() -> String {
    "[::1]:0".into()
}

/// Default advertised authorization endpoint.
pub fn default_authorization_endpoint() -> String {
    "http://imaginary-server.test/fake-auth-route".into()
}
