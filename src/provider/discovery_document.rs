use serde::*;

/// Subset of the OIDC provider metadata served by the [crate::provider::MockProvider].
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct DiscoveryDocument {
    /// Direct [url::Url] to fetch the JWKS.
    pub jwks_uri: url::Url,

    /// [url::Url] of the authorization endpoint.
    pub authorization_endpoint: url::Url,
}
