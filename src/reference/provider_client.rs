use crate::provider::{DISCOVERY_PATH, DiscoveryDocument};
use crate::reference::ReferenceError;
use jsonwebtoken::jwk::JwkSet;

/// Fetches provider metadata and keys from the broker with a [reqwest::Client].
#[derive(Clone)]
pub(crate) struct ProviderClient {
    /// [reqwest::Client] for HTTP requests.
    client: reqwest::Client,

    /// [url::Url] of the broker's discovery document.
    discovery_url: url::Url,
}

impl ProviderClient {
    /// Creates a new [ProviderClient] for the broker at `origin`.
    pub(crate) fn new(
        client: reqwest::Client,
        origin: &str,
    ) -> Result<ProviderClient, ReferenceError> {
        let discovery_url = url::Url::parse(&format!("{origin}{DISCOVERY_PATH}"))?;

        Ok(ProviderClient {
            client,
            discovery_url,
        })
    }

    /// Fetches the [DiscoveryDocument].
    pub(crate) async fn discover(&self) -> Result<DiscoveryDocument, ReferenceError> {
        tracing::debug!("Fetching OIDC provider metadata from {}", self.discovery_url);

        self.client
            .get(self.discovery_url.clone())
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| {
                tracing::error!("OIDC provider metadata request failed: {e}");

                ReferenceError::DiscoveryRequestFailed(e)
            })?
            .json::<DiscoveryDocument>()
            .await
            .map_err(|e| {
                tracing::error!("Invalid OIDC provider metadata response: {e}");

                ReferenceError::InvalidDiscoveryResponse(e)
            })
    }

    /// Fetches the [JwkSet] from `jwks_uri`.
    pub(crate) async fn fetch_jwks(&self, jwks_uri: &url::Url) -> Result<JwkSet, ReferenceError> {
        tracing::debug!("Fetching JWKS from {jwks_uri}");

        self.client
            .get(jwks_uri.clone())
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| {
                tracing::error!("JWKS request failed: {e}");

                ReferenceError::JwksRequestFailed(e)
            })?
            .json::<JwkSet>()
            .await
            .map_err(|e| {
                tracing::error!("Invalid JWKS response: {e}");

                ReferenceError::InvalidJwksResponse(e)
            })
    }
}
