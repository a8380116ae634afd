use crate::provider::*;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::{Json, Router};
use jsonwebtoken::jwk::JwkSet;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Path of the discovery document.
pub const DISCOVERY_PATH: &str = "/.well-known/openid-configuration";

/// Path of the JWKS.
pub const KEYS_PATH: &str = "/test-keys";

/// Mock OpenID provider serving the discovery document and the JWKS, counting requests to both.
pub struct MockProvider {
    /// `http://host:port` the provider is reachable at.
    origin: String,

    /// Served [DiscoveryDocument].
    discovery: DiscoveryDocument,

    /// [RequestCounters] shared with the request handlers.
    counters: Arc<RequestCounters>,

    /// [JoinHandle] of the serving task.
    serve_handle: JoinHandle<()>,
}

/// State shared by the request handlers.
#[derive(Clone)]
struct ProviderState {
    /// Pre-serialized discovery document.
    discovery: Arc<serde_json::Value>,

    /// Pre-serialized JWKS.
    jwks: Arc<serde_json::Value>,

    /// [RequestCounters] to increment.
    counters: Arc<RequestCounters>,
}

impl MockProvider {
    /// Binds the configured address and starts serving `jwks` in a background task.
    ///
    /// Must be called within a Tokio runtime, which then keeps serving until the [MockProvider]
    /// is dropped.
    pub async fn start(
        config: &ProviderConfig,
        jwks: &JwkSet,
    ) -> Result<MockProvider, ProviderError> {
        let listener = tokio::net::TcpListener::bind(config.bind_address.as_str())
            .await
            .map_err(|source| ProviderError::Bind {
                address: config.bind_address.clone(),
                source,
            })?;
        let address = listener.local_addr().map_err(ProviderError::LocalAddress)?;
        let origin = format!("http://{address}");

        let discovery = DiscoveryDocument {
            jwks_uri: url::Url::parse(&format!("{origin}{KEYS_PATH}"))?,
            authorization_endpoint: url::Url::parse(&config.authorization_endpoint)?,
        };

        let counters = Arc::new(RequestCounters::default());
        let state = ProviderState {
            discovery: Arc::new(serde_json::to_value(&discovery)?),
            jwks: Arc::new(serde_json::to_value(jwks)?),
            counters: counters.clone(),
        };

        let router = Router::new()
            .route(DISCOVERY_PATH, axum::routing::get(Self::get_discovery))
            .route(KEYS_PATH, axum::routing::get(Self::get_keys))
            .with_state(state);

        let serve_handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                tracing::error!("mock provider stopped serving: {e}");
                std::process::exit(2);
            }
        });

        tracing::info!("started test server: {origin}");

        Ok(MockProvider {
            origin,
            discovery,
            counters,
            serve_handle,
        })
    }

    /// Origin (`http://host:port`) handed to the client as its broker.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Served [DiscoveryDocument].
    pub fn discovery(&self) -> &DiscoveryDocument {
        &self.discovery
    }

    /// Read-only view of the [RequestCounters].
    pub fn counters(&self) -> &RequestCounters {
        &self.counters
    }

    /// HTTP GET handler for the discovery document.
    async fn get_discovery(State(state): State<ProviderState>) -> impl IntoResponse {
        state.counters.record_discovery();
        Json(state.discovery.as_ref().clone())
    }

    /// HTTP GET handler for the JWKS.
    async fn get_keys(State(state): State<ProviderState>) -> impl IntoResponse {
        state.counters.record_keys();
        Json(state.jwks.as_ref().clone())
    }
}

impl Drop for MockProvider {
    fn drop(&mut self) {
        self.serve_handle.abort();
    }
}
