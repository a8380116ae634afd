/// Possible errors when starting the [crate::provider::MockProvider].
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// Binding the listener failed.
    #[error("Failed to bind {address}: {source}")]
    Bind {
        /// Address the bind was attempted on.
        address: String,

        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The bound listener did not report its local address.
    #[error("Failed to read local address: {0}")]
    LocalAddress(std::io::Error),

    /// The configured authorization endpoint, or an endpoint built from the bound origin, is not
    /// a valid URL.
    #[error("Invalid endpoint URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A response body could not be serialized.
    #[error("JSON serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}
