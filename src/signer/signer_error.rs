/// Possible errors when generating keys or signing tokens.
///
/// Any of these indicates a broken harness rather than a misbehaving client.
#[derive(Debug, thiserror::Error)]
pub enum SignerError {
    /// RSA key generation failed.
    #[error("RSA key generation failed: {0}")]
    KeyGeneration(rsa::Error),

    /// Token header or payload could not be serialized.
    #[error("JSON serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Computing the PKCS#1 v1.5 signature failed.
    #[error("Signing failed: {0}")]
    Signing(#[from] rsa::signature::Error),
}
