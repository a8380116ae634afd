/// Possible errors of the reference client. Each one turns into an `err` response.
#[derive(Debug, thiserror::Error)]
pub enum ReferenceError {
    /// The broker origin is not a valid URL.
    #[error("Invalid broker URL: {0}")]
    InvalidBroker(#[from] url::ParseError),

    /// Discovery document request failed.
    #[error("Discovery request failed: {0}")]
    DiscoveryRequestFailed(reqwest::Error),

    /// Discovery document request succeeded, but the body is not a valid discovery document.
    #[error("Invalid discovery response: {0}")]
    InvalidDiscoveryResponse(reqwest::Error),

    /// JWKS request failed.
    #[error("JWKS request failed: {0}")]
    JwksRequestFailed(reqwest::Error),

    /// JWKS request succeeded, but the body is not a valid JWKS.
    #[error("Invalid JWKS response: {0}")]
    InvalidJwksResponse(reqwest::Error),

    /// The command is not part of the protocol.
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    /// The command lacks a mandatory argument.
    #[error("Missing argument: {0}")]
    MissingArgument(&'static str),

    /// Invalid ID token header.
    #[error("Invalid ID token header: {0}")]
    InvalidHeader(jsonwebtoken::errors::Error),

    /// ID token is missing the `kid` header.
    #[error("`kid` header is missing")]
    MissingKeyId,

    /// No JWK with the ID token's `kid` is published.
    #[error("Key is not found")]
    KeyNotFound,

    /// JWK is missing the `alg` parameter.
    #[error("Missing JWK `alg` parameter")]
    MissingJwkAlgParameter,

    /// JWK has an algorithm `jsonwebtoken` cannot verify.
    #[error("Unsupported JWK algorithm")]
    UnsupportedJwkAlgorithm,

    /// JWK is invalid.
    #[error("Invalid JWK: {0}")]
    InvalidKey(jsonwebtoken::errors::Error),

    /// Signature, algorithm, `iss` or `aud` check failed, or the claims are malformed.
    #[error("ID token verification failed: {0}")]
    ValidationFailed(jsonwebtoken::errors::Error),

    /// A claim required by the reference client is absent.
    #[error("Missing `{0}` claim")]
    MissingClaim(&'static str),

    /// `exp` is further in the past than the leeway allows.
    #[error("ID token expired")]
    Expired,

    /// `iat` is further in the future than the leeway allows.
    #[error("ID token issued in the future")]
    IssuedInFuture,

    /// The nonce was not issued by this client, or was already used.
    #[error("Unknown nonce")]
    UnknownNonce,

    /// The provider reports an email the user did not log in with.
    #[error("Email does not match the login hint")]
    EmailMismatch,

    /// Reading commands or writing responses failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
