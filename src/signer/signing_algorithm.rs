use jsonwebtoken::jwk::KeyAlgorithm;
use serde::*;

/// Algorithm declared in a token header and used to produce its signature.
#[derive(Debug, derive_more::Display, Clone, Copy, Serialize, Deserialize, Eq, PartialEq)]
pub enum SigningAlgorithm {
    /// Unsigned token, the signature segment is left empty.
    #[serde(rename = "none")]
    #[display("none")]
    None,

    /// RSASSA-PKCS1-v1_5 using SHA-256.
    RS256,

    /// RSASSA-PKCS1-v1_5 using SHA-384.
    RS384,

    /// RSASSA-PKCS1-v1_5 using SHA-512.
    RS512,
}

impl SigningAlgorithm {
    /// [KeyAlgorithm] to advertise in a JWK for this algorithm, if any.
    pub fn key_algorithm(self) -> Option<KeyAlgorithm> {
        match self {
            SigningAlgorithm::None => None,
            SigningAlgorithm::RS256 => Some(KeyAlgorithm::RS256),
            SigningAlgorithm::RS384 => Some(KeyAlgorithm::RS384),
            SigningAlgorithm::RS512 => Some(KeyAlgorithm::RS512),
        }
    }
}
