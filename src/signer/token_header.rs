use crate::signer::SigningAlgorithm;
use serde::*;

/// Header of a compact token.
///
/// Both fields are always stated by the caller: adversarial tokens are built by pairing a header
/// with a key it does not describe.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct TokenHeader {
    /// Key identifier (`kid`).
    pub kid: String,

    /// Declared [SigningAlgorithm] (`alg`).
    pub alg: SigningAlgorithm,
}

impl TokenHeader {
    /// Creates a new [TokenHeader] with the given `kid` and `alg`.
    pub fn new<T: Into<String>>(kid: T, alg: SigningAlgorithm) -> TokenHeader {
        TokenHeader {
            kid: kid.into(),
            alg,
        }
    }
}
