use crate::signer::*;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use jsonwebtoken::jwk::*;
use rsa::pkcs1v15::SigningKey;
use rsa::rand_core::OsRng;
use rsa::signature::{SignatureEncoding, Signer as _};
use rsa::traits::PublicKeyParts;
use rsa::{RsaPrivateKey, RsaPublicKey};
use serde::Serialize;
use sha2::{Sha256, Sha384, Sha512};

/// Key identifier of the published key.
pub const KEY_ID: &str = "test key";

/// Algorithm the published key is advertised with.
pub const ALGORITHM: SigningAlgorithm = SigningAlgorithm::RS256;

/// RSA modulus size of the generated keys.
const KEY_BITS: usize = 2048;

/// Produces compact tokens signed with either the published key or an impostor key.
pub struct Signer {
    /// Key whose public half is published in the [JwkSet].
    real: RsaPrivateKey,

    /// Key of the same family that is never published.
    impostor: RsaPrivateKey,

    /// [JwkSet] to serve from the [crate::provider::MockProvider].
    jwks: JwkSet,
}

impl Signer {
    /// Generates the real and impostor RSA keys and the published [JwkSet].
    pub fn generate() -> Result<Signer, SignerError> {
        let real = RsaPrivateKey::new(&mut OsRng, KEY_BITS).map_err(SignerError::KeyGeneration)?;
        let impostor =
            RsaPrivateKey::new(&mut OsRng, KEY_BITS).map_err(SignerError::KeyGeneration)?;

        tracing::info!("generated server RSA key");

        Ok(Signer::from_keys(real, impostor))
    }

    /// Creates a [Signer] from existing keys, publishing the public half of `real`.
    pub fn from_keys(real: RsaPrivateKey, impostor: RsaPrivateKey) -> Signer {
        let jwks = JwkSet {
            keys: vec![published_jwk(&RsaPublicKey::from(&real))],
        };

        Signer {
            real,
            impostor,
            jwks,
        }
    }

    /// [JwkSet] containing the single published key.
    pub fn jwks(&self) -> &JwkSet {
        &self.jwks
    }

    /// Key whose public half is published.
    pub fn real_key(&self) -> &RsaPrivateKey {
        &self.real
    }

    /// Key that is never published, for forged signatures.
    pub fn impostor_key(&self) -> &RsaPrivateKey {
        &self.impostor
    }

    /// Signs `payload` with the real key, the published key ID and the published algorithm.
    pub fn simple<P: Serialize>(&self, payload: &P) -> Result<String, SignerError> {
        self.sign(&self.real, &TokenHeader::new(KEY_ID, ALGORITHM), payload)
    }

    /// Signs `payload` with the given `key` under the given `header`.
    ///
    /// The header is taken as is, it does not need to describe `key`.
    pub fn sign<P: Serialize>(
        &self,
        key: &RsaPrivateKey,
        header: &TokenHeader,
        payload: &P,
    ) -> Result<String, SignerError> {
        let header_encoded = URL_SAFE_NO_PAD.encode(serde_json::to_vec(header)?);
        let payload_encoded = URL_SAFE_NO_PAD.encode(serde_json::to_vec(payload)?);
        let message = format!("{header_encoded}.{payload_encoded}");

        let signature = match header.alg {
            SigningAlgorithm::None => Vec::new(),
            SigningAlgorithm::RS256 => SigningKey::<Sha256>::new(key.clone())
                .try_sign(message.as_bytes())?
                .to_vec(),
            SigningAlgorithm::RS384 => SigningKey::<Sha384>::new(key.clone())
                .try_sign(message.as_bytes())?
                .to_vec(),
            SigningAlgorithm::RS512 => SigningKey::<Sha512>::new(key.clone())
                .try_sign(message.as_bytes())?
                .to_vec(),
        };

        Ok(format!("{message}.{}", URL_SAFE_NO_PAD.encode(signature)))
    }
}

/// Builds the published [Jwk] for the given `public_key`.
fn published_jwk(public_key: &RsaPublicKey) -> Jwk {
    Jwk {
        common: CommonParameters {
            public_key_use: Some(PublicKeyUse::Signature),
            key_id: Some(KEY_ID.into()),
            key_algorithm: ALGORITHM.key_algorithm(),
            key_operations: None,
            x509_url: None,
            x509_chain: None,
            x509_sha1_fingerprint: None,
            x509_sha256_fingerprint: None,
        },
        algorithm: AlgorithmParameters::RSA(RSAKeyParameters {
            key_type: RSAKeyType::RSA,
            n: URL_SAFE_NO_PAD.encode(public_key.n().to_bytes_be()),
            e: URL_SAFE_NO_PAD.encode(public_key.e().to_bytes_be()),
        }),
    }
}
