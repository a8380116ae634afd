use crate::reference::ReferenceError;
use jsonwebtoken as jwt;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::jwk::JwkSet;
use serde::Deserialize;
use std::collections::HashSet;
use std::str::FromStr;

/// `iss` claim name.
const ISS_CLAIM: &str = "iss";

/// `aud` claim name.
const AUD_CLAIM: &str = "aud";

/// Default leeway for `exp` and `iat` checks, in seconds.
pub const fn default_leeway_seconds() -> u64 {
    60
}

/// Claims the reference client reads from a verified ID token.
///
/// Time claims are read as floats so integer and fractional encodings are treated alike.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct IdTokenClaims {
    /// Expiration time, seconds since epoch.
    pub exp: Option<f64>,

    /// Issued-at time, seconds since epoch.
    pub iat: Option<f64>,

    /// Verified email address.
    pub email: Option<String>,

    /// Email address before provider normalization.
    pub email_original: Option<String>,

    /// Nonce of the authentication request.
    pub nonce: Option<String>,
}

/// Verifies ID tokens against a [JwkSet] for a fixed issuer and audience.
#[derive(Debug, Clone)]
pub(crate) struct IdTokenValidator {
    /// Expected `iss`.
    issuer: String,

    /// Expected `aud`.
    audience: String,

    /// Symmetric clock skew tolerance for `exp` and `iat`.
    leeway_seconds: u64,
}

impl IdTokenValidator {
    /// Creates a new [IdTokenValidator] with the given parameters.
    pub(crate) fn new(issuer: String, audience: String, leeway_seconds: u64) -> IdTokenValidator {
        IdTokenValidator {
            issuer,
            audience,
            leeway_seconds,
        }
    }

    /// Verifies the signature and the standard claims of `token` and returns its [IdTokenClaims].
    ///
    /// The algorithm is taken from the JWK, never from the token header.
    pub(crate) fn validate(
        &self,
        token: &str,
        jwks: &JwkSet,
    ) -> Result<IdTokenClaims, ReferenceError> {
        let header = jwt::decode_header(token).map_err(|e| {
            tracing::warn!("Invalid header: {e}");

            ReferenceError::InvalidHeader(e)
        })?;

        let key_id = header.kid.ok_or_else(|| {
            tracing::warn!("Missing Key ID (kid)");

            ReferenceError::MissingKeyId
        })?;

        let jwk = jwks.find(&key_id).ok_or_else(|| {
            tracing::warn!("Key {key_id} not found");

            ReferenceError::KeyNotFound
        })?;

        let algorithm = match jwk.common.key_algorithm {
            None => Err(ReferenceError::MissingJwkAlgParameter)?,
            Some(key_algorithm) => jwt::Algorithm::from_str(key_algorithm.to_string().as_str())
                .map_err(|e| {
                    tracing::error!("JWK has unsupported algorithm: {e}");

                    ReferenceError::UnsupportedJwkAlgorithm
                })?,
        };

        let validation = {
            let mut validation = jwt::Validation::new(algorithm);
            validation.set_issuer(&[&self.issuer]);
            validation.set_audience(&[&self.audience]);
            // `exp` and `iat` are checked below, accepting fractional values.
            validation.validate_exp = false;
            validation.required_spec_claims =
                HashSet::from([ISS_CLAIM.to_owned(), AUD_CLAIM.to_owned()]);
            validation
        };

        let decoding_key = DecodingKey::from_jwk(jwk).map_err(|e| {
            tracing::error!("Failed to create DecodingKey from JWK: {e}");

            ReferenceError::InvalidKey(e)
        })?;

        let claims = jwt::decode::<IdTokenClaims>(token, &decoding_key, &validation)
            .map_err(|e| {
                tracing::warn!("Failed to verify ID token: {e}");

                match e.kind() {
                    ErrorKind::InvalidEcdsaKey
                    | ErrorKind::InvalidRsaKey(_)
                    | ErrorKind::InvalidKeyFormat => ReferenceError::InvalidKey(e),

                    _ => ReferenceError::ValidationFailed(e),
                }
            })?
            .claims;

        self.check_times(&claims, chrono::Utc::now().timestamp() as f64)?;

        Ok(claims)
    }

    /// Checks `exp` and `iat` against `now` with the configured leeway.
    fn check_times(&self, claims: &IdTokenClaims, now: f64) -> Result<(), ReferenceError> {
        let leeway = self.leeway_seconds as f64;

        let exp = claims.exp.ok_or(ReferenceError::MissingClaim("exp"))?;
        if exp + leeway < now {
            return Err(ReferenceError::Expired);
        }

        let iat = claims.iat.ok_or(ReferenceError::MissingClaim("iat"))?;
        if iat - leeway > now {
            return Err(ReferenceError::IssuedInFuture);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signer::*;
    use std::sync::LazyLock;

    static SIGNER: LazyLock<Signer> = LazyLock::new(|| Signer::generate().unwrap());

    const ISS: &str = "http://issuer.test";

    const AUD: &str = "http://client.test";

    fn validator() -> IdTokenValidator {
        IdTokenValidator::new(ISS.into(), AUD.into(), default_leeway_seconds())
    }

    fn claims() -> Claims {
        let now = chrono::Utc::now().timestamp();
        Claims {
            iss: Some(ISS.into()),
            aud: Some(AUD.into()),
            exp: Some(now + 5),
            iat: Some(now),
            email: Some("john@example.com".into()),
            email_original: None,
            nonce: Some("nonce".into()),
        }
    }

    fn time_claims(exp: f64, iat: f64) -> IdTokenClaims {
        IdTokenClaims {
            exp: Some(exp),
            iat: Some(iat),
            email: None,
            email_original: None,
            nonce: None,
        }
    }

    #[test]
    fn valid_token() -> anyhow::Result<()> {
        let token = SIGNER.simple(&claims())?;

        let claims = validator().validate(&token, SIGNER.jwks())?;
        assert_eq!(claims.email.as_deref(), Some("john@example.com"));
        assert_eq!(claims.nonce.as_deref(), Some("nonce"));

        Ok(())
    }

    #[test]
    fn fractional_times_are_accepted() -> anyhow::Result<()> {
        let now = chrono::Utc::now().timestamp() as f64;
        let payload = Payload::new(claims())
            .with_override("exp", now + 5.5)
            .with_override("iat", now - 0.5);
        let token = SIGNER.simple(&payload)?;

        let claims = validator().validate(&token, SIGNER.jwks())?;
        assert_eq!(claims.exp, Some(now + 5.5));

        Ok(())
    }

    #[test]
    fn wrong_issuer_and_audience_are_rejected() -> anyhow::Result<()> {
        let mut wrong_iss = claims();
        wrong_iss.iss = Some("http://eve.invalid".into());
        let mut wrong_aud = claims();
        wrong_aud.aud = Some("http://eve.invalid".into());

        for claims in [wrong_iss, wrong_aud] {
            let token = SIGNER.simple(&claims)?;
            assert!(matches!(
                validator().validate(&token, SIGNER.jwks()),
                Err(ReferenceError::ValidationFailed(_))
            ));
        }

        Ok(())
    }

    #[test]
    fn unknown_key_id_is_rejected() -> anyhow::Result<()> {
        let token = SIGNER.sign(
            SIGNER.real_key(),
            &TokenHeader::new("bad key", ALGORITHM),
            &claims(),
        )?;

        assert!(matches!(
            validator().validate(&token, SIGNER.jwks()),
            Err(ReferenceError::KeyNotFound)
        ));

        Ok(())
    }

    #[test]
    fn forged_signature_is_rejected() -> anyhow::Result<()> {
        let token = SIGNER.sign(
            SIGNER.impostor_key(),
            &TokenHeader::new(KEY_ID, ALGORITHM),
            &claims(),
        )?;

        assert!(matches!(
            validator().validate(&token, SIGNER.jwks()),
            Err(ReferenceError::ValidationFailed(_))
        ));

        Ok(())
    }

    #[test]
    fn algorithm_not_advertised_by_jwk_is_rejected() -> anyhow::Result<()> {
        let token = SIGNER.sign(
            SIGNER.real_key(),
            &TokenHeader::new(KEY_ID, SigningAlgorithm::RS384),
            &claims(),
        )?;

        assert!(validator().validate(&token, SIGNER.jwks()).is_err());

        Ok(())
    }

    #[test]
    fn unsigned_token_is_rejected() -> anyhow::Result<()> {
        let token = SIGNER.sign(
            SIGNER.real_key(),
            &TokenHeader::new(KEY_ID, SigningAlgorithm::None),
            &claims(),
        )?;

        assert!(validator().validate(&token, SIGNER.jwks()).is_err());

        Ok(())
    }

    #[test]
    fn time_checks_apply_symmetric_leeway() {
        let validator = validator();
        let now = 1_000_000.0;

        assert!(validator.check_times(&time_claims(now - 30.0, now - 50.0), now).is_ok());
        assert!(validator.check_times(&time_claims(now + 50.0, now + 30.0), now).is_ok());
        assert!(matches!(
            validator.check_times(&time_claims(now - 10000.0, now - 10020.0), now),
            Err(ReferenceError::Expired)
        ));
        assert!(matches!(
            validator.check_times(&time_claims(now + 10020.0, now + 10000.0), now),
            Err(ReferenceError::IssuedInFuture)
        ));
    }

    #[test]
    fn missing_time_claims_are_rejected() {
        let claims = IdTokenClaims {
            exp: None,
            iat: Some(0.0),
            email: None,
            email_original: None,
            nonce: None,
        };

        assert!(matches!(
            validator().check_times(&claims, 0.0),
            Err(ReferenceError::MissingClaim("exp"))
        ));
    }
}
