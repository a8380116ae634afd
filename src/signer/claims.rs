use serde::*;
use serde_json::{Map, Value};

/// Canonical ID token claim set produced by the harness.
///
/// Unset claims are left out of the serialized payload entirely.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Issuer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,

    /// Audience (the client identifier).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,

    /// Expiration time, seconds since epoch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,

    /// Issued-at time, seconds since epoch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// Verified email address of the subject.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Email address as entered by the user, before provider normalization.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_original: Option<String>,

    /// Nonce of the authentication request this token answers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nonce: Option<String>,
}

/// Token payload: a [Claims] set plus raw JSON values replacing or adding claims.
///
/// Overrides let a scenario send claims with types the canonical set cannot express, such as a
/// floating-point `exp`.
#[derive(Debug, Clone, PartialEq)]
pub struct Payload {
    /// Canonical claims.
    claims: Claims,

    /// Claims serialized verbatim, winning over `claims`.
    overrides: Map<String, Value>,
}

impl Payload {
    /// Creates a new [Payload] from the given `claims` without overrides.
    pub fn new(claims: Claims) -> Payload {
        Payload {
            claims,
            overrides: Map::new(),
        }
    }

    /// Sets the claim `name` to the raw `value`, replacing the canonical one if present.
    pub fn with_override<T: Into<String>, V: Into<Value>>(mut self, name: T, value: V) -> Payload {
        self.overrides.insert(name.into(), value.into());
        self
    }

    /// Builds the JSON object that ends up in the token.
    pub fn to_json(&self) -> Result<Map<String, Value>, serde_json::Error> {
        let mut object = match serde_json::to_value(&self.claims)? {
            Value::Object(object) => object,
            _ => Map::new(),
        };
        object.extend(self.overrides.clone());
        Ok(object)
    }
}

impl From<Claims> for Payload {
    fn from(claims: Claims) -> Payload {
        Payload::new(claims)
    }
}

impl Serialize for Payload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json()
            .map_err(ser::Error::custom)?
            .serialize(serializer)
    }
}
