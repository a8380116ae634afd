use crate::provider::DiscoveryDocument;
use crate::reference::*;
use crate::subprocess::FIELD_SEPARATOR;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use jsonwebtoken::jwk::JwkSet;
use rsa::rand_core::{OsRng, RngCore};
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

/// Redirect URI the reference client registers with.
pub const REDIRECT_URI: &str = "http://reference-client.test/callback";

/// Client ID of the reference client: the origin of [REDIRECT_URI].
pub const CLIENT_ID: &str = "http://reference-client.test";

/// Requested scopes.
pub const SCOPE: &str = "openid email";

/// Relying-party client trusting a single broker, answering `auth`, `verify` and `echo` commands.
pub struct ReferenceClient {
    /// [ProviderClient] for the broker.
    provider: ProviderClient,

    /// Cached [DiscoveryDocument].
    discovery: Cached<DiscoveryDocument>,

    /// Cached [JwkSet].
    jwks: Cached<JwkSet>,

    /// [IdTokenValidator] for the broker and [CLIENT_ID].
    validator: IdTokenValidator,

    /// Outstanding nonces.
    pending: PendingLogins,
}

impl ReferenceClient {
    /// Creates a new [ReferenceClient] trusting the broker at `broker` as its issuer.
    pub fn new(
        broker: &str,
        http_client: reqwest::Client,
    ) -> Result<ReferenceClient, ReferenceError> {
        Ok(ReferenceClient {
            provider: ProviderClient::new(http_client, broker)?,
            discovery: Cached::new(default_expiration_duration()),
            jwks: Cached::new(default_expiration_duration()),
            validator: IdTokenValidator::new(
                broker.into(),
                CLIENT_ID.into(),
                default_leeway_seconds(),
            ),
            pending: PendingLogins::default(),
        })
    }

    /// Answers every command line read from `input` on `output` until end of input.
    pub async fn run<R, W>(&self, input: R, mut output: W) -> Result<(), ReferenceError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = input.lines();
        while let Some(line) = lines.next_line().await? {
            let response = self.handle(&line).await;
            output.write_all(response.as_bytes()).await?;
            output.write_all(b"\n").await?;
            output.flush().await?;
        }

        tracing::debug!("End of input");
        Ok(())
    }

    /// Answers a single command line with an `ok` or `err` response line.
    pub async fn handle(&self, line: &str) -> String {
        match self.dispatch(line).await {
            Ok(value) => format!("ok{FIELD_SEPARATOR}{value}"),
            Err(e) => {
                tracing::info!("Command failed: {e}");
                let detail = e.to_string().replace(['\t', '\r', '\n'], " ");
                format!("err{FIELD_SEPARATOR}{detail}")
            }
        }
    }

    async fn dispatch(&self, line: &str) -> Result<String, ReferenceError> {
        let mut fields = line.split(FIELD_SEPARATOR);
        match fields.next().unwrap_or_default() {
            "echo" => Ok(fields.next().unwrap_or_default().to_owned()),
            "auth" => {
                let login_hint = fields.next().ok_or(ReferenceError::MissingArgument("email"))?;
                self.auth(login_hint, fields.next()).await
            }
            "verify" => {
                let token = fields.next().ok_or(ReferenceError::MissingArgument("token"))?;
                self.verify(token).await
            }
            command => Err(ReferenceError::UnknownCommand(command.into())),
        }
    }

    /// Builds the authentication request URL for `login_hint` and remembers its nonce.
    ///
    /// A random `state` is used when none is given.
    pub async fn auth(
        &self,
        login_hint: &str,
        state: Option<&str>,
    ) -> Result<String, ReferenceError> {
        let discovery = self.discovery().await?;

        let state = state.map(str::to_owned).unwrap_or_else(|| random_token(8));
        let nonce = random_token(16);

        let mut url = discovery.authorization_endpoint.clone();
        url.query_pairs_mut()
            .append_pair("client_id", CLIENT_ID)
            .append_pair("redirect_uri", REDIRECT_URI)
            .append_pair("response_type", "id_token")
            .append_pair("scope", SCOPE)
            .append_pair("login_hint", login_hint)
            .append_pair("state", &state)
            .append_pair("nonce", &nonce);

        self.pending.insert(nonce, login_hint.into());
        Ok(url.to_string())
    }

    /// Verifies `token` and returns the verified email address.
    ///
    /// The user must have logged in with the address the provider reports as entered
    /// (`email_original`, falling back to `email`). The nonce is consumed on success.
    pub async fn verify(&self, token: &str) -> Result<String, ReferenceError> {
        let jwks = self.jwks().await?;
        let claims = self.validator.validate(token, &jwks)?;

        let nonce = claims
            .nonce
            .as_deref()
            .ok_or(ReferenceError::MissingClaim("nonce"))?;
        let login_hint = self
            .pending
            .login_hint(nonce)
            .ok_or(ReferenceError::UnknownNonce)?;

        let email = claims.email.clone().ok_or(ReferenceError::MissingClaim("email"))?;
        let entered = claims.email_original.as_deref().unwrap_or(&email);
        if entered != login_hint {
            return Err(ReferenceError::EmailMismatch);
        }

        if !self.pending.consume(nonce) {
            return Err(ReferenceError::UnknownNonce);
        }
        Ok(email)
    }

    /// [DiscoveryDocument], fetched once and cached.
    async fn discovery(&self) -> Result<Arc<DiscoveryDocument>, ReferenceError> {
        self.discovery.get_or_load(|| self.provider.discover()).await
    }

    /// [JwkSet], fetched once and cached.
    async fn jwks(&self) -> Result<Arc<JwkSet>, ReferenceError> {
        self.jwks
            .get_or_load(|| async {
                let discovery = self.discovery().await?;
                self.provider.fetch_jwks(&discovery.jwks_uri).await
            })
            .await
    }
}

/// Random URL-safe token from `len` bytes of OS randomness.
fn random_token(len: usize) -> String {
    let mut bytes = vec![0u8; len];
    OsRng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ReferenceClient {
        ReferenceClient::new("http://127.0.0.1:9", reqwest::Client::new()).unwrap()
    }

    #[tokio::test]
    async fn echo_returns_token() {
        assert_eq!(client().handle("echo\ttest 1").await, "ok\ttest 1");
    }

    #[tokio::test]
    async fn unknown_command_is_an_error() {
        let response = client().handle("frobnicate\tx").await;
        assert_eq!(response, "err\tUnknown command: frobnicate");
    }

    #[tokio::test]
    async fn missing_argument_is_an_error() {
        let response = client().handle("verify").await;
        assert!(response.starts_with("err\t"));
    }

    #[tokio::test]
    async fn run_answers_each_line() -> anyhow::Result<()> {
        let input: &[u8] = b"echo\ta\necho\tb\n";
        let mut output = Vec::new();

        client().run(input, &mut output).await?;

        assert_eq!(String::from_utf8(output)?, "ok\ta\nok\tb\n");

        Ok(())
    }

    #[test]
    fn random_tokens_differ() {
        assert_ne!(random_token(16), random_token(16));
        assert_eq!(random_token(8).len(), 11);
    }
}
