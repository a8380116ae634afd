use crate::harness::*;
use crate::provider::MockProvider;
use crate::signer::*;
use crate::subprocess::*;
use std::fmt::{Debug, Display};

/// State carried through the scenarios of one run: the client connection, the signer, the mock
/// provider, the negotiated client ID and the assertion record.
pub struct TestContext<'a> {
    /// Client under test.
    subprocess: Subprocess,

    /// [Signer] holding the run's keys.
    signer: &'a Signer,

    /// [MockProvider] the client talks to.
    provider: &'a MockProvider,

    /// Client ID derived from the first authentication request.
    client_id: Option<String>,

    /// Number of scenarios started, for numbering output and sync tokens.
    num_tests: usize,

    /// [Assertions] record of the run.
    assertions: Assertions,

    /// Names of the scenarios with at least one failed assertion, in run order.
    failed_scenarios: Vec<&'static str>,
}

impl<'a> TestContext<'a> {
    /// Creates a new [TestContext] for the given client, signer and provider.
    pub fn new(
        subprocess: Subprocess,
        signer: &'a Signer,
        provider: &'a MockProvider,
    ) -> TestContext<'a> {
        TestContext {
            subprocess,
            signer,
            provider,
            client_id: None,
            num_tests: 0,
            assertions: Assertions::default(),
            failed_scenarios: Vec::new(),
        }
    }

    /// [Signer] of this run.
    pub fn signer(&self) -> &'a Signer {
        self.signer
    }

    /// [MockProvider] of this run.
    pub fn provider(&self) -> &'a MockProvider {
        self.provider
    }

    /// Client ID established by the first authentication request, or an empty string.
    pub fn client_id(&self) -> &str {
        self.client_id.as_deref().unwrap_or_default()
    }

    /// Remembers the client ID. Later scenarios assume it stays the same.
    pub fn set_client_id(&mut self, client_id: String) {
        self.client_id = Some(client_id);
    }

    /// Logs and runs the given scenario after synchronizing with the client.
    pub fn run(&mut self, scenario: &Scenario) -> Result<(), HarnessError> {
        self.num_tests += 1;
        tracing::info!("Test {}: {}", self.num_tests, scenario.name);

        self.sync()?;

        let failures = self.assertions.failures();
        (scenario.run)(self)?;
        if self.assertions.failures() > failures {
            self.failed_scenarios.push(scenario.name);
        }
        Ok(())
    }

    /// Sends a numbered `echo` and requires the client to answer with the same token.
    fn sync(&mut self) -> Result<(), HarnessError> {
        let token = format!("test {}", self.num_tests);
        self.subprocess.write_line(&["echo", &token])?;

        let response = self.subprocess.read_line()?;
        if response.status != Status::Ok || response.value() != Some(token.as_str()) {
            return Err(HarnessError::OutOfSync {
                sent: token,
                received: response,
            });
        }
        Ok(())
    }

    /// Sends one command line to the client.
    pub fn send(&mut self, fields: &[&str]) -> Result<(), HarnessError> {
        Ok(self.subprocess.write_line(fields)?)
    }

    /// Reads one response and asserts its status. Returns its value only if the status matched.
    pub fn expect(&mut self, status: Status, descr: &str) -> Result<Option<String>, HarnessError> {
        let response = self.subprocess.read_line()?;
        if !self.assertions.assert(response.status == status, descr) {
            tracing::warn!("{response}");
            return Ok(None);
        }
        Ok(Some(response.value().unwrap_or_default().to_owned()))
    }

    /// Sends an authentication request for `email` and returns the nonce it carries.
    ///
    /// For scenarios focusing on the verification step. `None` means there is nothing left to
    /// verify; the failure has already been recorded.
    pub fn quick_start(&mut self, email: &str) -> Result<Option<String>, HarnessError> {
        self.send(&["auth", email])?;

        let response = self.subprocess.read_line()?;
        let nonce = match (&response.status, response.value()) {
            (Status::Ok, Some(value)) => AuthRequest::parse(value)
                .map(|request| request.param("nonce").to_owned())
                .unwrap_or_default(),
            _ => String::new(),
        };

        if !self.assertions.assert(!nonce.is_empty(), "start authentication request") {
            tracing::warn!("{response}");
            return Ok(None);
        }
        Ok(Some(nonce))
    }

    /// Sends `token` for verification.
    pub fn verify(&mut self, token: &str) -> Result<(), HarnessError> {
        self.send(&["verify", token])
    }

    /// Claims a correct client accepts after an authentication request for `email` that returned
    /// `nonce`.
    pub fn valid_claims(&self, email: &str, nonce: &str) -> Claims {
        let now = chrono::Utc::now().timestamp();
        Claims {
            iss: Some(self.provider.origin().into()),
            aud: Some(self.client_id().into()),
            exp: Some(now + 5),
            iat: Some(now),
            email: Some(email.into()),
            email_original: None,
            nonce: Some(nonce.into()),
        }
    }

    /// See [Assertions::assert].
    pub fn assert(&mut self, value: bool, descr: &str) -> bool {
        self.assertions.assert(value, descr)
    }

    /// See [Assertions::assert_eq].
    pub fn assert_eq<T: PartialEq + Debug>(&mut self, got: T, want: T, descr: &str) -> bool {
        self.assertions.assert_eq(got, want, descr)
    }

    /// See [Assertions::assert_ok].
    pub fn assert_ok<T, E: Display>(&mut self, result: Result<T, E>, descr: &str) -> Option<T> {
        self.assertions.assert_ok(result, descr)
    }

    /// Stops the client and reports whether every assertion passed.
    pub fn finish(self) -> Result<RunOutcome, HarnessError> {
        let outcome = if self.assertions.all_ok() {
            RunOutcome::Passed
        } else {
            tracing::warn!(
                "{} assertion(s) failed in: {}",
                self.assertions.failures(),
                self.failed_scenarios.join(", ")
            );
            RunOutcome::Failed {
                failed_scenarios: self.failed_scenarios,
            }
        };

        self.subprocess.stop()?;
        Ok(outcome)
    }
}
