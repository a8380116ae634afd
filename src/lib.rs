//! Conformance test harness for OpenID Connect relying-party clients.
//!
//! The [harness] impersonates an OpenID provider with a [provider::MockProvider], signs valid
//! and deliberately broken ID tokens with a [signer::Signer], and drives the client under test
//! through a fixed list of scenarios with a [subprocess::Subprocess].

pub mod harness;
pub mod provider;
pub mod reference;
pub mod signer;
pub mod subprocess;
