//! Reference relying-party client speaking the harness line protocol.
//!
//! Used to check the harness itself: a run against it is expected to pass every scenario.

mod cached;
mod id_token_validator;
mod pending_logins;
mod provider_client;
mod reference_client;
mod reference_error;

pub(crate) use cached::*;
pub use id_token_validator::*;
pub(crate) use pending_logins::*;
pub(crate) use provider_client::*;
pub use reference_client::*;
pub use reference_error::*;
