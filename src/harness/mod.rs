mod assertions;
mod auth_request;
mod harness;
mod harness_config;
mod harness_error;
mod scenarios;
mod test_context;

pub use assertions::*;
pub use auth_request::*;
pub use harness::*;
pub use harness_config::*;
pub use harness_error::*;
pub use scenarios::*;
pub use test_context::*;
