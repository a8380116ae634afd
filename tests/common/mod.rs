#![allow(dead_code)]

#[cfg(unix)]
mod test_clients;
mod test_config;
mod test_logging;
mod test_signer;

#[cfg(unix)]
pub use test_clients::*;
pub use test_config::*;
pub use test_logging::*;
pub use test_signer::*;
