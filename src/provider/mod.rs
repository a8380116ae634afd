mod discovery_document;
mod mock_provider;
mod provider_config;
mod provider_error;
mod request_counters;

pub use discovery_document::*;
pub use mock_provider::*;
pub use provider_config::*;
pub use provider_error::*;
pub use request_counters::*;
