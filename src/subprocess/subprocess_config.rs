use serde::Deserialize;
use std::path::PathBuf;

/// Configuration of the client under test.
#[derive(Debug, Clone, Deserialize, Eq, PartialEq, bon::Builder)]
pub struct ClientConfig {
    /// Executable that runs the client. It receives the broker origin as its only argument.
    ///
    /// Mandatory during deserialization.
    #[builder(into)]
    pub bin: PathBuf,
}
