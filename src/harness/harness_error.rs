use crate::provider::*;
use crate::signer::*;
use crate::subprocess::*;

/// Fault of the harness itself. Any of these ends the run, as opposed to failed assertions.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    /// Key generation or token signing failed.
    #[error("Signer error: {0}")]
    Signer(#[from] SignerError),

    /// The mock provider could not be started.
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Communication with the client broke down.
    #[error("Subprocess error: {0}")]
    Subprocess(#[from] SubprocessError),

    /// The client did not echo the synchronization token back.
    #[error("Test runner out of sync: sent {sent:?}, received {received}")]
    OutOfSync {
        /// Token sent with `echo`.
        sent: String,

        /// Line received instead of `ok\t<token>`.
        received: Response,
    },

    /// The runtime hosting the mock provider could not be built.
    #[error("Failed to start runtime: {0}")]
    Runtime(std::io::Error),
}
