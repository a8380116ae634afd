use std::path::PathBuf;
use std::process::ExitStatus;

/// Possible errors when driving the client subprocess.
///
/// Each of these means the harness lost control of the client and cannot continue.
#[derive(Debug, thiserror::Error)]
pub enum SubprocessError {
    /// The client executable could not be started.
    #[error("Failed to start {bin}: {source}")]
    Spawn {
        /// Executable that failed to start.
        bin: PathBuf,

        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A piped stream of the child was not available.
    #[error("Subprocess {0} is not piped")]
    MissingPipe(&'static str),

    /// Writing to the client's stdin failed.
    #[error("Subprocess stdin error: {0}")]
    Write(std::io::Error),

    /// Reading from the client's stdout failed.
    #[error("Subprocess stdout error: {0}")]
    Read(std::io::Error),

    /// The client closed its stdout.
    #[error("Subprocess stdout closed")]
    OutputClosed,

    /// Waiting for the client to exit failed.
    #[error("Failed to wait for subprocess: {0}")]
    Wait(std::io::Error),

    /// The client exited unsuccessfully.
    #[error("Subprocess exited with {0}")]
    UncleanExit(ExitStatus),
}
