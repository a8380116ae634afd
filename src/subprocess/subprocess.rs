use crate::subprocess::*;
use std::io::{BufRead, BufReader, Lines, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

/// Client under test, driven over the tab-separated line protocol on its stdin/stdout.
///
/// Reads and writes block; the protocol is strictly half-duplex.
pub struct Subprocess {
    /// The running client.
    child: Child,

    /// Write side of the protocol. `None` once end of input was signalled.
    stdin: Option<ChildStdin>,

    /// Read side of the protocol.
    stdout: Lines<BufReader<ChildStdout>>,

    /// Whether the child has been waited for.
    exited: bool,

    /// Whether to log every protocol line.
    debug: bool,
}

impl Subprocess {
    /// Starts the configured client with `broker` as its only argument.
    ///
    /// The client's stderr is inherited for its diagnostics. With `debug`, every line written
    /// and read is logged as `>> line` and `<< line`.
    pub fn spawn(
        config: &ClientConfig,
        broker: &str,
        debug: bool,
    ) -> Result<Subprocess, SubprocessError> {
        let mut child = Command::new(&config.bin)
            .arg(broker)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| SubprocessError::Spawn {
                bin: config.bin.clone(),
                source,
            })?;

        let stdin = child.stdin.take().ok_or(SubprocessError::MissingPipe("stdin"))?;
        let stdout = child
            .stdout
            .take()
            .ok_or(SubprocessError::MissingPipe("stdout"))?;

        tracing::info!("started client subprocess: {}", config.bin.display());

        Ok(Subprocess {
            child,
            stdin: Some(stdin),
            stdout: BufReader::new(stdout).lines(),
            exited: false,
            debug,
        })
    }

    /// Joins `fields` with tabs and writes them to the client as one line.
    pub fn write_line(&mut self, fields: &[&str]) -> Result<(), SubprocessError> {
        let line = fields.join(FIELD_SEPARATOR);
        if self.debug {
            tracing::info!(">> {line}");
        }

        let stdin = self.stdin.as_mut().ok_or(SubprocessError::MissingPipe("stdin"))?;
        writeln!(stdin, "{line}").map_err(SubprocessError::Write)?;
        stdin.flush().map_err(SubprocessError::Write)
    }

    /// Blocks until the client writes a full line and splits it into a [Response].
    pub fn read_line(&mut self) -> Result<Response, SubprocessError> {
        let line = self
            .stdout
            .next()
            .ok_or(SubprocessError::OutputClosed)?
            .map_err(SubprocessError::Read)?;
        if self.debug {
            tracing::info!("<< {line}");
        }

        Ok(Response::parse(line))
    }

    /// Closes the client's stdin and waits for it to exit successfully.
    pub fn stop(mut self) -> Result<(), SubprocessError> {
        drop(self.stdin.take());

        let status = self.child.wait().map_err(SubprocessError::Wait)?;
        self.exited = true;
        if !status.success() {
            return Err(SubprocessError::UncleanExit(status));
        }

        tracing::info!("subprocess clean exit");
        Ok(())
    }
}

impl Drop for Subprocess {
    fn drop(&mut self) {
        // Runs only when the harness bails out before `stop`.
        if !self.exited {
            drop(self.stdin.take());
            let _ = self.child.kill();
            let _ = self.child.wait();
        }
    }
}
