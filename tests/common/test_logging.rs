use std::io::Write;
use std::sync::{Arc, Mutex};

/// Initializes logging for tests.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(
            "debug,reqwest=off,hyper=off,hyper_util=off",
        ))
        .with_test_writer()
        .try_init();
}

/// Runs `f` with an `info` subscriber for the current thread and returns what it logged.
pub fn capture_logs<F: FnOnce() -> R, R>(f: F) -> (R, String) {
    let buffer = Arc::new(Mutex::new(Vec::new()));
    let writer = buffer.clone();

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_ansi(false)
        .with_writer(move || CapturedLogs(writer.clone()))
        .finish();

    let result = tracing::subscriber::with_default(subscriber, f);
    let logs = String::from_utf8_lossy(&buffer.lock().unwrap()).into_owned();

    (result, logs)
}

/// [Write] appending to a shared buffer.
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
