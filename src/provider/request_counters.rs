use std::sync::atomic::{AtomicUsize, Ordering};

/// Per-endpoint request counters of the [crate::provider::MockProvider].
#[derive(Debug, Default)]
pub struct RequestCounters {
    /// Number of discovery document requests.
    discovery: AtomicUsize,

    /// Number of JWKS requests.
    keys: AtomicUsize,
}

impl RequestCounters {
    /// Number of discovery document requests served so far.
    pub fn discovery(&self) -> usize {
        self.discovery.load(Ordering::Relaxed)
    }

    /// Number of JWKS requests served so far.
    pub fn keys(&self) -> usize {
        self.keys.load(Ordering::Relaxed)
    }

    pub(crate) fn record_discovery(&self) {
        self.discovery.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_keys(&self) {
        self.keys.fetch_add(1, Ordering::Relaxed);
    }
}
