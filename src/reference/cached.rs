use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// Default expiration of cached provider responses.
pub const fn default_expiration_duration() -> Duration {
    Duration::from_secs(60 * 5)
}

/// Caches a value loaded from the provider until it expires.
pub(crate) struct Cached<T> {
    /// Stores the [CachedState].
    state: RwLock<Option<CachedState<T>>>,

    /// [Duration] for a [CachedState] to expire.
    expiration_duration: Duration,
}

/// State of a [Cached] value.
struct CachedState<T> {
    /// Cached value.
    value: Arc<T>,

    /// Creation [Instant] of this [CachedState].
    created_at: Instant,
}

impl<T> Cached<T> {
    /// Creates an empty [Cached] with the given `expiration_duration`.
    pub(crate) fn new(expiration_duration: Duration) -> Cached<T> {
        Cached {
            state: RwLock::new(None),
            expiration_duration,
        }
    }

    /// Returns the cached value. If it is missing or expired, loads a new one with the given
    /// `load` fn and caches it.
    pub(crate) async fn get_or_load<F, Fut, E>(&self, load: F) -> Result<Arc<T>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        {
            let state = self.state.read().await;
            if let Some(ref cached) = *state {
                if cached.created_at.elapsed() < self.expiration_duration {
                    return Ok(cached.value.clone());
                }
            }
        }

        tracing::debug!("Expired/missing cache entry, reloading");

        let mut state = self.state.write().await;
        // Another caller may have reloaded while this one waited for the write lock.
        if let Some(ref cached) = *state {
            if cached.created_at.elapsed() < self.expiration_duration {
                return Ok(cached.value.clone());
            }
        }

        let value = Arc::new(load().await?);
        *state = Some(CachedState {
            value: value.clone(),
            created_at: Instant::now(),
        });

        Ok(value)
    }
}
