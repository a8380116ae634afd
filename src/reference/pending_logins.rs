use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

/// Default lifetime of an unanswered authentication attempt.
pub const fn default_pending_login_ttl() -> Duration {
    Duration::from_secs(60 * 10)
}

/// Authentication attempts awaiting an ID token, keyed by nonce.
///
/// Attempts older than the configured lifetime are forgotten, and pruned whenever a new one is
/// inserted.
#[derive(Debug)]
pub(crate) struct PendingLogins {
    /// [PendingLogin] of each outstanding nonce.
    by_nonce: Mutex<HashMap<String, PendingLogin>>,

    /// Lifetime of a [PendingLogin].
    ttl: Duration,
}

/// One outstanding authentication attempt.
#[derive(Debug)]
struct PendingLogin {
    /// Login hint the nonce was issued for.
    login_hint: String,

    /// Creation [Instant] of the attempt.
    created_at: Instant,
}

impl Default for PendingLogins {
    fn default() -> PendingLogins {
        PendingLogins::new(default_pending_login_ttl())
    }
}

impl PendingLogins {
    /// Creates an empty [PendingLogins] forgetting attempts after `ttl`.
    pub(crate) fn new(ttl: Duration) -> PendingLogins {
        PendingLogins {
            by_nonce: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    /// Remembers that `nonce` was issued for `login_hint`.
    pub(crate) fn insert(&self, nonce: String, login_hint: String) {
        let mut by_nonce = self.lock();
        by_nonce.retain(|_, login| login.created_at.elapsed() < self.ttl);
        by_nonce.insert(
            nonce,
            PendingLogin {
                login_hint,
                created_at: Instant::now(),
            },
        );
    }

    /// Login hint `nonce` was issued for, if it is still outstanding.
    pub(crate) fn login_hint(&self, nonce: &str) -> Option<String> {
        self.lock()
            .get(nonce)
            .filter(|login| login.created_at.elapsed() < self.ttl)
            .map(|login| login.login_hint.clone())
    }

    /// Marks `nonce` as used. Returns whether it was outstanding.
    pub(crate) fn consume(&self, nonce: &str) -> bool {
        self.lock()
            .remove(nonce)
            .is_some_and(|login| login.created_at.elapsed() < self.ttl)
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, PendingLogin>> {
        self.by_nonce.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nonce_is_single_use() {
        let pending = PendingLogins::default();
        pending.insert("n1".into(), "john@example.com".into());

        assert_eq!(pending.login_hint("n1").as_deref(), Some("john@example.com"));
        assert!(pending.consume("n1"));
        assert_eq!(pending.login_hint("n1"), None);
        assert!(!pending.consume("n1"));
    }

    #[test]
    fn expired_attempts_are_forgotten_and_pruned() {
        let pending = PendingLogins::new(Duration::ZERO);
        pending.insert("n1".into(), "john@example.com".into());

        assert_eq!(pending.login_hint("n1"), None);
        assert!(!pending.consume("n1"));

        pending.insert("n2".into(), "john@example.com".into());
        pending.insert("n3".into(), "john@example.com".into());

        assert_eq!(pending.lock().len(), 1);
        assert!(pending.lock().contains_key("n3"));
    }

    #[test]
    fn unexpired_attempts_survive_pruning() {
        let pending = PendingLogins::default();
        pending.insert("n1".into(), "john@example.com".into());
        pending.insert("n2".into(), "jane@example.com".into());

        assert_eq!(pending.lock().len(), 2);
        assert_eq!(pending.login_hint("n1").as_deref(), Some("john@example.com"));
    }
}
