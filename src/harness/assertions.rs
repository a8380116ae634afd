use std::fmt::{Debug, Display};

/// Records assertion results. A failed assertion is logged and remembered, but never stops the
/// run.
#[derive(Debug)]
pub struct Assertions {
    /// Whether every assertion so far passed.
    all_ok: bool,

    /// Number of failed assertions.
    failures: usize,
}

impl Default for Assertions {
    fn default() -> Assertions {
        Assertions {
            all_ok: true,
            failures: 0,
        }
    }
}

impl Assertions {
    /// Whether every assertion so far passed.
    pub fn all_ok(&self) -> bool {
        self.all_ok
    }

    /// Number of failed assertions so far.
    pub fn failures(&self) -> usize {
        self.failures
    }

    /// Logs the result of a check.
    pub fn assert(&mut self, value: bool, descr: &str) -> bool {
        if !value {
            self.all_ok = false;
            self.failures += 1;
            tracing::warn!("  ERR  {descr}");
            return false;
        }
        tracing::info!("  OK   {descr}");
        true
    }

    /// Checks that `got` equals `want`, logging both if they differ.
    pub fn assert_eq<T>(&mut self, got: T, want: T, descr: &str) -> bool
    where
        T: PartialEq + Debug,
    {
        if !self.assert(got == want, descr) {
            tracing::warn!("got: {got:?}");
            tracing::warn!("want: {want:?}");
            return false;
        }
        true
    }

    /// Checks that `result` is `Ok`, logging the error otherwise.
    pub fn assert_ok<T, E>(&mut self, result: Result<T, E>, descr: &str) -> Option<T>
    where
        E: Display,
    {
        match result {
            Ok(value) => {
                self.assert(true, descr);
                Some(value)
            }
            Err(e) => {
                self.assert(false, descr);
                tracing::warn!("{e}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passing_assertions_keep_all_ok() {
        let mut assertions = Assertions::default();

        assert!(assertions.assert(true, "true"));
        assert!(assertions.assert_eq("a", "a", "equal"));
        assert_eq!(assertions.assert_ok(Ok::<_, String>(1), "ok"), Some(1));

        assert!(assertions.all_ok());
        assert_eq!(assertions.failures(), 0);
    }

    #[test]
    fn failures_are_recorded_and_not_fatal() {
        let mut assertions = Assertions::default();

        assert!(!assertions.assert(false, "false"));
        assert!(!assertions.assert_eq(1, 2, "unequal"));
        assert_eq!(assertions.assert_ok(Err::<(), _>("boom"), "err"), None);
        assert!(assertions.assert(true, "still running"));

        assert!(!assertions.all_ok());
        assert_eq!(assertions.failures(), 3);
    }
}
