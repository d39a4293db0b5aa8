//! Request deadlines observed by repository calls.

use std::time::{Duration, Instant};

use crate::repository::errors::{RepositoryError, RepositoryResult};

/// Point in time after which no further statement may be started.
///
/// A request timeout cannot interrupt a SQLite statement that is already
/// running, so repositories check the deadline before each statement and
/// before committing writes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Deadline(Option<Instant>);

impl Deadline {
    /// A deadline that never expires.
    pub const fn none() -> Self {
        Self(None)
    }

    pub fn after(timeout: Duration) -> Self {
        Self(Instant::now().checked_add(timeout))
    }

    pub fn is_expired(&self) -> bool {
        self.0.is_some_and(|at| Instant::now() >= at)
    }

    /// Fails with [`RepositoryError::Timeout`] once the deadline has passed.
    pub fn check(&self, operation: &'static str) -> RepositoryResult<()> {
        if self.is_expired() {
            return Err(RepositoryError::Timeout { operation });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unbounded_deadline_never_expires() {
        assert!(!Deadline::none().is_expired());
        assert!(Deadline::none().check("list").is_ok());
    }

    #[test]
    fn elapsed_deadline_reports_the_operation() {
        let deadline = Deadline::after(Duration::ZERO);

        assert!(deadline.is_expired());
        assert!(matches!(
            deadline.check("create"),
            Err(RepositoryError::Timeout { operation: "create" })
        ));
    }

    #[test]
    fn future_deadline_allows_work() {
        let deadline = Deadline::after(Duration::from_secs(60));

        assert!(deadline.check("get").is_ok());
    }
}
