//! The external test-progress sink and the stock logging implementation.

use std::sync::Arc;

use crate::description::Description;
use crate::failure::FailureRef;

/// A failure relayed against a notification target.
#[derive(Clone, Debug)]
pub struct FailureNotice {
    description: Description,
    error: FailureRef,
}

impl FailureNotice {
    /// Pair a target with the relayed error.
    #[must_use]
    pub fn new(description: Description, error: FailureRef) -> Self {
        Self { description, error }
    }

    /// Target the failure applies to.
    #[must_use]
    pub fn description(&self) -> &Description {
        &self.description
    }

    /// Relayed error, identical to the handle the engine supplied.
    #[must_use]
    pub fn error(&self) -> &FailureRef {
        &self.error
    }

    /// Returns `true` when `error` is the very handle carried by this notice.
    #[must_use]
    pub fn carries(&self, error: &FailureRef) -> bool {
        Arc::ptr_eq(&self.error, error)
    }
}

/// Receiver of test-progress notifications.
///
/// Sinks are shared between execution units, so they take `&self` and must
/// be thread-safe. Calls are expected to return quickly.
pub trait NotificationSink: Send + Sync {
    /// A scenario or step started.
    fn test_started(&self, description: &Description);

    /// A scenario or step finished, whatever its outcome.
    fn test_finished(&self, description: &Description);

    /// A hard failure that fails the run.
    fn test_failure(&self, failure: FailureNotice);

    /// A soft failure that marks the test as skipped or inconclusive.
    fn test_assumption_failed(&self, failure: FailureNotice);
}

/// Sink writing every notification through the `log` facade.
///
/// # Examples
/// ```
/// use outcome_relay::{Description, LoggingSink, NotificationSink};
///
/// let sink = LoggingSink::new("junit");
/// sink.test_started(&Description::suite("scenario", "a.feature:1"));
/// ```
#[derive(Clone, Debug)]
pub struct LoggingSink {
    target: &'static str,
}

impl LoggingSink {
    /// Create a sink logging under the given log target.
    #[must_use]
    pub const fn new(target: &'static str) -> Self {
        Self { target }
    }
}

impl Default for LoggingSink {
    fn default() -> Self {
        Self::new(module_path!())
    }
}

impl NotificationSink for LoggingSink {
    fn test_started(&self, description: &Description) {
        log::info!(target: self.target, "started: {description}");
    }

    fn test_finished(&self, description: &Description) {
        log::info!(target: self.target, "finished: {description}");
    }

    fn test_failure(&self, failure: FailureNotice) {
        log::error!(
            target: self.target,
            "failed: {}: {}",
            failure.description(),
            failure.error()
        );
    }

    fn test_assumption_failed(&self, failure: FailureNotice) {
        log::warn!(
            target: self.target,
            "assumption failed: {}: {}",
            failure.description(),
            failure.error()
        );
    }
}
