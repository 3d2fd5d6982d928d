//! Error values relayed to notification sinks.
//!
//! Sinks only accept one atomic error per call, and some errors need special
//! routing. Rather than testing for concrete types, the relay asks every error
//! two questions through the [`Failure`] trait: does it bundle other failures,
//! and does it represent a violated assumption?

use std::error::Error;
use std::fmt;
use std::sync::Arc;

use crate::outcome::NotificationLevel;

/// Shared handle to a relayed failure.
///
/// The same handle travels from the [`Outcome`](crate::Outcome) to the sink,
/// so sinks can compare identities with [`Arc::ptr_eq`].
pub type FailureRef = Arc<dyn Failure>;

/// An error value that can be relayed to a
/// [`NotificationSink`](crate::NotificationSink).
///
/// Both capabilities default to "no"; implementors override only what
/// applies to them.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use outcome_relay::{Failure, FailureRef};
///
/// #[derive(Debug, thiserror::Error)]
/// #[error("database offline")]
/// struct Offline;
///
/// impl Failure for Offline {
///     fn is_assumption_violated(&self) -> bool {
///         true
///     }
/// }
///
/// let failure: FailureRef = Arc::new(Offline);
/// assert!(failure.is_assumption_violated());
/// assert!(failure.failures().is_none());
/// ```
pub trait Failure: Error + Send + Sync + 'static {
    /// Returns the ordered constituents when this error bundles several
    /// independent failures.
    fn failures(&self) -> Option<&[FailureRef]> {
        None
    }

    /// Returns `true` when the error marks a soft failure that should be
    /// reported as a failed assumption.
    fn is_assumption_violated(&self) -> bool {
        false
    }
}

/// Wrap a failure value in a shared handle.
///
/// # Examples
///
/// ```
/// use outcome_relay::{shared, StepFailure};
///
/// let failure = shared(StepFailure::new("boom"));
/// assert_eq!(failure.to_string(), "boom");
/// ```
#[must_use]
pub fn shared(failure: impl Failure) -> FailureRef {
    Arc::new(failure)
}

/// Flatten a possibly nested failure into its leaves, depth first and left
/// to right.
///
/// A composite with an empty constituent list counts as a leaf.
///
/// # Examples
///
/// ```
/// use outcome_relay::{flatten, shared, MultipleFailures, StepFailure};
///
/// let first = shared(StepFailure::new("first"));
/// let second = shared(StepFailure::new("second"));
/// let nested = shared(MultipleFailures::new(vec![second.clone()]));
/// let composite = shared(MultipleFailures::new(vec![first.clone(), nested]));
///
/// let leaves: Vec<String> = flatten(&composite).iter().map(ToString::to_string).collect();
/// assert_eq!(leaves, ["first", "second"]);
/// ```
#[must_use]
pub fn flatten(failure: &FailureRef) -> Vec<FailureRef> {
    let mut leaves = Vec::new();
    collect_leaves(failure, &mut leaves);
    leaves
}

fn collect_leaves(failure: &FailureRef, leaves: &mut Vec<FailureRef>) {
    match failure.failures() {
        Some(parts) if !parts.is_empty() => {
            for part in parts {
                collect_leaves(part, leaves);
            }
        }
        _ => leaves.push(Arc::clone(failure)),
    }
}

/// Placeholder reported when a skipped outcome carries no error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkippedFailure {
    level: NotificationLevel,
}

impl SkippedFailure {
    /// Create a placeholder worded for the given level.
    ///
    /// # Examples
    ///
    /// ```
    /// use outcome_relay::{NotificationLevel, SkippedFailure};
    ///
    /// let failure = SkippedFailure::new(NotificationLevel::Step);
    /// assert_eq!(failure.to_string(), "This step has been skipped");
    /// ```
    #[must_use]
    pub const fn new(level: NotificationLevel) -> Self {
        Self { level }
    }

    /// The level the message was worded for.
    #[must_use]
    pub const fn level(&self) -> NotificationLevel {
        self.level
    }
}

impl fmt::Display for SkippedFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self.level {
            NotificationLevel::Scenario => "This scenario has been skipped",
            NotificationLevel::Step => "This step has been skipped",
        })
    }
}

impl Error for SkippedFailure {}

impl Failure for SkippedFailure {}

/// Placeholder reported when an undefined outcome carries no error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UndefinedFailure {
    level: NotificationLevel,
}

impl UndefinedFailure {
    /// Create a placeholder worded for the given level.
    ///
    /// # Examples
    ///
    /// ```
    /// use outcome_relay::{NotificationLevel, UndefinedFailure};
    ///
    /// let failure = UndefinedFailure::new(NotificationLevel::Scenario);
    /// assert_eq!(failure.to_string(), "This scenario has undefined steps");
    /// ```
    #[must_use]
    pub const fn new(level: NotificationLevel) -> Self {
        Self { level }
    }

    /// The level the message was worded for.
    #[must_use]
    pub const fn level(&self) -> NotificationLevel {
        self.level
    }
}

impl fmt::Display for UndefinedFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self.level {
            NotificationLevel::Scenario => "This scenario has undefined steps",
            NotificationLevel::Step => "This step is undefined",
        })
    }
}

impl Error for UndefinedFailure {}

impl Failure for UndefinedFailure {}

const PENDING_DEFAULT_MESSAGE: &str = "TODO: implement me";

/// Raised by a step that has been written but not yet implemented.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct PendingFailure {
    message: String,
}

impl PendingFailure {
    /// Create a pending marker with a custom message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for PendingFailure {
    fn default() -> Self {
        Self::new(PENDING_DEFAULT_MESSAGE)
    }
}

impl Failure for PendingFailure {}

/// A soft failure: the test could not run meaningfully, but did not fail.
///
/// Always relayed as a failed assumption, whatever the outcome status.
///
/// # Examples
///
/// ```
/// use outcome_relay::{AssumptionViolated, Failure};
///
/// let failure = AssumptionViolated::new("no network");
/// assert!(failure.is_assumption_violated());
/// assert_eq!(failure.to_string(), "no network");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct AssumptionViolated {
    message: String,
}

impl AssumptionViolated {
    /// Create an assumption violation with the given message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Failure for AssumptionViolated {
    fn is_assumption_violated(&self) -> bool {
        true
    }
}

/// Several independent failures reported together.
///
/// # Examples
///
/// ```
/// use outcome_relay::{shared, Failure, MultipleFailures, StepFailure};
///
/// let composite = MultipleFailures::new(vec![
///     shared(StepFailure::new("left")),
///     shared(StepFailure::new("right")),
/// ]);
/// assert_eq!(composite.failures().map(<[_]>::len), Some(2));
/// assert_eq!(composite.to_string(), "there were 2 errors: left; right");
/// ```
#[derive(Debug, Clone)]
pub struct MultipleFailures {
    failures: Vec<FailureRef>,
}

impl MultipleFailures {
    /// Bundle the given failures, preserving their order.
    #[must_use]
    pub fn new(failures: Vec<FailureRef>) -> Self {
        Self { failures }
    }
}

impl fmt::Display for MultipleFailures {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "there were {} errors", self.failures.len())?;
        for (index, failure) in self.failures.iter().enumerate() {
            let separator = if index == 0 { ": " } else { "; " };
            write!(f, "{separator}{failure}")?;
        }
        Ok(())
    }
}

impl Error for MultipleFailures {}

impl Failure for MultipleFailures {
    fn failures(&self) -> Option<&[FailureRef]> {
        Some(&self.failures)
    }
}

/// Adapter turning any thread-safe error into a [`Failure`].
///
/// # Examples
///
/// ```
/// use outcome_relay::StepFailure;
///
/// let io = std::io::Error::new(std::io::ErrorKind::NotFound, "fixture missing");
/// let failure = StepFailure::new(io);
/// assert_eq!(failure.to_string(), "fixture missing");
/// ```
#[derive(Debug)]
pub struct StepFailure {
    inner: Box<dyn Error + Send + Sync + 'static>,
}

impl StepFailure {
    /// Wrap an error or message.
    #[must_use]
    pub fn new(error: impl Into<Box<dyn Error + Send + Sync + 'static>>) -> Self {
        Self {
            inner: error.into(),
        }
    }
}

impl fmt::Display for StepFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}

impl Error for StepFailure {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.inner.source()
    }
}

impl Failure for StepFailure {}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::scenario(NotificationLevel::Scenario, "This scenario has been skipped")]
    #[case::step(NotificationLevel::Step, "This step has been skipped")]
    fn skipped_message_matches_level(#[case] level: NotificationLevel, #[case] expected: &str) {
        assert_eq!(SkippedFailure::new(level).to_string(), expected);
    }

    #[rstest]
    #[case::scenario(NotificationLevel::Scenario, "This scenario has undefined steps")]
    #[case::step(NotificationLevel::Step, "This step is undefined")]
    fn undefined_message_matches_level(#[case] level: NotificationLevel, #[case] expected: &str) {
        assert_eq!(UndefinedFailure::new(level).to_string(), expected);
    }

    #[test]
    fn pending_default_message() {
        assert_eq!(PendingFailure::default().to_string(), "TODO: implement me");
    }

    #[test]
    fn only_assumption_violations_report_soft_failures() {
        assert!(AssumptionViolated::new("x").is_assumption_violated());
        assert!(!PendingFailure::default().is_assumption_violated());
        assert!(!StepFailure::new("x").is_assumption_violated());
        assert!(!MultipleFailures::new(Vec::new()).is_assumption_violated());
    }

    #[test]
    fn flatten_walks_nested_composites_in_order() {
        let a = shared(StepFailure::new("a"));
        let b = shared(StepFailure::new("b"));
        let c = shared(StepFailure::new("c"));
        let inner = shared(MultipleFailures::new(vec![Arc::clone(&b), Arc::clone(&c)]));
        let outer = shared(MultipleFailures::new(vec![Arc::clone(&a), inner]));

        let leaves = flatten(&outer);

        assert_eq!(leaves.len(), 3);
        assert!(
            leaves
                .iter()
                .zip([&a, &b, &c])
                .all(|(leaf, expected)| Arc::ptr_eq(leaf, expected))
        );
    }

    #[test]
    fn flatten_keeps_empty_composite_as_leaf() {
        let empty = shared(MultipleFailures::new(Vec::new()));
        let leaves = flatten(&empty);
        let [leaf] = leaves.as_slice() else {
            panic!("expected a single leaf, got {}", leaves.len());
        };
        assert!(Arc::ptr_eq(leaf, &empty));
    }

    #[test]
    fn step_failure_forwards_source_chain() {
        #[derive(Debug, thiserror::Error)]
        #[error("outer")]
        struct Outer(#[source] std::io::Error);

        let failure = StepFailure::new(Outer(std::io::Error::other("inner")));
        assert_eq!(failure.to_string(), "outer");
        assert_eq!(
            failure.source().map(ToString::to_string).as_deref(),
            Some("inner")
        );
    }
}
