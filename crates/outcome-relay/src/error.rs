//! Semantic error types for the outcome relay.
//!
//! Scenario and step outcomes are never errors of this crate; they are data
//! to relay. The variants below describe configuration problems and callers
//! driving the classifier out of order.

use thiserror::Error;

/// Errors raised by configuration loading and by out-of-order driving of the
/// [`ResultClassifier`](crate::ResultClassifier).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelayError {
    /// A new execution unit was requested while the current case is running.
    #[error("cannot begin a new execution unit while a test case is in progress")]
    UnitInProgress,

    /// The classifier was reached again while it was handling an event.
    #[error("classifier is busy dispatching an event")]
    ReentrantDispatch,

    /// An event arrived before any execution unit was established.
    #[error("no execution unit is active; call begin_unit first")]
    NoActiveUnit,

    /// The case finished without a matching start.
    #[error("test case finished before it was started")]
    CaseNotStarted,

    /// The case was started twice within one unit.
    #[error("test case was already started in this execution unit")]
    CaseAlreadyStarted,

    /// A step finished without a matching start.
    #[error("test step finished before it was started")]
    StepNotStarted,

    /// A step started while the previous step had not finished.
    #[error("test step started while the previous step is still running")]
    StepAlreadyStarted,

    /// A failed outcome was constructed without an error value.
    #[error("failed outcomes must carry an error")]
    MissingFailureError,

    /// An invalid configuration value was provided.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
