//! Outcomes of executed scenarios and steps.

use std::fmt;
use std::sync::Arc;

use crate::error::RelayError;
use crate::failure::FailureRef;

/// Status reported by the execution engine for a scenario or a step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Status {
    /// Executed without errors.
    Passed,
    /// Not executed, usually because an earlier step did not pass.
    Skipped,
    /// Step definition exists but is not implemented yet.
    Pending,
    /// No step definition matched.
    Undefined,
    /// Executed and failed.
    Failed,
}

impl Status {
    /// Retrieve the lowercase label for the status.
    ///
    /// # Examples
    /// ```
    /// use outcome_relay::Status;
    ///
    /// assert_eq!(Status::Undefined.label(), "undefined");
    /// ```
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Skipped => "skipped",
            Self::Pending => "pending",
            Self::Undefined => "undefined",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Whether a classification applies to a whole scenario or to one step.
///
/// Only the wording of synthesized placeholder errors depends on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NotificationLevel {
    /// The test case as a whole.
    Scenario,
    /// A single step within the test case.
    Step,
}

/// Status plus the error attached by the execution engine, if any.
///
/// A failed outcome always carries an error; the constructors make any other
/// combination unrepresentable.
///
/// # Examples
/// ```
/// use outcome_relay::{shared, Outcome, Status, StepFailure};
///
/// let failed = Outcome::failed(shared(StepFailure::new("boom")));
/// assert_eq!(failed.status(), Status::Failed);
/// assert!(failed.error().is_some());
///
/// assert!(Outcome::new(Status::Failed, None).is_err());
/// ```
#[derive(Clone, Debug)]
pub struct Outcome {
    status: Status,
    error: Option<FailureRef>,
}

impl Outcome {
    /// Build an outcome from raw parts.
    ///
    /// # Errors
    /// Returns [`RelayError::MissingFailureError`] when `status` is
    /// [`Status::Failed`] and no error is supplied.
    pub fn new(status: Status, error: Option<FailureRef>) -> Result<Self, RelayError> {
        if status == Status::Failed && error.is_none() {
            return Err(RelayError::MissingFailureError);
        }
        Ok(Self { status, error })
    }

    /// A passed outcome.
    #[must_use]
    pub const fn passed() -> Self {
        Self {
            status: Status::Passed,
            error: None,
        }
    }

    /// A skipped outcome without an explanation.
    #[must_use]
    pub const fn skipped() -> Self {
        Self {
            status: Status::Skipped,
            error: None,
        }
    }

    /// A skipped outcome carrying the reason.
    #[must_use]
    pub fn skipped_with(error: FailureRef) -> Self {
        Self {
            status: Status::Skipped,
            error: Some(error),
        }
    }

    /// A pending outcome carrying the pending marker.
    #[must_use]
    pub fn pending(error: FailureRef) -> Self {
        Self {
            status: Status::Pending,
            error: Some(error),
        }
    }

    /// An undefined outcome without an explanation.
    #[must_use]
    pub const fn undefined() -> Self {
        Self {
            status: Status::Undefined,
            error: None,
        }
    }

    /// An undefined outcome carrying an explanation.
    #[must_use]
    pub fn undefined_with(error: FailureRef) -> Self {
        Self {
            status: Status::Undefined,
            error: Some(error),
        }
    }

    /// A failed outcome.
    #[must_use]
    pub fn failed(error: FailureRef) -> Self {
        Self {
            status: Status::Failed,
            error: Some(error),
        }
    }

    /// The reported status.
    #[must_use]
    pub const fn status(&self) -> Status {
        self.status
    }

    /// The attached error, if any.
    #[must_use]
    pub fn error(&self) -> Option<&FailureRef> {
        self.error.as_ref()
    }

    /// Clone the attached error handle, if any.
    pub(crate) fn error_handle(&self) -> Option<FailureRef> {
        self.error.as_ref().map(Arc::clone)
    }
}
