//! Test helpers for asserting on relayed notifications.
//!
//! Compiled for this crate's own tests and, through the `test-support`
//! feature, for downstream integration tests.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::description::{Description, DescriptionProvider, ScenarioStep};
use crate::sink::{FailureNotice, NotificationSink};

/// One call observed by a [`RecordingSink`].
#[derive(Clone, Debug)]
pub enum SinkCall {
    /// `test_started`.
    Started(Description),
    /// `test_finished`.
    Finished(Description),
    /// `test_failure`.
    Failure(FailureNotice),
    /// `test_assumption_failed`.
    AssumptionFailed(FailureNotice),
}

impl SinkCall {
    /// Short label for the call kind, handy when comparing sequences.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Started(_) => "started",
            Self::Finished(_) => "finished",
            Self::Failure(_) => "failure",
            Self::AssumptionFailed(_) => "assumption_failed",
        }
    }

    /// Target the call applies to.
    #[must_use]
    pub fn description(&self) -> &Description {
        match self {
            Self::Started(description) | Self::Finished(description) => description,
            Self::Failure(notice) | Self::AssumptionFailed(notice) => notice.description(),
        }
    }

    /// Relayed failure, for the two failure channels.
    #[must_use]
    pub fn notice(&self) -> Option<&FailureNotice> {
        match self {
            Self::Failure(notice) | Self::AssumptionFailed(notice) => Some(notice),
            Self::Started(_) | Self::Finished(_) => None,
        }
    }
}

/// Sink that keeps every call in order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    calls: Mutex<Vec<SinkCall>>,
}

impl RecordingSink {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<SinkCall>> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn push(&self, call: SinkCall) {
        self.lock().push(call);
    }

    /// Snapshot of the recorded calls.
    #[must_use]
    pub fn calls(&self) -> Vec<SinkCall> {
        self.lock().clone()
    }

    /// Kinds of the recorded calls, in order.
    #[must_use]
    pub fn kinds(&self) -> Vec<&'static str> {
        self.lock().iter().map(SinkCall::kind).collect()
    }

    /// Remove and return the recorded calls.
    #[must_use]
    pub fn drain(&self) -> Vec<SinkCall> {
        self.lock().drain(..).collect()
    }
}

impl NotificationSink for RecordingSink {
    fn test_started(&self, description: &Description) {
        self.push(SinkCall::Started(description.clone()));
    }

    fn test_finished(&self, description: &Description) {
        self.push(SinkCall::Finished(description.clone()));
    }

    fn test_failure(&self, failure: FailureNotice) {
        self.push(SinkCall::Failure(failure));
    }

    fn test_assumption_failed(&self, failure: FailureNotice) {
        self.push(SinkCall::AssumptionFailed(failure));
    }
}

/// Provider returning fixed descriptions, keyed on step text.
#[derive(Clone, Debug)]
pub struct FixedDescriptions {
    scenario: Description,
}

impl FixedDescriptions {
    /// Create a provider for a scenario with the given name.
    #[must_use]
    pub fn new(scenario_name: &str) -> Self {
        Self {
            scenario: Description::suite(scenario_name, scenario_name),
        }
    }
}

impl DescriptionProvider for FixedDescriptions {
    fn description(&self) -> Description {
        self.scenario.clone()
    }

    fn describe_child(&self, step: &ScenarioStep) -> Description {
        Description::test(self.scenario.display_name(), step.text(), step.text())
    }
}
