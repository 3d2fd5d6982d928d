//! Outcome classification and per-unit notification state.
//!
//! [`classify`] decides which sink channel an outcome belongs to.
//! [`ResultClassifier`] applies those decisions to the live notification
//! targets of one execution unit, bracketing each target with *started* and
//! *finished* calls.

use std::sync::Arc;

use crate::config::ReporterConfig;
use crate::description::{DescriptionProvider, ScenarioStep};
use crate::error::RelayError;
use crate::failure::{FailureRef, PendingFailure, SkippedFailure, UndefinedFailure, shared};
use crate::notifier::{Channel, TestNotifier};
use crate::outcome::{NotificationLevel, Outcome, Status};
use crate::sink::NotificationSink;


/// A classification decision: relay `error` on `channel`.
#[derive(Clone, Debug)]
pub struct Relay {
    /// Channel selected by the outcome status and strict mode.
    pub channel: Channel,
    /// Error to relay; either the outcome's own or a synthesized placeholder.
    pub error: FailureRef,
}

/// Map an outcome onto a sink channel.
///
/// Returns `None` for passed outcomes. Missing errors are replaced by
/// placeholders worded for `level`. Assumption violations are rerouted later,
/// when the error is relayed.
///
/// # Examples
/// ```
/// use outcome_relay::{classify, Channel, NotificationLevel, Outcome};
///
/// let relay = classify(&Outcome::undefined(), NotificationLevel::Step, true).unwrap();
/// assert_eq!(relay.channel, Channel::Failure);
/// assert_eq!(relay.error.to_string(), "This step is undefined");
///
/// assert!(classify(&Outcome::passed(), NotificationLevel::Scenario, true).is_none());
/// ```
#[must_use]
pub fn classify(outcome: &Outcome, level: NotificationLevel, strict: bool) -> Option<Relay> {
    let strict_channel = if strict {
        Channel::Failure
    } else {
        Channel::AssumptionFailed
    };
    let error = outcome.error_handle();
    let (channel, error) = match outcome.status() {
        Status::Passed => return None,
        Status::Skipped => (
            Channel::AssumptionFailed,
            error.unwrap_or_else(|| shared(SkippedFailure::new(level))),
        ),
        Status::Pending => (
            strict_channel,
            error.unwrap_or_else(|| shared(PendingFailure::default())),
        ),
        Status::Undefined => (
            strict_channel,
            error.unwrap_or_else(|| shared(UndefinedFailure::new(level))),
        ),
        Status::Failed => (Channel::Failure, error?),
    };
    Some(Relay { channel, error })
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CaseState {
    Idle,
    Started,
}

/// State owned by one test-case execution; dropped when the case finishes.
struct ExecutionUnit {
    provider: Box<dyn DescriptionProvider>,
    sink: Arc<dyn NotificationSink>,
    case: TestNotifier,
    case_state: CaseState,
    step: Option<TestNotifier>,
}

/// Translates scenario and step outcomes into sink notifications.
///
/// One classifier serves one execution unit at a time. Units running
/// concurrently need their own classifier; the [`ReporterConfig`] may be
/// shared between them.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use outcome_relay::{
///     LoggingSink, Outcome, ReporterConfig, ResultClassifier, ScenarioDescriber,
///     ScenarioMetadata, ScenarioStep,
/// };
///
/// let mut classifier = ResultClassifier::new(ReporterConfig::default());
/// let describer = ScenarioDescriber::new(
///     ScenarioMetadata::new("cart.feature", "Checkout", 3),
///     false,
/// );
/// classifier.begin_unit(Box::new(describer), Arc::new(LoggingSink::default())).unwrap();
/// classifier.on_case_started().unwrap();
/// classifier.on_step_started(&ScenarioStep::new("I pay", 4)).unwrap();
/// classifier.on_step_finished(&Outcome::passed()).unwrap();
/// classifier.on_case_finished(&Outcome::passed()).unwrap();
/// assert!(!classifier.has_active_unit());
/// ```
pub struct ResultClassifier {
    config: ReporterConfig,
    unit: Option<ExecutionUnit>,
}

impl ResultClassifier {
    /// Create a classifier with no active unit.
    #[must_use]
    pub fn new(config: ReporterConfig) -> Self {
        Self { config, unit: None }
    }

    /// The flags this classifier was built with.
    #[must_use]
    pub const fn config(&self) -> ReporterConfig {
        self.config
    }

    /// Returns `true` between [`begin_unit`](Self::begin_unit) and the end of
    /// the unit's case.
    #[must_use]
    pub fn has_active_unit(&self) -> bool {
        self.unit.is_some()
    }

    /// Establish the targets for the next test case.
    ///
    /// Replaces a unit whose case has not started yet.
    ///
    /// # Errors
    /// Returns [`RelayError::UnitInProgress`] when the current unit's case has
    /// started and not yet finished.
    pub fn begin_unit(
        &mut self,
        provider: Box<dyn DescriptionProvider>,
        sink: Arc<dyn NotificationSink>,
    ) -> Result<(), RelayError> {
        if let Some(unit) = &self.unit {
            if unit.case_state == CaseState::Started {
                return Err(RelayError::UnitInProgress);
            }
            log::debug!("replacing execution unit that never started");
        }
        let description = provider.description();
        log::debug!("beginning execution unit for {description}");
        let case = TestNotifier::active(Arc::clone(&sink), description);
        self.unit = Some(ExecutionUnit {
            provider,
            sink,
            case,
            case_state: CaseState::Idle,
            step: None,
        });
        Ok(())
    }

    /// Report the start of the test case.
    ///
    /// # Errors
    /// Returns [`RelayError::NoActiveUnit`] without a unit and
    /// [`RelayError::CaseAlreadyStarted`] on a second start.
    pub fn on_case_started(&mut self) -> Result<(), RelayError> {
        let unit = self.unit_mut()?;
        if unit.case_state == CaseState::Started {
            return Err(RelayError::CaseAlreadyStarted);
        }
        unit.case_state = CaseState::Started;
        unit.case.fire_started();
        Ok(())
    }

    /// Report the start of a step.
    ///
    /// With step notifications disabled the step gets a suppressed notifier
    /// and nothing reaches the sink until the next step.
    ///
    /// # Errors
    /// Returns [`RelayError::NoActiveUnit`] without a unit and
    /// [`RelayError::StepAlreadyStarted`] while another step is running.
    pub fn on_step_started(&mut self, step: &ScenarioStep) -> Result<(), RelayError> {
        let step_notifications = self.config.step_notifications;
        let unit = self.unit_mut()?;
        if unit.step.is_some() {
            return Err(RelayError::StepAlreadyStarted);
        }
        let notifier = if step_notifications {
            TestNotifier::active(Arc::clone(&unit.sink), unit.provider.describe_child(step))
        } else {
            TestNotifier::Suppressed
        };
        notifier.fire_started();
        unit.step = Some(notifier);
        Ok(())
    }

    /// Classify a step outcome, then report the step as finished.
    ///
    /// # Errors
    /// Returns [`RelayError::NoActiveUnit`] without a unit and
    /// [`RelayError::StepNotStarted`] when no step is running.
    pub fn on_step_finished(&mut self, outcome: &Outcome) -> Result<(), RelayError> {
        let strict = self.config.strict;
        let unit = self.unit_mut()?;
        let notifier = unit.step.take().ok_or(RelayError::StepNotStarted)?;
        notify_result(&notifier, outcome, NotificationLevel::Step, strict);
        notifier.fire_finished();
        Ok(())
    }

    /// Classify the test-case outcome, report the case as finished and close
    /// the unit.
    ///
    /// # Errors
    /// Returns [`RelayError::NoActiveUnit`] without a unit and
    /// [`RelayError::CaseNotStarted`] when the case never started.
    pub fn on_case_finished(&mut self, outcome: &Outcome) -> Result<(), RelayError> {
        let strict = self.config.strict;
        let unit = self.unit_mut()?;
        if unit.case_state != CaseState::Started {
            return Err(RelayError::CaseNotStarted);
        }
        notify_result(&unit.case, outcome, NotificationLevel::Scenario, strict);
        unit.case.fire_finished();
        if unit.step.take().is_some() {
            log::warn!("test case finished while a step was still running");
        }
        self.unit = None;
        Ok(())
    }

    fn unit_mut(&mut self) -> Result<&mut ExecutionUnit, RelayError> {
        self.unit.as_mut().ok_or(RelayError::NoActiveUnit)
    }
}

fn notify_result(
    notifier: &TestNotifier,
    outcome: &Outcome,
    level: NotificationLevel,
    strict: bool,
) {
    if let Some(relay) = classify(outcome, level, strict) {
        notifier.relay(relay.channel, &relay.error);
    }
}
