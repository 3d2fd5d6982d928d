//! Wiring between the event bus and the result classifier.
//!
//! Handlers forward events synchronously and drop hook steps. A classifier
//! rejecting an event is a driver bug, not a test outcome, so it is logged
//! rather than propagated into the bus.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use crate::classifier::ResultClassifier;
use crate::config::ReporterConfig;
use crate::description::DescriptionProvider;
use crate::error::RelayError;
use crate::event::{Event, EventBus, EventKind, TestStep};
use crate::sink::NotificationSink;

type SharedClassifier = Rc<RefCell<ResultClassifier>>;

/// Reporting unit attached to an event bus.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use outcome_relay::{
///     Event, EventSubscriber, LoggingSink, Outcome, ReporterConfig, ScenarioDescriber,
///     ScenarioMetadata, SyncEventBus,
/// };
///
/// let mut bus = SyncEventBus::new();
/// let subscriber = EventSubscriber::register(&mut bus, ReporterConfig::default());
/// let describer = ScenarioDescriber::new(
///     ScenarioMetadata::new("a.feature", "Scenario", 1),
///     false,
/// );
/// subscriber
///     .begin_unit(Box::new(describer), Arc::new(LoggingSink::default()))
///     .unwrap();
/// bus.send(&Event::TestCaseStarted { scenario_name: "Scenario".into() });
/// bus.send(&Event::TestCaseFinished { outcome: Outcome::passed() });
/// assert!(!subscriber.has_active_unit());
/// ```
#[derive(Clone)]
pub struct EventSubscriber {
    classifier: SharedClassifier,
}

impl EventSubscriber {
    /// Build a classifier for `config` and register its four handlers on
    /// `bus`.
    pub fn register<B: EventBus + ?Sized>(bus: &mut B, config: ReporterConfig) -> Self {
        let classifier = Rc::new(RefCell::new(ResultClassifier::new(config)));
        bus.subscribe(
            EventKind::TestCaseStarted,
            forward(&classifier, handle_test_case_started),
        );
        bus.subscribe(
            EventKind::TestStepStarted,
            forward(&classifier, handle_test_step_started),
        );
        bus.subscribe(
            EventKind::TestStepFinished,
            forward(&classifier, handle_test_step_finished),
        );
        bus.subscribe(
            EventKind::TestCaseFinished,
            forward(&classifier, handle_test_case_finished),
        );
        Self { classifier }
    }

    /// Prepare the classifier for the next test case.
    ///
    /// # Errors
    /// Returns [`RelayError::UnitInProgress`] while a case is running and
    /// [`RelayError::ReentrantDispatch`] when called from inside an event
    /// handler.
    pub fn begin_unit(
        &self,
        provider: Box<dyn DescriptionProvider>,
        sink: Arc<dyn NotificationSink>,
    ) -> Result<(), RelayError> {
        let Ok(mut classifier) = self.classifier.try_borrow_mut() else {
            log::error!("cannot begin an execution unit during event dispatch");
            return Err(RelayError::ReentrantDispatch);
        };
        classifier.begin_unit(provider, sink)
    }

    /// Returns `true` while an execution unit is open.
    #[must_use]
    pub fn has_active_unit(&self) -> bool {
        self.classifier
            .try_borrow()
            .is_ok_and(|classifier| classifier.has_active_unit())
    }
}

type Handler = fn(&mut ResultClassifier, &Event) -> Result<(), RelayError>;

fn forward(classifier: &SharedClassifier, handler: Handler) -> Box<dyn Fn(&Event)> {
    let classifier = Rc::clone(classifier);
    Box::new(move |event| {
        let Ok(mut classifier) = classifier.try_borrow_mut() else {
            log::error!("dropping re-entrant {:?} event", event.kind());
            return;
        };
        if let Err(error) = handler(&mut classifier, event) {
            log::error!("cannot relay {:?} event: {error}", event.kind());
        }
    })
}

fn handle_test_case_started(
    classifier: &mut ResultClassifier,
    event: &Event,
) -> Result<(), RelayError> {
    let Event::TestCaseStarted { scenario_name } = event else {
        return Ok(());
    };
    log::debug!("test case started: {scenario_name}");
    classifier.on_case_started()
}

fn handle_test_step_started(
    classifier: &mut ResultClassifier,
    event: &Event,
) -> Result<(), RelayError> {
    match event {
        Event::TestStepStarted {
            step: TestStep::Scenario(step),
        } => classifier.on_step_started(step),
        _ => Ok(()),
    }
}

fn handle_test_step_finished(
    classifier: &mut ResultClassifier,
    event: &Event,
) -> Result<(), RelayError> {
    match event {
        Event::TestStepFinished {
            step: TestStep::Scenario(_),
            outcome,
        } => classifier.on_step_finished(outcome),
        _ => Ok(()),
    }
}

fn handle_test_case_finished(
    classifier: &mut ResultClassifier,
    event: &Event,
) -> Result<(), RelayError> {
    let Event::TestCaseFinished { outcome } = event else {
        return Ok(());
    };
    classifier.on_case_finished(outcome)
}
