//! Relays scenario and step outcomes to test-progress sinks.
//!
//! The execution engine emits lifecycle events; an [`EventSubscriber`]
//! forwards them to a [`ResultClassifier`], which decides for each outcome
//! whether the sink sees nothing, a failure, or a failed assumption, and
//! brackets every reported scenario and step with *started* and *finished*
//! notifications.
//!
//! ```
//! use std::sync::Arc;
//! use outcome_relay::{
//!     Event, EventSubscriber, LoggingSink, Outcome, ReporterConfig, ScenarioDescriber,
//!     ScenarioMetadata, ScenarioStep, SyncEventBus, TestStep,
//! };
//!
//! let config = ReporterConfig::default().apply_options(["--strict"]).unwrap();
//! let mut bus = SyncEventBus::new();
//! let subscriber = EventSubscriber::register(&mut bus, config);
//!
//! let metadata = ScenarioMetadata::new("features/cart.feature", "Checkout", 3);
//! subscriber
//!     .begin_unit(
//!         Box::new(ScenarioDescriber::new(metadata, config.filename_compatible_names)),
//!         Arc::new(LoggingSink::default()),
//!     )
//!     .unwrap();
//!
//! let step = TestStep::Scenario(ScenarioStep::new("I pay", 4));
//! bus.send(&Event::TestCaseStarted { scenario_name: "Checkout".into() });
//! bus.send(&Event::TestStepStarted { step: step.clone() });
//! bus.send(&Event::TestStepFinished { step, outcome: Outcome::undefined() });
//! bus.send(&Event::TestCaseFinished { outcome: Outcome::undefined() });
//! ```

mod classifier;
mod config;
mod description;
mod error;
mod event;
mod failure;
mod notifier;
mod outcome;
mod sink;
mod subscriber;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use classifier::{Relay, ResultClassifier, classify};
pub use config::{ReporterConfig, ReporterOptions};
pub use description::{
    Description, DescriptionProvider, ScenarioDescriber, ScenarioMetadata, ScenarioStep,
};
pub use error::RelayError;
pub use event::{Event, EventBus, EventHandler, EventKind, HookKind, SyncEventBus, TestStep};
pub use failure::{
    AssumptionViolated, Failure, FailureRef, MultipleFailures, PendingFailure, SkippedFailure,
    StepFailure, UndefinedFailure, flatten, shared,
};
pub use notifier::Channel;
pub use outcome::{NotificationLevel, Outcome, Status};
pub use sink::{FailureNotice, LoggingSink, NotificationSink};
pub use subscriber::EventSubscriber;
