//! Lifecycle events emitted by the execution engine and the bus carrying
//! them.

use std::fmt;

use crate::description::ScenarioStep;
use crate::outcome::Outcome;

/// Setup and teardown pseudo-steps surrounding scenarios and steps.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HookKind {
    /// Runs before the scenario.
    Before,
    /// Runs after the scenario.
    After,
    /// Runs before every step.
    BeforeStep,
    /// Runs after every step.
    AfterStep,
}

/// A unit of work executed within a test case.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TestStep {
    /// Setup or teardown pseudo-step; never reported.
    Hook(HookKind),
    /// Step written in the scenario.
    Scenario(ScenarioStep),
}

impl TestStep {
    /// Returns `true` for hook pseudo-steps.
    #[must_use]
    pub const fn is_hook(&self) -> bool {
        matches!(self, Self::Hook(_))
    }
}

/// Event kinds handlers can subscribe to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// [`Event::TestCaseStarted`].
    TestCaseStarted,
    /// [`Event::TestStepStarted`].
    TestStepStarted,
    /// [`Event::TestStepFinished`].
    TestStepFinished,
    /// [`Event::TestCaseFinished`].
    TestCaseFinished,
}

/// Lifecycle event of one test case.
#[derive(Clone, Debug)]
pub enum Event {
    /// A test case is about to run.
    TestCaseStarted {
        /// Scenario name, for diagnostics.
        scenario_name: String,
    },
    /// A step or hook is about to run.
    TestStepStarted {
        /// The step starting.
        step: TestStep,
    },
    /// A step or hook has run.
    TestStepFinished {
        /// The step that ran.
        step: TestStep,
        /// Its outcome.
        outcome: Outcome,
    },
    /// A test case has run.
    TestCaseFinished {
        /// Aggregated outcome of the case.
        outcome: Outcome,
    },
}

impl Event {
    /// The kind used to route this event.
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::TestCaseStarted { .. } => EventKind::TestCaseStarted,
            Self::TestStepStarted { .. } => EventKind::TestStepStarted,
            Self::TestStepFinished { .. } => EventKind::TestStepFinished,
            Self::TestCaseFinished { .. } => EventKind::TestCaseFinished,
        }
    }
}

/// Callback invoked for every event of the subscribed kind.
pub type EventHandler = Box<dyn Fn(&Event)>;

/// Registry of event handlers.
pub trait EventBus {
    /// Register `handler` for events of `kind`.
    fn subscribe(&mut self, kind: EventKind, handler: EventHandler);
}

/// Synchronous bus delivering each event to its handlers in registration
/// order before [`send`](Self::send) returns.
///
/// # Examples
/// ```
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use outcome_relay::{Event, EventBus, EventKind, Outcome, SyncEventBus};
///
/// let seen = Rc::new(Cell::new(0));
/// let counter = Rc::clone(&seen);
/// let mut bus = SyncEventBus::new();
/// bus.subscribe(
///     EventKind::TestCaseFinished,
///     Box::new(move |_| counter.set(counter.get() + 1)),
/// );
/// bus.send(&Event::TestCaseFinished { outcome: Outcome::passed() });
/// bus.send(&Event::TestCaseStarted { scenario_name: "ignored".into() });
/// assert_eq!(seen.get(), 1);
/// ```
#[derive(Default)]
pub struct SyncEventBus {
    handlers: Vec<(EventKind, EventHandler)>,
}

impl SyncEventBus {
    /// Create a bus with no handlers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver `event` to every handler registered for its kind.
    pub fn send(&self, event: &Event) {
        let kind = event.kind();
        for (_, handler) in self.handlers.iter().filter(|(registered, _)| *registered == kind) {
            handler(event);
        }
    }

    /// Number of handlers registered for `kind`.
    #[must_use]
    pub fn handler_count(&self, kind: EventKind) -> usize {
        self.handlers
            .iter()
            .filter(|(registered, _)| *registered == kind)
            .count()
    }
}

impl EventBus for SyncEventBus {
    fn subscribe(&mut self, kind: EventKind, handler: EventHandler) {
        self.handlers.push((kind, handler));
    }
}

impl fmt::Debug for SyncEventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncEventBus")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}
