//! Per-target notifiers and the failure relaying algorithm.

use std::sync::Arc;

use crate::description::Description;
use crate::failure::FailureRef;
use crate::sink::{FailureNotice, NotificationSink};

/// Sink channel selected for a failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Channel {
    /// Hard failure.
    Failure,
    /// Soft failure reported as a failed assumption.
    AssumptionFailed,
}

/// Notifier bound to one target: either a live sink target or a sink that
/// swallows everything.
///
/// The variant is picked once when the target starts and kept until it
/// finishes.
pub(crate) enum TestNotifier {
    Active(EachTestNotifier),
    Suppressed,
}

impl TestNotifier {
    pub(crate) fn active(sink: Arc<dyn NotificationSink>, description: Description) -> Self {
        Self::Active(EachTestNotifier { sink, description })
    }

    pub(crate) fn fire_started(&self) {
        if let Self::Active(notifier) = self {
            notifier.fire_started();
        }
    }

    pub(crate) fn relay(&self, channel: Channel, error: &FailureRef) {
        if let Self::Active(notifier) = self {
            notifier.relay(channel, error);
        }
    }

    pub(crate) fn fire_finished(&self) {
        if let Self::Active(notifier) = self {
            notifier.fire_finished();
        }
    }
}

pub(crate) struct EachTestNotifier {
    sink: Arc<dyn NotificationSink>,
    description: Description,
}

impl EachTestNotifier {
    fn fire_started(&self) {
        log::debug!("started {}", self.description);
        self.sink.test_started(&self.description);
    }

    fn fire_finished(&self) {
        log::debug!("finished {}", self.description);
        self.sink.test_finished(&self.description);
    }

    /// Assumption violations always land on the soft channel; composites are
    /// replaced by their constituents, recursively and in order.
    fn relay(&self, channel: Channel, error: &FailureRef) {
        let channel = if error.is_assumption_violated() {
            Channel::AssumptionFailed
        } else {
            channel
        };
        if let Some(parts) = error.failures().filter(|parts| !parts.is_empty()) {
            log::trace!(
                "flattening {} constituent failures for {}",
                parts.len(),
                self.description
            );
            for part in parts {
                self.relay(channel, part);
            }
            return;
        }
        let notice = FailureNotice::new(self.description.clone(), Arc::clone(error));
        match channel {
            Channel::Failure => {
                log::debug!("failure on {}: {error}", self.description);
                self.sink.test_failure(notice);
            }
            Channel::AssumptionFailed => {
                log::debug!("failed assumption on {}: {error}", self.description);
                self.sink.test_assumption_failed(notice);
            }
        }
    }
}
