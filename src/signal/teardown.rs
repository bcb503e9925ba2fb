//! Releasing every subscription an automaton holds.

use super::registry::SubscriptionId;
use crate::core::State;
use crate::engine::Automaton;
use crate::graph::TransitionId;
use tracing::{debug, warn};

/// Outcome of [`Automaton::teardown`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeardownReport {
    /// Subscriptions released by walking the graph from the start state
    pub released: Vec<(TransitionId, SubscriptionId)>,
    /// Subscriptions found in the registry for transitions that were not
    /// reachable from the start state; released as well
    pub orphaned: Vec<(TransitionId, SubscriptionId)>,
}

impl TeardownReport {
    /// No orphaned subscription was found.
    pub fn is_clean(&self) -> bool {
        self.orphaned.is_empty()
    }

    /// Subscriptions released in total, orphans included.
    pub fn released_count(&self) -> usize {
        self.released.len() + self.orphaned.len()
    }
}

impl<S: State, A> Automaton<S, A> {
    /// Release every subscription and clear the start and current states.
    ///
    /// Transitions reachable from the last start state are unsubscribed
    /// first; anything still left in the registry afterwards is reported as
    /// orphaned. Signals delivered afterwards have no effect. Calling this
    /// again releases nothing.
    pub fn teardown(&mut self) -> TeardownReport {
        let mut report = TeardownReport::default();

        for transition in self.reachable_from(self.start) {
            if let Some(id) = self.subscriptions.unsubscribe(transition) {
                report.released.push((transition, id));
            }
        }

        report.orphaned = self.subscriptions.drain();
        if !report.is_clean() {
            warn!(orphaned = report.orphaned.len(), "teardown found orphaned subscriptions");
        }

        self.start = None;
        self.current = None;
        debug!(released = report.released_count(), "automaton torn down");
        report
    }
}
