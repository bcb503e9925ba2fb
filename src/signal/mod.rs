//! Event-driven triggering.
//!
//! Transitions can fire themselves: an external source holds a
//! [`FireSignal`] for a transition and raises it, and the automaton takes
//! the transition when the signal is delivered. Delivery is serialized
//! through one queue per automaton, so signals raised concurrently from
//! different threads never interleave their exit/assign/entry sequences.
//!
//! The automaton keeps one subscription per transition reachable from its
//! start state. Signals of unsubscribed transitions are dropped on delivery.
//!
//! # Example
//!
//! ```rust
//! use signalgraph::engine::Automaton;
//!
//! let mut fsm: Automaton<&str, i32> = Automaton::new();
//! let a = fsm.add_state("a");
//! let b = fsm.add_state("b");
//! let t = fsm.add_transition(b).unwrap();
//! fsm.set_start_state(Some(a)).unwrap();
//! fsm.attach_transition(a, t);
//!
//! let signal = fsm.signal(t).unwrap();
//! signal.raise(vec![42]).unwrap();
//!
//! assert_eq!(fsm.dispatch_pending(), 1);
//! assert_eq!(fsm.current_state(), Some(b));
//! ```

mod fire;
mod registry;
mod teardown;

pub use fire::{FireSignal, Fired};
pub use registry::{SubscriptionId, SubscriptionRegistry};
pub use teardown::TeardownReport;

pub(crate) use fire::SignalQueue;

use crate::core::State;
use crate::engine::Automaton;
use crate::graph::{StateId, TransitionId};
use std::collections::BTreeSet;
use tracing::{debug, trace};

impl<S: State, A> Automaton<S, A> {
    /// A fire signal for `transition`, or `None` for an unknown handle.
    ///
    /// Signals can be handed out for any transition; only subscribed ones
    /// have an effect when delivered.
    pub fn signal(&self, transition: TransitionId) -> Option<FireSignal<A>> {
        self.graph.transition(transition)?;
        Some(self.signals.handle(transition))
    }

    /// Live subscriptions, one per transition reachable from the start state.
    pub fn subscriptions(&self) -> &SubscriptionRegistry {
        &self.subscriptions
    }

    /// The subscription held for `transition`, if any.
    pub fn subscription(&self, transition: TransitionId) -> Option<SubscriptionId> {
        self.subscriptions.get(transition)
    }

    /// Bring subscriptions from `before` to `after`: release `before \ after`,
    /// subscribe `after \ before`. Transitions in both are left alone.
    pub(crate) fn reconcile(
        &mut self,
        before: &BTreeSet<TransitionId>,
        after: &BTreeSet<TransitionId>,
    ) {
        for &transition in before.difference(after) {
            if let Some(id) = self.subscriptions.unsubscribe(transition) {
                trace!(%transition, subscription = %id, "unsubscribed");
            }
        }
        for &transition in after.difference(before) {
            if let Some(id) = self.subscriptions.subscribe(transition) {
                trace!(%transition, subscription = %id, "subscribed");
            }
        }
    }

    /// Incremental cleanup when the start state moves from `old` to `new`.
    pub(crate) fn reconcile_start(&mut self, old: Option<StateId>, new: Option<StateId>) {
        if old == new {
            return;
        }
        let before = self.reachable_from(old);
        let after = self.reachable_from(new);
        debug!(
            stale = before.difference(&after).count(),
            fresh = after.difference(&before).count(),
            kept = before.intersection(&after).count(),
            "reconciling subscriptions"
        );
        self.reconcile(&before, &after);
    }

    /// Deliver one raised signal. Returns whether a transit happened.
    pub fn deliver(&mut self, fired: Fired<A>) -> bool {
        let Fired { transition, args } = fired;
        if !self.subscriptions.contains(transition) {
            trace!(%transition, "signal dropped: not subscribed");
            return false;
        }
        if self.current.is_none() {
            trace!(%transition, "signal dropped: no current state");
            return false;
        }
        self.transit(transition, &args)
    }

    /// Deliver every signal raised so far, in order. Returns the number of
    /// transits taken.
    pub fn dispatch_pending(&mut self) -> usize {
        let mut taken = 0;
        while let Ok(fired) = self.signals.receiver.try_recv() {
            if self.deliver(fired) {
                taken += 1;
            }
        }
        taken
    }

    /// Wait for the next raised signal and deliver it. Returns whether a
    /// transit happened.
    ///
    /// The automaton holds a sender of its own queue, so the queue never
    /// closes: the future stays pending until some [`FireSignal`] is raised,
    /// even after [`teardown`](Self::teardown). Wrap it in
    /// `tokio::time::timeout` or `tokio::select!` to bound the wait.
    pub async fn dispatch_next(&mut self) -> bool {
        let Some(fired) = self.signals.receiver.recv().await else {
            return false;
        };
        self.deliver(fired)
    }
}
