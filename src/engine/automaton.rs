//! The automaton: a state graph plus a start state and an execution cursor.

use crate::core::{State, TransitHistory, TransitRecord};
use crate::engine::config::{AutomatonConfig, TransitPolicy};
use crate::engine::error::FsmError;
use crate::graph::{
    Graph, StateId, StateNode, TransitContext, Traversal, TransitionId, TransitionNode,
};
use crate::signal::{SignalQueue, SubscriptionRegistry};
use chrono::Utc;
use std::collections::BTreeSet;
use std::fmt;
use tracing::{debug, trace};

/// Event-driven finite state machine over an arena graph.
///
/// The automaton owns every state and transition. `States` is the set of
/// states reachable from the start state, epsilon edges included; only
/// those states accept new transitions. Every transition reachable from the
/// start state holds exactly one subscription, so it can be fired through a
/// [`FireSignal`](crate::signal::FireSignal).
///
/// # Example
///
/// ```rust
/// use signalgraph::engine::Automaton;
///
/// let mut fsm: Automaton<&str, u32> = Automaton::new();
/// let idle = fsm.add_state("idle");
/// let busy = fsm.add_state("busy");
/// let start_job = fsm.add_transition(busy).unwrap();
///
/// fsm.set_start_state(Some(idle)).unwrap();
/// assert!(fsm.attach_transition(idle, start_job));
///
/// assert!(fsm.transit(start_job, &[7]));
/// assert_eq!(fsm.current_state(), Some(busy));
/// ```
pub struct Automaton<S, A> {
    pub(crate) graph: Graph<S, A>,
    pub(crate) start: Option<StateId>,
    pub(crate) current: Option<StateId>,
    pub(crate) subscriptions: SubscriptionRegistry,
    pub(crate) signals: SignalQueue<A>,
    history: TransitHistory,
    config: AutomatonConfig,
}

impl<S: State, A> Automaton<S, A> {
    /// Create an empty automaton with the default configuration.
    pub fn new() -> Self {
        Self::with_config(AutomatonConfig::default())
    }

    /// Create an empty automaton with the given configuration.
    pub fn with_config(config: AutomatonConfig) -> Self {
        Self {
            graph: Graph::new(),
            start: None,
            current: None,
            subscriptions: SubscriptionRegistry::new(),
            signals: SignalQueue::new(),
            history: TransitHistory::with_limit(config.history_limit),
            config,
        }
    }

    /// Settings this automaton was built with.
    pub fn config(&self) -> &AutomatonConfig {
        &self.config
    }

    /// Read-only view of the whole arena, reachable or not.
    pub fn graph(&self) -> &Graph<S, A> {
        &self.graph
    }

    /// Add a state to the arena. It joins [`states`](Self::states) once
    /// reachable from the start state.
    pub fn add_state(&mut self, data: S) -> StateId {
        self.graph.add_state(data)
    }

    /// Create an unattached input transition leading to `target`.
    ///
    /// # Errors
    ///
    /// Returns `FsmError::UnknownState` if `target` is not in the arena.
    pub fn add_transition(&mut self, target: StateId) -> Result<TransitionId, FsmError> {
        self.graph.add_transition(target)
    }

    /// Create an unattached epsilon transition leading to `target`.
    ///
    /// # Errors
    ///
    /// Returns `FsmError::UnknownState` if `target` is not in the arena.
    pub fn add_epsilon_transition(&mut self, target: StateId) -> Result<TransitionId, FsmError> {
        self.graph.add_epsilon_transition(target)
    }

    /// Mutable access to a state's flags and actions.
    pub fn state_mut(&mut self, id: StateId) -> Option<&mut StateNode<S>> {
        self.graph.state_mut(id)
    }

    /// Mutable access to a transition's guard and action.
    pub fn transition_mut(&mut self, id: TransitionId) -> Option<&mut TransitionNode<A>> {
        self.graph.transition_mut(id)
    }

    /// The state every run starts from.
    pub fn start_state(&self) -> Option<StateId> {
        self.start
    }

    /// The cursor, `None` before a start state is set, after teardown, or
    /// once its state was cut off from the start state.
    pub fn current_state(&self) -> Option<StateId> {
        self.current
    }

    /// Whether the cursor sits on a terminal state.
    pub fn is_terminal(&self) -> bool {
        self.current
            .and_then(|id| self.graph.state(id))
            .is_some_and(StateNode::is_terminal)
    }

    /// Transits taken so far, oldest first.
    pub fn history(&self) -> &TransitHistory {
        &self.history
    }

    /// States reachable from the start state, epsilon edges included.
    pub fn states(&self) -> BTreeSet<StateId> {
        self.start
            .map(|start| self.graph.reachable_states(start, Traversal::WithEpsilon))
            .unwrap_or_default()
    }

    /// Transitions reachable from the start state, epsilon edges included.
    pub fn reachable_transitions(&self) -> BTreeSet<TransitionId> {
        self.reachable_from(self.start)
    }

    pub(crate) fn reachable_from(&self, state: Option<StateId>) -> BTreeSet<TransitionId> {
        state
            .map(|id| self.graph.recur_get_transitions(id, Traversal::WithEpsilon))
            .unwrap_or_default()
    }

    /// Replace the start state and move the cursor onto it.
    ///
    /// Subscriptions of transitions no longer reachable are released; ones
    /// reachable from both the old and new start state are kept as they are.
    /// Setting the same start state again is a no-op.
    pub fn set_start_state(&mut self, state: Option<StateId>) -> Result<(), FsmError> {
        if let Some(id) = state {
            if self.graph.state(id).is_none() {
                return Err(FsmError::UnknownState(id));
            }
        }

        let old = self.start;
        if old == state {
            return Ok(());
        }

        debug!(?old, new = ?state, "start state changed");
        self.start = state;
        self.current = state;
        self.reconcile_start(old, state);
        Ok(())
    }

    /// Move the cursor back to the start state without running any action.
    pub fn reset(&mut self) {
        self.current = self.start;
    }

    /// Attach `transition` to `state`.
    ///
    /// Returns `false` without touching the graph when `state` is not among
    /// [`states`](Self::states), when the transition is already attached,
    /// or when either handle is unknown. On success every newly reachable
    /// transition is subscribed.
    pub fn attach_transition(&mut self, state: StateId, transition: TransitionId) -> bool {
        if !self.states().contains(&state) {
            debug!(%state, %transition, "attach rejected: state not in automaton");
            return false;
        }

        let before = self.reachable_transitions();
        if !self.graph.attach(state, transition) {
            debug!(%state, %transition, "attach rejected: already attached");
            return false;
        }
        let after = self.reachable_transitions();
        self.reconcile(&before, &after);

        trace!(%state, %transition, "transition attached");
        true
    }

    /// Detach `transition` from `state`.
    ///
    /// Returns `false` when `state` is not among [`states`](Self::states) or
    /// does not own the transition. On success every transition that became
    /// unreachable is unsubscribed, and a cursor left on a state that is no
    /// longer reachable from the start state is cleared.
    pub fn remove_transition(&mut self, state: StateId, transition: TransitionId) -> bool {
        if !self.states().contains(&state) {
            debug!(%state, %transition, "remove rejected: state not in automaton");
            return false;
        }

        let before = self.reachable_transitions();
        if !self.graph.remove(state, transition) {
            debug!(%state, %transition, "remove rejected: not attached");
            return false;
        }
        let after = self.reachable_transitions();
        self.reconcile(&before, &after);

        if let Some(current) = self.current {
            if !self.states().contains(&current) {
                debug!(%current, %transition, "cursor cleared: current state cut off from start");
                self.current = None;
            }
        }

        trace!(%state, %transition, "transition removed");
        true
    }

    /// Attach an epsilon transition.
    ///
    /// # Errors
    ///
    /// Returns `FsmError::UnknownTransition` or `FsmError::NotEpsilon` when
    /// the handle does not name an epsilon transition. Structural conflicts
    /// are reported as `Ok(false)`.
    pub fn attach_epsilon_transition(
        &mut self,
        state: StateId,
        transition: TransitionId,
    ) -> Result<bool, FsmError> {
        self.graph.ensure_epsilon(transition)?;
        Ok(self.attach_transition(state, transition))
    }

    /// Detach an epsilon transition.
    ///
    /// # Errors
    ///
    /// Same as [`attach_epsilon_transition`](Self::attach_epsilon_transition).
    pub fn remove_epsilon_transition(
        &mut self,
        state: StateId,
        transition: TransitionId,
    ) -> Result<bool, FsmError> {
        self.graph.ensure_epsilon(transition)?;
        Ok(self.remove_transition(state, transition))
    }

    /// Whether `transition` leaves the current state and its guard, if any,
    /// admits `args`.
    pub fn can_transit(&self, transition: TransitionId, args: &[A]) -> bool {
        let Some(edge) = self.graph.transition(transition) else {
            return false;
        };
        if self.current.is_none() || edge.owner != self.current {
            return false;
        }
        edge.guard().map_or(true, |guard| guard.check(args))
    }

    /// Take `transition` with the given arguments.
    ///
    /// The destination is the transition's target. The transit action
    /// receives the transition first, then `args`. Under
    /// [`TransitPolicy::Strict`] a transition that does not leave the
    /// current state is refused with `false`; guards are never evaluated
    /// here.
    pub fn transit(&mut self, transition: TransitionId, args: &[A]) -> bool {
        let Some(edge) = self.graph.transition(transition) else {
            debug!(%transition, "transit refused: unknown transition");
            return false;
        };
        let target = edge.target();

        if self.config.transit_policy == TransitPolicy::Strict
            && (self.current.is_none() || edge.owner != self.current)
        {
            debug!(%transition, current = ?self.current, "transit refused: not leaving current state");
            return false;
        }

        self.transit_to(target, transition, args)
    }

    /// Exit the current state, move the cursor, run the transit action,
    /// enter `state`. In that order.
    fn transit_to(&mut self, state: StateId, transition: TransitionId, args: &[A]) -> bool {
        let from = self.current;
        let leaving = TransitContext::new(from, state, transition);

        if let Some(prev) = from {
            if let Some(node) = self.graph.state(prev) {
                node.exit(prev, &leaving);
            }
        }

        self.current = Some(state);
        let arrived = leaving.moved();

        if let Some(edge) = self.graph.transition(transition) {
            edge.run_action(args, &arrived);
        }

        if let Some(node) = self.graph.state(state) {
            node.enter(state, &arrived);
        }

        debug!(?from, to = %state, %transition, "transit complete");
        self.history.record(TransitRecord {
            from,
            to: state,
            transition,
            timestamp: Utc::now(),
        });
        true
    }
}

impl<S: State, A> Default for Automaton<S, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: fmt::Debug, A> fmt::Debug for Automaton<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Automaton")
            .field("graph", &self.graph)
            .field("start", &self.start)
            .field("current", &self.current)
            .field("subscriptions", &self.subscriptions)
            .field("history_len", &self.history.len())
            .field("config", &self.config)
            .finish()
    }
}
