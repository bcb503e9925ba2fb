//! State and transition nodes stored in the arena.

use super::context::TransitContext;
use super::ids::{StateId, TransitionId};
use crate::core::{Guard, State};
use crate::engine::FsmError;
use std::collections::BTreeSet;
use std::fmt;
use tracing::debug;

/// Entry or exit callback, invoked with the state being entered or left.
pub type StateAction<S> = Box<dyn Fn(StateId, &S, &TransitContext) + Send + Sync>;

/// Transit callback, invoked with the transition, the first caller argument
/// and the remaining caller arguments.
pub type TransitAction<A> =
    Box<dyn Fn(TransitionId, Option<&A>, &[A], &TransitContext) + Send + Sync>;

/// Whether a transition consumes input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TransitionKind {
    /// Ordinary transition bound to an input symbol
    Input,
    /// Silent transition used to link graph fragments
    Epsilon,
}

/// A node of the state graph.
///
/// The node exclusively owns its set of outgoing transitions. Membership is
/// what matters; the set iterates in handle order.
pub struct StateNode<S> {
    data: S,
    is_terminal: bool,
    entry_action: Option<StateAction<S>>,
    exit_action: Option<StateAction<S>>,
    transitions: BTreeSet<TransitionId>,
}

impl<S: State> StateNode<S> {
    pub(crate) fn new(data: S) -> Self {
        let is_terminal = data.is_final();
        Self {
            data,
            is_terminal,
            entry_action: None,
            exit_action: None,
            transitions: BTreeSet::new(),
        }
    }

    /// The payload this node was created with.
    pub fn data(&self) -> &S {
        &self.data
    }

    /// Whether reaching this state ends a run.
    pub fn is_terminal(&self) -> bool {
        self.is_terminal
    }

    /// Override the terminal flag taken from `State::is_final`.
    pub fn set_terminal(&mut self, is_terminal: bool) -> &mut Self {
        self.is_terminal = is_terminal;
        self
    }

    /// Set the action run after the cursor has moved onto this state.
    pub fn on_entry<F>(&mut self, action: F) -> &mut Self
    where
        F: Fn(StateId, &S, &TransitContext) + Send + Sync + 'static,
    {
        self.entry_action = Some(Box::new(action));
        self
    }

    /// Set the action run while the cursor still sits on this state.
    pub fn on_exit<F>(&mut self, action: F) -> &mut Self
    where
        F: Fn(StateId, &S, &TransitContext) + Send + Sync + 'static,
    {
        self.exit_action = Some(Box::new(action));
        self
    }

    /// Outgoing transitions, ordinary and epsilon alike.
    pub fn transitions(&self) -> &BTreeSet<TransitionId> {
        &self.transitions
    }

    /// Whether `transition` is attached to this state.
    pub fn has_transition(&self, transition: TransitionId) -> bool {
        self.transitions.contains(&transition)
    }

    pub(crate) fn enter(&self, id: StateId, ctx: &TransitContext) {
        if let Some(action) = &self.entry_action {
            action(id, &self.data, ctx);
        }
    }

    pub(crate) fn exit(&self, id: StateId, ctx: &TransitContext) {
        if let Some(action) = &self.exit_action {
            action(id, &self.data, ctx);
        }
    }

    pub(crate) fn insert_transition(&mut self, transition: TransitionId) -> bool {
        self.transitions.insert(transition)
    }

    pub(crate) fn take_transition(&mut self, transition: TransitionId) -> bool {
        self.transitions.remove(&transition)
    }
}

impl<S: fmt::Debug> fmt::Debug for StateNode<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateNode")
            .field("data", &self.data)
            .field("is_terminal", &self.is_terminal)
            .field("has_entry_action", &self.entry_action.is_some())
            .field("has_exit_action", &self.exit_action.is_some())
            .field("transitions", &self.transitions)
            .finish()
    }
}

/// An edge of the state graph.
///
/// A transition knows where it leads but not where it starts; the owning
/// state is recorded only so that it can be attached to one state at a time.
pub struct TransitionNode<A> {
    id: TransitionId,
    target: StateId,
    kind: TransitionKind,
    guard: Option<Guard<A>>,
    action: Option<TransitAction<A>>,
    pub(crate) owner: Option<StateId>,
}

impl<A> TransitionNode<A> {
    pub(crate) fn new(id: TransitionId, target: StateId, kind: TransitionKind) -> Self {
        Self {
            id,
            target,
            kind,
            guard: None,
            action: None,
            owner: None,
        }
    }

    /// Handle of this transition.
    pub fn id(&self) -> TransitionId {
        self.id
    }

    /// The state this transition leads to.
    pub fn target(&self) -> StateId {
        self.target
    }

    /// Whether this is an input or an epsilon transition.
    pub fn kind(&self) -> TransitionKind {
        self.kind
    }

    /// Shorthand for `kind() == TransitionKind::Epsilon`.
    pub fn is_epsilon(&self) -> bool {
        self.kind == TransitionKind::Epsilon
    }

    /// The guard set on this transition, if any.
    pub fn guard(&self) -> Option<&Guard<A>> {
        self.guard.as_ref()
    }

    /// Set the guard checked by `Automaton::can_transit`.
    ///
    /// # Errors
    ///
    /// Returns `FsmError::GuardOnEpsilon` for an epsilon transition, which
    /// consumes no arguments for a guard to inspect.
    pub fn set_guard(&mut self, guard: Guard<A>) -> Result<&mut Self, FsmError> {
        if self.is_epsilon() {
            debug!(transition = %self.id, "guard rejected on epsilon transition");
            return Err(FsmError::GuardOnEpsilon(self.id));
        }
        self.guard = Some(guard);
        Ok(self)
    }

    /// Add a guard using a closure.
    ///
    /// # Errors
    ///
    /// Same as [`set_guard`](Self::set_guard).
    pub fn when<F>(&mut self, predicate: F) -> Result<&mut Self, FsmError>
    where
        F: Fn(&[A]) -> bool + Send + Sync + 'static,
    {
        self.set_guard(Guard::new(predicate))
    }

    /// Set the action run between the cursor move and the entry action.
    pub fn on_transit<F>(&mut self, action: F) -> &mut Self
    where
        F: Fn(TransitionId, Option<&A>, &[A], &TransitContext) + Send + Sync + 'static,
    {
        self.action = Some(Box::new(action));
        self
    }

    pub(crate) fn run_action(&self, args: &[A], ctx: &TransitContext) {
        if let Some(action) = &self.action {
            action(self.id, args.first(), args.get(1..).unwrap_or(&[]), ctx);
        }
    }
}

impl<A> fmt::Debug for TransitionNode<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionNode")
            .field("id", &self.id)
            .field("target", &self.target)
            .field("kind", &self.kind)
            .field("has_guard", &self.guard.is_some())
            .field("has_action", &self.action.is_some())
            .field("owner", &self.owner)
            .finish()
    }
}
