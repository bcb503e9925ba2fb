//! Arena-backed state graph.
//!
//! States and transitions are stored in two vectors and addressed by
//! [`StateId`] / [`TransitionId`] handles, so cycles in the graph are just
//! index pairs. A state owns the set of its outgoing transitions; a
//! transition only knows its target.
//!
//! # Example
//!
//! ```rust
//! use signalgraph::graph::{Graph, Traversal};
//!
//! let mut graph: Graph<&str, ()> = Graph::new();
//! let a = graph.add_state("a");
//! let b = graph.add_state("b");
//! let c = graph.add_state("c");
//!
//! let ab = graph.add_transition(b).unwrap();
//! let bc = graph.add_epsilon_transition(c).unwrap();
//! assert!(graph.attach(a, ab));
//! assert!(graph.attach(b, bc));
//!
//! assert_eq!(graph.recur_get_transitions(a, Traversal::WithEpsilon).len(), 2);
//! assert_eq!(graph.recur_get_transitions(a, Traversal::InputOnly).len(), 1);
//! ```

mod context;
mod ids;
mod node;

pub use context::TransitContext;
pub use ids::{StateId, TransitionId};
pub use node::{StateAction, StateNode, TransitAction, TransitionKind, TransitionNode};

use crate::core::State;
use crate::engine::FsmError;
use std::collections::BTreeSet;
use std::fmt;

/// Which edges a reachability walk follows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Traversal {
    /// Follow ordinary and epsilon transitions
    #[default]
    WithEpsilon,
    /// Follow ordinary transitions only
    InputOnly,
}

impl Traversal {
    fn follows(self, kind: TransitionKind) -> bool {
        match self {
            Self::WithEpsilon => true,
            Self::InputOnly => kind == TransitionKind::Input,
        }
    }
}

/// States and transitions of one automaton.
pub struct Graph<S, A> {
    states: Vec<StateNode<S>>,
    transitions: Vec<TransitionNode<A>>,
}

impl<S: State, A> Graph<S, A> {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self {
            states: Vec::new(),
            transitions: Vec::new(),
        }
    }

    /// Add a state node. Its terminal flag starts as `data.is_final()`.
    pub fn add_state(&mut self, data: S) -> StateId {
        self.states.push(StateNode::new(data));
        StateId::from_index(self.states.len() - 1)
    }

    /// Create an unattached input transition leading to `target`.
    pub fn add_transition(&mut self, target: StateId) -> Result<TransitionId, FsmError> {
        self.push_transition(target, TransitionKind::Input)
    }

    /// Create an unattached epsilon transition leading to `target`.
    pub fn add_epsilon_transition(&mut self, target: StateId) -> Result<TransitionId, FsmError> {
        self.push_transition(target, TransitionKind::Epsilon)
    }

    fn push_transition(
        &mut self,
        target: StateId,
        kind: TransitionKind,
    ) -> Result<TransitionId, FsmError> {
        if self.state(target).is_none() {
            return Err(FsmError::UnknownState(target));
        }
        let id = TransitionId::from_index(self.transitions.len());
        self.transitions.push(TransitionNode::new(id, target, kind));
        Ok(id)
    }

    /// Look up a state node.
    pub fn state(&self, id: StateId) -> Option<&StateNode<S>> {
        self.states.get(id.index())
    }

    /// Look up a state node for configuration.
    pub fn state_mut(&mut self, id: StateId) -> Option<&mut StateNode<S>> {
        self.states.get_mut(id.index())
    }

    /// Look up a transition node.
    pub fn transition(&self, id: TransitionId) -> Option<&TransitionNode<A>> {
        self.transitions.get(id.index())
    }

    /// Look up a transition node for configuration.
    pub fn transition_mut(&mut self, id: TransitionId) -> Option<&mut TransitionNode<A>> {
        self.transitions.get_mut(id.index())
    }

    /// Number of states in the arena, reachable or not.
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Number of transitions in the arena, attached or not.
    pub fn transition_count(&self) -> usize {
        self.transitions.len()
    }

    /// The state a transition is currently attached to.
    pub fn owner_of(&self, transition: TransitionId) -> Option<StateId> {
        self.transition(transition).and_then(|t| t.owner)
    }

    /// Attach `transition` to `state`.
    ///
    /// Returns `false` when either handle is unknown, when the state already
    /// has the transition, or when the transition is attached elsewhere.
    pub fn attach(&mut self, state: StateId, transition: TransitionId) -> bool {
        let Some(edge) = self.transitions.get_mut(transition.index()) else {
            return false;
        };
        if edge.owner.is_some() {
            return false;
        }
        let Some(node) = self.states.get_mut(state.index()) else {
            return false;
        };
        if !node.insert_transition(transition) {
            return false;
        }
        edge.owner = Some(state);
        true
    }

    /// Detach `transition` from `state`.
    ///
    /// Returns `false` when the state is unknown or does not currently own
    /// the transition.
    pub fn remove(&mut self, state: StateId, transition: TransitionId) -> bool {
        let Some(node) = self.states.get_mut(state.index()) else {
            return false;
        };
        if !node.take_transition(transition) {
            return false;
        }
        if let Some(edge) = self.transitions.get_mut(transition.index()) {
            edge.owner = None;
        }
        true
    }

    /// Reject handles that cannot be used as epsilon transitions.
    pub fn ensure_epsilon(&self, transition: TransitionId) -> Result<(), FsmError> {
        match self.transition(transition) {
            None => Err(FsmError::UnknownTransition(transition)),
            Some(edge) if !edge.is_epsilon() => Err(FsmError::NotEpsilon(transition)),
            Some(_) => Ok(()),
        }
    }

    /// Attach an epsilon transition; invalid handles are an error rather
    /// than `false`.
    pub fn attach_epsilon(
        &mut self,
        state: StateId,
        transition: TransitionId,
    ) -> Result<bool, FsmError> {
        self.ensure_epsilon(transition)?;
        Ok(self.attach(state, transition))
    }

    /// Detach an epsilon transition; invalid handles are an error rather
    /// than `false`.
    pub fn remove_epsilon(
        &mut self,
        state: StateId,
        transition: TransitionId,
    ) -> Result<bool, FsmError> {
        self.ensure_epsilon(transition)?;
        Ok(self.remove(state, transition))
    }

    /// Every transition reachable from `state` by following outgoing
    /// transitions.
    pub fn recur_get_transitions(
        &self,
        state: StateId,
        traversal: Traversal,
    ) -> BTreeSet<TransitionId> {
        self.walk(state, traversal).1
    }

    /// Every state reachable from `state`, `state` included.
    pub fn reachable_states(&self, state: StateId, traversal: Traversal) -> BTreeSet<StateId> {
        self.walk(state, traversal).0
    }

    fn walk(
        &self,
        start: StateId,
        traversal: Traversal,
    ) -> (BTreeSet<StateId>, BTreeSet<TransitionId>) {
        let mut visited = BTreeSet::new();
        let mut found = BTreeSet::new();
        if self.state(start).is_none() {
            return (visited, found);
        }

        let mut stack = vec![start];
        visited.insert(start);
        while let Some(current) = stack.pop() {
            let Some(node) = self.state(current) else {
                continue;
            };
            for &id in node.transitions() {
                let Some(edge) = self.transition(id) else {
                    continue;
                };
                if !traversal.follows(edge.kind()) {
                    continue;
                }
                found.insert(id);
                if visited.insert(edge.target()) {
                    stack.push(edge.target());
                }
            }
        }
        (visited, found)
    }

    /// States reachable from `seeds` through epsilon transitions alone,
    /// seeds included.
    pub fn epsilon_closure<I>(&self, seeds: I) -> BTreeSet<StateId>
    where
        I: IntoIterator<Item = StateId>,
    {
        let mut closure: BTreeSet<StateId> = seeds
            .into_iter()
            .filter(|id| self.state(*id).is_some())
            .collect();
        let mut pending: Vec<StateId> = closure.iter().copied().collect();

        while let Some(current) = pending.pop() {
            let Some(node) = self.state(current) else {
                continue;
            };
            let targets = node
                .transitions()
                .iter()
                .filter_map(|id| self.transition(*id))
                .filter(|edge| edge.is_epsilon())
                .map(TransitionNode::target);
            for target in targets {
                if closure.insert(target) {
                    pending.push(target);
                }
            }
        }
        closure
    }
}

impl<S: State, A> Default for Graph<S, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: fmt::Debug, A> fmt::Debug for Graph<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Graph")
            .field("states", &self.states)
            .field("transitions", &self.transitions)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line() -> (Graph<&'static str, ()>, Vec<StateId>, Vec<TransitionId>) {
        let mut graph = Graph::new();
        let states: Vec<_> = ["a", "b", "c"].into_iter().map(|s| graph.add_state(s)).collect();
        let ab = graph.add_transition(states[1]).unwrap();
        let bc = graph.add_transition(states[2]).unwrap();
        assert!(graph.attach(states[0], ab));
        assert!(graph.attach(states[1], bc));
        (graph, states, vec![ab, bc])
    }

    #[test]
    fn attach_twice_returns_false() {
        let mut graph: Graph<&str, ()> = Graph::new();
        let a = graph.add_state("a");
        let t = graph.add_transition(a).unwrap();

        assert!(graph.attach(a, t));
        assert!(!graph.attach(a, t));
        assert_eq!(graph.owner_of(t), Some(a));
    }

    #[test]
    fn attach_rejects_transition_owned_elsewhere() {
        let mut graph: Graph<&str, ()> = Graph::new();
        let a = graph.add_state("a");
        let b = graph.add_state("b");
        let t = graph.add_transition(b).unwrap();

        assert!(graph.attach(a, t));
        assert!(!graph.attach(b, t));
        assert!(!graph.state(b).unwrap().has_transition(t));
    }

    #[test]
    fn remove_then_remove_again() {
        let (mut graph, states, transitions) = line();

        assert!(graph.remove(states[0], transitions[0]));
        assert!(!graph.remove(states[0], transitions[0]));
        assert_eq!(graph.owner_of(transitions[0]), None);
    }

    #[test]
    fn unknown_handles_are_rejected() {
        let (mut graph, states, _) = line();
        let ghost_state = StateId::from_index(99);
        let ghost_transition = TransitionId::from_index(99);

        assert!(!graph.attach(ghost_state, TransitionId::from_index(0)));
        assert!(!graph.attach(states[0], ghost_transition));
        assert!(!graph.remove(ghost_state, TransitionId::from_index(0)));
        assert!(matches!(
            graph.add_transition(ghost_state),
            Err(FsmError::UnknownState(_))
        ));
    }

    #[test]
    fn recur_get_transitions_survives_cycles() {
        let (mut graph, states, transitions) = line();
        let back = graph.add_transition(states[0]).unwrap();
        assert!(graph.attach(states[2], back));

        let reached = graph.recur_get_transitions(states[1], Traversal::WithEpsilon);
        assert_eq!(
            reached,
            BTreeSet::from([transitions[0], transitions[1], back])
        );
    }

    #[test]
    fn epsilon_edge_extends_reachability() {
        let mut graph: Graph<&str, ()> = Graph::new();
        let a = graph.add_state("a");
        let z = graph.add_state("z");
        let end = graph.add_state("end");
        let silent = graph.add_epsilon_transition(z).unwrap();
        let out = graph.add_transition(end).unwrap();
        assert!(graph.attach_epsilon(a, silent).unwrap());
        assert!(graph.attach(z, out));

        let with = graph.recur_get_transitions(a, Traversal::WithEpsilon);
        assert_eq!(with, BTreeSet::from([silent, out]));
        assert!(graph
            .reachable_states(a, Traversal::WithEpsilon)
            .contains(&z));

        assert!(graph.recur_get_transitions(a, Traversal::InputOnly).is_empty());
    }

    #[test]
    fn epsilon_attach_validates_handles() {
        let (mut graph, states, transitions) = line();

        assert!(matches!(
            graph.attach_epsilon(states[0], TransitionId::from_index(42)),
            Err(FsmError::UnknownTransition(_))
        ));
        assert!(matches!(
            graph.remove_epsilon(states[0], transitions[0]),
            Err(FsmError::NotEpsilon(_))
        ));

        let eps = graph.add_epsilon_transition(states[2]).unwrap();
        assert!(!graph.remove_epsilon(states[0], eps).unwrap());
        assert!(graph.attach_epsilon(states[0], eps).unwrap());
        assert!(!graph.attach_epsilon(states[0], eps).unwrap());
    }

    #[test]
    fn epsilon_closure_follows_silent_edges_only() {
        let mut graph: Graph<&str, ()> = Graph::new();
        let s: Vec<_> = ["0", "1", "2", "3"].into_iter().map(|n| graph.add_state(n)).collect();
        let e01 = graph.add_epsilon_transition(s[1]).unwrap();
        let e12 = graph.add_epsilon_transition(s[2]).unwrap();
        let e20 = graph.add_epsilon_transition(s[0]).unwrap();
        let i23 = graph.add_transition(s[3]).unwrap();
        graph.attach(s[0], e01);
        graph.attach(s[1], e12);
        graph.attach(s[2], e20);
        graph.attach(s[2], i23);

        let closure = graph.epsilon_closure([s[0]]);
        assert_eq!(closure, BTreeSet::from([s[0], s[1], s[2]]));
        assert_eq!(graph.epsilon_closure([s[3]]), BTreeSet::from([s[3]]));
    }

    #[test]
    fn guard_is_rejected_on_epsilon_transitions() {
        let mut graph: Graph<&str, u8> = Graph::new();
        let a = graph.add_state("a");
        let eps = graph.add_epsilon_transition(a).unwrap();
        let input = graph.add_transition(a).unwrap();

        assert!(matches!(
            graph.transition_mut(eps).unwrap().when(|_| false),
            Err(FsmError::GuardOnEpsilon(t)) if t == eps
        ));
        assert!(graph
            .transition_mut(input)
            .unwrap()
            .when(|args| !args.is_empty())
            .is_ok());
        assert_eq!(graph.transition(input).unwrap().id(), input);

        assert!(graph.transition(eps).unwrap().guard().is_none());
        assert!(graph.transition(input).unwrap().guard().is_some());
    }
}
