//! Property-based tests for graph traversal and subscription bookkeeping.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated graphs and edit sequences.

use chrono::Utc;
use proptest::prelude::*;
use signalgraph::core::{Guard, TransitHistory, TransitRecord};
use signalgraph::engine::Automaton;
use signalgraph::graph::{Graph, StateId, Traversal, TransitionId};
use std::collections::BTreeSet;

const MAX_STATES: usize = 8;

/// `(source, target, epsilon)` triples over state indices.
type EdgeSpec = (usize, usize, bool);

#[derive(Debug, Clone)]
enum Edit {
    Attach(usize),
    Remove(usize),
    Start(Option<usize>),
    Transit(usize),
}

prop_compose! {
    fn arbitrary_edges()(
        states in 1..=MAX_STATES,
    )(
        states in Just(states),
        edges in prop::collection::vec((0..states, 0..states, any::<bool>()), 0..16),
    ) -> (usize, Vec<EdgeSpec>) {
        (states, edges)
    }
}

fn arbitrary_edit(edges: usize, states: usize) -> impl Strategy<Value = Edit> {
    prop_oneof![
        3 => (0..edges).prop_map(Edit::Attach),
        2 => (0..edges).prop_map(Edit::Remove),
        1 => prop::option::of(0..states).prop_map(Edit::Start),
        3 => (0..edges).prop_map(Edit::Transit),
    ]
}

prop_compose! {
    fn arbitrary_session()(
        (states, edges) in arbitrary_edges().prop_filter("needs an edge", |(_, e)| !e.is_empty()),
    )(
        edits in prop::collection::vec(arbitrary_edit(edges.len(), states), 1..40),
        states in Just(states),
        edges in Just(edges),
    ) -> (usize, Vec<EdgeSpec>, Vec<Edit>) {
        (states, edges, edits)
    }
}

/// Build a raw graph with every edge attached to its source.
fn build_graph(states: usize, edges: &[EdgeSpec]) -> (Graph<(), ()>, Vec<StateId>) {
    let mut graph = Graph::new();
    let ids: Vec<_> = (0..states).map(|_| graph.add_state(())).collect();
    for &(from, to, epsilon) in edges {
        let t = if epsilon {
            graph.add_epsilon_transition(ids[to]).unwrap()
        } else {
            graph.add_transition(ids[to]).unwrap()
        };
        graph.attach(ids[from], t);
    }
    (graph, ids)
}

/// Build an automaton with every edge allocated but nothing attached.
fn build_detached(
    states: usize,
    edges: &[EdgeSpec],
) -> (Automaton<(), u8>, Vec<StateId>, Vec<TransitionId>) {
    let mut fsm = Automaton::new();
    let ids: Vec<_> = (0..states).map(|_| fsm.add_state(())).collect();
    let transitions = edges
        .iter()
        .map(|&(_, to, epsilon)| {
            if epsilon {
                fsm.add_epsilon_transition(ids[to]).unwrap()
            } else {
                fsm.add_transition(ids[to]).unwrap()
            }
        })
        .collect();
    (fsm, ids, transitions)
}

proptest! {
    #[test]
    fn input_only_reach_is_subset_of_full_reach((states, edges) in arbitrary_edges()) {
        let (graph, ids) = build_graph(states, &edges);
        for &id in &ids {
            let input_only = graph.recur_get_transitions(id, Traversal::InputOnly);
            let full = graph.recur_get_transitions(id, Traversal::WithEpsilon);
            prop_assert!(input_only.is_subset(&full));
        }
    }

    #[test]
    fn reachable_states_contain_their_start((states, edges) in arbitrary_edges()) {
        let (graph, ids) = build_graph(states, &edges);
        for &id in &ids {
            let reached = graph.reachable_states(id, Traversal::WithEpsilon);
            prop_assert!(reached.contains(&id));
            for t in graph.recur_get_transitions(id, Traversal::WithEpsilon) {
                let target = graph.transition(t).unwrap().target();
                prop_assert!(reached.contains(&target));
            }
        }
    }

    #[test]
    fn epsilon_closure_is_idempotent((states, edges) in arbitrary_edges()) {
        let (graph, ids) = build_graph(states, &edges);
        let once = graph.epsilon_closure([ids[0]]);
        let twice = graph.epsilon_closure(once.iter().copied());
        prop_assert_eq!(&once, &twice);
        prop_assert!(once.is_subset(&graph.reachable_states(ids[0], Traversal::WithEpsilon)));
    }

    #[test]
    fn attach_then_remove_round_trips((states, edges) in arbitrary_edges()) {
        let (mut fsm, ids, transitions) = build_detached(states, &edges);
        fsm.set_start_state(Some(ids[0])).unwrap();

        for t in transitions {
            prop_assert!(fsm.attach_transition(ids[0], t));
            prop_assert!(!fsm.attach_transition(ids[0], t));
            prop_assert!(fsm.remove_transition(ids[0], t));
            prop_assert!(!fsm.remove_transition(ids[0], t));
        }
        prop_assert!(fsm.subscriptions().is_empty());
    }

    #[test]
    fn subscriptions_track_reachability((states, edges, edits) in arbitrary_session()) {
        let (mut fsm, ids, transitions) = build_detached(states, &edges);
        fsm.set_start_state(Some(ids[0])).unwrap();

        for edit in edits {
            let before: Vec<_> = fsm.subscriptions().iter().collect();
            let reach_before = fsm.reachable_transitions();
            match edit {
                Edit::Attach(i) => {
                    fsm.attach_transition(ids[edges[i].0], transitions[i]);
                }
                Edit::Remove(i) => {
                    fsm.remove_transition(ids[edges[i].0], transitions[i]);
                }
                Edit::Start(state) => {
                    fsm.set_start_state(state.map(|i| ids[i])).unwrap();
                }
                Edit::Transit(i) => {
                    fsm.transit(transitions[i], &[]);
                }
            }

            let reach_after = fsm.reachable_transitions();
            prop_assert_eq!(fsm.subscriptions().transitions(), reach_after.clone());
            prop_assert!(fsm.validate().is_success());

            // Transitions reachable throughout keep their subscription.
            for (t, id) in before {
                if reach_before.contains(&t) && reach_after.contains(&t) {
                    prop_assert_eq!(fsm.subscription(t), Some(id));
                }
            }
        }

        let live = fsm.reachable_transitions().len();
        let report = fsm.teardown();
        prop_assert!(report.is_clean());
        prop_assert_eq!(report.released_count(), live);
        prop_assert!(fsm.subscriptions().is_empty());
    }

    #[test]
    fn epsilon_edge_exposes_fragment(fragment in 1..6usize) {
        let mut fsm: Automaton<(), u8> = Automaton::new();
        let s = fsm.add_state(());
        let chain: Vec<_> = (0..=fragment).map(|_| fsm.add_state(())).collect();
        fsm.set_start_state(Some(s)).unwrap();

        // Build the fragment while it is still part of the automaton.
        let bridge = fsm.add_epsilon_transition(chain[0]).unwrap();
        prop_assert!(fsm.attach_epsilon_transition(s, bridge).unwrap());
        let mut inner = BTreeSet::new();
        for pair in chain.windows(2) {
            let t = fsm.add_transition(pair[1]).unwrap();
            prop_assert!(fsm.attach_transition(pair[0], t));
            inner.insert(t);
        }

        let with_epsilon = fsm.graph().recur_get_transitions(s, Traversal::WithEpsilon);
        prop_assert!(inner.is_subset(&with_epsilon));
        prop_assert!(fsm.graph().recur_get_transitions(s, Traversal::InputOnly).is_empty());

        prop_assert!(fsm.remove_epsilon_transition(s, bridge).unwrap());
        prop_assert!(fsm.subscriptions().is_empty());
    }

    #[test]
    fn guard_is_deterministic(args in prop::collection::vec(any::<u8>(), 0..4)) {
        let guard = Guard::new(|args: &[u8]| args.iter().all(|b| *b % 2 == 0));
        prop_assert_eq!(guard.check(&args), guard.check(&args));
    }

    #[test]
    fn bounded_history_keeps_latest(limit in 0..6usize, steps in 0..20usize) {
        let mut history = TransitHistory::with_limit(Some(limit));
        for i in 0..steps {
            history.record(TransitRecord {
                from: Some(StateId::from_index(i)),
                to: StateId::from_index(i + 1),
                transition: TransitionId::from_index(i),
                timestamp: Utc::now(),
            });
        }

        prop_assert_eq!(history.len(), steps.min(limit));
        if steps > 0 && limit > 0 {
            prop_assert_eq!(history.last().map(|r| r.to), Some(StateId::from_index(steps)));
        }
    }

    #[test]
    fn history_roundtrip_serialization(steps in 0..5usize) {
        let mut history = TransitHistory::new();
        for i in 0..steps {
            history.record(TransitRecord {
                from: Some(StateId::from_index(i)),
                to: StateId::from_index(i + 1),
                transition: TransitionId::from_index(i),
                timestamp: Utc::now(),
            });
        }

        let json = serde_json::to_string(&history).unwrap();
        let deserialized: TransitHistory = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(history.get_path(), deserialized.get_path());
    }
}
