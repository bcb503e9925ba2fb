//! Epsilon Composition
//!
//! This demo glues two automaton fragments together with a silent edge,
//! the way a regular-expression compiler concatenates sub-automata.
//!
//! Key concepts:
//! - Epsilon transitions
//! - Reachability with and without epsilon edges
//! - Epsilon closures
//! - Subscriptions following reachability
//!
//! Run with: cargo run --example epsilon_composition

use signalgraph::engine::Automaton;
use signalgraph::graph::Traversal;
use signalgraph::FsmError;

fn main() -> Result<(), FsmError> {
    println!("=== Epsilon Composition ===\n");

    let mut fsm: Automaton<&str, char> = Automaton::new();
    let start = fsm.add_state("start");
    let after_a = fsm.add_state("after-a");
    let before_b = fsm.add_state("before-b");
    let accept = fsm.add_state("accept");
    if let Some(state) = fsm.state_mut(accept) {
        state.set_terminal(true);
    }

    // Fragment one: "a"
    let read_a = fsm.add_transition(after_a)?;
    // Fragment two: "b"
    let read_b = fsm.add_transition(accept)?;
    if let Some(edge) = fsm.transition_mut(read_a) {
        edge.when(|args| args == ['a'])?;
    }
    if let Some(edge) = fsm.transition_mut(read_b) {
        edge.when(|args| args == ['b'])?;
    }
    let glue = fsm.add_epsilon_transition(before_b)?;

    fsm.set_start_state(Some(start))?;
    assert!(fsm.attach_transition(start, read_a));
    println!("Before glue: {} subscriptions", fsm.subscriptions().len());

    assert!(fsm.attach_epsilon_transition(after_a, glue)?);
    assert!(fsm.attach_transition(before_b, read_b));
    println!("After glue:  {} subscriptions", fsm.subscriptions().len());

    let graph = fsm.graph();
    println!(
        "\nInput-only reach from start: {:?}",
        graph.recur_get_transitions(start, Traversal::InputOnly)
    );
    println!(
        "Full reach from start:       {:?}",
        graph.recur_get_transitions(start, Traversal::WithEpsilon)
    );
    println!("Closure of after-a:          {:?}\n", graph.epsilon_closure([after_a]));

    for (input, edge) in [('a', read_a), ('b', read_b)] {
        // Follow the silent edge when the input cannot be consumed yet.
        if !fsm.can_transit(edge, &[input]) && !fsm.transit(glue, &[]) {
            println!("stuck at {:?}", fsm.current_state());
        }
        println!("read {input:?}: {}", fsm.transit(edge, &[input]));
    }
    println!("Accepted: {}", fsm.is_terminal());

    assert!(fsm.remove_epsilon_transition(after_a, glue)?);
    println!("\nAfter unglue: {} subscriptions", fsm.subscriptions().len());

    println!("\n=== Demo Complete ===");
    Ok(())
}
