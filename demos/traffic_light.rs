//! Traffic Light Automaton
//!
//! This demo drives a cyclic automaton entirely through fire signals.
//!
//! Key concepts:
//! - Cyclic state graph (states repeat)
//! - Entry and exit actions
//! - Fire signals raised from another thread
//! - Serialized delivery through the automaton's queue
//!
//! Run with: cargo run --example traffic_light

use signalgraph::builder::AutomatonBuilder;
use signalgraph::engine::Automaton;
use signalgraph::state_enum;
use std::thread;

state_enum! {
    enum TrafficLight {
        Red,
        Yellow,
        Green,
    }
}

fn main() {
    println!("=== Traffic Light Automaton ===\n");

    let mut fsm: Automaton<TrafficLight, u32> = AutomatonBuilder::new().history_limit(16).build();
    let red = fsm.add_state(TrafficLight::Red);
    let green = fsm.add_state(TrafficLight::Green);
    let yellow = fsm.add_state(TrafficLight::Yellow);

    for id in [red, green, yellow] {
        if let Some(state) = fsm.state_mut(id) {
            state
                .on_entry(|id, light, _| println!("  enter {light:?} ({id})"))
                .on_exit(|_, light, ctx| println!("  leave {light:?} via {}", ctx.transition));
        }
    }

    let go = fsm.add_transition(green).expect("green exists");
    let caution = fsm.add_transition(yellow).expect("yellow exists");
    let stop = fsm.add_transition(red).expect("red exists");
    if let Some(edge) = fsm.transition_mut(go) {
        edge.on_transit(|_, cycle, _, _| println!("  go! (cycle {cycle:?})"));
    }

    fsm.set_start_state(Some(red)).expect("red exists");
    for (state, transition) in [(red, go), (green, caution), (yellow, stop)] {
        if !fsm.attach_transition(state, transition) {
            eprintln!("could not attach {transition} to {state}");
            return;
        }
    }

    println!("Initial state: {:?}", fsm.current_state());
    println!("Subscribed transitions: {}\n", fsm.subscriptions().len());

    // The controller only sees signals, never the automaton.
    let signals = [go, caution, stop].map(|t| fsm.signal(t).expect("transition exists"));
    let controller = thread::spawn(move || {
        for cycle in 0..2 {
            for signal in &signals {
                signal.raise(vec![cycle]).expect("automaton alive");
            }
        }
    });
    controller.join().expect("controller thread panicked");

    println!("Delivering signals:");
    let taken = fsm.dispatch_pending();
    println!("\nTransits taken: {taken}");
    println!("Path: {:?}", fsm.history().get_path());

    let report = fsm.teardown();
    println!("Released {} subscriptions", report.released_count());

    println!("\n=== Demo Complete ===");
}
