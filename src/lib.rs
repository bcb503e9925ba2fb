//! Signalgraph: an event-driven finite state machine engine
//!
//! States and transitions form a directed, possibly cyclic graph stored in
//! an arena and addressed by handles. An automaton holds a start state and
//! a single current state, and moves between states either by explicit
//! [`transit`](engine::Automaton::transit) calls or by external fire
//! signals delivered through its event-driven layer.
//!
//! # Core Concepts
//!
//! - **Graph**: States own their outgoing transitions; transitions point at their target
//! - **Automaton**: Start state, cursor, transit sequencing (exit, move, transit, entry)
//! - **Signals**: Transitions reachable from the start state are subscribed and can fire themselves
//! - **Epsilon transitions**: Silent edges for composing fragments and computing closures
//!
//! # Example
//!
//! ```rust
//! use signalgraph::engine::Automaton;
//! use std::sync::{Arc, Mutex};
//!
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let mut fsm: Automaton<&str, i32> = Automaton::new();
//! let a = fsm.add_state("a");
//! let b = fsm.add_state("b");
//! let t = fsm.add_transition(b).unwrap();
//!
//! let sink = Arc::clone(&seen);
//! fsm.transition_mut(t)
//!     .unwrap()
//!     .on_transit(move |id, first, rest, _ctx| {
//!         sink.lock().unwrap().push((id, first.copied(), rest.to_vec()))
//!     });
//!
//! fsm.set_start_state(Some(a)).unwrap();
//! assert!(fsm.attach_transition(a, t));
//!
//! fsm.signal(t).unwrap().raise(vec![42]).unwrap();
//! fsm.dispatch_pending();
//!
//! assert_eq!(fsm.current_state(), Some(b));
//! assert_eq!(*seen.lock().unwrap(), vec![(t, Some(42), vec![])]);
//! ```

pub mod builder;
pub mod core;
pub mod engine;
pub mod graph;
pub mod signal;

// Re-export commonly used types
pub use crate::builder::AutomatonBuilder;
pub use crate::core::{Guard, State, TransitHistory, TransitRecord};
pub use crate::engine::{Automaton, AutomatonConfig, FsmError, IntegrityViolation, TransitPolicy};
pub use crate::graph::{
    Graph, StateId, TransitContext, Traversal, TransitionId, TransitionKind,
};
pub use crate::signal::{FireSignal, SubscriptionId, TeardownReport};
