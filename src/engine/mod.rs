//! Execution engine.
//!
//! An [`Automaton`] owns a state graph, a start state and a cursor. It
//! performs transits (exit action, cursor move, transit action, entry
//! action) and keeps the graph's attach/detach contract together with the
//! subscriptions of the event-driven layer.

mod automaton;
mod config;
mod error;
mod integrity;

pub use automaton::Automaton;
pub use config::{AutomatonConfig, TransitPolicy, DEFAULT_HISTORY_LIMIT};
pub use error::FsmError;
pub use integrity::IntegrityViolation;
