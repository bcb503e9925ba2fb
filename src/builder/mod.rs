//! Construction helpers: the automaton builder and the `state_enum!` macro.

pub mod automaton;
pub mod macros;

pub use automaton::AutomatonBuilder;
