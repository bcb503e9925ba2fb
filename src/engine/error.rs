//! Errors raised by graph and automaton operations.
//!
//! Structural conflicts (unknown state, duplicate attach, missing transition
//! on detach) are reported as `false`, not as errors. `FsmError` covers
//! invalid arguments only.

use crate::graph::{StateId, TransitionId};
use thiserror::Error;

/// Invalid-argument failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FsmError {
    #[error("State {0} does not exist in this graph")]
    UnknownState(StateId),

    #[error("Transition {0} does not exist in this graph")]
    UnknownTransition(TransitionId),

    #[error("Transition {0} is not an epsilon transition")]
    NotEpsilon(TransitionId),

    #[error("Transition {0} is an epsilon transition and cannot carry a guard")]
    GuardOnEpsilon(TransitionId),

    #[error("Fire signal for transition {0} outlived its automaton")]
    SignalClosed(TransitionId),
}
