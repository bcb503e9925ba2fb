//! Context handed to actions while a transit runs.

use super::ids::{StateId, TransitionId};

/// Snapshot of the transit in progress.
///
/// `current` is the automaton's cursor at the moment the action runs: the
/// state being left during the exit action, the destination during the
/// transit and entry actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransitContext {
    pub from: Option<StateId>,
    pub to: StateId,
    pub transition: TransitionId,
    pub current: Option<StateId>,
}

impl TransitContext {
    pub(crate) fn new(from: Option<StateId>, to: StateId, transition: TransitionId) -> Self {
        Self {
            from,
            to,
            transition,
            current: from,
        }
    }

    /// The same transit after the cursor moved to `to`.
    pub(crate) fn moved(self) -> Self {
        Self {
            current: Some(self.to),
            ..self
        }
    }

    /// Whether the transit loops back to the state it left.
    pub fn is_self_loop(&self) -> bool {
        self.from == Some(self.to)
    }
}
