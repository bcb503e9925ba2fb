//! Stable handles into the state graph arena.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Handle of a state node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StateId(usize);

/// Handle of a transition node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TransitionId(usize);

impl StateId {
    /// Build a handle from a raw arena index.
    ///
    /// Handles are normally obtained from [`Graph::add_state`](super::Graph::add_state);
    /// a hand-built handle may not name any state.
    pub const fn from_index(index: usize) -> Self {
        Self(index)
    }

    /// Raw arena index of this state.
    pub const fn index(self) -> usize {
        self.0
    }
}

impl TransitionId {
    /// Build a handle from a raw arena index.
    pub const fn from_index(index: usize) -> Self {
        Self(index)
    }

    /// Raw arena index of this transition.
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s{}", self.0)
    }
}

impl fmt::Display for TransitionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{}", self.0)
    }
}
