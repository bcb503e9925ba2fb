//! Integrity checks over an automaton, accumulating every violation.

use crate::core::State;
use crate::engine::Automaton;
use crate::graph::{StateId, Traversal, TransitionId};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// Broken invariant found by [`Automaton::validate`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IntegrityViolation {
    #[error("Current state {current} is set but there is no start state")]
    CurrentWithoutStart { current: StateId },

    #[error("Current state {current} is not reachable from start state {start}")]
    UnreachableCurrent { current: StateId, start: StateId },

    #[error("Transition {0} is subscribed but not reachable from the start state")]
    OrphanedSubscription(TransitionId),

    #[error("Transition {0} is reachable from the start state but not subscribed")]
    MissingSubscription(TransitionId),
}

impl<S: State, A> Automaton<S, A> {
    /// Check the cursor and subscription invariants.
    ///
    /// Returns `Validation::Success(())` if everything holds, otherwise
    /// `Validation::Failure` with every violation found.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<IntegrityViolation>> {
        let mut checks: Vec<Validation<(), NonEmptyVec<IntegrityViolation>>> = Vec::new();

        match (self.start, self.current) {
            (None, Some(current)) => {
                checks.push(Validation::fail(IntegrityViolation::CurrentWithoutStart {
                    current,
                }));
            }
            (Some(start), Some(current)) => {
                let check = if self
                    .graph
                    .reachable_states(start, Traversal::WithEpsilon)
                    .contains(&current)
                {
                    Validation::success(())
                } else {
                    Validation::fail(IntegrityViolation::UnreachableCurrent { current, start })
                };
                checks.push(check);
            }
            _ => {}
        }

        let live = self.reachable_transitions();
        let subscribed = self.subscriptions.transitions();
        for &transition in subscribed.difference(&live) {
            checks.push(Validation::fail(IntegrityViolation::OrphanedSubscription(
                transition,
            )));
        }
        for &transition in live.difference(&subscribed) {
            checks.push(Validation::fail(IntegrityViolation::MissingSubscription(
                transition,
            )));
        }

        Validation::all_vec(checks).map(|_| ())
    }
}
