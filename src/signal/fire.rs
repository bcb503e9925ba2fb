//! Fire signals: external requests to take a transition.

use crate::engine::FsmError;
use crate::graph::TransitionId;
use std::fmt;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// A raised fire signal waiting for delivery.
#[derive(Debug, Clone, PartialEq)]
pub struct Fired<A> {
    pub transition: TransitionId,
    pub args: Vec<A>,
}

/// Handle an external source uses to fire one transition.
///
/// Handles are cheap to clone and can be moved to other threads or tasks
/// (timers, I/O callbacks). Raising only enqueues; the automaton takes the
/// transition when its owner dispatches pending signals.
pub struct FireSignal<A> {
    transition: TransitionId,
    sender: UnboundedSender<Fired<A>>,
}

impl<A> FireSignal<A> {
    /// The transition this signal fires.
    pub fn transition(&self) -> TransitionId {
        self.transition
    }

    /// Request the transition with the given arguments.
    ///
    /// # Errors
    ///
    /// Returns `FsmError::SignalClosed` if the automaton has been dropped.
    pub fn raise(&self, args: Vec<A>) -> Result<(), FsmError> {
        self.sender
            .send(Fired {
                transition: self.transition,
                args,
            })
            .map_err(|_| FsmError::SignalClosed(self.transition))
    }
}

impl<A> Clone for FireSignal<A> {
    fn clone(&self) -> Self {
        Self {
            transition: self.transition,
            sender: self.sender.clone(),
        }
    }
}

impl<A> fmt::Debug for FireSignal<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FireSignal")
            .field("transition", &self.transition)
            .field("closed", &self.sender.is_closed())
            .finish()
    }
}

/// Queue serializing raised signals into the automaton.
pub(crate) struct SignalQueue<A> {
    sender: UnboundedSender<Fired<A>>,
    pub(crate) receiver: UnboundedReceiver<Fired<A>>,
}

impl<A> SignalQueue<A> {
    pub(crate) fn new() -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self { sender, receiver }
    }

    pub(crate) fn handle(&self, transition: TransitionId) -> FireSignal<A> {
        FireSignal {
            transition,
            sender: self.sender.clone(),
        }
    }
}

impl<A> fmt::Debug for SignalQueue<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignalQueue").finish_non_exhaustive()
    }
}
