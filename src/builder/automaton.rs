//! Builder for configuring automata.

use crate::core::State;
use crate::engine::{Automaton, AutomatonConfig, TransitPolicy};
use std::marker::PhantomData;

/// Builder for constructing an [`Automaton`] with a fluent API.
///
/// # Example
///
/// ```rust
/// use signalgraph::builder::AutomatonBuilder;
/// use signalgraph::engine::{Automaton, TransitPolicy};
///
/// let fsm: Automaton<&str, u8> = AutomatonBuilder::new()
///     .transit_policy(TransitPolicy::Permissive)
///     .history_limit(32)
///     .build();
///
/// assert_eq!(fsm.config().history_limit, Some(32));
/// ```
pub struct AutomatonBuilder<S, A> {
    config: AutomatonConfig,
    _phantom: PhantomData<fn() -> (S, A)>,
}

impl<S: State, A> AutomatonBuilder<S, A> {
    /// Create a builder holding the default configuration.
    pub fn new() -> Self {
        Self {
            config: AutomatonConfig::default(),
            _phantom: PhantomData,
        }
    }

    /// Set how transits of transitions not leaving the current state are treated.
    pub fn transit_policy(mut self, policy: TransitPolicy) -> Self {
        self.config.transit_policy = policy;
        self
    }

    /// Keep at most `limit` transit records.
    pub fn history_limit(mut self, limit: usize) -> Self {
        self.config.history_limit = Some(limit);
        self
    }

    /// Keep every transit record.
    pub fn unbounded_history(mut self) -> Self {
        self.config.history_limit = None;
        self
    }

    /// Build an empty automaton with this configuration.
    pub fn build(self) -> Automaton<S, A> {
        Automaton::with_config(self.config)
    }
}

impl<S: State, A> Default for AutomatonBuilder<S, A> {
    fn default() -> Self {
        Self::new()
    }
}
