//! Automaton configuration.

/// How [`Automaton::transit`](super::Automaton::transit) treats a transition
/// that does not leave the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitPolicy {
    /// Only take transitions attached to the current state; report `false`
    /// for anything else.
    #[default]
    Strict,

    /// Take any known transition, jumping straight to its target.
    Permissive,
}

/// Default number of transit records kept per automaton.
pub const DEFAULT_HISTORY_LIMIT: usize = 256;

/// Settings fixed at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutomatonConfig {
    /// Transit validation mode
    pub transit_policy: TransitPolicy,

    /// Maximum transit records retained, `None` for unbounded
    pub history_limit: Option<usize>,
}

impl Default for AutomatonConfig {
    fn default() -> Self {
        Self {
            transit_policy: TransitPolicy::Strict,
            history_limit: Some(DEFAULT_HISTORY_LIMIT),
        }
    }
}
