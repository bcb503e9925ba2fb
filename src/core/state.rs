//! Payload trait for state graph nodes.
//!
//! Every node in the state graph carries a user value implementing
//! [`State`]. The value names the node for diagnostics and supplies the
//! default terminal flag.

use std::fmt::Debug;

/// Trait for the value carried by a state node.
///
/// # Example
///
/// ```rust
/// use signalgraph::core::State;
///
/// #[derive(Clone, PartialEq, Debug)]
/// enum LexState {
///     Start,
///     Ident,
///     Accept,
/// }
///
/// impl State for LexState {
///     fn name(&self) -> &str {
///         match self {
///             Self::Start => "Start",
///             Self::Ident => "Ident",
///             Self::Accept => "Accept",
///         }
///     }
///
///     fn is_final(&self) -> bool {
///         matches!(self, Self::Accept)
///     }
/// }
/// ```
pub trait State: Debug + Send + Sync {
    /// Name used in logs and diagnostics.
    fn name(&self) -> &str;

    /// Whether a node carrying this value starts out terminal.
    ///
    /// Default implementation returns `false`.
    fn is_final(&self) -> bool {
        false
    }
}

impl State for &'static str {
    fn name(&self) -> &str {
        self
    }
}

impl State for String {
    fn name(&self) -> &str {
        self.as_str()
    }
}

impl State for () {
    fn name(&self) -> &str {
        "()"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, PartialEq, Debug)]
    enum TestState {
        Initial,
        Processing,
        Complete,
    }

    impl State for TestState {
        fn name(&self) -> &str {
            match self {
                Self::Initial => "Initial",
                Self::Processing => "Processing",
                Self::Complete => "Complete",
            }
        }

        fn is_final(&self) -> bool {
            matches!(self, Self::Complete)
        }
    }

    #[test]
    fn state_name_returns_correct_value() {
        assert_eq!(TestState::Initial.name(), "Initial");
        assert_eq!(TestState::Processing.name(), "Processing");
        assert_eq!(TestState::Complete.name(), "Complete");
    }

    #[test]
    fn is_final_identifies_terminal_states() {
        assert!(!TestState::Initial.is_final());
        assert!(!TestState::Processing.is_final());
        assert!(TestState::Complete.is_final());
    }

    #[test]
    fn string_payloads_name_themselves() {
        assert_eq!("idle".name(), "idle");
        assert_eq!(String::from("busy").name(), "busy");
        assert!(!"idle".is_final());
        assert_eq!(().name(), "()");
    }
}
