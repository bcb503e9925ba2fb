//! Guard predicates attached to transitions.
//!
//! A guard inspects the arguments a transition would be taken with. The
//! engine never evaluates guards on its own; callers check them through
//! [`Automaton::can_transit`](crate::engine::Automaton::can_transit) before
//! relying on a transition.

use std::fmt;

/// Pure predicate over the arguments of a transit.
///
/// # Example
///
/// ```rust
/// use signalgraph::core::Guard;
///
/// let only_digits = Guard::new(|args: &[char]| args.iter().all(char::is_ascii_digit));
///
/// assert!(only_digits.check(&['4', '2']));
/// assert!(!only_digits.check(&['x']));
/// ```
pub struct Guard<A> {
    predicate: Box<dyn Fn(&[A]) -> bool + Send + Sync>,
}

impl<A> Guard<A> {
    /// Create a guard from a pure predicate function.
    ///
    /// The predicate must be deterministic and thread-safe (Send + Sync).
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&[A]) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Box::new(predicate),
        }
    }

    /// Check whether the guard admits these arguments.
    pub fn check(&self, args: &[A]) -> bool {
        (self.predicate)(args)
    }
}

impl<A> fmt::Debug for Guard<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Guard(..)")
    }
}
