//! Observer registry keyed by transition handle.

use crate::graph::TransitionId;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Identity of one subscription. A transition that stays subscribed keeps
/// the same id; a fresh subscription always gets a new one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub#{}", self.0)
    }
}

/// At most one subscription per transition.
#[derive(Debug, Default)]
pub struct SubscriptionRegistry {
    entries: BTreeMap<TransitionId, SubscriptionId>,
    next_id: u64,
}

impl SubscriptionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe `transition`. Returns `None` if it already is subscribed.
    pub fn subscribe(&mut self, transition: TransitionId) -> Option<SubscriptionId> {
        if self.entries.contains_key(&transition) {
            return None;
        }
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.entries.insert(transition, id);
        Some(id)
    }

    /// Drop the subscription of `transition`, returning it if there was one.
    pub fn unsubscribe(&mut self, transition: TransitionId) -> Option<SubscriptionId> {
        self.entries.remove(&transition)
    }

    /// The subscription held for `transition`, if any.
    pub fn get(&self, transition: TransitionId) -> Option<SubscriptionId> {
        self.entries.get(&transition).copied()
    }

    /// Whether `transition` is subscribed.
    pub fn contains(&self, transition: TransitionId) -> bool {
        self.entries.contains_key(&transition)
    }

    /// Subscribed transitions.
    pub fn transitions(&self) -> BTreeSet<TransitionId> {
        self.entries.keys().copied().collect()
    }

    /// Subscriptions in transition order.
    pub fn iter(&self) -> impl Iterator<Item = (TransitionId, SubscriptionId)> + '_ {
        self.entries.iter().map(|(t, s)| (*t, *s))
    }

    /// Number of live subscriptions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is subscribed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn drain(&mut self) -> Vec<(TransitionId, SubscriptionId)> {
        std::mem::take(&mut self.entries).into_iter().collect()
    }
}
