//! Log of transitions taken by an automaton.

use crate::graph::{StateId, TransitionId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Record of a single transit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitRecord {
    /// The state the cursor left, `None` if the cursor was unset
    pub from: Option<StateId>,
    /// The state the cursor entered
    pub to: StateId,
    /// The transition that was taken
    pub transition: TransitionId,
    /// When the transit completed
    pub timestamp: DateTime<Utc>,
}

/// Ordered, optionally bounded history of transits.
///
/// When a limit is set the oldest records are evicted first.
///
/// # Example
///
/// ```rust
/// use signalgraph::core::TransitHistory;
///
/// let history = TransitHistory::with_limit(Some(16));
/// assert!(history.is_empty());
/// assert!(history.duration().is_none());
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TransitHistory {
    records: VecDeque<TransitRecord>,
    limit: Option<usize>,
}

impl TransitHistory {
    /// Create an unbounded, empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty history keeping at most `limit` records.
    pub fn with_limit(limit: Option<usize>) -> Self {
        Self {
            records: VecDeque::new(),
            limit,
        }
    }

    /// Append a record, evicting the oldest ones past the limit.
    pub fn record(&mut self, record: TransitRecord) {
        if self.limit == Some(0) {
            return;
        }
        self.records.push_back(record);
        if let Some(limit) = self.limit {
            while self.records.len() > limit {
                self.records.pop_front();
            }
        }
    }

    /// States visited, in order: the first record's origin (if any), then
    /// the target of every record.
    pub fn get_path(&self) -> Vec<StateId> {
        let mut path = Vec::with_capacity(self.records.len() + 1);
        if let Some(from) = self.records.front().and_then(|r| r.from) {
            path.push(from);
        }
        path.extend(self.records.iter().map(|r| r.to));
        path
    }

    /// Time between the first and last retained record.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.records.front()?, self.records.back()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TransitRecord> {
        self.records.iter()
    }

    pub fn last(&self) -> Option<&TransitRecord> {
        self.records.back()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}
