//! Navigation history and the log of applied events.
//!
//! Two records are kept side by side: the back-navigation stack of states
//! (grows on forward transitions, shrinks on "go back") and the append-only
//! log of events that actually moved the machine.

use super::state::StateId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stack of previously current states.
///
/// An optional limit bounds the stack; once exceeded, the oldest entries
/// are dropped.
///
/// # Example
///
/// ```rust
/// use uism::core::{History, StateId};
///
/// let mut history = History::with_limit(Some(2));
/// history.push(StateId::from("a"));
/// history.push(StateId::from("b"));
/// history.push(StateId::from("c"));
///
/// assert_eq!(history.len(), 2);
/// assert_eq!(history.peek(), Some(&StateId::from("c")));
/// assert_eq!(history.pop(), Some(StateId::from("c")));
/// assert_eq!(history.pop(), Some(StateId::from("b")));
/// assert!(history.is_empty());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct History {
    stack: Vec<StateId>,
    limit: Option<usize>,
}

impl History {
    /// Create an unbounded, empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty history holding at most `limit` entries.
    pub fn with_limit(limit: Option<usize>) -> Self {
        Self {
            stack: Vec::new(),
            limit,
        }
    }

    /// Push a state on top of the stack.
    pub fn push(&mut self, state: StateId) {
        self.stack.push(state);
        if let Some(limit) = self.limit {
            if self.stack.len() > limit {
                let excess = self.stack.len() - limit;
                self.stack.drain(..excess);
            }
        }
    }

    /// Remove and return the most recent state.
    pub fn pop(&mut self) -> Option<StateId> {
        self.stack.pop()
    }

    /// The most recent state, without removing it.
    pub fn peek(&self) -> Option<&StateId> {
        self.stack.last()
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// States in the order they were visited, oldest first.
    pub fn as_slice(&self) -> &[StateId] {
        &self.stack
    }
}

/// An event that moved the machine from one state to another.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// The event name as it was matched against the table
    pub event: String,
    /// The state being left
    pub from: StateId,
    /// The state entered
    pub to: StateId,
    /// When the transition committed
    pub timestamp: DateTime<Utc>,
}

impl TransitionRecord {
    /// Record a transition committed now.
    pub fn now(event: impl Into<String>, from: StateId, to: StateId) -> Self {
        Self {
            event: event.into(),
            from,
            to,
            timestamp: Utc::now(),
        }
    }
}

/// Append-only log of applied events.
///
/// Self-transitions, rejected events and back navigation never appear here.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EventLog {
    records: Vec<TransitionRecord>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a committed transition.
    pub fn record(&mut self, record: TransitionRecord) {
        self.records.push(record);
    }

    /// Event names in the order they were applied.
    pub fn events(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|record| record.event.as_str())
    }

    /// Full transition records in order.
    pub fn records(&self) -> &[TransitionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(name: &str) -> StateId {
        StateId::from(name)
    }

    #[test]
    fn new_history_is_empty() {
        let history = History::new();
        assert!(history.is_empty());
        assert_eq!(history.peek(), None);
        assert!(history.as_slice().is_empty());
    }

    #[test]
    fn history_is_last_in_first_out() {
        let mut history = History::new();
        history.push(id("start"));
        history.push(id("middle"));

        assert_eq!(history.peek(), Some(&id("middle")));
        assert_eq!(history.pop(), Some(id("middle")));
        assert_eq!(history.pop(), Some(id("start")));
        assert_eq!(history.pop(), None);
    }

    #[test]
    fn limit_drops_oldest_entries() {
        let mut history = History::with_limit(Some(3));
        for name in ["a", "b", "c", "d", "e"] {
            history.push(id(name));
        }

        assert_eq!(history.as_slice(), &[id("c"), id("d"), id("e")]);
    }

    #[test]
    fn zero_limit_keeps_nothing() {
        let mut history = History::with_limit(Some(0));
        history.push(id("a"));
        assert!(history.is_empty());
    }

    #[test]
    fn event_log_preserves_order() {
        let mut log = EventLog::new();
        log.record(TransitionRecord::now("NEXT", id("a"), id("b")));
        log.record(TransitionRecord::now("BACK", id("b"), id("a")));

        assert_eq!(log.events().collect::<Vec<_>>(), vec!["NEXT", "BACK"]);
        assert_eq!(log.records()[0].from, id("a"));
        assert_eq!(log.records()[1].to, id("a"));
    }

    #[test]
    fn event_log_serializes_correctly() {
        let mut log = EventLog::new();
        log.record(TransitionRecord::now("NEXT", id("a"), id("b")));

        let json = serde_json::to_string(&log).unwrap();
        let back: EventLog = serde_json::from_str(&json).unwrap();
        assert_eq!(back, log);
    }
}
