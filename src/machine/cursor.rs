//! Mutable runtime state owned by one machine.

use crate::core::{EventLog, History, StateId};
use serde_json::Value;

#[derive(Debug, Default)]
pub(crate) struct Cursor {
    pub(crate) current: Option<StateId>,
    pub(crate) history: History,
    /// Sticky: only overwritten by states that declare `data`.
    pub(crate) data: Option<Value>,
    pub(crate) log: EventLog,
    pub(crate) initialized: bool,
}

impl Cursor {
    pub(crate) fn new(history_limit: Option<usize>) -> Self {
        Self {
            history: History::with_limit(history_limit),
            ..Self::default()
        }
    }
}
