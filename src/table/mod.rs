//! Transition table store.
//!
//! The table maps each state to its definition: the events it accepts,
//! optional `enter`/`leave` hooks and optional static `data`. A machine
//! holds its table behind an `Arc` and never mutates it.
//!
//! Tables are authored with [`crate::builder::TableBuilder`], the
//! [`crate::table!`] macro, or loaded from JSON:
//!
//! ```rust
//! use uism::table::TransitionTable;
//!
//! let table = TransitionTable::from_json(r#"{
//!     "start": { "on": { "SUCCESS": "next" } },
//!     "next":  { "data": { "title": "Done" } }
//! }"#).unwrap();
//!
//! assert_eq!(table.len(), 2);
//! assert_eq!(table.destination("start", "SUCCESS").unwrap(), "next");
//! ```
//!
//! Destinations are not checked against the table here; see
//! [`crate::validation::validate_table`] for an opt-in structural check.

mod error;
mod events;

pub use error::TableError;
pub use events::Events;

use crate::core::StateId;
use crate::machine::Machine;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// Lifecycle hook run when a state is entered or left.
///
/// Hooks receive the machine itself plus the payload passed to the call
/// that triggered the transition.
pub type Hook = Box<dyn Fn(&mut Machine, Option<&Value>) + Send + Sync>;

/// Everything declared about a single state.
#[derive(Default, Deserialize)]
pub struct StateDefinition {
    #[serde(default)]
    on: Events,

    #[serde(skip)]
    enter: Option<Hook>,

    #[serde(skip)]
    leave: Option<Hook>,

    #[serde(default, alias = "payload")]
    data: Option<Value>,
}

impl StateDefinition {
    /// A terminal state with no hooks or data.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &Events {
        &self.on
    }

    pub fn events_mut(&mut self) -> &mut Events {
        &mut self.on
    }

    /// Destination for `event` from this state.
    pub fn destination(&self, event: &str) -> Option<&StateId> {
        self.on.get(event)
    }

    pub fn enter_hook(&self) -> Option<&Hook> {
        self.enter.as_ref()
    }

    pub fn leave_hook(&self) -> Option<&Hook> {
        self.leave.as_ref()
    }

    pub fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    pub fn set_enter(&mut self, hook: Hook) {
        self.enter = Some(hook);
    }

    pub fn set_leave(&mut self, hook: Hook) {
        self.leave = Some(hook);
    }

    /// Attach static data. `null` counts as no data, so entering the state
    /// leaves the machine's sticky data untouched.
    pub fn set_data(&mut self, data: Value) {
        self.data = (!data.is_null()).then_some(data);
    }

    /// Whether the state accepts no events.
    pub fn is_terminal(&self) -> bool {
        self.on.is_empty()
    }
}

impl fmt::Debug for StateDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateDefinition")
            .field("on", &self.on)
            .field("enter", &self.enter.is_some())
            .field("leave", &self.leave.is_some())
            .field("data", &self.data)
            .finish()
    }
}

/// Immutable map of state identifiers to their definitions.
#[derive(Debug, Default, Deserialize)]
#[serde(transparent)]
pub struct TransitionTable {
    states: HashMap<StateId, StateDefinition>,
}

impl TransitionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `on` maps and `data` from a JSON object keyed by state name.
    ///
    /// Hooks can't be expressed in JSON; attach them afterwards with
    /// [`TransitionTable::set_enter`] and [`TransitionTable::set_leave`].
    pub fn from_json(json: &str) -> Result<Self, TableError> {
        let table: Self = serde_json::from_str(json)?;
        if table.is_empty() {
            return Err(TableError::Empty);
        }
        Ok(table)
    }

    /// Add or replace a state, returning the previous definition.
    pub fn insert(
        &mut self,
        state: impl Into<StateId>,
        definition: StateDefinition,
    ) -> Option<StateDefinition> {
        self.states.insert(state.into(), definition)
    }

    pub fn get(&self, state: &str) -> Option<&StateDefinition> {
        self.states.get(state)
    }

    pub fn contains(&self, state: &str) -> bool {
        self.states.contains_key(state)
    }

    /// Destination of `event` from `state`, if both are declared.
    pub fn destination(&self, state: &str, event: &str) -> Option<&StateId> {
        self.get(state).and_then(|definition| definition.destination(event))
    }

    /// Attach an `enter` hook to an existing state.
    ///
    /// Returns `false` when the state isn't in the table.
    pub fn set_enter<F>(&mut self, state: &str, hook: F) -> bool
    where
        F: Fn(&mut Machine, Option<&Value>) + Send + Sync + 'static,
    {
        match self.states.get_mut(state) {
            Some(definition) => {
                definition.set_enter(Box::new(hook));
                true
            }
            None => false,
        }
    }

    /// Attach a `leave` hook to an existing state.
    ///
    /// Returns `false` when the state isn't in the table.
    pub fn set_leave<F>(&mut self, state: &str, hook: F) -> bool
    where
        F: Fn(&mut Machine, Option<&Value>) + Send + Sync + 'static,
    {
        match self.states.get_mut(state) {
            Some(definition) => {
                definition.set_leave(Box::new(hook));
                true
            }
            None => false,
        }
    }

    pub fn states(&self) -> impl Iterator<Item = (&StateId, &StateDefinition)> {
        self.states.iter()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}
