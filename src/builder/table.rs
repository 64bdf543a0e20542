//! Builders for transition tables and their states.

use crate::builder::error::BuildError;
use crate::core::StateId;
use crate::machine::Machine;
use crate::table::{StateDefinition, TransitionTable};
use serde_json::Value;

/// Builder for a single state definition.
#[derive(Debug, Default)]
pub struct StateBuilder {
    definition: StateDefinition,
}

impl StateBuilder {
    /// Start a terminal state with no hooks or data.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept `event`, moving to `to`.
    pub fn on(mut self, event: impl Into<String>, to: impl Into<StateId>) -> Self {
        self.definition.events_mut().insert(event, to);
        self
    }

    /// Run `hook` whenever the state becomes current.
    pub fn enter<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut Machine, Option<&Value>) + Send + Sync + 'static,
    {
        self.definition.set_enter(Box::new(hook));
        self
    }

    /// Run `hook` whenever the state stops being current.
    pub fn leave<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut Machine, Option<&Value>) + Send + Sync + 'static,
    {
        self.definition.set_leave(Box::new(hook));
        self
    }

    /// Attach static data, published as the machine's data on entry.
    pub fn data(mut self, data: impl Into<Value>) -> Self {
        self.definition.set_data(data.into());
        self
    }

    pub fn build(self) -> StateDefinition {
        self.definition
    }
}

/// Builder for a transition table.
///
/// # Example
///
/// ```rust
/// use uism::builder::{StateBuilder, TableBuilder};
///
/// let table = TableBuilder::new()
///     .state("idle", StateBuilder::new().on("FETCH", "loading"))
///     .state("loading", StateBuilder::new().on("DONE", "idle").data("busy"))
///     .build()
///     .unwrap();
///
/// assert_eq!(table.len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct TableBuilder {
    table: TransitionTable,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a state. Declaring the same state twice keeps the later one.
    pub fn state(mut self, id: impl Into<StateId>, state: StateBuilder) -> Self {
        self.table.insert(id, state.build());
        self
    }

    /// Build the table.
    /// Returns an error if no state was declared.
    pub fn build(self) -> Result<TransitionTable, BuildError> {
        if self.table.is_empty() {
            return Err(BuildError::EmptyTable);
        }
        Ok(self.table)
    }
}
