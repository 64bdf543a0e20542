//! Builder for constructing machines.

use crate::builder::error::BuildError;
use crate::config::MachineConfig;
use crate::core::{Guard, GuardDecision, StateId};
use crate::machine::{Machine, Observer, StateChange};
use crate::table::TransitionTable;
use crate::validation::validate_table;
use std::sync::Arc;
use stillwater::validation::Validation;

/// Builder for machines with a fluent API.
///
/// # Example
///
/// ```rust
/// use uism::{table, GuardDecision, Machine};
///
/// let mut machine = Machine::builder(table! {
///     "start" => { "SUCCESS" => "next" },
///     "next" => {},
/// })
/// .initial("start")
/// .before_each(|_to, _from| GuardDecision::proceed())
/// .start()
/// .unwrap();
///
/// machine.emit("SUCCESS", None);
/// assert_eq!(machine.state().unwrap(), "next");
/// ```
pub struct MachineBuilder {
    table: Arc<TransitionTable>,
    initial: Option<StateId>,
    config: MachineConfig,
    guard: Option<Guard>,
    observer: Option<Observer>,
    strict: bool,
}

impl MachineBuilder {
    /// Create a new builder over `table`.
    pub fn new(table: impl Into<Arc<TransitionTable>>) -> Self {
        Self {
            table: table.into(),
            initial: None,
            config: MachineConfig::default(),
            guard: None,
            observer: None,
            strict: false,
        }
    }

    /// Set the start state used by `init()` and `start()`.
    pub fn initial(mut self, state: impl Into<StateId>) -> Self {
        self.initial = Some(state.into());
        self
    }

    pub fn config(mut self, config: MachineConfig) -> Self {
        self.config = config;
        self
    }

    /// Register the observer.
    pub fn on_state_change<F>(mut self, observer: F) -> Self
    where
        F: FnMut(&StateChange<'_>) + Send + 'static,
    {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Register the guard.
    pub fn before_each<F>(mut self, guard: F) -> Self
    where
        F: FnMut(&StateId, &StateId) -> GuardDecision + Send + 'static,
    {
        self.guard = Some(Guard::new(guard));
        self
    }

    /// Validate the whole table at build time, rejecting dangling
    /// destinations instead of reporting them when first dispatched.
    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    /// Build an uninitialized machine.
    /// Returns an error if the table is empty or the initial state is unknown.
    pub fn build(self) -> Result<Machine, BuildError> {
        if self.table.is_empty() {
            return Err(BuildError::EmptyTable);
        }

        if self.strict {
            if let Validation::Failure(violations) =
                validate_table(&self.table, self.initial.as_ref())
            {
                return Err(BuildError::InvalidTable(
                    violations.iter().cloned().collect(),
                ));
            }
        } else if let Some(initial) = &self.initial {
            if !self.table.contains(initial.as_str()) {
                return Err(BuildError::UnknownInitialState(initial.clone()));
            }
        }

        Ok(Machine::from_parts(
            self.table,
            self.config,
            self.initial,
            self.guard,
            self.observer,
        ))
    }

    /// Build and initialize at the initial state.
    pub fn start(self) -> Result<Machine, BuildError> {
        if self.initial.is_none() {
            return Err(BuildError::MissingInitialState);
        }
        let mut machine = self.build()?;
        machine.init();
        Ok(machine)
    }
}
