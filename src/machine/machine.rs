//! The transition executor.

use crate::builder::MachineBuilder;
use crate::config::MachineConfig;
use crate::core::{Guard, GuardDecision, StateId, TransitionRecord};
use crate::machine::cursor::Cursor;
use crate::machine::error::FsmError;
use crate::machine::outcome::{Outcome, StateChange};
use crate::table::{StateDefinition, TransitionTable};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// Callback notified after every committed transition.
pub type Observer = Box<dyn FnMut(&StateChange<'_>) + Send>;

/// A running state machine over a shared, immutable transition table.
///
/// A machine starts uninitialized: until [`Machine::init`] (or
/// [`Machine::init_at`]) succeeds, every operation reports
/// [`FsmError::NotInitialized`] and does nothing.
///
/// Plain operations never fail loudly. Problems such as an undefined event
/// are reported through `tracing` and leave the machine where it was; use
/// the `try_*` variants to receive them as a `Result`.
///
/// # Example
///
/// ```rust
/// use uism::{table, Machine};
///
/// let mut machine = Machine::new(table! {
///     "start" => { "SUCCESS" => "next" },
///     "next" => {},
/// });
///
/// machine.init_at("start").emit("SUCCESS", None);
///
/// assert_eq!(machine.state().unwrap(), "next");
/// assert_eq!(machine.prev_state().unwrap(), "start");
/// ```
pub struct Machine {
    table: Arc<TransitionTable>,
    config: MachineConfig,
    initial: Option<StateId>,
    cursor: Cursor,
    guard: Option<Guard>,
    observer: Option<Observer>,
}

impl Machine {
    /// Create an uninitialized machine with default options.
    pub fn new(table: impl Into<Arc<TransitionTable>>) -> Self {
        Self::with_config(table, MachineConfig::default())
    }

    /// Create an uninitialized machine with the given options.
    pub fn with_config(table: impl Into<Arc<TransitionTable>>, config: MachineConfig) -> Self {
        Self::from_parts(table.into(), config, None, None, None)
    }

    /// Create a machine and initialize it at `start` straight away.
    pub fn with_start(table: impl Into<Arc<TransitionTable>>, start: impl Into<StateId>) -> Self {
        let mut machine = Self::new(table);
        machine.init_at(start);
        machine
    }

    /// Start a builder for a machine over `table`.
    pub fn builder(table: impl Into<Arc<TransitionTable>>) -> MachineBuilder {
        MachineBuilder::new(table)
    }

    pub(crate) fn from_parts(
        table: Arc<TransitionTable>,
        config: MachineConfig,
        initial: Option<StateId>,
        guard: Option<Guard>,
        observer: Option<Observer>,
    ) -> Self {
        Self {
            cursor: Cursor::new(config.max_history),
            table,
            config,
            initial,
            guard,
            observer,
        }
    }

    /// Initialize at the start state given to the builder.
    pub fn init(&mut self) -> &mut Self {
        if let Err(err) = self.try_init(None) {
            err.report();
        }
        self
    }

    /// Initialize at `start`.
    pub fn init_at(&mut self, start: impl Into<StateId>) -> &mut Self {
        if let Err(err) = self.try_init(Some(start.into())) {
            err.report();
        }
        self
    }

    /// Initialize at `start`, or at the configured start state when `None`.
    ///
    /// Runs the start state's `enter` hook and notifies the observer. No
    /// `leave` hook runs and nothing is pushed on the history.
    pub fn try_init(&mut self, start: Option<StateId>) -> Result<(), FsmError> {
        if self.cursor.initialized {
            return Err(FsmError::AlreadyInitialized);
        }
        let start = start
            .or_else(|| self.initial.clone())
            .ok_or(FsmError::NoStartState)?;
        self.ensure_defined(&start)?;

        self.cursor.initialized = true;
        self.enter_state(start.clone(), None);
        self.notify(None);

        debug!(state = %start, "state machine initialized");
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.cursor.initialized
    }

    /// Register the observer, replacing any previous one.
    pub fn on_state_change<F>(&mut self, observer: F) -> &mut Self
    where
        F: FnMut(&StateChange<'_>) + Send + 'static,
    {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Register the guard, replacing any previous one.
    ///
    /// The guard is called with `(to, from)` before every forward and
    /// backward transition.
    pub fn before_each<F>(&mut self, guard: F) -> &mut Self
    where
        F: FnMut(&StateId, &StateId) -> GuardDecision + Send + 'static,
    {
        self.guard = Some(Guard::new(guard));
        self
    }

    /// Dispatch `event` from the current state.
    pub fn emit(&mut self, event: &str, payload: Option<Value>) -> &mut Self {
        if let Err(err) = self.try_emit(event, payload) {
            err.report();
        }
        self
    }

    /// Dispatch `event`, returning what happened.
    ///
    /// On commit, hooks and the observer run in this order: `leave` of the
    /// current state, `enter` of the destination, observer.
    pub fn try_emit(&mut self, event: &str, payload: Option<Value>) -> Result<Outcome, FsmError> {
        let from = self.current()?.clone();
        let event = self.config.event_key(event).into_owned();
        let next = self
            .table
            .get(from.as_str())
            .ok_or_else(|| FsmError::StateUndefined {
                state: from.clone(),
            })?
            .destination(&event)
            .ok_or_else(|| FsmError::TransitionUndefined {
                event: event.clone(),
                state: from.clone(),
            })?
            .clone();

        if next == from {
            trace!(state = %from, event = %event, "ignoring self-transition");
            return Ok(Outcome::Unchanged);
        }

        let Some(to) = self.consult_guard(&next, &from) else {
            return Ok(Outcome::Blocked { to: next });
        };
        if to == from {
            trace!(state = %from, event = %event, "guard redirected to the current state");
            return Ok(Outcome::Unchanged);
        }
        self.ensure_defined(&to)?;

        let payload = payload.as_ref();
        self.run_leave(&from, payload);
        self.cursor.history.push(from.clone());
        self.enter_state(to.clone(), payload);
        self.cursor
            .log
            .record(TransitionRecord::now(event.clone(), from.clone(), to.clone()));
        self.notify(payload);

        debug!(from = %from, to = %to, event = %event, "transition committed");
        Ok(Outcome::Transitioned { from, to })
    }

    /// Navigate back to the most recent state on the history stack.
    pub fn go_to_prev_state(&mut self, payload: Option<Value>) -> &mut Self {
        if let Err(err) = self.try_go_to_prev_state(payload) {
            err.report();
        }
        self
    }

    /// Navigate back, returning what happened.
    ///
    /// The guard is consulted as for `emit`. The history entry is only
    /// consumed once the move commits, and nothing is pushed or logged.
    pub fn try_go_to_prev_state(&mut self, payload: Option<Value>) -> Result<Outcome, FsmError> {
        let from = self.current()?.clone();
        let Some(prev) = self.cursor.history.peek().cloned() else {
            return Ok(Outcome::Unchanged);
        };

        let Some(to) = self.consult_guard(&prev, &from) else {
            return Ok(Outcome::Blocked { to: prev });
        };
        self.ensure_defined(&to)?;

        self.cursor.history.pop();
        let payload = payload.as_ref();
        self.run_leave(&from, payload);
        self.enter_state(to.clone(), payload);
        self.notify(payload);

        debug!(from = %from, to = %to, "navigated back");
        Ok(Outcome::Transitioned { from, to })
    }

    /// Force the current state to `target`.
    ///
    /// Skips table validation, guard, hooks, history, the event log and
    /// the observer.
    pub fn jump_to(&mut self, target: impl Into<StateId>) -> &mut Self {
        let target = target.into();
        if !self.cursor.initialized {
            FsmError::NotInitialized.report();
            return self;
        }
        if !self.table.contains(target.as_str()) {
            warn!(state = %target, "jumping to a state missing from the transition table");
        }
        self.cursor.current = Some(target);
        self
    }

    /// The current state.
    pub fn state(&self) -> Option<&StateId> {
        self.cursor()?.current.as_ref()
    }

    /// The state `go_to_prev_state` would return to.
    pub fn prev_state(&self) -> Option<&StateId> {
        self.cursor()?.history.peek()
    }

    /// The last `data` declared by any entered state.
    pub fn data(&self) -> Option<&Value> {
        self.cursor()?.data.as_ref()
    }

    /// Events accepted by the current state, in declaration order.
    pub fn events(&self) -> Option<Vec<&str>> {
        let current = self.cursor()?.current.as_ref()?;
        match self.table.get(current.as_str()) {
            Some(definition) => Some(definition.events().names().collect()),
            None => {
                FsmError::StateUndefined {
                    state: current.clone(),
                }
                .report();
                Some(Vec::new())
            }
        }
    }

    /// The whole history stack, oldest first.
    pub fn history(&self) -> Option<&[StateId]> {
        Some(self.cursor()?.history.as_slice())
    }

    /// Names of the events that caused a transition, in order.
    pub fn event_log(&self) -> Option<Vec<&str>> {
        Some(self.cursor()?.log.events().collect())
    }

    /// Every committed event transition with its timestamp.
    pub fn transitions(&self) -> Option<&[TransitionRecord]> {
        Some(self.cursor()?.log.records())
    }

    pub fn table(&self) -> &Arc<TransitionTable> {
        &self.table
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    fn cursor(&self) -> Option<&Cursor> {
        if self.cursor.initialized {
            Some(&self.cursor)
        } else {
            FsmError::NotInitialized.report();
            None
        }
    }

    fn current(&self) -> Result<&StateId, FsmError> {
        match (&self.cursor.current, self.cursor.initialized) {
            (Some(current), true) => Ok(current),
            _ => Err(FsmError::NotInitialized),
        }
    }

    fn ensure_defined(&self, state: &StateId) -> Result<(), FsmError> {
        if self.table.contains(state.as_str()) {
            Ok(())
        } else {
            Err(FsmError::StateUndefined {
                state: state.clone(),
            })
        }
    }

    /// Resolve the destination after asking the guard. `None` means the
    /// guard withheld the transition.
    fn consult_guard(&mut self, next: &StateId, from: &StateId) -> Option<StateId> {
        let Some(guard) = self.guard.as_mut() else {
            return Some(next.clone());
        };

        match guard.check(next, from) {
            GuardDecision::Abort => {
                debug!(from = %from, to = %next, "guard withheld transition");
                None
            }
            GuardDecision::Proceed(Some(redirect)) if self.table.contains(redirect.as_str()) => {
                debug!(from = %from, to = %next, redirect = %redirect, "guard redirected transition");
                Some(redirect)
            }
            GuardDecision::Proceed(Some(redirect)) => {
                warn!(
                    redirect = %redirect,
                    to = %next,
                    "guard redirected to an undefined state; keeping original destination"
                );
                Some(next.clone())
            }
            GuardDecision::Proceed(None) => Some(next.clone()),
        }
    }

    fn run_leave(&mut self, state: &StateId, payload: Option<&Value>) {
        let table = Arc::clone(&self.table);
        if let Some(leave) = table
            .get(state.as_str())
            .and_then(StateDefinition::leave_hook)
        {
            leave(self, payload);
        }
    }

    fn enter_state(&mut self, state: StateId, payload: Option<&Value>) {
        let table = Arc::clone(&self.table);
        let definition = table.get(state.as_str());

        self.cursor.current = Some(state);
        if let Some(data) = definition.and_then(StateDefinition::data) {
            self.cursor.data = Some(data.clone());
        }
        if let Some(enter) = definition.and_then(StateDefinition::enter_hook) {
            enter(self, payload);
        }
    }

    fn notify(&mut self, payload: Option<&Value>) {
        let (Some(observer), Some(state)) = (self.observer.as_mut(), self.cursor.current.as_ref())
        else {
            return;
        };
        observer(&StateChange {
            data: self.cursor.data.as_ref(),
            state,
            history: self.cursor.history.as_slice(),
            payload,
        });
    }
}

impl fmt::Debug for Machine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Machine")
            .field("current", &self.cursor.current)
            .field("initialized", &self.cursor.initialized)
            .field("history", &self.cursor.history)
            .field("data", &self.cursor.data)
            .field("states", &self.table.len())
            .field("guard", &self.guard.is_some())
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{StateBuilder, TableBuilder};
    use serde_json::json;
    use std::sync::Mutex;

    fn two_states() -> TransitionTable {
        TableBuilder::new()
            .state("start", StateBuilder::new().on("SUCCESS", "next"))
            .state("next", StateBuilder::new().on("BACK", "start"))
            .build()
            .unwrap()
    }

    #[test]
    fn new_machine_is_uninitialized() {
        let machine = Machine::new(two_states());
        assert!(!machine.is_initialized());
        assert_eq!(machine.state(), None);
    }

    #[test]
    fn try_emit_reports_not_initialized() {
        let mut machine = Machine::new(two_states());
        assert_eq!(
            machine.try_emit("SUCCESS", None),
            Err(FsmError::NotInitialized)
        );
    }

    #[test]
    fn init_without_start_state_fails() {
        let mut machine = Machine::new(two_states());
        assert_eq!(machine.try_init(None), Err(FsmError::NoStartState));
        assert!(!machine.is_initialized());
    }

    #[test]
    fn init_rejects_unknown_start_state() {
        let mut machine = Machine::new(two_states());
        assert_eq!(
            machine.try_init(Some(StateId::from("nowhere"))),
            Err(FsmError::StateUndefined {
                state: StateId::from("nowhere")
            })
        );
        assert!(!machine.is_initialized());
    }

    #[test]
    fn second_init_is_ignored() {
        let mut machine = Machine::with_start(two_states(), "start");
        machine.emit("SUCCESS", None);

        assert_eq!(
            machine.try_init(Some(StateId::from("start"))),
            Err(FsmError::AlreadyInitialized)
        );
        assert_eq!(machine.state().unwrap(), "next");
    }

    #[test]
    fn try_emit_returns_transition_outcome() {
        let mut machine = Machine::with_start(two_states(), "start");

        let outcome = machine.try_emit("SUCCESS", None).unwrap();

        assert_eq!(
            outcome,
            Outcome::Transitioned {
                from: StateId::from("start"),
                to: StateId::from("next"),
            }
        );
    }

    #[test]
    fn undefined_event_is_typed() {
        let mut machine = Machine::with_start(two_states(), "start");

        assert_eq!(
            machine.try_emit("NOPE", None),
            Err(FsmError::TransitionUndefined {
                event: "NOPE".to_string(),
                state: StateId::from("start"),
            })
        );
    }

    #[test]
    fn dangling_destination_is_state_undefined() {
        let table = TableBuilder::new()
            .state("start", StateBuilder::new().on("GO", "ghost"))
            .build()
            .unwrap();
        let mut machine = Machine::with_start(table, "start");

        assert_eq!(
            machine.try_emit("GO", None),
            Err(FsmError::StateUndefined {
                state: StateId::from("ghost")
            })
        );
        assert_eq!(machine.state().unwrap(), "start");
        assert!(machine.history().unwrap().is_empty());
    }

    #[test]
    fn normalized_events_match_uppercase_table_entries() {
        let mut machine = Machine::with_config(
            two_states(),
            MachineConfig::new().normalize_events(true),
        );
        machine.init_at("start").emit("success", None);

        assert_eq!(machine.state().unwrap(), "next");
        assert_eq!(machine.event_log().unwrap(), vec!["SUCCESS"]);
    }

    #[test]
    fn history_limit_is_applied() {
        let mut machine =
            Machine::with_config(two_states(), MachineConfig::new().max_history(1));
        machine
            .init_at("start")
            .emit("SUCCESS", None)
            .emit("BACK", None)
            .emit("SUCCESS", None);

        assert_eq!(machine.history().unwrap(), &[StateId::from("start")]);
    }

    #[test]
    fn enter_hook_can_emit() {
        let table = TableBuilder::new()
            .state(
                "loading",
                StateBuilder::new()
                    .on("LOADED", "ready")
                    .enter(|machine, _| {
                        machine.emit("LOADED", None);
                    }),
            )
            .state("ready", StateBuilder::new())
            .build()
            .unwrap();
        let machine = Machine::with_start(table, "loading");

        assert_eq!(machine.state().unwrap(), "ready");
        assert_eq!(machine.prev_state().unwrap(), "loading");
    }

    #[test]
    fn hook_receives_payload() {
        let seen = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&seen);
        let table = TableBuilder::new()
            .state("start", StateBuilder::new().on("SUBMIT", "sent"))
            .state(
                "sent",
                StateBuilder::new().enter(move |_, payload| {
                    *sink.lock().unwrap() = payload.cloned();
                }),
            )
            .build()
            .unwrap();
        let mut machine = Machine::with_start(table, "start");

        machine.emit("SUBMIT", Some(json!({ "id": 7 })));

        assert_eq!(*seen.lock().unwrap(), Some(json!({ "id": 7 })));
    }

    #[test]
    fn jump_to_before_init_does_nothing() {
        let mut machine = Machine::new(two_states());
        machine.jump_to("next");
        assert!(!machine.is_initialized());
        assert_eq!(machine.state(), None);
    }

    #[test]
    fn debug_output_omits_callbacks() {
        let machine = Machine::with_start(two_states(), "start");
        let debug = format!("{machine:?}");
        assert!(debug.contains("Machine"));
        assert!(debug.contains("start"));
    }
}
