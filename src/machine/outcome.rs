//! Results of dispatching an event or navigating back.

use crate::core::StateId;
use serde_json::Value;

/// What a successfully handled `emit` or `go_to_prev_state` did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The machine moved from `from` to `to`.
    Transitioned { from: StateId, to: StateId },

    /// Nothing to do: a self-transition, or back navigation with an empty
    /// history.
    Unchanged,

    /// The guard withheld the move towards `to`.
    Blocked { to: StateId },
}

/// Snapshot handed to the observer after each committed transition.
#[derive(Clone, Copy, Debug)]
pub struct StateChange<'a> {
    /// Sticky data after the transition
    pub data: Option<&'a Value>,
    /// The state just entered
    pub state: &'a StateId,
    /// History stack, oldest first
    pub history: &'a [StateId],
    /// Payload passed to the triggering call
    pub payload: Option<&'a Value>,
}
