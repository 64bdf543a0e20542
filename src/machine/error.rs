//! Runtime conditions reported by the machine.

use crate::core::StateId;
use thiserror::Error;
use tracing::{error, warn};

/// Conditions that stop an operation from taking effect.
///
/// The plain machine operations never return these; they report them
/// through `tracing` and leave the machine in its last valid state. The
/// `try_*` operations hand them back to the caller instead.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FsmError {
    #[error("Event '{event}' is not defined for state '{state}'")]
    TransitionUndefined { event: String, state: StateId },

    #[error("State machine is not initialized. Call .init() first")]
    NotInitialized,

    #[error("State '{state}' is not defined in the transition table")]
    StateUndefined { state: StateId },

    #[error("No start state set. Pass one to .init_at() or the builder's .initial()")]
    NoStartState,

    #[error("State machine is already initialized")]
    AlreadyInitialized,
}

impl FsmError {
    /// Emit this condition on the diagnostic channel.
    pub(crate) fn report(&self) {
        match self {
            Self::AlreadyInitialized => warn!(error = %self, "ignoring repeated init"),
            _ => error!(error = %self, "state machine operation had no effect"),
        }
    }
}
