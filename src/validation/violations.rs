//! Structural problems found in a transition table.

use crate::core::StateId;
use thiserror::Error;

/// A problem with the shape of a transition table.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TableViolation {
    #[error("Transition table declares no states")]
    EmptyTable,

    #[error("Initial state '{state}' is not declared")]
    UnknownInitialState { state: StateId },

    #[error("Event '{event}' of state '{state}' targets undeclared state '{to}'")]
    DanglingDestination {
        state: StateId,
        event: String,
        to: StateId,
    },
}
