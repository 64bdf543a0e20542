//! Build errors for table and machine builders.

use crate::core::StateId;
use crate::validation::TableViolation;
use thiserror::Error;

/// Errors that can occur when building tables and machines.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("No states defined. Add at least one state")]
    EmptyTable,

    #[error("Initial state not specified. Call .initial(state) before .start()")]
    MissingInitialState,

    #[error("Initial state '{0}' is not defined in the transition table")]
    UnknownInitialState(StateId),

    #[error("Transition table failed validation with {} violation(s)", .0.len())]
    InvalidTable(Vec<TableViolation>),
}
