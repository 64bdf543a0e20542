//! Errors raised while loading a transition table.

use thiserror::Error;

/// Errors that can occur when loading a table from JSON.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("Transition table is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Transition table declares no states")]
    Empty,
}
