//! Builder API for ergonomic table and machine construction.
//!
//! This module provides fluent builders and the [`table!`](crate::table!)
//! macro for declaring transition tables with minimal boilerplate, plus a
//! [`MachineBuilder`] that wires the start state, guard, observer and
//! options before the first transition.

pub mod error;
pub mod machine;
pub mod macros;
pub mod table;

pub use error::BuildError;
pub use machine::MachineBuilder;
pub use table::{StateBuilder, TableBuilder};
