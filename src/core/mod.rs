//! Core vocabulary of the engine.
//!
//! - State identifiers via `StateId`
//! - Guard decisions for transition control
//! - Navigation history and the applied-event log
//!
//! Nothing in this module runs hooks or touches a machine; these are plain
//! values the executor in [`crate::machine`] is built from.

mod guard;
mod history;
mod state;

pub use guard::{Guard, GuardDecision};
pub use history::{EventLog, History, TransitionRecord};
pub use state::StateId;
