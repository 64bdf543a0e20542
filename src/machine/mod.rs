//! The state machine engine.
//!
//! A [`Machine`] owns a runtime cursor (current state, history, sticky data,
//! event log) over a shared [`TransitionTable`](crate::table::TransitionTable)
//! and runs the transition protocol:
//!
//! 1. look up the event in the current state's `on` map
//! 2. ignore self-transitions
//! 3. consult the guard, which may redirect or withhold
//! 4. commit: `leave`, history push, `enter`, event log, observer
//!
//! Everything runs inline on the caller's thread; hooks, guard and observer
//! have all returned by the time `emit` does.

mod cursor;
mod error;
#[allow(clippy::module_inception)]
mod machine;
mod outcome;

pub use error::FsmError;
pub use machine::{Machine, Observer};
pub use outcome::{Outcome, StateChange};
