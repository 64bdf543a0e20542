//! Uism: an embeddable state machine for UI view and flow logic
//!
//! A component declares its states, the events each state accepts and
//! optional `enter`/`leave` hooks and `data`. The machine tracks the current
//! state, dispatches events, runs hooks, keeps a history for back
//! navigation and notifies a single observer after every transition.
//!
//! # Core Concepts
//!
//! - **Table**: immutable map of states to their definitions
//! - **Machine**: runtime cursor plus the transition protocol
//! - **Guard**: optional gatekeeper that may redirect or withhold a move
//! - **History**: stack of visited states used by `go_to_prev_state`
//! - **Sticky data**: the last `data` declared by any entered state
//!
//! Operations never panic on bad input. Undefined events, unknown states
//! and calls before `init` are reported through `tracing` and leave the
//! machine unchanged.
//!
//! # Example
//!
//! ```rust
//! use uism::builder::{StateBuilder, TableBuilder};
//! use uism::{GuardDecision, Machine};
//! use serde_json::json;
//!
//! let table = TableBuilder::new()
//!     .state("cart", StateBuilder::new().on("CHECKOUT", "payment"))
//!     .state(
//!         "payment",
//!         StateBuilder::new()
//!             .on("PAY", "confirmed")
//!             .data(json!({ "title": "Payment" })),
//!     )
//!     .state("login", StateBuilder::new().on("DONE", "payment"))
//!     .state("confirmed", StateBuilder::new())
//!     .build()
//!     .unwrap();
//!
//! let mut machine = Machine::new(table);
//! machine
//!     .before_each(|to, _from| {
//!         if to == "confirmed" {
//!             GuardDecision::redirect("login")
//!         } else {
//!             GuardDecision::proceed()
//!         }
//!     })
//!     .init_at("cart")
//!     .emit("CHECKOUT", None);
//!
//! assert_eq!(machine.state().unwrap(), "payment");
//! assert_eq!(machine.data(), Some(&json!({ "title": "Payment" })));
//!
//! machine.emit("PAY", None);
//! assert_eq!(machine.state().unwrap(), "login");
//!
//! machine.go_to_prev_state(None);
//! assert_eq!(machine.state().unwrap(), "payment");
//! ```

pub mod builder;
pub mod config;
pub mod core;
pub mod machine;
pub mod table;
pub mod validation;

// Re-export commonly used types
pub use crate::builder::{MachineBuilder, StateBuilder, TableBuilder};
pub use crate::config::MachineConfig;
pub use crate::core::{GuardDecision, StateId};
pub use crate::machine::{FsmError, Machine, Outcome, StateChange};
pub use crate::table::{StateDefinition, TransitionTable};
