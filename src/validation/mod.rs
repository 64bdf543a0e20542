//! Opt-in structural validation for transition tables.
//!
//! The engine itself never rejects a table up front: a destination missing
//! from the table only surfaces when an event actually targets it. This
//! module lets callers check a table ahead of time, using Stillwater's
//! `Validation` type to report ALL problems in one pass instead of
//! stopping at the first.
//!
//! # Example
//!
//! ```rust
//! use uism::table;
//! use uism::validation::{validate_table, TableViolation};
//! use stillwater::validation::Validation;
//!
//! let table = table! {
//!     "start" => { "GO" => "gone" },
//! };
//!
//! match validate_table(&table, None) {
//!     Validation::Failure(errors) => {
//!         assert!(errors
//!             .iter()
//!             .any(|e| matches!(e, TableViolation::DanglingDestination { .. })));
//!     }
//!     Validation::Success(_) => unreachable!(),
//! }
//! ```

pub mod rules;
pub mod violations;

pub use rules::validate_table;
pub use violations::TableViolation;
