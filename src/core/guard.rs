//! Guards consulted before a transition commits.
//!
//! A guard sees the candidate destination and the state being left and
//! decides whether the move happens, optionally redirecting it to another
//! state. The decision is returned as a value rather than through a
//! continuation, so a guard can never leave a transition half-pending.

use super::state::StateId;
use std::fmt;

/// Outcome of consulting a guard.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum GuardDecision {
    /// Commit the transition. A `Some` redirect replaces the destination
    /// when it names a state in the table; otherwise the original
    /// destination stands.
    Proceed(Option<StateId>),

    /// Withhold the transition. Nothing changes.
    Abort,
}

impl GuardDecision {
    /// Proceed to the originally mapped destination.
    pub fn proceed() -> Self {
        Self::Proceed(None)
    }

    /// Proceed, but commit to `state` instead.
    pub fn redirect(state: impl Into<StateId>) -> Self {
        Self::Proceed(Some(state.into()))
    }

    /// Withhold the transition.
    pub fn abort() -> Self {
        Self::Abort
    }

    /// Whether this decision lets a transition commit.
    pub fn is_proceed(&self) -> bool {
        matches!(self, Self::Proceed(_))
    }
}

/// Decision function consulted with `(to, from)` before every forward and
/// backward transition.
///
/// # Example
///
/// ```rust
/// use uism::core::{Guard, GuardDecision, StateId};
///
/// let mut guard = Guard::new(|to: &StateId, _from: &StateId| {
///     if to == "admin" {
///         GuardDecision::redirect("login")
///     } else {
///         GuardDecision::proceed()
///     }
/// });
///
/// let decision = guard.check(&StateId::from("admin"), &StateId::from("home"));
/// assert_eq!(decision, GuardDecision::redirect("login"));
/// ```
pub struct Guard {
    decide: Box<dyn FnMut(&StateId, &StateId) -> GuardDecision + Send>,
}

impl Guard {
    /// Wrap a decision function.
    ///
    /// The function may keep its own state between calls (`FnMut`), which
    /// is how guards count attempts or remember an authenticated session.
    pub fn new<F>(decide: F) -> Self
    where
        F: FnMut(&StateId, &StateId) -> GuardDecision + Send + 'static,
    {
        Guard {
            decide: Box::new(decide),
        }
    }

    /// Ask the guard about moving from `from` to `to`.
    pub fn check(&mut self, to: &StateId, from: &StateId) -> GuardDecision {
        (self.decide)(to, from)
    }
}

impl fmt::Debug for Guard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Guard").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(name: &str) -> StateId {
        StateId::from(name)
    }

    #[test]
    fn guard_receives_to_then_from() {
        let mut guard = Guard::new(|to: &StateId, from: &StateId| {
            if to == "next" && from == "start" {
                GuardDecision::proceed()
            } else {
                GuardDecision::abort()
            }
        });

        assert_eq!(guard.check(&id("next"), &id("start")), GuardDecision::proceed());
        assert_eq!(guard.check(&id("start"), &id("next")), GuardDecision::Abort);
    }

    #[test]
    fn guard_can_redirect() {
        let mut guard = Guard::new(|_: &StateId, _: &StateId| GuardDecision::redirect("other"));

        assert_eq!(
            guard.check(&id("next"), &id("start")),
            GuardDecision::Proceed(Some(id("other")))
        );
    }

    #[test]
    fn guard_keeps_state_between_calls() {
        let mut calls = 0;
        let mut guard = Guard::new(move |_: &StateId, _: &StateId| {
            calls += 1;
            if calls > 1 {
                GuardDecision::proceed()
            } else {
                GuardDecision::abort()
            }
        });

        assert!(!guard.check(&id("b"), &id("a")).is_proceed());
        assert!(guard.check(&id("b"), &id("a")).is_proceed());
    }

    #[test]
    fn decision_helpers_build_expected_variants() {
        assert_eq!(GuardDecision::proceed(), GuardDecision::Proceed(None));
        assert_eq!(GuardDecision::abort(), GuardDecision::Abort);
        assert!(GuardDecision::redirect("x").is_proceed());
    }
}
