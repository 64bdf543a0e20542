//! State identifiers.
//!
//! States are named by opaque strings. `StateId` wraps the name so it can't
//! be confused with an event name at API boundaries, while still borrowing
//! as `str` for table lookups.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Name of a state in a transition table.
///
/// # Example
///
/// ```rust
/// use uism::core::StateId;
///
/// let id = StateId::from("checkout");
/// assert_eq!(id.as_str(), "checkout");
/// assert_eq!(id, "checkout");
/// assert_eq!(id.to_string(), "checkout");
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateId(String);

impl StateId {
    /// Create a state identifier from any string-like name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Borrow the underlying name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StateId {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for StateId {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl From<&StateId> for StateId {
    fn from(id: &StateId) -> Self {
        id.clone()
    }
}

impl Borrow<str> for StateId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for StateId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for StateId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for StateId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn state_id_compares_with_str() {
        let id = StateId::new("start");
        assert_eq!(id, "start");
        assert_ne!(id, "next");
        assert_eq!(&id, &StateId::from("start"));
    }

    #[test]
    fn state_id_borrows_for_map_lookup() {
        let mut states = HashMap::new();
        states.insert(StateId::from("start"), 1);

        assert_eq!(states.get("start"), Some(&1));
        assert_eq!(states.get("missing"), None);
    }

    #[test]
    fn state_id_displays_its_name() {
        assert_eq!(format!("{}", StateId::from("review")), "review");
    }

    #[test]
    fn state_id_serializes_as_plain_string() {
        let id = StateId::from("done");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"done\"");

        let back: StateId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
