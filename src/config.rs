//! Runtime options for a machine.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Options that change how a machine matches events and keeps history.
///
/// # Example
///
/// ```rust
/// use uism::MachineConfig;
///
/// let config: MachineConfig =
///     serde_json::from_str(r#"{ "normalize_events": true, "max_history": 20 }"#).unwrap();
///
/// assert!(config.normalize_events);
/// assert_eq!(config.max_history, Some(20));
/// assert_eq!(config.event_key("submit"), "SUBMIT");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    /// Upper-case emitted event names before looking them up, so
    /// `emit("submit")` matches an `on` entry declared as `SUBMIT`.
    pub normalize_events: bool,

    /// Keep at most this many entries on the history stack.
    pub max_history: Option<usize>,
}

impl MachineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn normalize_events(mut self, normalize: bool) -> Self {
        self.normalize_events = normalize;
        self
    }

    pub fn max_history(mut self, limit: usize) -> Self {
        self.max_history = Some(limit);
        self
    }

    /// The name an emitted event is looked up under.
    pub fn event_key<'a>(&self, event: &'a str) -> Cow<'a, str> {
        if self.normalize_events {
            Cow::Owned(event.to_uppercase())
        } else {
            Cow::Borrowed(event)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_events_exactly() {
        let config = MachineConfig::default();
        assert!(!config.normalize_events);
        assert!(config.max_history.is_none());
        assert_eq!(config.event_key("submit"), "submit");
    }

    #[test]
    fn normalization_uppercases_event_names() {
        let config = MachineConfig::new().normalize_events(true);
        assert_eq!(config.event_key("Success"), "SUCCESS");
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: MachineConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, MachineConfig::default());
    }

    #[test]
    fn config_roundtrips_through_json() {
        let config = MachineConfig::new().max_history(5);
        let json = serde_json::to_string(&config).unwrap();
        let back: MachineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
