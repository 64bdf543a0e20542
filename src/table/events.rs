//! Ordered event maps.

use crate::core::StateId;
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use std::fmt;

/// Events a state accepts, each mapped to a single destination.
///
/// Insertion order is kept; it is the order `Machine::events` reports.
/// Re-inserting an event replaces its destination in place.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Events {
    entries: Vec<(String, StateId)>,
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map `event` to `to`, returning the previous destination if any.
    pub fn insert(&mut self, event: impl Into<String>, to: impl Into<StateId>) -> Option<StateId> {
        let event = event.into();
        let to = to.into();
        match self.entries.iter_mut().find(|(name, _)| *name == event) {
            Some((_, existing)) => Some(std::mem::replace(existing, to)),
            None => {
                self.entries.push((event, to));
                None
            }
        }
    }

    /// Destination for `event`, if the state accepts it.
    pub fn get(&self, event: &str) -> Option<&StateId> {
        self.entries
            .iter()
            .find(|(name, _)| name == event)
            .map(|(_, to)| to)
    }

    /// Event names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StateId)> {
        self.entries.iter().map(|(name, to)| (name.as_str(), to))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// Destinations are written either as a bare state name or as `{ "next": name }`.
#[derive(Deserialize)]
#[serde(untagged)]
enum Target {
    Id(StateId),
    Next { next: StateId },
}

impl Target {
    fn into_state(self) -> StateId {
        match self {
            Self::Id(id) | Self::Next { next: id } => id,
        }
    }
}

struct EventsVisitor;

impl<'de> Visitor<'de> for EventsVisitor {
    type Value = Events;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of event names to destination states")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Events, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut events = Events::new();
        while let Some((event, target)) = map.next_entry::<String, Target>()? {
            events.insert(event, target.into_state());
        }
        Ok(events)
    }
}

impl<'de> Deserialize<'de> for Events {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(EventsVisitor)
    }
}
