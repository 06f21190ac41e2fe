use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::slot::Slot;

/// Mapping from grid slot to event label.
///
/// Iteration follows grid order. Writes go through
/// [`crate::service::schedule_service::ScheduleService`], which enforces the
/// occupancy rules; this type only stores.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schedule {
    events: BTreeMap<Slot, String>,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: Slot) -> Option<&str> {
        self.events.get(&slot).map(String::as_str)
    }

    pub fn is_occupied(&self, slot: Slot) -> bool {
        self.events.contains_key(&slot)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Slot, &str)> {
        self.events.iter().map(|(slot, label)| (*slot, label.as_str()))
    }

    /// First slot, in grid order, whose label contains `query` ignoring case.
    pub fn find_by_label_substring(&self, query: &str) -> Option<Slot> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }
        self.iter()
            .find(|(_, label)| label.to_lowercase().contains(&needle))
            .map(|(slot, _)| slot)
    }

    /// True when `slot` holds a label containing `query` ignoring case.
    pub fn label_at_contains(&self, slot: Slot, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        self.get(slot)
            .is_some_and(|label| label.to_lowercase().contains(&needle))
    }

    pub(crate) fn insert(&mut self, slot: Slot, label: String) -> Option<String> {
        self.events.insert(slot, label)
    }

    pub(crate) fn remove(&mut self, slot: Slot) -> Option<String> {
        self.events.remove(&slot)
    }

    pub(crate) fn clear(&mut self) -> usize {
        let count = self.events.len();
        self.events.clear();
        count
    }
}

impl FromIterator<(Slot, String)> for Schedule {
    fn from_iter<T: IntoIterator<Item = (Slot, String)>>(iter: T) -> Self {
        Self {
            events: iter.into_iter().collect(),
        }
    }
}
