use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::Emotion;

/// An item previously recommended to a user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ShownItem {
    /// The emotion the item was recommended for
    pub emotion: Emotion,
    pub title: String,
    /// Dedup key, unique within a profile
    pub reference_url: String,
}

/// Durable per-user record of emotional history, gratitude entries and shown items
///
/// Every collection is append-only. Fields are private so the only mutations available
/// are the `record_*` methods, which never reorder or remove anything.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    name: String,
    emotional_states: Vec<Emotion>,
    gratitude_entries: Vec<String>,
    shown_items: Vec<ShownItem>,
}

impl UserProfile {
    /// Creates an empty profile for a user seen for the first time
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            emotional_states: Vec::new(),
            gratitude_entries: Vec::new(),
            shown_items: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn emotional_states(&self) -> &[Emotion] {
        &self.emotional_states
    }

    pub fn gratitude_entries(&self) -> &[String] {
        &self.gratitude_entries
    }

    pub fn shown_items(&self) -> &[ShownItem] {
        &self.shown_items
    }

    /// Reference URLs of every item already shown to this user
    pub fn shown_references(&self) -> HashSet<&str> {
        self.shown_items
            .iter()
            .map(|item| item.reference_url.as_str())
            .collect()
    }

    pub fn record_emotion(&mut self, emotion: Emotion) {
        self.emotional_states.push(emotion);
    }

    /// Appends a gratitude entry; blank text is ignored
    pub fn record_gratitude(&mut self, entry: &str) -> bool {
        let entry = entry.trim();
        if entry.is_empty() {
            return false;
        }
        self.gratitude_entries.push(entry.to_string());
        true
    }

    /// Adds an item to the shown set.
    ///
    /// Returns `false` without modifying the profile if the reference URL is already present.
    pub fn record_shown(&mut self, item: ShownItem) -> bool {
        if self
            .shown_items
            .iter()
            .any(|shown| shown.reference_url == item.reference_url)
        {
            return false;
        }
        self.shown_items.push(item);
        true
    }

    /// Checks invariants that the storage format cannot enforce by itself
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("profile name is empty".to_string());
        }

        let mut seen = HashSet::with_capacity(self.shown_items.len());
        for item in &self.shown_items {
            if !seen.insert(item.reference_url.as_str()) {
                return Err(format!(
                    "duplicate referenceUrl '{}' in shownItems",
                    item.reference_url
                ));
            }
        }

        Ok(())
    }
}
