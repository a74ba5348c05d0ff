//! Deck master data and the per-request name lookup built from it.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::DeckId;

/// Label used for a class that could not be resolved.
pub const UNKNOWN_CLASS: &str = "Unknown";

/// A deck master entry as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckEntry {
    pub id: DeckId,
    pub name: String,
    pub class_name: String,
}

/// Display data for one deck.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckName {
    pub name: String,
    pub class_name: String,
}

/// Read-only deck id → display data lookup.
///
/// Decks that were removed from the master list are simply absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NameIndex {
    entries: HashMap<DeckId, DeckName>,
}

impl NameIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: DeckId, name: DeckName) {
        self.entries.insert(id, name);
    }

    pub fn get(&self, id: &DeckId) -> Option<&DeckName> {
        self.entries.get(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Deck display name, or `Unknown(<id>)`.
    pub fn deck_label(&self, id: &DeckId) -> String {
        match self.entries.get(id) {
            Some(deck) => deck.name.clone(),
            None => format!("Unknown({})", id),
        }
    }

    /// Class of the deck, or `Unknown`.
    pub fn class_label(&self, id: &DeckId) -> &str {
        self.entries
            .get(id)
            .map(|deck| deck.class_name.as_str())
            .unwrap_or(UNKNOWN_CLASS)
    }
}

impl FromIterator<DeckEntry> for NameIndex {
    fn from_iter<I: IntoIterator<Item = DeckEntry>>(iter: I) -> Self {
        let entries = iter
            .into_iter()
            .map(|e| {
                (
                    e.id,
                    DeckName {
                        name: e.name,
                        class_name: e.class_name,
                    },
                )
            })
            .collect();
        Self { entries }
    }
}
