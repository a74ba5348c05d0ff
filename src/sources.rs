//! Collaborators the statistics service reads from.
//!
//! - [`RecordSource`]: the complete stored battle log
//! - [`NameResolver`]: deck display names and classes for a set of ids

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;

use crate::models::{DeckEntry, DeckId, DeckName, MatchRecord, NameIndex};
use crate::storage::StorageError;

/// Supplies every stored battle.
///
/// Implementations must return records in a stable order. Ties in the
/// statistics breakdowns are ordered by first appearance in this sequence.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    async fn fetch_all(&self) -> Result<Vec<MatchRecord>, StorageError>;
}

/// Resolves deck ids to display data in bulk.
///
/// Unknown ids are left out of the returned index.
#[async_trait]
pub trait NameResolver: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    async fn resolve(&self, ids: &HashSet<DeckId>) -> Result<NameIndex, StorageError>;
}

/// A record source over an owned vector.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRecordSource {
    records: Vec<MatchRecord>,
}

impl InMemoryRecordSource {
    pub fn new(records: Vec<MatchRecord>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl RecordSource for InMemoryRecordSource {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn fetch_all(&self) -> Result<Vec<MatchRecord>, StorageError> {
        Ok(self.records.clone())
    }
}

/// A name resolver over an owned deck list.
#[derive(Debug, Clone, Default)]
pub struct InMemoryNameResolver {
    decks: HashMap<DeckId, DeckName>,
}

impl InMemoryNameResolver {
    pub fn new(decks: Vec<DeckEntry>) -> Self {
        let decks = decks
            .into_iter()
            .map(|d| {
                (
                    d.id,
                    DeckName {
                        name: d.name,
                        class_name: d.class_name,
                    },
                )
            })
            .collect();
        Self { decks }
    }
}

#[async_trait]
impl NameResolver for InMemoryNameResolver {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn resolve(&self, ids: &HashSet<DeckId>) -> Result<NameIndex, StorageError> {
        let mut index = NameIndex::new();
        for id in ids {
            if let Some(deck) = self.decks.get(id) {
                index.insert(id.clone(), deck.clone());
            }
        }
        Ok(index)
    }
}
