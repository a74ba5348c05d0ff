//! JSONL-backed collaborators.

use std::collections::HashSet;

use async_trait::async_trait;
use tracing::debug;

use super::{EntityType, JsonlReader, StorageConfig, StorageError};
use crate::models::{DeckEntry, DeckId, MatchRecord, NameIndex};
use crate::sources::{NameResolver, RecordSource};

/// Reads the battle log from `battles.jsonl`.
#[derive(Debug, Clone)]
pub struct JsonlRecordSource {
    config: StorageConfig,
}

impl JsonlRecordSource {
    pub fn new(config: StorageConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl RecordSource for JsonlRecordSource {
    fn name(&self) -> &'static str {
        "jsonl"
    }

    async fn fetch_all(&self) -> Result<Vec<MatchRecord>, StorageError> {
        JsonlReader::<MatchRecord>::for_entity(&self.config, EntityType::Battle).read_all()
    }
}

/// Resolves deck names from `decks.jsonl`.
#[derive(Debug, Clone)]
pub struct JsonlNameResolver {
    config: StorageConfig,
}

impl JsonlNameResolver {
    pub fn new(config: StorageConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl NameResolver for JsonlNameResolver {
    fn name(&self) -> &'static str {
        "jsonl"
    }

    async fn resolve(&self, ids: &HashSet<DeckId>) -> Result<NameIndex, StorageError> {
        if ids.is_empty() {
            return Ok(NameIndex::new());
        }

        let decks = JsonlReader::<DeckEntry>::for_entity(&self.config, EntityType::Deck)
            .read_where(|d| ids.contains(&d.id))?;
        debug!("Resolved {} of {} deck ids", decks.len(), ids.len());

        Ok(decks.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_config(temp_dir: &TempDir) -> StorageConfig {
        StorageConfig::new(temp_dir.path().to_path_buf())
    }

    #[tokio::test]
    async fn test_jsonl_record_source_reads_battles() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);
        std::fs::write(
            config.battles_path(),
            concat!(
                r#"{"id":"b-1","date":"2024/05/01","battle_type":"rank_match","rank":"master","group":"none","my_deck_id":"d-1","opponent_deck_id":"d-2","turn":"first","result":"win","season":4}"#,
                "\n",
                r#"{"id":"b-2","date":"2024-05-02","battle_type":"free_match","rank":"none","group":"none","my_deck_id":"d-1","opponent_deck_id":"d-3","turn":"second","result":"lose"}"#,
                "\n",
            ),
        )
        .unwrap();

        let source = JsonlRecordSource::new(config);
        let records = source.fetch_all().await.unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id.as_str(), "b-1");
        assert_eq!(records[0].season, Some(4));
        assert_eq!(records[1].season, None);
    }

    #[tokio::test]
    async fn test_jsonl_record_source_missing_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let source = JsonlRecordSource::new(test_config(&temp_dir));

        assert!(source.fetch_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_jsonl_name_resolver_filters_to_requested_ids() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);
        std::fs::write(
            config.decks_path(),
            concat!(
                r#"{"id":"d-1","name":"Control Portal","class_name":"Portalcraft"}"#,
                "\n",
                r#"{"id":"d-2","name":"Aggro Sword","class_name":"Swordcraft"}"#,
                "\n",
            ),
        )
        .unwrap();

        let resolver = JsonlNameResolver::new(config);
        let ids: HashSet<DeckId> = ["d-2", "d-9"].into_iter().map(DeckId::from).collect();
        let index = resolver.resolve(&ids).await.unwrap();

        assert_eq!(index.len(), 1);
        assert_eq!(index.class_label(&"d-2".into()), "Swordcraft");
        assert_eq!(index.deck_label(&"d-9".into()), "Unknown(d-9)");
    }
}
