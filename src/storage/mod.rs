//! Filesystem data directory access.
//!
//! Battles and deck master data live as JSONL files under one data directory.
//! This layer only reads; writing records belongs to whatever logs them.

mod jsonl;
mod source;

pub use jsonl::*;
pub use source::*;

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration for storage paths.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl StorageConfig {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn path_for(&self, entity: EntityType) -> PathBuf {
        self.data_dir.join(entity.filename())
    }

    pub fn battles_path(&self) -> PathBuf {
        self.path_for(EntityType::Battle)
    }

    pub fn decks_path(&self) -> PathBuf {
        self.path_for(EntityType::Deck)
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(PathBuf::from("./data"))
    }
}
