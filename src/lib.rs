//! # Battle Tracker
//!
//! A personal trading card game battle log with win/loss analytics.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (battles, decks, statistics reports)
//! - **calculate**: Period resolution, filtering and the aggregation engine
//! - **sources**: Record source and name resolver collaborator traits
//! - **storage**: JSONL data directory access
//! - **service**: Async orchestration over the collaborators
//! - **config**: Configuration loading and validation

pub mod calculate;
pub mod config;
pub mod models;
pub mod service;
pub mod sources;
pub mod storage;

pub use models::*;
