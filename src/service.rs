//! Statistics orchestration.
//!
//! Fetches the battle log and deck names once each, then hands the
//! materialized data to the synchronous engine in [`crate::calculate`].

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Instant;

use thiserror::Error;
use tracing::{debug, info};

use crate::calculate::{
    filter_records, referenced_deck_ids, summarize, Calendar, StatisticsQuery, StatsError,
};
use crate::models::StatisticsResult;
use crate::sources::{NameResolver, RecordSource};
use crate::storage::StorageError;

/// Errors surfaced to callers of the service.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Stats(#[from] StatsError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl ServiceError {
    /// Whether the caller sent a bad query. Such errors are not worth retrying.
    pub fn is_client_error(&self) -> bool {
        matches!(self, ServiceError::Stats(StatsError::InvalidDateRange { .. }))
    }
}

/// Computes statistics reports over the configured collaborators.
#[derive(Clone)]
pub struct StatisticsService {
    records: Arc<dyn RecordSource>,
    names: Arc<dyn NameResolver>,
    calendar: Calendar,
}

impl StatisticsService {
    pub fn new(
        records: Arc<dyn RecordSource>,
        names: Arc<dyn NameResolver>,
        calendar: Calendar,
    ) -> Self {
        Self {
            records,
            names,
            calendar,
        }
    }

    /// Build the report for `query`.
    ///
    /// The query is validated before any collaborator is called.
    pub async fn statistics(
        &self,
        query: &StatisticsQuery,
    ) -> Result<StatisticsResult, ServiceError> {
        let started = Instant::now();
        let period = query.period(&self.calendar)?;

        let records = self.records.fetch_all().await?;
        let selected = filter_records(&records, &period, &query.filter());
        debug!(
            "Selected {} of {} battles from {} between {} and {}",
            selected.len(),
            records.len(),
            self.records.name(),
            period.start,
            period.end
        );

        let ids = referenced_deck_ids(&selected);
        let names = self.names.resolve(&ids).await?;
        if names.len() < ids.len() {
            debug!(
                "{} of {} deck ids unresolved by {}",
                ids.len() - names.len(),
                ids.len(),
                self.names.name()
            );
        }

        let result = summarize(&selected, &names, &period);
        info!(
            "Statistics for {}..{}: {} games, {} win rate ({:?})",
            result.date_range.start,
            result.date_range.end,
            result.overall.total_games,
            result.overall.win_rate,
            started.elapsed()
        );

        Ok(result)
    }

    /// Distinct seasons present in the battle log, ascending.
    pub async fn seasons(&self) -> Result<Vec<u32>, ServiceError> {
        let records = self.records.fetch_all().await?;
        let seasons: BTreeSet<u32> = records.iter().filter_map(|r| r.season).collect();
        Ok(seasons.into_iter().collect())
    }
}
