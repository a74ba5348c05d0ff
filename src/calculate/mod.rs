//! Statistics calculation engine.
//!
//! Turns already-fetched battles into a win/loss report:
//! - Period resolution with a default look-back window
//! - Date, battle type and season filtering
//! - Overall, per deck, per opponent deck and class, per rank and per turn breakdowns
//!
//! Everything here is synchronous and free of I/O.

mod aggregate;
mod filter;
mod period;

pub use aggregate::*;
pub use filter::*;
pub use period::*;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{BattleType, DateRange, DeckId, MatchRecord, NameIndex, StatisticsResult, WinRate};

/// Errors raised by the statistics engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatsError {
    #[error("Invalid date range: start {start:?}, end {end:?}")]
    InvalidDateRange { start: String, end: String },
}

/// Requested window and filters. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatisticsQuery {
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub battle_type: Option<BattleType>,
    #[serde(default)]
    pub season: Option<u32>,
}

impl StatisticsQuery {
    pub fn period(&self, calendar: &Calendar) -> Result<Period, StatsError> {
        resolve_period(
            self.start_date.as_deref(),
            self.end_date.as_deref(),
            calendar,
        )
    }

    pub fn filter(&self) -> RecordFilter {
        RecordFilter {
            battle_type: self.battle_type,
            season: self.season,
        }
    }
}

/// Win rate in percent, one decimal, rounded half away from zero.
pub fn win_rate(wins: u32, total: u32) -> WinRate {
    if total == 0 {
        return WinRate::ZERO;
    }
    let wins = u64::from(wins);
    let total = u64::from(total);
    // round(wins / total * 1000) in integers
    let tenths = (2000 * wins + total) / (2 * total);
    WinRate::from_tenths(tenths as u32)
}

/// Distinct deck ids (own and opponent) referenced by `records`.
pub fn referenced_deck_ids(records: &[&MatchRecord]) -> HashSet<DeckId> {
    records
        .iter()
        .flat_map(|r| [r.my_deck_id.clone(), r.opponent_deck_id.clone()])
        .collect()
}

/// Merge breakdowns and the resolved window into the final report.
pub fn assemble(breakdowns: Breakdowns, date_range: DateRange) -> StatisticsResult {
    let Breakdowns {
        overall,
        by_my_deck,
        by_opponent_deck,
        by_opponent_class,
        by_rank,
        by_turn,
    } = breakdowns;

    StatisticsResult {
        overall,
        by_my_deck,
        by_opponent_deck,
        by_opponent_class,
        by_rank,
        by_turn,
        date_range,
    }
}

/// Aggregate already-filtered records and attach the window.
pub fn summarize(records: &[&MatchRecord], names: &NameIndex, period: &Period) -> StatisticsResult {
    assemble(aggregate(records, names), period.range.clone())
}

/// Compute the full report for `query` over `records`.
pub fn compute_statistics(
    records: &[MatchRecord],
    query: &StatisticsQuery,
    names: &NameIndex,
    calendar: &Calendar,
) -> Result<StatisticsResult, StatsError> {
    let period = query.period(calendar)?;
    let selected = filter_records(records, &period, &query.filter());
    Ok(summarize(&selected, names, &period))
}
