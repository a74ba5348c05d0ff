//! Record selection by window, battle type and season.

use tracing::debug;

use super::Period;
use crate::models::{BattleType, MatchRecord};

/// Optional narrowing beyond the date window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecordFilter {
    pub battle_type: Option<BattleType>,
    pub season: Option<u32>,
}

impl RecordFilter {
    pub fn matches(&self, record: &MatchRecord) -> bool {
        self.battle_type.map_or(true, |t| record.battle_type == t)
            && self.season.map_or(true, |s| record.season == Some(s))
    }
}

/// Select the records inside `period` that pass `filter`, keeping their order.
///
/// Records with an unreadable date never fall inside a window.
pub fn filter_records<'a>(
    records: &'a [MatchRecord],
    period: &Period,
    filter: &RecordFilter,
) -> Vec<&'a MatchRecord> {
    records
        .iter()
        .filter(|record| match record.normalized_date() {
            Some(date) => period.contains(date),
            None => {
                debug!("Skipping battle {} with unreadable date {:?}", record.id, record.date);
                false
            }
        })
        .filter(|record| filter.matches(record))
        .collect()
}
