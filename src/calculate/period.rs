//! Effective date window resolution.

use chrono::{Days, FixedOffset, NaiveDate, Offset, Utc};

use super::StatsError;
use crate::models::{normalize_date, DateRange};

/// Default deployment offset (UTC+9).
pub const DEFAULT_UTC_OFFSET_HOURS: i32 = 9;

/// Default look-back when no start date is given.
pub const DEFAULT_WINDOW_DAYS: u32 = 7;

/// The reference calendar used to decide what "today" is.
#[derive(Debug, Clone, Copy)]
pub struct Calendar {
    offset: FixedOffset,
    window_days: u32,
    pinned_today: Option<NaiveDate>,
}

impl Calendar {
    pub fn new(offset: FixedOffset, window_days: u32) -> Self {
        Self {
            offset,
            window_days,
            pinned_today: None,
        }
    }

    /// Build from an hour offset. Returns `None` if the offset is out of range.
    pub fn from_hours(utc_offset_hours: i32, window_days: u32) -> Option<Self> {
        let offset = FixedOffset::east_opt(utc_offset_hours.checked_mul(3600)?)?;
        Some(Self::new(offset, window_days))
    }

    /// Freeze "today" to a fixed date.
    pub fn pinned_to(mut self, today: NaiveDate) -> Self {
        self.pinned_today = Some(today);
        self
    }

    pub fn window_days(&self) -> u32 {
        self.window_days
    }

    pub fn today(&self) -> NaiveDate {
        self.pinned_today
            .unwrap_or_else(|| Utc::now().with_timezone(&self.offset).date_naive())
    }
}

impl Default for Calendar {
    fn default() -> Self {
        let offset = FixedOffset::east_opt(DEFAULT_UTC_OFFSET_HOURS * 3600).unwrap_or(Utc.fix());
        Self::new(offset, DEFAULT_WINDOW_DAYS)
    }
}

/// An inclusive date window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Period {
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// The bounds as supplied, or the rendered defaults.
    pub range: DateRange,
}

impl Period {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Resolve optional bounds into an inclusive window.
///
/// A missing end defaults to today, a missing start to `end - window_days`.
/// Only two explicit bounds can be inconsistent.
pub fn resolve_period(
    start: Option<&str>,
    end: Option<&str>,
    calendar: &Calendar,
) -> Result<Period, StatsError> {
    let invalid = || StatsError::InvalidDateRange {
        start: start.unwrap_or_default().to_string(),
        end: end.unwrap_or_default().to_string(),
    };

    let (end_date, end_str) = match end {
        Some(raw) => (normalize_date(raw).ok_or_else(invalid)?, raw.to_string()),
        None => {
            let today = calendar.today();
            (today, format_date(today))
        }
    };

    let (start_date, start_str) = match start {
        Some(raw) => (normalize_date(raw).ok_or_else(invalid)?, raw.to_string()),
        None => {
            let start = end_date
                .checked_sub_days(Days::new(calendar.window_days.into()))
                .unwrap_or(NaiveDate::MIN);
            (start, format_date(start))
        }
    };

    if start.is_some() && end.is_some() && start_date > end_date {
        return Err(invalid());
    }

    Ok(Period {
        start: start_date,
        end: end_date,
        range: DateRange {
            start: start_str,
            end: end_str,
        },
    })
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
