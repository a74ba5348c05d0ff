//! Statistics result models.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use super::{DeckId, Group, Rank};
use crate::calculate::win_rate;

/// A win rate in tenths of a percent (`667` is 66.7%).
///
/// Serializes as a number with one decimal digit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WinRate(u32);

impl WinRate {
    pub const ZERO: WinRate = WinRate(0);

    pub fn from_tenths(tenths: u32) -> Self {
        Self(tenths)
    }

    pub fn tenths(&self) -> u32 {
        self.0
    }

    /// Percentage value, e.g. `66.7`.
    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / 10.0
    }
}

impl fmt::Display for WinRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}%", self.0 / 10, self.0 % 10)
    }
}

impl Serialize for WinRate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_f64())
    }
}

impl<'de> Deserialize<'de> for WinRate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let percent = f64::deserialize(deserializer)?;
        if !(0.0..=100.0).contains(&percent) {
            return Err(serde::de::Error::custom(format!(
                "win rate out of range: {}",
                percent
            )));
        }
        Ok(Self((percent * 10.0).round() as u32))
    }
}

/// Game counts for one bucket. The win rate is derived on construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameCounts {
    pub total_games: u32,
    pub wins: u32,
    pub losses: u32,
    pub win_rate: WinRate,
}

impl GameCounts {
    pub fn new(wins: u32, losses: u32) -> Self {
        let total_games = wins + losses;
        Self {
            total_games,
            wins,
            losses,
            win_rate: win_rate(wins, total_games),
        }
    }
}

/// Per own-deck statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckBucket {
    pub deck_id: DeckId,
    pub deck_name: String,
    #[serde(flatten)]
    pub counts: GameCounts,
}

/// Per opponent-deck statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpponentDeckBucket {
    pub deck_id: DeckId,
    pub deck_name: String,
    pub class_name: String,
    #[serde(flatten)]
    pub counts: GameCounts,
}

/// Per opponent-class statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassBucket {
    pub class_name: String,
    #[serde(flatten)]
    pub counts: GameCounts,
}

/// Per (rank, group) statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankBucket {
    pub rank: Rank,
    pub group: Group,
    #[serde(flatten)]
    pub counts: GameCounts,
}

/// Going first versus going second. Both sides are always present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnBreakdown {
    pub first: GameCounts,
    pub second: GameCounts,
}

/// Resolved window, echoed as the strings that defined it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

/// Full statistics report for one query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatisticsResult {
    pub overall: GameCounts,
    pub by_my_deck: Vec<DeckBucket>,
    pub by_opponent_deck: Vec<OpponentDeckBucket>,
    pub by_opponent_class: Vec<ClassBucket>,
    pub by_rank: Vec<RankBucket>,
    pub by_turn: TurnBreakdown,
    pub date_range: DateRange,
}
