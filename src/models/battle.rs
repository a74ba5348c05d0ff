//! Logged battle model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{BattleId, DeckId};

/// How the battle was matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BattleType {
    RankMatch,
    FreeMatch,
    RoomMatch,
    GrandPrix,
}

impl BattleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BattleType::RankMatch => "rank_match",
            BattleType::FreeMatch => "free_match",
            BattleType::RoomMatch => "room_match",
            BattleType::GrandPrix => "grand_prix",
        }
    }
}

impl fmt::Display for BattleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BattleType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "rank_match" | "rank" => Ok(BattleType::RankMatch),
            "free_match" | "free" => Ok(BattleType::FreeMatch),
            "room_match" | "room" => Ok(BattleType::RoomMatch),
            "grand_prix" | "gp" => Ok(BattleType::GrandPrix),
            other => Err(format!("unknown battle type: {}", other)),
        }
    }
}

/// Ladder rank at the time of the battle. `None` for unranked modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rank {
    None,
    Beginner,
    D,
    C,
    B,
    A,
    #[serde(rename = "aa")]
    AA,
    Master,
    GrandMaster,
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Rank::None => "-",
            Rank::Beginner => "Beginner",
            Rank::D => "D",
            Rank::C => "C",
            Rank::B => "B",
            Rank::A => "A",
            Rank::AA => "AA",
            Rank::Master => "Master",
            Rank::GrandMaster => "Grand Master",
        };
        f.write_str(label)
    }
}

/// Group (tier band) within a rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Group {
    None,
    Emerald,
    Topaz,
    Ruby,
    Sapphire,
    Diamond,
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Group::None => "-",
            Group::Emerald => "Emerald",
            Group::Topaz => "Topaz",
            Group::Ruby => "Ruby",
            Group::Sapphire => "Sapphire",
            Group::Diamond => "Diamond",
        };
        f.write_str(label)
    }
}

/// Whether the player went first or second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Turn {
    First,
    Second,
}

/// Battle outcome. There are no draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BattleResult {
    Win,
    Lose,
}

/// One logged battle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub id: BattleId,

    /// Calendar date as stored. Older entries use `/` instead of `-`.
    pub date: String,

    pub battle_type: BattleType,

    pub rank: Rank,

    pub group: Group,

    pub my_deck_id: DeckId,

    pub opponent_deck_id: DeckId,

    pub turn: Turn,

    pub result: BattleResult,

    #[serde(default)]
    pub season: Option<u32>,
}

impl MatchRecord {
    pub fn is_win(&self) -> bool {
        self.result == BattleResult::Win
    }

    /// The battle date as a calendar value, if the stored string is readable.
    pub fn normalized_date(&self) -> Option<NaiveDate> {
        normalize_date(&self.date)
    }
}

/// Read a `YYYY-MM-DD` or `YYYY/MM/DD` date. Components need not be zero padded.
pub fn normalize_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let format = if raw.contains('/') {
        "%Y/%m/%d"
    } else {
        "%Y-%m-%d"
    };
    NaiveDate::parse_from_str(raw, format).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> &'static str {
        r#"{
            "id": "b-1",
            "date": "2024/05/03",
            "battle_type": "rank_match",
            "rank": "aa",
            "group": "ruby",
            "my_deck_id": "d-1",
            "opponent_deck_id": "d-9",
            "turn": "second",
            "result": "win",
            "season": 3
        }"#
    }

    #[test]
    fn test_normalize_date_separators() {
        let expected = NaiveDate::from_ymd_opt(2024, 5, 3);
        assert_eq!(normalize_date("2024-05-03"), expected);
        assert_eq!(normalize_date("2024/05/03"), expected);
        assert_eq!(normalize_date(" 2024/5/3 "), expected);
    }

    #[test]
    fn test_normalize_date_orders_numerically() {
        // "2024/1/5" > "2024-01-10" as raw strings
        let a = normalize_date("2024/1/5").unwrap();
        let b = normalize_date("2024-01-10").unwrap();
        assert!(a < b);
    }

    #[test]
    fn test_normalize_date_rejects_garbage() {
        assert_eq!(normalize_date(""), None);
        assert_eq!(normalize_date("yesterday"), None);
        assert_eq!(normalize_date("2024/05-03"), None);
        assert_eq!(normalize_date("2024-02-30"), None);
    }

    #[test]
    fn test_match_record_deserialization() {
        let record: MatchRecord = serde_json::from_str(sample_json()).unwrap();

        assert_eq!(record.id.as_str(), "b-1");
        assert_eq!(record.battle_type, BattleType::RankMatch);
        assert_eq!(record.rank, Rank::AA);
        assert_eq!(record.group, Group::Ruby);
        assert_eq!(record.turn, Turn::Second);
        assert!(record.is_win());
        assert_eq!(record.season, Some(3));
        assert_eq!(record.normalized_date(), NaiveDate::from_ymd_opt(2024, 5, 3));
    }

    #[test]
    fn test_match_record_season_optional() {
        let json = r#"{"id":"b-2","date":"2024-05-04","battle_type":"free_match",
            "rank":"none","group":"none","my_deck_id":"d-1","opponent_deck_id":"d-2",
            "turn":"first","result":"lose"}"#;
        let record: MatchRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.season, None);
    }

    #[test]
    fn test_rank_serialization_names() {
        assert_eq!(serde_json::to_string(&Rank::AA).unwrap(), "\"aa\"");
        assert_eq!(
            serde_json::to_string(&Rank::GrandMaster).unwrap(),
            "\"grand_master\""
        );
        assert_eq!(serde_json::to_string(&Rank::None).unwrap(), "\"none\"");
    }

    #[test]
    fn test_rank_and_group_display() {
        assert_eq!(Rank::GrandMaster.to_string(), "Grand Master");
        assert_eq!(Rank::None.to_string(), "-");
        assert_eq!(Group::Sapphire.to_string(), "Sapphire");
    }

    #[test]
    fn test_battle_type_from_str() {
        assert_eq!("rank_match".parse::<BattleType>(), Ok(BattleType::RankMatch));
        assert_eq!("Free-Match".parse::<BattleType>(), Ok(BattleType::FreeMatch));
        assert_eq!("gp".parse::<BattleType>(), Ok(BattleType::GrandPrix));
        assert!("arena".parse::<BattleType>().is_err());
    }
}
