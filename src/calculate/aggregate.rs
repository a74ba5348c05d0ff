//! Single-pass aggregation of filtered battles into breakdowns.

use std::collections::HashMap;
use std::hash::Hash;

use crate::models::{
    ClassBucket, DeckBucket, DeckId, GameCounts, Group, MatchRecord, NameIndex,
    OpponentDeckBucket, Rank, RankBucket, Turn, TurnBreakdown,
};

/// Running win/loss counter.
#[derive(Debug, Clone, Copy, Default)]
struct Tally {
    wins: u32,
    losses: u32,
}

impl Tally {
    fn record(&mut self, win: bool) {
        if win {
            self.wins += 1;
        } else {
            self.losses += 1;
        }
    }

    fn counts(&self) -> GameCounts {
        GameCounts::new(self.wins, self.losses)
    }
}

/// Grouped tallies that remember the order keys were first seen.
#[derive(Debug)]
struct OrderedTally<K> {
    index: HashMap<K, usize>,
    entries: Vec<(K, Tally)>,
}

impl<K: Eq + Hash + Clone> OrderedTally<K> {
    fn new() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }

    fn record(&mut self, key: K, win: bool) {
        let slot = match self.index.get(&key) {
            Some(&slot) => slot,
            None => {
                self.entries.push((key.clone(), Tally::default()));
                self.index.insert(key, self.entries.len() - 1);
                self.entries.len() - 1
            }
        };
        self.entries[slot].1.record(win);
    }

    /// Most games first; equal totals keep first-seen order.
    fn into_sorted(self) -> Vec<(K, GameCounts)> {
        let mut sorted: Vec<(K, GameCounts)> = self
            .entries
            .into_iter()
            .map(|(key, tally)| (key, tally.counts()))
            .collect();
        // sort_by is stable
        sorted.sort_by(|a, b| b.1.total_games.cmp(&a.1.total_games));
        sorted
    }
}

/// The six breakdowns of one filtered record set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breakdowns {
    pub overall: GameCounts,
    pub by_my_deck: Vec<DeckBucket>,
    pub by_opponent_deck: Vec<OpponentDeckBucket>,
    pub by_opponent_class: Vec<ClassBucket>,
    pub by_rank: Vec<RankBucket>,
    pub by_turn: TurnBreakdown,
}

/// Aggregate `records` in one scan.
///
/// Every record is counted in every breakdown. Ids missing from `names`
/// only change the labels.
pub fn aggregate(records: &[&MatchRecord], names: &NameIndex) -> Breakdowns {
    let mut overall = Tally::default();
    let mut my_decks: OrderedTally<&DeckId> = OrderedTally::new();
    let mut opponent_decks: OrderedTally<&DeckId> = OrderedTally::new();
    let mut opponent_classes: OrderedTally<&str> = OrderedTally::new();
    let mut ranks: OrderedTally<(Rank, Group)> = OrderedTally::new();
    let mut first = Tally::default();
    let mut second = Tally::default();

    for record in records {
        let win = record.is_win();

        overall.record(win);
        my_decks.record(&record.my_deck_id, win);
        opponent_decks.record(&record.opponent_deck_id, win);
        opponent_classes.record(names.class_label(&record.opponent_deck_id), win);
        ranks.record((record.rank, record.group), win);
        match record.turn {
            Turn::First => first.record(win),
            Turn::Second => second.record(win),
        }
    }

    Breakdowns {
        overall: overall.counts(),
        by_my_deck: my_decks
            .into_sorted()
            .into_iter()
            .map(|(id, counts)| DeckBucket {
                deck_id: id.clone(),
                deck_name: names.deck_label(id),
                counts,
            })
            .collect(),
        by_opponent_deck: opponent_decks
            .into_sorted()
            .into_iter()
            .map(|(id, counts)| OpponentDeckBucket {
                deck_id: id.clone(),
                deck_name: names.deck_label(id),
                class_name: names.class_label(id).to_string(),
                counts,
            })
            .collect(),
        by_opponent_class: opponent_classes
            .into_sorted()
            .into_iter()
            .map(|(class_name, counts)| ClassBucket {
                class_name: class_name.to_string(),
                counts,
            })
            .collect(),
        by_rank: ranks
            .into_sorted()
            .into_iter()
            .map(|((rank, group), counts)| RankBucket {
                rank,
                group,
                counts,
            })
            .collect(),
        by_turn: TurnBreakdown {
            first: first.counts(),
            second: second.counts(),
        },
    }
}
