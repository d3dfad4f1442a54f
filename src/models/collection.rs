//! Wanted / tradable card lists keyed by set and rarity

use super::card::{Card, CardRole, CardSet, Rarity};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Card ids of one set, per rarity. Order is page order; duplicates allowed.
pub type RarityBuckets = BTreeMap<Rarity, Vec<String>>;

/// `set -> rarity -> ids`
pub type CardBuckets = BTreeMap<CardSet, RarityBuckets>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub in_game_name: String,
    pub friend_id: String,
}

impl Default for UserInfo {
    fn default() -> Self {
        Self {
            in_game_name: "Unknown".to_string(),
            friend_id: "Unknown".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total: usize,
    pub by_rarity: BTreeMap<Rarity, usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionStats {
    pub wanted: Stats,
    pub tradable: Stats,
}

/// One user's trading lists.
///
/// A `(set, rarity)` bucket is either absent or non-empty; [`Collection::add`]
/// is the only way cards get in, so the invariant holds for anything built
/// in this crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    #[serde(default)]
    pub wanted: CardBuckets,

    #[serde(default)]
    pub tradable: CardBuckets,

    #[serde(with = "chrono::serde::ts_milliseconds", default = "Utc::now")]
    pub last_update: DateTime<Utc>,

    #[serde(default)]
    pub user_info: UserInfo,

    #[serde(default)]
    pub stats: CollectionStats,
}

impl Default for Collection {
    fn default() -> Self {
        Self::new(Utc::now())
    }
}

impl Collection {
    pub fn new(last_update: DateTime<Utc>) -> Self {
        Self {
            wanted: CardBuckets::new(),
            tradable: CardBuckets::new(),
            last_update,
            user_info: UserInfo::default(),
            stats: CollectionStats::default(),
        }
    }

    pub fn buckets(&self, role: CardRole) -> &CardBuckets {
        match role {
            CardRole::Wanted => &self.wanted,
            CardRole::Tradable => &self.tradable,
        }
    }

    fn buckets_mut(&mut self, role: CardRole) -> &mut CardBuckets {
        match role {
            CardRole::Wanted => &mut self.wanted,
            CardRole::Tradable => &mut self.tradable,
        }
    }

    /// Append a card to its bucket and keep the stats in step
    pub fn add(&mut self, role: CardRole, card: Card) {
        self.buckets_mut(role)
            .entry(card.set)
            .or_default()
            .entry(card.rarity)
            .or_default()
            .push(card.id);

        let stats = match role {
            CardRole::Wanted => &mut self.stats.wanted,
            CardRole::Tradable => &mut self.stats.tradable,
        };
        stats.total += 1;
        *stats.by_rarity.entry(card.rarity).or_insert(0) += 1;
    }

    /// Ids in one bucket; an absent bucket reads as empty
    pub fn bucket(&self, role: CardRole, set: CardSet, rarity: Rarity) -> &[String] {
        self.buckets(role)
            .get(&set)
            .and_then(|rarities| rarities.get(&rarity))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn contains(&self, role: CardRole, card: &Card) -> bool {
        self.bucket(role, card.set, card.rarity).contains(&card.id)
    }

    pub fn cards(&self, role: CardRole) -> impl Iterator<Item = Card> + '_ {
        self.buckets(role).iter().flat_map(|(set, rarities)| {
            rarities.iter().flat_map(move |(rarity, ids)| {
                ids.iter().map(move |id| Card::new(*set, *rarity, id.clone()))
            })
        })
    }

    pub fn is_empty(&self) -> bool {
        self.wanted.values().all(|r| r.values().all(Vec::is_empty))
            && self.tradable.values().all(|r| r.values().all(Vec::is_empty))
    }

    /// Rebuild `stats` from the buckets. Stored collections go through this
    /// on load, so stats written by older versions never leak through.
    pub fn recompute_stats(&mut self) {
        self.stats = CollectionStats {
            wanted: compute_stats(&self.wanted),
            tradable: compute_stats(&self.tradable),
        };
    }
}

/// Fold over every populated bucket
pub fn compute_stats(buckets: &CardBuckets) -> Stats {
    buckets
        .values()
        .flat_map(|rarities| rarities.iter())
        .fold(Stats::default(), |mut stats, (rarity, ids)| {
            if !ids.is_empty() {
                stats.total += ids.len();
                *stats.by_rarity.entry(*rarity).or_insert(0) += ids.len();
            }
            stats
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> Collection {
        let mut collection = Collection::default();
        collection.add(CardRole::Wanted, Card::new(CardSet::A1, Rarity::Diamond1, "5"));
        collection.add(CardRole::Wanted, Card::new(CardSet::A1, Rarity::Diamond1, "5"));
        collection.add(CardRole::Wanted, Card::new(CardSet::A2, Rarity::Star1, "12"));
        collection.add(CardRole::Tradable, Card::new(CardSet::A1a, Rarity::Diamond3, "40"));
        collection
    }

    #[test]
    fn test_add_keeps_stats_in_step_with_fold() {
        let collection = sample();
        let mut recomputed = collection.clone();
        recomputed.recompute_stats();

        assert_eq!(collection.stats, recomputed.stats);
        assert_eq!(collection.stats.wanted.total, 3);
        assert_eq!(collection.stats.wanted.by_rarity[&Rarity::Diamond1], 2);
        assert_eq!(collection.stats.tradable.total, 1);
    }

    #[test]
    fn test_absent_bucket_reads_empty() {
        let collection = sample();
        assert!(collection.bucket(CardRole::Tradable, CardSet::A2, Rarity::Star1).is_empty());
        assert_eq!(
            collection.bucket(CardRole::Wanted, CardSet::A1, Rarity::Diamond1),
            &["5".to_string(), "5".to_string()]
        );
    }

    #[test]
    fn test_wire_format_uses_camel_case_and_millis() {
        let mut collection = sample();
        collection.last_update = DateTime::from_timestamp_millis(1_700_000_000_123).unwrap();
        let value = serde_json::to_value(&collection).unwrap();

        assert_eq!(value["lastUpdate"], 1_700_000_000_123i64);
        assert_eq!(value["wanted"]["A1"]["diamond1"][0], "5");
        assert_eq!(value["userInfo"]["inGameName"], "Unknown");
        assert_eq!(value["stats"]["wanted"]["byRarity"]["star1"], 1);

        let back: Collection = serde_json::from_value(value).unwrap();
        assert_eq!(back, collection);
    }

    #[test]
    fn test_is_empty() {
        assert!(Collection::default().is_empty());
        assert!(!sample().is_empty());
    }
}
