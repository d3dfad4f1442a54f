//! Trade opportunities computed between two collections

use super::card::{Card, CardSet, Rarity};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// A matched card inside one set.
///
/// Rarity is kept alongside the id because it is part of the match key;
/// the highlighter needs it to tell apart cards that share an id.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct CardKey {
    pub id: String,
    pub rarity: Rarity,
}

/// Cards available for trade in one direction, deduplicated per set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct OpportunitySet {
    by_set: BTreeMap<CardSet, BTreeSet<CardKey>>,
}

impl OpportunitySet {
    pub fn insert(&mut self, set: CardSet, rarity: Rarity, id: impl Into<String>) {
        self.by_set.entry(set).or_default().insert(CardKey {
            id: id.into(),
            rarity,
        });
    }

    pub fn contains(&self, card: &Card) -> bool {
        self.by_set.get(&card.set).is_some_and(|keys| {
            keys.contains(&CardKey {
                id: card.id.clone(),
                rarity: card.rarity,
            })
        })
    }

    /// Deduplicated card ids for one set
    pub fn card_ids(&self, set: CardSet) -> BTreeSet<&str> {
        self.by_set
            .get(&set)
            .map(|keys| keys.iter().map(|key| key.id.as_str()).collect())
            .unwrap_or_default()
    }

    pub fn sets(&self) -> impl Iterator<Item = CardSet> + '_ {
        self.by_set.keys().copied()
    }

    pub fn cards(&self) -> impl Iterator<Item = Card> + '_ {
        self.by_set.iter().flat_map(|(set, keys)| {
            keys.iter().map(move |key| Card::new(*set, key.rarity, key.id.clone()))
        })
    }

    pub fn len(&self) -> usize {
        self.by_set.values().map(BTreeSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_set.values().all(BTreeSet::is_empty)
    }
}

/// Both directions of a potential trade.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TradingOpportunity {
    /// Their tradable cards that are on my wanted list
    pub their_tradable_i_want: OpportunitySet,
    /// My tradable cards that are on their wanted list
    pub my_tradable_they_want: OpportunitySet,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpportunityCounts {
    pub cards_they_have_that_i_want: usize,
    pub cards_i_have_that_they_want: usize,
}

impl TradingOpportunity {
    pub fn counts(&self) -> OpportunityCounts {
        OpportunityCounts {
            cards_they_have_that_i_want: self.their_tradable_i_want.len(),
            cards_i_have_that_they_want: self.my_tradable_they_want.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.their_tradable_i_want.is_empty() && self.my_tradable_they_want.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_deduplicates_ids() {
        let mut set = OpportunitySet::default();
        set.insert(CardSet::A1, Rarity::Diamond1, "5");
        set.insert(CardSet::A1, Rarity::Diamond1, "5");
        set.insert(CardSet::A1, Rarity::Diamond1, "9");

        assert_eq!(set.len(), 2);
        assert_eq!(set.card_ids(CardSet::A1).into_iter().collect::<Vec<_>>(), vec!["5", "9"]);
        assert!(set.card_ids(CardSet::A2).is_empty());
    }

    #[test]
    fn test_contains_requires_matching_rarity() {
        let mut set = OpportunitySet::default();
        set.insert(CardSet::A2, Rarity::Star1, "12");

        assert!(set.contains(&Card::new(CardSet::A2, Rarity::Star1, "12")));
        assert!(!set.contains(&Card::new(CardSet::A2, Rarity::Diamond1, "12")));
        assert!(!set.contains(&Card::new(CardSet::A1, Rarity::Star1, "12")));
    }
}
