//! Trade matching between two collections

use crate::models::{CardBuckets, Collection, OpportunitySet, ProfileSnapshot, TradingOpportunity};
use tracing::{debug, info};

/// Compute both trade directions.
///
/// Each direction walks the wanted buckets of one side and keeps the ids
/// that also appear in the other side's tradable bucket of the same set and
/// rarity. The two passes are independent: the first only reads
/// `mine.wanted` and `theirs.tradable`, the second only `theirs.wanted` and
/// `mine.tradable`.
pub fn analyze_trading_opportunities(mine: &Collection, theirs: &Collection) -> TradingOpportunity {
    let opportunities = TradingOpportunity {
        their_tradable_i_want: match_direction(&mine.wanted, &theirs.tradable, "they have / I want"),
        my_tradable_they_want: match_direction(&theirs.wanted, &mine.tradable, "I have / they want"),
    };

    let counts = opportunities.counts();
    info!(
        they_have_i_want = counts.cards_they_have_that_i_want,
        i_have_they_want = counts.cards_i_have_that_they_want,
        "trading analysis complete"
    );

    opportunities
}

fn match_direction(wanted: &CardBuckets, tradable: &CardBuckets, direction: &str) -> OpportunitySet {
    let mut matches = OpportunitySet::default();

    for (set, rarities) in wanted {
        for (rarity, ids) in rarities {
            let candidates: &[String] = tradable
                .get(set)
                .and_then(|tradable_rarities| tradable_rarities.get(rarity))
                .map(Vec::as_slice)
                .unwrap_or(&[]);

            let mut found = 0usize;
            for id in ids.iter().filter(|id| candidates.contains(id)) {
                matches.insert(*set, *rarity, id.clone());
                found += 1;
            }

            if found > 0 {
                debug!(direction, %set, %rarity, found, "matching cards found");
            }
        }
    }

    matches
}

/// Match my profile against the displayed one.
///
/// No displayed profile, or a displayed profile that is my own, gives an
/// empty result without running the matcher.
pub fn find_trades(mine: &ProfileSnapshot, theirs: Option<&ProfileSnapshot>) -> TradingOpportunity {
    let Some(theirs) = theirs else {
        debug!("no trading profile on this page");
        return TradingOpportunity::default();
    };

    if mine.identity.is_same_user(&theirs.identity) {
        debug!("own profile, skipping analysis");
        return TradingOpportunity::default();
    }

    analyze_trading_opportunities(&mine.collection, &theirs.collection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Card, CardRole, CardSet, ProfileIdentity, Rarity};

    fn collection(entries: &[(CardRole, CardSet, Rarity, &str)]) -> Collection {
        let mut collection = Collection::default();
        for (role, set, rarity, id) in entries {
            collection.add(*role, Card::new(*set, *rarity, *id));
        }
        collection
    }

    #[test]
    fn test_rarity_is_part_of_the_key() {
        let mine = collection(&[(CardRole::Wanted, CardSet::A1, Rarity::Diamond1, "5")]);
        let theirs = collection(&[(CardRole::Tradable, CardSet::A1, Rarity::Diamond2, "5")]);

        assert!(analyze_trading_opportunities(&mine, &theirs).is_empty());
    }

    #[test]
    fn test_duplicates_collapse() {
        let mine = collection(&[
            (CardRole::Wanted, CardSet::A1, Rarity::Diamond1, "5"),
            (CardRole::Wanted, CardSet::A1, Rarity::Diamond1, "5"),
        ]);
        let theirs = collection(&[
            (CardRole::Tradable, CardSet::A1, Rarity::Diamond1, "5"),
            (CardRole::Tradable, CardSet::A1, Rarity::Diamond1, "5"),
        ]);

        let result = analyze_trading_opportunities(&mine, &theirs);
        assert_eq!(result.their_tradable_i_want.len(), 1);
    }

    #[test]
    fn test_find_trades_without_their_profile() {
        let mine = ProfileSnapshot {
            identity: ProfileIdentity::from_uid("1"),
            collection: collection(&[(CardRole::Wanted, CardSet::A1, Rarity::Diamond1, "5")]),
        };
        assert!(find_trades(&mine, None).is_empty());
    }
}
