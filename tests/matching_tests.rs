//! Trade matching properties and the reference scenarios

use pretty_assertions::assert_eq;
use ptcgp_trade_tools::models::{
    Card, CardRole, CardSet, Collection, ProfileIdentity, ProfileSnapshot, Rarity,
};
use ptcgp_trade_tools::{analyze_page, analyze_trading_opportunities, find_trades};
use std::collections::BTreeSet;
use test_case::test_case;

fn collection(wanted: &[(CardSet, Rarity, &str)], tradable: &[(CardSet, Rarity, &str)]) -> Collection {
    let mut collection = Collection::default();
    for (set, rarity, id) in wanted {
        collection.add(CardRole::Wanted, Card::new(*set, *rarity, *id));
    }
    for (set, rarity, id) in tradable {
        collection.add(CardRole::Tradable, Card::new(*set, *rarity, *id));
    }
    collection
}

fn ids<'a>(set: impl IntoIterator<Item = &'a str>) -> BTreeSet<&'a str> {
    set.into_iter().collect()
}

#[test]
fn test_they_have_what_i_want() {
    let mine = collection(&[(CardSet::A1, Rarity::Diamond1, "5")], &[]);
    let theirs = collection(
        &[],
        &[(CardSet::A1, Rarity::Diamond1, "5"), (CardSet::A1, Rarity::Diamond1, "9")],
    );

    let result = analyze_trading_opportunities(&mine, &theirs);

    assert_eq!(result.their_tradable_i_want.card_ids(CardSet::A1), ids(["5"]));
    assert_eq!(result.their_tradable_i_want.sets().collect::<Vec<_>>(), vec![CardSet::A1]);
    assert!(result.my_tradable_they_want.is_empty());
}

#[test]
fn test_i_have_what_they_want() {
    let mine = collection(&[], &[(CardSet::A2, Rarity::Star1, "12")]);
    let theirs = collection(&[(CardSet::A2, Rarity::Star1, "12")], &[]);

    let result = analyze_trading_opportunities(&mine, &theirs);

    assert_eq!(result.my_tradable_they_want.card_ids(CardSet::A2), ids(["12"]));
    assert!(result.their_tradable_i_want.is_empty());
}

#[test_case(Rarity::Diamond2 ; "different rarity")]
#[test_case(Rarity::Star1 ; "star versus diamond")]
fn test_rarity_is_part_of_the_key(their_rarity: Rarity) {
    let mine = collection(&[(CardSet::A1, Rarity::Diamond1, "5")], &[]);
    let theirs = collection(&[], &[(CardSet::A1, their_rarity, "5")]);

    assert!(analyze_trading_opportunities(&mine, &theirs).is_empty());
}

#[test]
fn test_set_is_part_of_the_key() {
    let mine = collection(&[(CardSet::A1, Rarity::Diamond1, "5")], &[]);
    let theirs = collection(&[], &[(CardSet::A1a, Rarity::Diamond1, "5")]);

    assert!(analyze_trading_opportunities(&mine, &theirs).is_empty());
}

#[test]
fn test_unrelated_buckets_do_not_change_result() {
    let mine = collection(
        &[(CardSet::A1, Rarity::Diamond1, "5"), (CardSet::A1a, Rarity::Diamond3, "40")],
        &[(CardSet::A2, Rarity::Star1, "12")],
    );
    let theirs = collection(&[], &[(CardSet::A1, Rarity::Diamond1, "5")]);
    let baseline = analyze_trading_opportunities(&mine, &theirs);

    let mut noisy = theirs.clone();
    noisy.add(CardRole::Wanted, Card::new(CardSet::A1, Rarity::Diamond4, "77"));
    noisy.add(CardRole::Wanted, Card::new(CardSet::A1a, Rarity::Diamond2, "3"));
    let with_noise = analyze_trading_opportunities(&mine, &noisy);

    assert_eq!(with_noise.their_tradable_i_want, baseline.their_tradable_i_want);
}

#[test]
fn test_duplicates_collapse() {
    let mine = collection(
        &[(CardSet::A1, Rarity::Diamond1, "5"), (CardSet::A1, Rarity::Diamond1, "5")],
        &[],
    );
    let theirs = collection(
        &[],
        &[(CardSet::A1, Rarity::Diamond1, "5"), (CardSet::A1, Rarity::Diamond1, "5")],
    );

    let result = analyze_trading_opportunities(&mine, &theirs);
    assert_eq!(result.their_tradable_i_want.len(), 1);
    assert_eq!(result.counts().cards_they_have_that_i_want, 1);
}

#[test]
fn test_self_match_is_empty() {
    // Wanted and tradable overlap, so a naive self match would find trades
    let cards = collection(
        &[(CardSet::A1, Rarity::Diamond1, "5")],
        &[(CardSet::A1, Rarity::Diamond1, "5")],
    );
    let me = ProfileSnapshot {
        identity: ProfileIdentity::from_uid("7"),
        collection: cards.clone(),
    };
    let also_me = ProfileSnapshot {
        identity: ProfileIdentity::from_uid("7").with_url(Some("https://ptcgp-tracker.com/u/other".into())),
        collection: cards,
    };

    assert!(find_trades(&me, Some(&also_me)).is_empty());
}

#[test]
fn test_uid_wins_over_url() {
    let cards = collection(&[(CardSet::A1, Rarity::Diamond1, "5")], &[(CardSet::A1, Rarity::Diamond1, "5")]);
    let url = "https://ptcgp-tracker.com/u/shared";
    let me = ProfileSnapshot {
        identity: ProfileIdentity::from_uid("7").with_url(Some(url.into())),
        collection: cards.clone(),
    };
    let someone_else = ProfileSnapshot {
        identity: ProfileIdentity::from_uid("8").with_url(Some(url.into())),
        collection: cards,
    };

    assert!(!find_trades(&me, Some(&someone_else)).is_empty());
}

#[test]
fn test_missing_theirs_is_empty() {
    let me = ProfileSnapshot {
        identity: ProfileIdentity::from_uid("7"),
        collection: collection(&[(CardSet::A1, Rarity::Diamond1, "5")], &[]),
    };
    assert!(find_trades(&me, None).is_empty());
}

#[test]
fn test_analyze_page_against_markup() {
    let html = r#"<html><body><div class="cards-wrapper">
        <div class="tradable"><div class="cards">
          <div class="card" data-rarity="♢"><img src="/sites/default/files/genetic_apex/cards/5.webp"></div>
        </div></div>
    </div></body></html>"#;
    let me = ProfileSnapshot {
        identity: ProfileIdentity::from_url("https://ptcgp-tracker.com/u/me"),
        collection: collection(&[(CardSet::A1, Rarity::Diamond1, "5")], &[]),
    };

    let result = analyze_page(html, Some("https://ptcgp-tracker.com/u/them"), &me);
    assert_eq!(result.their_tradable_i_want.card_ids(CardSet::A1), ids(["5"]));

    let own = analyze_page(html, Some("https://ptcgp-tracker.com/u/me/"), &me);
    assert!(own.is_empty());
}
