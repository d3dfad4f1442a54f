//! Match overlay and visibility filters for card elements
//!
//! Two phases run over the same elements and never touch each other's
//! classes:
//!
//! - the match phase ([`apply_matches`]) runs once per page analysis and
//!   owns the two mark classes;
//! - the filter phase ([`apply_filters`]) runs on every settings change and
//!   owns the three hide classes.
//!
//! Both clear what they own before reapplying, so repeated runs with the
//! same inputs leave the same state.

pub mod board;
pub mod style;

pub use board::{CardAnnotation, CardBoard, CardNode};
pub use style::{page_style, PageStyle, TRADING_STYLESHEET};

use crate::models::{Card, DisplaySettings, TradingOpportunity};
use crate::parser::resolve_card;
use serde::Serialize;
use tracing::debug;

/// Their tradable card that I want
pub const MATCH_THEY_HAVE_CLASS: &str = "trading-match-they-have";
/// My tradable card that they want
pub const MATCH_YOU_HAVE_CLASS: &str = "trading-match-you-have";

pub const HIDDEN_RARITY_CLASS: &str = "trading-hidden-rarity";
pub const HIDDEN_COLLECTION_CLASS: &str = "trading-hidden-collection";
pub const HIDDEN_UNMATCHED_CLASS: &str = "trading-hidden-unmatched";

pub const MARK_CLASSES: [&str; 2] = [MATCH_THEY_HAVE_CLASS, MATCH_YOU_HAVE_CLASS];
pub const FILTER_CLASSES: [&str; 3] = [HIDDEN_RARITY_CLASS, HIDDEN_COLLECTION_CLASS, HIDDEN_UNMATCHED_CLASS];

/// A card element as the highlighter sees it.
///
/// Implemented by [`CardNode`] for parsed pages; a host binding to a live
/// DOM implements it over its own element handles.
pub trait CardElement {
    fn rarity_attr(&self) -> Option<&str>;
    fn image_src(&self) -> Option<&str>;
    fn has_class(&self, class: &str) -> bool;
    fn add_class(&mut self, class: &str);
    fn remove_class(&mut self, class: &str);

    /// Card identity, resolved the same way the extractor does
    fn resolve(&self) -> Option<Card> {
        resolve_card(self.rarity_attr(), self.image_src())
    }

    fn set_class(&mut self, class: &str, present: bool) {
        if present {
            self.add_class(class);
        } else {
            self.remove_class(class);
        }
    }

    fn is_marked(&self) -> bool {
        MARK_CLASSES.iter().any(|class| self.has_class(class))
    }

    fn is_hidden(&self) -> bool {
        FILTER_CLASSES.iter().any(|class| self.has_class(class))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchOutcome {
    pub they_have: usize,
    pub you_have: usize,
    pub unresolved: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOutcome {
    pub visible: usize,
    pub hidden: usize,
}

/// Match phase: clear both marks everywhere, then mark every element whose
/// card is in an opportunity set. The two marks are applied independently.
pub fn apply_matches<E: CardElement>(cards: &mut [E], opportunities: &TradingOpportunity) -> MatchOutcome {
    let mut outcome = MatchOutcome::default();

    for element in cards.iter_mut() {
        for class in MARK_CLASSES {
            element.remove_class(class);
        }

        let Some(card) = element.resolve() else {
            outcome.unresolved += 1;
            continue;
        };

        if opportunities.their_tradable_i_want.contains(&card) {
            element.add_class(MATCH_THEY_HAVE_CLASS);
            outcome.they_have += 1;
        }
        if opportunities.my_tradable_they_want.contains(&card) {
            element.add_class(MATCH_YOU_HAVE_CLASS);
            outcome.you_have += 1;
        }
    }

    debug!(
        they_have = outcome.they_have,
        you_have = outcome.you_have,
        unresolved = outcome.unresolved,
        "match marks applied"
    );
    outcome
}

/// Filter phase: recompute the hide classes from settings and the marks
/// already on each element.
///
/// Rarity and set filters only apply to cards that resolve. "Matched only"
/// hides every card without a mark, except on the user's own profile where
/// it does nothing.
pub fn apply_filters<E: CardElement>(cards: &mut [E], settings: &DisplaySettings, own_profile: bool) -> FilterOutcome {
    let mut outcome = FilterOutcome::default();
    let matched_only = settings.show_matched_only && !own_profile;

    for element in cards.iter_mut() {
        let card = element.resolve();

        let rarity_hidden = card
            .as_ref()
            .is_some_and(|card| !settings.is_rarity_visible(card.rarity));
        let collection_hidden = card
            .as_ref()
            .is_some_and(|card| !settings.is_collection_visible(card.set));
        let unmatched_hidden = matched_only && !element.is_marked();

        element.set_class(HIDDEN_RARITY_CLASS, rarity_hidden);
        element.set_class(HIDDEN_COLLECTION_CLASS, collection_hidden);
        element.set_class(HIDDEN_UNMATCHED_CLASS, unmatched_hidden);

        if element.is_hidden() {
            outcome.hidden += 1;
        } else {
            outcome.visible += 1;
        }
    }

    debug!(visible = outcome.visible, hidden = outcome.hidden, "filters applied");
    outcome
}

/// Filter phase on pages where filters do not apply: drop every hide class.
pub fn clear_filters<E: CardElement>(cards: &mut [E]) -> FilterOutcome {
    for element in cards.iter_mut() {
        for class in FILTER_CLASSES {
            element.remove_class(class);
        }
    }
    FilterOutcome {
        visible: cards.len(),
        hidden: 0,
    }
}
