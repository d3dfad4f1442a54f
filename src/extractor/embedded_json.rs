//! Extraction from the trading payload embedded in `drupal-settings-json`

use super::CollectionExtractor;
use crate::models::{
    CardRole, Collection, PageSnapshot, ProfileIdentity, ProfileSnapshot, TradingCards, TradingData,
    TradingProfile, UserInfo,
};
use crate::parser::{parse_card_token, ProfilePage};
use chrono::Utc;
use tracing::{debug, warn};

/// Key of the trading payload inside the Drupal settings object
pub const TRADING_PAYLOAD_KEY: &str = "ptcgp_trading";

/// Reads `{ ptcgp_trading: { profile, viewed_profile? } }`.
///
/// `profile` is the logged-in user, `viewed_profile` the page owner.
pub struct EmbeddedJsonExtractor;

/// Decode the trading payload; malformed or missing JSON reads as no data
pub fn trading_data(page: &ProfilePage) -> Option<TradingData> {
    let script = page.settings_script()?;
    let mut settings: serde_json::Value = match serde_json::from_str(&script) {
        Ok(value) => value,
        Err(err) => {
            warn!(error = %err, "drupal settings script is not valid JSON");
            return None;
        }
    };

    let payload = settings.get_mut(TRADING_PAYLOAD_KEY)?.take();
    if payload.is_null() {
        return None;
    }

    match serde_json::from_value(payload) {
        Ok(data) => Some(data),
        Err(err) => {
            warn!(error = %err, "unrecognized trading payload");
            None
        }
    }
}

fn add_tokens(collection: &mut Collection, role: CardRole, cards: &TradingCards) {
    for (rarity_key, tokens) in cards {
        for token in tokens {
            match parse_card_token(token) {
                Ok(card) => {
                    if card.rarity.code() != rarity_key {
                        debug!(%token, %rarity_key, "token rarity differs from its bucket");
                    }
                    collection.add(role, card);
                }
                Err(err) => debug!(%token, error = %err, "skipping card token"),
            }
        }
    }
}

/// Normalize one trading profile into a snapshot
pub fn profile_snapshot(profile: &TradingProfile, profile_url: Option<&str>) -> ProfileSnapshot {
    let mut collection = Collection::new(Utc::now());
    let defaults = UserInfo::default();
    collection.user_info = UserInfo {
        in_game_name: non_empty(&profile.user.game_name).unwrap_or(defaults.in_game_name),
        friend_id: non_empty(&profile.user.friend_id).unwrap_or(defaults.friend_id),
    };

    add_tokens(&mut collection, CardRole::Wanted, &profile.wanted_cards);
    add_tokens(&mut collection, CardRole::Tradable, &profile.tradable_cards);

    let identity = ProfileIdentity {
        uid: non_empty(&profile.user.uid),
        profile_url: profile_url.map(str::to_string),
    };

    ProfileSnapshot { identity, collection }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

impl CollectionExtractor for EmbeddedJsonExtractor {
    fn name(&self) -> &'static str {
        "embedded-json"
    }

    fn probe(&self, page: &ProfilePage) -> bool {
        page.settings_script()
            .is_some_and(|script| script.contains(TRADING_PAYLOAD_KEY))
    }

    fn extract(&self, page: &ProfilePage) -> PageSnapshot {
        let Some(data) = trading_data(page) else {
            return PageSnapshot::default();
        };

        PageSnapshot {
            viewer: Some(profile_snapshot(&data.profile, None)),
            viewed: data
                .viewed_profile
                .as_ref()
                .map(|viewed| profile_snapshot(viewed, page.url())),
        }
    }
}
