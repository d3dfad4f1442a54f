//! Trading payload embedded by the tracker in `drupal-settings-json`

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradingUser {
    #[serde(default)]
    pub friend_id: String,
    #[serde(default)]
    pub game_name: String,
    #[serde(default)]
    pub uid: String,
    #[serde(default)]
    pub uuid: String,
}

/// Rarity code -> `"<setId> <cardId> <rarityCode>"` tokens
pub type TradingCards = BTreeMap<String, Vec<String>>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradingProfile {
    #[serde(default, deserialize_with = "cards_by_rarity")]
    pub tradable_cards: TradingCards,
    #[serde(default, deserialize_with = "cards_by_rarity")]
    pub wanted_cards: TradingCards,
    #[serde(default)]
    pub user: TradingUser,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradingData {
    pub profile: TradingProfile,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viewed_profile: Option<TradingProfile>,
}

/// The tracker serializes an empty card map as `[]` and a missing rarity
/// as `null`; both read as "no cards".
fn cards_by_rarity<'de, D>(deserializer: D) -> Result<TradingCards, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawCards {
        Map(BTreeMap<String, Option<Vec<String>>>),
        List(Vec<serde_json::Value>),
        Null(()),
    }

    Ok(match RawCards::deserialize(deserializer)? {
        RawCards::Map(map) => map
            .into_iter()
            .filter_map(|(rarity, tokens)| tokens.map(|tokens| (rarity, tokens)))
            .collect(),
        RawCards::List(_) | RawCards::Null(()) => TradingCards::new(),
    })
}
