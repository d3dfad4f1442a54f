//! Display settings chosen in the popup

use super::card::{CardSet, Rarity};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Overlay and visibility filters applied to trading pages.
///
/// Stored under `tradingSettings`. A rarity or set missing from the toggle
/// maps counts as visible, so settings saved before a new set was added
/// keep showing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DisplaySettings {
    pub show_trade_overlay: bool,
    pub show_matched_only: bool,
    #[serde(rename = "rarityToggles")]
    pub rarity_visible: BTreeMap<Rarity, bool>,
    #[serde(rename = "collectionToggles")]
    pub collection_visible: BTreeMap<CardSet, bool>,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            show_trade_overlay: true,
            show_matched_only: false,
            rarity_visible: Rarity::ALL.into_iter().map(|r| (r, true)).collect(),
            collection_visible: CardSet::ALL.into_iter().map(|s| (s, true)).collect(),
        }
    }
}

impl DisplaySettings {
    pub fn is_rarity_visible(&self, rarity: Rarity) -> bool {
        self.rarity_visible.get(&rarity).copied().unwrap_or(true)
    }

    pub fn is_collection_visible(&self, set: CardSet) -> bool {
        self.collection_visible.get(&set).copied().unwrap_or(true)
    }

    pub fn set_rarity_visible(&mut self, rarity: Rarity, visible: bool) {
        self.rarity_visible.insert(rarity, visible);
    }

    pub fn set_collection_visible(&mut self, set: CardSet, visible: bool) {
        self.collection_visible.insert(set, visible);
    }

    pub fn toggle_rarity(&mut self, rarity: Rarity) {
        let visible = self.is_rarity_visible(rarity);
        self.set_rarity_visible(rarity, !visible);
    }

    pub fn toggle_collection(&mut self, set: CardSet) {
        let visible = self.is_collection_visible(set);
        self.set_collection_visible(set, !visible);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_show_everything() {
        let settings = DisplaySettings::default();
        assert!(settings.show_trade_overlay);
        assert!(!settings.show_matched_only);
        assert!(Rarity::ALL.iter().all(|r| settings.is_rarity_visible(*r)));
        assert!(CardSet::ALL.iter().all(|s| settings.is_collection_visible(*s)));
    }

    #[test]
    fn test_parses_popup_storage_shape() {
        let json = r#"{
            "showTradeOverlay": false,
            "showMatchedOnly": true,
            "rarityToggles": { "diamond1": false, "star1": true },
            "collectionToggles": { "A1a": false }
        }"#;
        let settings: DisplaySettings = serde_json::from_str(json).unwrap();

        assert!(!settings.show_trade_overlay);
        assert!(settings.show_matched_only);
        assert!(!settings.is_rarity_visible(Rarity::Diamond1));
        assert!(settings.is_rarity_visible(Rarity::Diamond2));
        assert!(!settings.is_collection_visible(CardSet::A1a));
        assert!(settings.is_collection_visible(CardSet::A2));
    }

    #[test]
    fn test_partial_object_falls_back_to_defaults() {
        let settings: DisplaySettings = serde_json::from_str(r#"{"showMatchedOnly": true}"#).unwrap();
        assert!(settings.show_trade_overlay);
        assert!(settings.show_matched_only);
    }

    #[test]
    fn test_toggle_and_reset() {
        let mut settings = DisplaySettings::default();
        settings.toggle_rarity(Rarity::Star1);
        settings.toggle_collection(CardSet::A2);
        assert!(!settings.is_rarity_visible(Rarity::Star1));
        assert!(!settings.is_collection_visible(CardSet::A2));

        settings.reset();
        assert_eq!(settings, DisplaySettings::default());
    }
}
