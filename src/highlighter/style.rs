//! Page-level styling: the injected stylesheet plus per-settings root state

use crate::models::DisplaySettings;
use serde::Serialize;

/// Set on the document root while the trade overlay is switched off.
/// Marks stay on the cards; only their styling is suppressed.
pub const OVERLAY_OFF_CLASS: &str = "trading-overlay-off";

pub const THEY_HAVE_COLOR_PROPERTY: &str = "--trading-overlay-they-have";
pub const YOU_HAVE_COLOR_PROPERTY: &str = "--trading-overlay-you-have";

const THEY_HAVE_COLOR: &str = "gold";
const YOU_HAVE_COLOR: &str = "#4CAF50";
const OVERLAY_HIDDEN_COLOR: &str = "transparent";

/// Injected once per page as `<style id="trading-highlight-styles">`
pub const TRADING_STYLESHEET_ID: &str = "trading-highlight-styles";

pub const TRADING_STYLESHEET: &str = r#"
:root {
  --trading-overlay-they-have: gold;
  --trading-overlay-you-have: #4CAF50;
}
.card.trading-match-they-have {
  border: 2px solid var(--trading-overlay-they-have) !important;
  box-shadow: 0 0 5px var(--trading-overlay-they-have) !important;
  transition: all 0.2s ease-in-out;
}
.card.trading-match-you-have {
  border: 2px solid var(--trading-overlay-you-have) !important;
  box-shadow: 0 0 5px var(--trading-overlay-you-have) !important;
  transition: all 0.2s ease-in-out;
}
.trading-overlay-off .card.trading-match-they-have,
.trading-overlay-off .card.trading-match-you-have {
  border-color: transparent !important;
  box-shadow: none !important;
}
.card.trading-hidden-rarity,
.card.trading-hidden-collection,
.card.trading-hidden-unmatched {
  display: none !important;
}
"#;

/// Root classes and custom properties the host applies to
/// `document.documentElement`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageStyle {
    pub root_classes: Vec<&'static str>,
    pub custom_properties: Vec<(&'static str, &'static str)>,
}

pub fn page_style(settings: &DisplaySettings) -> PageStyle {
    if settings.show_trade_overlay {
        PageStyle {
            root_classes: Vec::new(),
            custom_properties: vec![
                (THEY_HAVE_COLOR_PROPERTY, THEY_HAVE_COLOR),
                (YOU_HAVE_COLOR_PROPERTY, YOU_HAVE_COLOR),
            ],
        }
    } else {
        PageStyle {
            root_classes: vec![OVERLAY_OFF_CLASS],
            custom_properties: vec![
                (THEY_HAVE_COLOR_PROPERTY, OVERLAY_HIDDEN_COLOR),
                (YOU_HAVE_COLOR_PROPERTY, OVERLAY_HIDDEN_COLOR),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay_toggle_only_changes_root_state() {
        let mut settings = DisplaySettings::default();
        let on = page_style(&settings);
        assert!(on.root_classes.is_empty());
        assert!(on.custom_properties.contains(&(THEY_HAVE_COLOR_PROPERTY, "gold")));

        settings.show_trade_overlay = false;
        let off = page_style(&settings);
        assert_eq!(off.root_classes, vec![OVERLAY_OFF_CLASS]);
        assert!(off.custom_properties.iter().all(|(_, value)| *value == "transparent"));
    }

    #[test]
    fn test_stylesheet_covers_every_managed_class() {
        for class in crate::highlighter::MARK_CLASSES
            .iter()
            .chain(crate::highlighter::FILTER_CLASSES.iter())
        {
            assert!(TRADING_STYLESHEET.contains(class), "missing rule for {class}");
        }
        assert!(TRADING_STYLESHEET.contains(OVERLAY_OFF_CLASS));
    }
}
