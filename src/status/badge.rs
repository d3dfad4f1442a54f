//! Toolbar badge summarizing what the extension did on a tab

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeState {
    /// Not a tracker page
    #[default]
    None,
    /// Tracker page without a trading profile to compare, or the user's own
    Gray,
    /// Trading page, but the user's own data is missing or stale
    Yellow,
    /// Trades were computed and applied
    Green,
}

impl BadgeState {
    pub fn color(&self) -> Option<&'static str> {
        match self {
            BadgeState::None => None,
            BadgeState::Gray => Some("#6B7280"),
            BadgeState::Yellow => Some("#EAB308"),
            BadgeState::Green => Some("#22C55E"),
        }
    }

    pub fn text(&self) -> &'static str {
        match self {
            BadgeState::None => "",
            _ => ".",
        }
    }

    /// Filters only do something on other users' trading profiles
    pub fn filters_apply(&self) -> bool {
        matches!(self, BadgeState::Yellow | BadgeState::Green)
    }
}

impl fmt::Display for BadgeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BadgeState::None => write!(f, "none"),
            BadgeState::Gray => write!(f, "gray"),
            BadgeState::Yellow => write!(f, "yellow"),
            BadgeState::Green => write!(f, "green"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_badge_presentation() {
        assert_eq!(BadgeState::None.text(), "");
        assert_eq!(BadgeState::None.color(), None);
        assert_eq!(BadgeState::Green.text(), ".");
        assert_eq!(BadgeState::Green.color(), Some("#22C55E"));
        assert_eq!(serde_json::to_string(&BadgeState::Yellow).unwrap(), r#""yellow""#);
    }
}
