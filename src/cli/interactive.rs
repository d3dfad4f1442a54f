//! Interactive settings editor, the terminal stand-in for the popup

use crate::models::{CardSet, DisplaySettings, Rarity};
use anyhow::Result;
use colored::*;
use dialoguer::{theme::ColorfulTheme, Confirm, MultiSelect, Select};

/// Edit display settings until the user saves or cancels. Cancelling
/// returns the settings unchanged.
pub fn edit_settings(original: DisplaySettings) -> Result<DisplaySettings> {
    let theme = ColorfulTheme::default();
    let mut settings = original.clone();

    loop {
        println!();
        let options = [
            format!("Trade overlay: {}", on_off(settings.show_trade_overlay)),
            format!("Show matched cards only: {}", on_off(settings.show_matched_only)),
            "Rarity filters".to_string(),
            "Set filters".to_string(),
            "Reset to defaults".to_string(),
            "💾 Save".to_string(),
            "❌ Cancel".to_string(),
        ];

        let selection = Select::with_theme(&theme)
            .with_prompt("Trading settings")
            .items(&options)
            .default(0)
            .interact()?;

        match selection {
            0 => settings.show_trade_overlay = !settings.show_trade_overlay,
            1 => settings.show_matched_only = !settings.show_matched_only,
            2 => {
                let labels: Vec<String> = Rarity::ALL
                    .iter()
                    .map(|rarity| format!("{} {}", rarity.symbol(), rarity.label()))
                    .collect();
                let checked: Vec<bool> = Rarity::ALL
                    .iter()
                    .map(|rarity| settings.is_rarity_visible(*rarity))
                    .collect();
                let visible = MultiSelect::with_theme(&theme)
                    .with_prompt("Visible rarities")
                    .items(&labels)
                    .defaults(&checked)
                    .interact()?;
                for (index, rarity) in Rarity::ALL.into_iter().enumerate() {
                    settings.set_rarity_visible(rarity, visible.contains(&index));
                }
            }
            3 => {
                let labels: Vec<String> = CardSet::ALL
                    .iter()
                    .map(|set| format!("{} {}", set.code(), set.name()))
                    .collect();
                let checked: Vec<bool> = CardSet::ALL
                    .iter()
                    .map(|set| settings.is_collection_visible(*set))
                    .collect();
                let visible = MultiSelect::with_theme(&theme)
                    .with_prompt("Visible sets")
                    .items(&labels)
                    .defaults(&checked)
                    .interact()?;
                for (index, set) in CardSet::ALL.into_iter().enumerate() {
                    settings.set_collection_visible(set, visible.contains(&index));
                }
            }
            4 => {
                let confirmed = Confirm::with_theme(&theme)
                    .with_prompt("Reset all filters to their defaults?")
                    .default(false)
                    .interact()?;
                if confirmed {
                    settings.reset();
                }
            }
            5 => {
                println!("{}", "Settings saved.".green());
                return Ok(settings);
            }
            6 => {
                println!("{}", "No changes made.".dimmed());
                return Ok(original);
            }
            _ => unreachable!(),
        }
    }
}

fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "on"
    } else {
        "off"
    }
}
