//! Report generation

use crate::models::{Collection, OpportunitySet, Rarity, Stats, TradingOpportunity};
use crate::status::SetupStatus;

pub fn generate_markdown_report(
    opportunities: &TradingOpportunity,
    mine: Option<&Collection>,
    theirs: Option<&Collection>,
) -> String {
    let mut report = String::new();

    report.push_str("# Trade Opportunities Report\n\n");

    // Summary
    let counts = opportunities.counts();
    report.push_str("## Summary\n\n");
    if let Some(theirs) = theirs {
        report.push_str(&format!(
            "- **Trader**: {} (Friend ID: {})\n",
            theirs.user_info.in_game_name, theirs.user_info.friend_id
        ));
    }
    report.push_str(&format!(
        "- **Cards they have that you want**: {}\n",
        counts.cards_they_have_that_i_want
    ));
    report.push_str(&format!(
        "- **Cards you have that they want**: {}\n\n",
        counts.cards_i_have_that_they_want
    ));

    if opportunities.is_empty() {
        report.push_str("No trade opportunities found.\n\n");
    } else {
        push_opportunity_section(&mut report, "## They Have, You Want", &opportunities.their_tradable_i_want);
        push_opportunity_section(&mut report, "## You Have, They Want", &opportunities.my_tradable_they_want);
    }

    if let Some(mine) = mine {
        report.push_str("## Your Collection\n\n");
        report.push_str(&format!("- **Last updated**: {}\n\n", mine.last_update.format("%Y-%m-%d %H:%M UTC")));
        push_stats_table(&mut report, &mine.stats.wanted, &mine.stats.tradable);
    }

    report
}

/// The popup's "My Profile" panel as plain text
pub fn collection_summary(collection: &Collection, setup: Option<&SetupStatus>) -> String {
    let mut summary = String::new();
    summary.push_str(&format!(
        "{} (Friend ID: {})\n",
        collection.user_info.in_game_name, collection.user_info.friend_id
    ));
    summary.push_str(&format!(
        "Wanted: {}  Tradable: {}\n",
        collection.stats.wanted.total, collection.stats.tradable.total
    ));
    for rarity in Rarity::ALL {
        let wanted = collection.stats.wanted.by_rarity.get(&rarity).copied().unwrap_or(0);
        let tradable = collection.stats.tradable.by_rarity.get(&rarity).copied().unwrap_or(0);
        summary.push_str(&format!(
            "  {:<5} {:<11} wanted {:>3}  tradable {:>3}\n",
            rarity.symbol(),
            rarity.label(),
            wanted,
            tradable
        ));
    }
    if let Some(reason) = setup.and_then(|status| status.reason.as_deref()) {
        summary.push_str(&format!("! {reason}\n"));
    }
    summary
}

fn push_opportunity_section(report: &mut String, heading: &str, set: &OpportunitySet) {
    if set.is_empty() {
        return;
    }
    report.push_str(heading);
    report.push_str("\n\n");
    for card_set in set.sets() {
        report.push_str(&format!("### {} ({})\n\n", card_set.name(), card_set.code()));
        for card in set.cards().filter(|card| card.set == card_set) {
            report.push_str(&format!("- #{} {} {}\n", card.id, card.rarity.symbol(), card.rarity.label()));
        }
        report.push('\n');
    }
}

fn push_stats_table(report: &mut String, wanted: &Stats, tradable: &Stats) {
    report.push_str("| Rarity | Wanted | Tradable |\n");
    report.push_str("|---|---|---|\n");
    for rarity in Rarity::ALL {
        report.push_str(&format!(
            "| {} {} | {} | {} |\n",
            rarity.symbol(),
            rarity.label(),
            wanted.by_rarity.get(&rarity).copied().unwrap_or(0),
            tradable.by_rarity.get(&rarity).copied().unwrap_or(0)
        ));
    }
    report.push_str(&format!("| **Total** | {} | {} |\n\n", wanted.total, tradable.total));
}
