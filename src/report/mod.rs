//! Report generation

pub mod generator;

pub use generator::collection_summary;

use crate::models::{Collection, TradingOpportunity};

pub fn generate_report(
    opportunities: &TradingOpportunity,
    mine: Option<&Collection>,
    theirs: Option<&Collection>,
) -> String {
    generator::generate_markdown_report(opportunities, mine, theirs)
}
