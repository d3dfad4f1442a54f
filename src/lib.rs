//! PTCGP Trade Tools
//!
//! The core of a browser extension for ptcgp-tracker.com: extracts the
//! wanted and tradable card lists from profile pages, finds mutually
//! beneficial trades between two collections and marks the matching cards.
//! Display settings drive an overlay and visibility filters on top.

pub mod config;
pub mod content;
pub mod error;
pub mod extractor;
pub mod highlighter;
pub mod matcher;
pub mod messaging;
pub mod models;
pub mod parser;
pub mod report;
pub mod status;
pub mod storage;
pub mod utils;

#[cfg(feature = "cli")]
pub mod cli;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use config::ToolsConfig;
pub use content::{AnalysisSummary, ContentSession};
pub use error::{Result, TradeToolsError};
pub use extractor::{extract_collection, extract_page};
pub use matcher::{analyze_trading_opportunities, find_trades};
pub use models::{Card, CardSet, Collection, DisplaySettings, Rarity, TradingOpportunity};
pub use parser::ProfilePage;

/// Extract a page and match it against `mine` in one call.
///
/// Returns an empty result when the page has no displayed profile or shows
/// the same user.
pub fn analyze_page(html: &str, url: Option<&str>, mine: &models::ProfileSnapshot) -> TradingOpportunity {
    let page = ProfilePage::parse(html, url);
    let snapshot = extract_page(&page);
    find_trades(mine, snapshot.viewed.as_ref())
}
