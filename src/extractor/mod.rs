//! Collection extraction strategies
//!
//! The tracker's page format is outside our control, so each supported
//! shape gets its own extractor and the first one whose probe matches wins.

pub mod embedded_json;
pub mod markup;

pub use embedded_json::{trading_data, EmbeddedJsonExtractor};
pub use markup::MarkupExtractor;

use crate::models::{Collection, PageSnapshot};
use crate::parser::ProfilePage;
use tracing::debug;

pub trait CollectionExtractor {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Cheap check that the page carries this extractor's source
    fn probe(&self, page: &ProfilePage) -> bool;

    /// Read the page. Missing data yields an empty snapshot, never an error.
    fn extract(&self, page: &ProfilePage) -> PageSnapshot;
}

/// Probe order: the embedded payload is richer (uids, viewer) than markup
static EXTRACTORS: &[&(dyn CollectionExtractor + Sync)] = &[&EmbeddedJsonExtractor, &MarkupExtractor];

/// First extractor whose probe matches, markup as the fallback
pub fn select_extractor(page: &ProfilePage) -> &'static (dyn CollectionExtractor + Sync) {
    EXTRACTORS
        .iter()
        .copied()
        .find(|extractor| extractor.probe(page))
        .unwrap_or(&MarkupExtractor)
}

/// Run the matching extractors in probe order; the first non-empty snapshot
/// wins. A page whose payload is broken still gets its markup read.
pub fn extract_page(page: &ProfilePage) -> PageSnapshot {
    for extractor in EXTRACTORS.iter().filter(|extractor| extractor.probe(page)) {
        let snapshot = extractor.extract(page);
        if snapshot.is_empty() {
            debug!(extractor = extractor.name(), "extractor matched but found nothing");
            continue;
        }
        debug!(
            extractor = extractor.name(),
            viewed = snapshot.viewed.is_some(),
            viewer = snapshot.viewer.is_some(),
            "page extracted"
        );
        return snapshot;
    }
    PageSnapshot::default()
}

/// The displayed profile's collection, falling back to the viewer's, then
/// to an empty collection
pub fn extract_collection(page: &ProfilePage) -> Collection {
    let snapshot = extract_page(page);
    snapshot
        .viewed
        .or(snapshot.viewer)
        .map(|profile| profile.collection)
        .unwrap_or_default()
}
