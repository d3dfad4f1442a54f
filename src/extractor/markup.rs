//! Extraction from visible card markup and image URLs

use super::CollectionExtractor;
use crate::models::{CardRole, Collection, PageSnapshot, ProfileIdentity, ProfileSnapshot, UserInfo};
use crate::parser::{card_image_src, card_rarity_attr, resolve_card, ProfilePage};
use chrono::Utc;
use tracing::debug;

const IN_GAME_NAME_LABEL: &str = "In game name:";
const FRIEND_ID_LABEL: &str = "Friend ID:";

/// Reads the `.cards-wrapper .wanted` / `.tradable` card grids.
///
/// The markup only describes the profile being displayed, so the snapshot
/// never has a viewer; its identity is the page URL.
pub struct MarkupExtractor;

impl MarkupExtractor {
    fn user_info(page: &ProfilePage) -> UserInfo {
        let defaults = UserInfo::default();
        UserInfo {
            in_game_name: page.labelled_value(IN_GAME_NAME_LABEL).unwrap_or(defaults.in_game_name),
            friend_id: page.labelled_value(FRIEND_ID_LABEL).unwrap_or(defaults.friend_id),
        }
    }

    fn collection(page: &ProfilePage) -> Collection {
        let mut collection = Collection::new(Utc::now());
        collection.user_info = Self::user_info(page);

        for role in CardRole::ALL {
            let mut skipped = 0usize;
            for element in page.section_cards(role) {
                match resolve_card(card_rarity_attr(element), card_image_src(element)) {
                    Some(card) => collection.add(role, card),
                    None => {
                        skipped += 1;
                        debug!(
                            %role,
                            rarity = ?card_rarity_attr(element),
                            src = ?card_image_src(element),
                            "skipping unresolvable card"
                        );
                    }
                }
            }
            if skipped > 0 {
                debug!(%role, skipped, "cards skipped during markup extraction");
            }
        }

        collection
    }
}

impl CollectionExtractor for MarkupExtractor {
    fn name(&self) -> &'static str {
        "markup"
    }

    fn probe(&self, page: &ProfilePage) -> bool {
        page.has_sections()
    }

    fn extract(&self, page: &ProfilePage) -> PageSnapshot {
        if !page.has_sections() {
            return PageSnapshot::default();
        }

        let identity = ProfileIdentity {
            uid: None,
            profile_url: page.url().map(str::to_string),
        };

        PageSnapshot {
            viewed: Some(ProfileSnapshot {
                identity,
                collection: Self::collection(page),
            }),
            viewer: None,
        }
    }
}
