//! Parsing of tracker pages: card image URLs, JSON card tokens, page markup

pub mod card_token;
pub mod image_url;
pub mod page;

pub use card_token::{parse_card_token, CardTokenError};
pub use image_url::{parse_card_image, resolve_card_image, CardImageRef};
pub use page::{card_image_src, card_rarity_attr, ProfilePage};

use crate::models::{Card, Rarity};

/// Resolve a card element from its rarity attribute and image URL.
///
/// Shared by the extractor and the highlighter so both agree on which
/// elements are which card. `None` when either piece is missing or unknown.
pub fn resolve_card(rarity_attr: Option<&str>, image_src: Option<&str>) -> Option<Card> {
    let rarity = Rarity::parse(rarity_attr?)?;
    let (set, id) = resolve_card_image(image_src?)?;
    Some(Card::new(set, rarity, id))
}
