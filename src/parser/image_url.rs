//! Card image URL parsing
//!
//! Card art is served from `.../files/<setFolder>/cards/<cardId>.webp`; the
//! set folder and numeric id are the only identity the markup exposes besides
//! the rarity attribute.

use crate::models::CardSet;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // <setFolder>/cards/<digits>.webp at the end of the path, query/fragment allowed
    static ref CARD_IMAGE_PATTERN: Regex = Regex::new(
        r"(?:^|/)([^/?#]+)/cards/(\d+)\.webp(?:[?#].*)?$"
    ).unwrap();
}

/// Raw pieces of a card image URL, before the folder lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardImageRef<'a> {
    pub set_folder: &'a str,
    pub card_id: &'a str,
}

pub fn parse_card_image(src: &str) -> Option<CardImageRef<'_>> {
    let caps = CARD_IMAGE_PATTERN.captures(src.trim())?;
    Some(CardImageRef {
        set_folder: caps.get(1)?.as_str(),
        card_id: caps.get(2)?.as_str(),
    })
}

/// Set and id from an image URL; `None` for unknown folders
pub fn resolve_card_image(src: &str) -> Option<(CardSet, String)> {
    let image = parse_card_image(src)?;
    let set = CardSet::from_folder(image.set_folder)?;
    Some((set, image.card_id.to_string()))
}
