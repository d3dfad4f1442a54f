//! In-memory card elements built from a parsed page

use super::{CardElement, FILTER_CLASSES, MARK_CLASSES};
use crate::models::{Card, CardRole};
use crate::parser::{card_image_src, card_rarity_attr, ProfilePage};
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

/// One `.card` element: the attributes the highlighter reads and the class
/// list it writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardNode {
    /// Position among the page's `.card` elements, in document order
    pub index: usize,
    pub role: Option<CardRole>,
    rarity: Option<String>,
    image_src: Option<String>,
    classes: BTreeSet<String>,
}

impl CardNode {
    pub fn new(index: usize, rarity: Option<&str>, image_src: Option<&str>) -> Self {
        Self {
            index,
            role: None,
            rarity: rarity.map(str::to_string),
            image_src: image_src.map(str::to_string),
            classes: BTreeSet::from(["card".to_string()]),
        }
    }

    pub fn with_role(mut self, role: CardRole) -> Self {
        self.role = Some(role);
        self
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(String::as_str)
    }

    /// Mark and hide classes currently present, in a stable order
    pub fn managed_classes(&self) -> Vec<&'static str> {
        MARK_CLASSES
            .iter()
            .chain(FILTER_CLASSES.iter())
            .copied()
            .filter(|class| self.classes.contains(*class))
            .collect()
    }
}

impl CardElement for CardNode {
    fn rarity_attr(&self) -> Option<&str> {
        self.rarity.as_deref()
    }

    fn image_src(&self) -> Option<&str> {
        self.image_src.as_deref()
    }

    fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    fn add_class(&mut self, class: &str) {
        self.classes.insert(class.to_string());
    }

    fn remove_class(&mut self, class: &str) {
        self.classes.remove(class);
    }
}

/// What a host needs to mirror one card's state onto its live DOM: remove
/// every managed class from the `index`-th `.card`, then add `classes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardAnnotation {
    pub index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card: Option<Card>,
    pub classes: Vec<&'static str>,
}

/// Every card element of one page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardBoard {
    cards: Vec<CardNode>,
}

impl CardBoard {
    pub fn new(cards: Vec<CardNode>) -> Self {
        Self { cards }
    }

    pub fn from_page(page: &ProfilePage) -> Self {
        let mut roles = HashMap::new();
        for role in CardRole::ALL {
            for element in page.section_cards(role) {
                roles.insert(element.id(), role);
            }
        }

        let cards = page
            .all_cards()
            .enumerate()
            .map(|(index, element)| CardNode {
                index,
                role: roles.get(&element.id()).copied(),
                rarity: card_rarity_attr(element).map(str::to_string),
                image_src: card_image_src(element).map(str::to_string),
                classes: element.value().classes().map(str::to_string).collect(),
            })
            .collect();

        Self { cards }
    }

    pub fn cards(&self) -> &[CardNode] {
        &self.cards
    }

    pub fn cards_mut(&mut self) -> &mut [CardNode] {
        &mut self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn annotations(&self) -> Vec<CardAnnotation> {
        self.cards
            .iter()
            .map(|node| CardAnnotation {
                index: node.index,
                card: node.resolve(),
                classes: node.managed_classes(),
            })
            .collect()
    }
}
