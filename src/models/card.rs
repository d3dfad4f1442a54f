//! Card identity: expansion sets, rarity tiers and the card triple

use serde::{Deserialize, Serialize};
use std::fmt;

/// Expansion sets the tracker currently offers for trading.
///
/// The tracker publishes card images under a per-set folder
/// (`/files/genetic_apex/cards/12.webp`) while its embedded JSON uses the
/// short set code (`A1 12 diamond1`). Both map onto this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CardSet {
    A1,
    A1a,
    A2,
}

impl CardSet {
    pub const ALL: [CardSet; 3] = [CardSet::A1, CardSet::A1a, CardSet::A2];

    pub fn code(&self) -> &'static str {
        match self {
            CardSet::A1 => "A1",
            CardSet::A1a => "A1a",
            CardSet::A2 => "A2",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CardSet::A1 => "Genetic Apex",
            CardSet::A1a => "Mythical Island",
            CardSet::A2 => "Space Time Smackdown",
        }
    }

    /// Image folder used by the tracker's CDN paths
    pub fn folder(&self) -> &'static str {
        match self {
            CardSet::A1 => "genetic_apex",
            CardSet::A1a => "mythical_island",
            CardSet::A2 => "space_time_smackdown",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|set| set.code() == code)
    }

    pub fn from_folder(folder: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|set| set.folder() == folder)
    }
}

impl fmt::Display for CardSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Rarity tiers that take part in trading.
///
/// `diamond1..star1` is the canonical vocabulary. Page markup carries the
/// symbolic form (`♢`, `☆`) in its `data-rarity` attribute; it is translated
/// here and nowhere else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Diamond1,
    Diamond2,
    Diamond3,
    Diamond4,
    Star1,
}

impl Rarity {
    pub const ALL: [Rarity; 5] = [
        Rarity::Diamond1,
        Rarity::Diamond2,
        Rarity::Diamond3,
        Rarity::Diamond4,
        Rarity::Star1,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Rarity::Diamond1 => "diamond1",
            Rarity::Diamond2 => "diamond2",
            Rarity::Diamond3 => "diamond3",
            Rarity::Diamond4 => "diamond4",
            Rarity::Star1 => "star1",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Rarity::Diamond1 => "♢",
            Rarity::Diamond2 => "♢♢",
            Rarity::Diamond3 => "♢♢♢",
            Rarity::Diamond4 => "♢♢♢♢",
            Rarity::Star1 => "☆",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Rarity::Diamond1 => "Common",
            Rarity::Diamond2 => "Uncommon",
            Rarity::Diamond3 => "Rare",
            Rarity::Diamond4 => "Ultra Rare",
            Rarity::Star1 => "Special",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|rarity| rarity.code() == code)
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|rarity| rarity.symbol() == symbol)
    }

    /// Accept either vocabulary, surrounding whitespace ignored
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::from_code(value).or_else(|| Self::from_symbol(value))
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// One card, identified by the `(set, rarity, id)` triple.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    #[serde(rename = "setId")]
    pub set: CardSet,
    pub rarity: Rarity,
    pub id: String,
}

impl Card {
    pub fn new(set: CardSet, rarity: Rarity, id: impl Into<String>) -> Self {
        Self {
            set,
            rarity,
            id: id.into(),
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.set, self.id, self.rarity)
    }
}

/// The two roles a card can hold in a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardRole {
    Wanted,
    Tradable,
}

impl CardRole {
    pub const ALL: [CardRole; 2] = [CardRole::Wanted, CardRole::Tradable];
}

impl fmt::Display for CardRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardRole::Wanted => write!(f, "wanted"),
            CardRole::Tradable => write!(f, "tradable"),
        }
    }
}
