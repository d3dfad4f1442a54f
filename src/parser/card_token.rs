//! `"<setId> <cardId> <rarityCode>"` tokens from the embedded trading JSON

use crate::models::{Card, CardSet, Rarity};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CardTokenError {
    #[error("expected 3 fields, found {0}")]
    FieldCount(usize),

    #[error("unknown set '{0}'")]
    UnknownSet(String),

    #[error("unknown rarity '{0}'")]
    UnknownRarity(String),
}

pub fn parse_card_token(token: &str) -> Result<Card, CardTokenError> {
    let fields: Vec<&str> = token.split_whitespace().collect();
    let [set, id, rarity] = fields.as_slice() else {
        return Err(CardTokenError::FieldCount(fields.len()));
    };

    let set = CardSet::from_code(set).ok_or_else(|| CardTokenError::UnknownSet(set.to_string()))?;
    let rarity = Rarity::parse(rarity).ok_or_else(|| CardTokenError::UnknownRarity(rarity.to_string()))?;

    Ok(Card::new(set, rarity, *id))
}
