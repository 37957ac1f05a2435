//! Deck lists submitted when joining or sideboarding

use serde::{Deserialize, Serialize};

/// A card line in a deck list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeckCardInfo {
    pub card_name: String,
    pub set_code: String,
    pub card_number: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

/// Main deck and sideboard as sent to the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "PascalCase")]
pub struct DeckCardLists {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub cards: Vec<DeckCardInfo>,
    #[serde(default)]
    pub sideboard: Vec<DeckCardInfo>,
}

impl DeckCardLists {
    /// Number of cards in the main deck, counting quantities
    pub fn main_deck_size(&self) -> u32 {
        self.cards.iter().map(|c| c.quantity).sum()
    }

    /// Number of cards in the sideboard, counting quantities
    pub fn sideboard_size(&self) -> u32 {
        self.sideboard.iter().map(|c| c.quantity).sum()
    }
}
