//! Read-only snapshots of server state, safe to send to any player.

use serde::{Deserialize, Serialize};

use crate::domain::cards_types::Card;
use crate::domain::deck::ServerDeck;

/// What every player may know about the deck: sizes, the visible top
/// discard and whether the pile is frozen. Never the card order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientDeck {
    pub main_deck_size: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_discard_card: Option<Card>,
    pub discard_pile_size: usize,
    pub is_frozen: bool,
}

impl ClientDeck {
    pub fn from_deck(deck: &ServerDeck) -> Self {
        Self {
            main_deck_size: deck.main_deck_size(),
            top_discard_card: deck.top_discard(),
            discard_pile_size: deck.discard_pile_size(),
            is_frozen: deck.is_frozen(),
        }
    }
}

/// Public view of one player at the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerPublicInfo {
    pub name: String,
    pub card_count: usize,
    pub is_current_turn: bool,
}
