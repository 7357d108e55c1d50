//! Core card-related types: Card, Rank, CardColor, CardType.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Canasta rank set. Joker sorts below Two so hands group wilds first.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum Rank {
    Joker,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    /// Ranks that can form a normal meld (Four through Ace).
    pub const MELDABLE: [Rank; 11] = [
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum CardColor {
    Red,
    Black,
}

/// Behavioral class of a card, derived from (rank, color).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum CardType {
    /// Normal meldable cards (4..10, J, Q, K, A).
    Natural,
    /// Jokers and Twos; substitute in any rank meld.
    Wild,
    /// Bonus-scoring card, never held in hand.
    RedThree,
    /// Freezes the discard pile when discarded.
    BlackThree,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub color: CardColor,
}

impl Card {
    pub fn new(rank: Rank, color: CardColor) -> Self {
        Self { rank, color }
    }

    /// Behavioral class, a pure function of (rank, color).
    pub fn card_type(self) -> CardType {
        match (self.rank, self.color) {
            (Rank::Joker | Rank::Two, _) => CardType::Wild,
            (Rank::Three, CardColor::Red) => CardType::RedThree,
            (Rank::Three, CardColor::Black) => CardType::BlackThree,
            _ => CardType::Natural,
        }
    }

    /// Point value of this card when counted in a meld or as hand penalty.
    pub fn points(self) -> i32 {
        match self.card_type() {
            CardType::RedThree => 100,
            CardType::Wild => {
                if self.rank == Rank::Joker {
                    50
                } else {
                    20
                }
            }
            CardType::BlackThree => 5,
            CardType::Natural => match self.rank {
                Rank::Ace => 20,
                r if r >= Rank::Eight => 10,
                _ => 5,
            },
        }
    }
}

// Note: Ord on Card is only for stable hand sorting: rank order then color.
// Do not use it for any rule comparison.
impl Ord for Card {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        match self.rank.cmp(&other.rank) {
            std::cmp::Ordering::Equal => self.color.cmp(&other.color),
            ord => ord,
        }
    }
}

impl PartialOrd for Card {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} {:?}", self.color, self.rank)
    }
}
