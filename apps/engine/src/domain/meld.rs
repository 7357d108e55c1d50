//! Meld types: rank melds, the red-three meld, and the black-three meld.
//!
//! The three kinds form a closed set, so they are modeled as one tagged
//! union (`Meld`) over three concrete structs. Validation (`check_*`) is
//! separate from application (`initialize`/`add_cards`): application
//! asserts that validation already passed — feeding it unchecked input is
//! a caller bug, not a recoverable error.

use serde::{Deserialize, Serialize};

use crate::domain::cards_types::{Card, CardType, Rank};
use crate::errors::domain::{DomainError, ValidationKind};

/// Bonus for a canasta containing no wild cards.
pub const NATURAL_CANASTA_BONUS: i32 = 500;
/// Bonus for a canasta containing at least one wild card.
pub const MIXED_CANASTA_BONUS: i32 = 300;
/// A rank meld becomes a canasta at this card count.
pub const CANASTA_SIZE: usize = 7;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum CanastaType {
    Natural,
    Mixed,
}

/// Pre-addition state of a rank meld, kept for one level of undo.
#[derive(Debug, Clone)]
struct RankMeldSnapshot {
    natural_cards: Vec<Card>,
    wild_cards: Vec<Card>,
}

/// A meld of one natural rank (Four..Ace) plus wild cards.
#[derive(Debug, Clone)]
pub struct RankMeld {
    rank: Rank,
    natural_cards: Vec<Card>,
    wild_cards: Vec<Card>,
    initialized: bool,
    points: i32,
    pending_revert: Option<RankMeldSnapshot>,
}

impl RankMeld {
    pub fn new(rank: Rank) -> Self {
        debug_assert!(rank >= Rank::Four, "rank melds cover Four..Ace only");
        Self {
            rank,
            natural_cards: Vec::new(),
            wild_cards: Vec::new(),
            initialized: false,
            points: 0,
            pending_revert: None,
        }
    }

    pub fn rank(&self) -> Rank {
        self.rank
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Pure validation of an initialization card set.
    pub fn check_initialization(&self, cards: &[Card]) -> Result<(), DomainError> {
        if self.initialized {
            return Err(DomainError::validation(
                ValidationKind::MeldAlreadyInitialized,
                format!("meld of rank {:?} is already initialized", self.rank),
            ));
        }
        if cards.len() < 3 {
            return Err(DomainError::validation(
                ValidationKind::TooFewCards,
                "a meld must contain at least 3 cards",
            ));
        }
        let mut naturals = 0usize;
        let mut wilds = 0usize;
        for card in cards {
            match card.card_type() {
                CardType::Wild => wilds += 1,
                CardType::Natural if card.rank == self.rank => naturals += 1,
                _ => {
                    return Err(DomainError::validation(
                        ValidationKind::WrongCardForMeld,
                        format!("invalid card {card} for a meld of rank {:?}", self.rank),
                    ))
                }
            }
        }
        if wilds > naturals {
            return Err(DomainError::validation(
                ValidationKind::TooManyWildCards,
                "too many wild cards for this meld",
            ));
        }
        Ok(())
    }

    /// Apply an initialization that already passed `check_initialization`.
    pub fn initialize(&mut self, cards: &[Card]) {
        assert!(
            self.check_initialization(cards).is_ok(),
            "initialize called with unchecked cards"
        );
        for &card in cards {
            if card.card_type() == CardType::Wild {
                self.wild_cards.push(card);
            } else {
                self.natural_cards.push(card);
            }
        }
        self.initialized = true;
        self.update_points();
    }

    /// Pure validation of an addition card set.
    pub fn check_cards_addition(&self, cards: &[Card]) -> Result<(), DomainError> {
        if !self.initialized {
            return Err(DomainError::validation(
                ValidationKind::MeldNotInitialized,
                format!("meld of rank {:?} is not initialized", self.rank),
            ));
        }
        if cards.is_empty() {
            return Err(DomainError::validation(
                ValidationKind::TooFewCards,
                "no cards to add",
            ));
        }
        let mut naturals = self.natural_cards.len();
        let mut wilds = self.wild_cards.len();
        for card in cards {
            match card.card_type() {
                CardType::Wild => wilds += 1,
                CardType::Natural if card.rank == self.rank => naturals += 1,
                _ => {
                    return Err(DomainError::validation(
                        ValidationKind::WrongCardForMeld,
                        format!("invalid card {card} for a meld of rank {:?}", self.rank),
                    ))
                }
            }
        }
        if wilds > naturals {
            return Err(DomainError::validation(
                ValidationKind::TooManyWildCards,
                "too many wild cards for this meld",
            ));
        }
        Ok(())
    }

    /// Apply an addition that already passed `check_cards_addition`.
    /// With `reversible` set, the pre-addition card lists are snapshotted.
    pub fn add_cards(&mut self, cards: &[Card], reversible: bool) {
        assert!(
            self.check_cards_addition(cards).is_ok(),
            "add_cards called with unchecked cards"
        );
        if reversible {
            self.pending_revert = Some(RankMeldSnapshot {
                natural_cards: self.natural_cards.clone(),
                wild_cards: self.wild_cards.clone(),
            });
        }
        for &card in cards {
            if card.card_type() == CardType::Wild {
                self.wild_cards.push(card);
            } else {
                self.natural_cards.push(card);
            }
        }
        self.update_points();
    }

    /// Restore the last reversible addition. No-op when nothing is pending.
    pub fn revert_add_cards(&mut self) {
        if let Some(snapshot) = self.pending_revert.take() {
            self.natural_cards = snapshot.natural_cards;
            self.wild_cards = snapshot.wild_cards;
            self.update_points();
        }
    }

    pub fn clear_pending_revert(&mut self) {
        self.pending_revert = None;
    }

    /// Return the meld to its uninitialized state (turn revert of a
    /// freshly initialized meld).
    pub fn reset(&mut self) {
        *self = RankMeld::new(self.rank);
    }

    pub fn is_canasta(&self) -> bool {
        self.card_count() >= CANASTA_SIZE
    }

    pub fn canasta_type(&self) -> Option<CanastaType> {
        if !self.is_canasta() {
            return None;
        }
        if self.wild_cards.is_empty() {
            Some(CanastaType::Natural)
        } else {
            Some(CanastaType::Mixed)
        }
    }

    pub fn natural_cards(&self) -> &[Card] {
        &self.natural_cards
    }

    pub fn wild_cards(&self) -> &[Card] {
        &self.wild_cards
    }

    pub fn card_count(&self) -> usize {
        self.natural_cards.len() + self.wild_cards.len()
    }

    /// Cached total: card points plus the canasta bonus, if any.
    pub fn points(&self) -> i32 {
        self.points
    }

    fn update_points(&mut self) {
        let mut points: i32 = self
            .natural_cards
            .iter()
            .chain(self.wild_cards.iter())
            .map(|c| c.points())
            .sum();
        points += match self.canasta_type() {
            Some(CanastaType::Natural) => NATURAL_CANASTA_BONUS,
            Some(CanastaType::Mixed) => MIXED_CANASTA_BONUS,
            None => 0,
        };
        self.points = points;
    }
}

/// The team's red threes: bonus cards routed here straight from the deck.
#[derive(Debug, Clone, Default)]
pub struct RedThreeMeld {
    cards: Vec<Card>,
    initialized: bool,
    points: i32,
    pending_revert: Option<usize>,
}

impl RedThreeMeld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn check_initialization(&self, cards: &[Card]) -> Result<(), DomainError> {
        if self.initialized {
            return Err(DomainError::validation(
                ValidationKind::MeldAlreadyInitialized,
                "red three meld is already initialized",
            ));
        }
        if cards.is_empty() {
            return Err(DomainError::validation(
                ValidationKind::TooFewCards,
                "red three meld must contain at least 1 card",
            ));
        }
        if cards.len() > 4 {
            return Err(DomainError::validation(
                ValidationKind::TooManyCards,
                "red three meld can contain at most 4 cards",
            ));
        }
        Self::check_all_red_threes(cards)
    }

    pub fn initialize(&mut self, cards: &[Card]) {
        assert!(
            self.check_initialization(cards).is_ok(),
            "initialize called with unchecked cards"
        );
        self.cards.extend_from_slice(cards);
        self.initialized = true;
        self.update_points();
    }

    pub fn check_cards_addition(&self, cards: &[Card]) -> Result<(), DomainError> {
        if !self.initialized {
            return Err(DomainError::validation(
                ValidationKind::MeldNotInitialized,
                "red three meld is not initialized",
            ));
        }
        if cards.is_empty() {
            return Err(DomainError::validation(
                ValidationKind::TooFewCards,
                "no cards to add",
            ));
        }
        if self.cards.len() + cards.len() > 4 {
            return Err(DomainError::validation(
                ValidationKind::TooManyCards,
                "red three meld can contain at most 4 cards",
            ));
        }
        Self::check_all_red_threes(cards)
    }

    pub fn add_cards(&mut self, cards: &[Card], reversible: bool) {
        assert!(
            self.check_cards_addition(cards).is_ok(),
            "add_cards called with unchecked cards"
        );
        if reversible {
            self.pending_revert = Some(self.cards.len());
        }
        self.cards.extend_from_slice(cards);
        self.update_points();
    }

    pub fn revert_add_cards(&mut self) {
        if let Some(len) = self.pending_revert.take() {
            self.cards.truncate(len);
            self.update_points();
        }
    }

    pub fn reset(&mut self) {
        *self = RedThreeMeld::new();
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    /// 100 per red three; the total doubles only with all four collected.
    pub fn points(&self) -> i32 {
        self.points
    }

    fn update_points(&mut self) {
        let mut points: i32 = self.cards.iter().map(|c| c.points()).sum();
        if self.cards.len() == 4 {
            points *= 2;
        }
        self.points = points;
    }

    fn check_all_red_threes(cards: &[Card]) -> Result<(), DomainError> {
        for card in cards {
            if card.card_type() != CardType::RedThree {
                return Err(DomainError::validation(
                    ValidationKind::WrongCardForMeld,
                    format!("invalid card {card} for the red three meld"),
                ));
            }
        }
        Ok(())
    }
}

/// Black threes may only be laid down once, while going out.
#[derive(Debug, Clone, Default)]
pub struct BlackThreeMeld {
    cards: Vec<Card>,
    initialized: bool,
    points: i32,
}

impl BlackThreeMeld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn check_initialization(&self, cards: &[Card]) -> Result<(), DomainError> {
        if self.initialized {
            return Err(DomainError::validation(
                ValidationKind::MeldAlreadyInitialized,
                "black three meld is already initialized",
            ));
        }
        if cards.len() < 3 {
            return Err(DomainError::validation(
                ValidationKind::TooFewCards,
                "black three meld must contain at least 3 cards",
            ));
        }
        if cards.len() > 4 {
            return Err(DomainError::validation(
                ValidationKind::TooManyCards,
                "black three meld can contain at most 4 cards",
            ));
        }
        for card in cards {
            if card.card_type() != CardType::BlackThree {
                return Err(DomainError::validation(
                    ValidationKind::WrongCardForMeld,
                    format!("invalid card {card} for the black three meld"),
                ));
            }
        }
        Ok(())
    }

    pub fn initialize(&mut self, cards: &[Card]) {
        assert!(
            self.check_initialization(cards).is_ok(),
            "initialize called with unchecked cards"
        );
        self.cards.extend_from_slice(cards);
        self.initialized = true;
        self.points = self.cards.iter().map(|c| c.points()).sum();
    }

    /// Additions are never legal for a black three meld.
    pub fn check_cards_addition(&self, _cards: &[Card]) -> Result<(), DomainError> {
        Err(DomainError::validation(
            ValidationKind::WrongCardForMeld,
            "cards cannot be added to a black three meld",
        ))
    }

    pub fn reset(&mut self) {
        *self = BlackThreeMeld::new();
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    pub fn points(&self) -> i32 {
        self.points
    }
}

/// Closed union over the three meld kinds. The shared operations are
/// dispatched by exhaustive matching; kind-specific behavior stays on the
/// concrete types.
#[derive(Debug, Clone)]
pub enum Meld {
    RedThree(RedThreeMeld),
    BlackThree(BlackThreeMeld),
    Rank(RankMeld),
}

impl Meld {
    pub fn is_initialized(&self) -> bool {
        match self {
            Meld::RedThree(m) => m.is_initialized(),
            Meld::BlackThree(m) => m.is_initialized(),
            Meld::Rank(m) => m.is_initialized(),
        }
    }

    pub fn points(&self) -> i32 {
        match self {
            Meld::RedThree(m) => m.points(),
            Meld::BlackThree(m) => m.points(),
            Meld::Rank(m) => m.points(),
        }
    }

    pub fn card_count(&self) -> usize {
        match self {
            Meld::RedThree(m) => m.card_count(),
            Meld::BlackThree(m) => m.card_count(),
            Meld::Rank(m) => m.card_count(),
        }
    }

    /// Only rank melds can become canastas.
    pub fn is_canasta(&self) -> bool {
        match self {
            Meld::Rank(m) => m.is_canasta(),
            Meld::RedThree(_) | Meld::BlackThree(_) => false,
        }
    }

    pub fn canasta_type(&self) -> Option<CanastaType> {
        match self {
            Meld::Rank(m) => m.canasta_type(),
            Meld::RedThree(_) | Meld::BlackThree(_) => None,
        }
    }

    pub fn reset(&mut self) {
        match self {
            Meld::RedThree(m) => m.reset(),
            Meld::BlackThree(m) => m.reset(),
            Meld::Rank(m) => m.reset(),
        }
    }
}
