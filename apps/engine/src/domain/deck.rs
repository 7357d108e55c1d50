//! Server-side deck: the shuffled main deck plus the discard pile.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::domain::cards_types::{Card, CardColor, CardType, Rank};

/// Total cards in play: two 52-card decks plus 4 jokers.
pub const DECK_SIZE: usize = 108;

/// The authoritative card state of a round.
///
/// The main deck is drawn from the back; the discard pile grows at the
/// back, so its last element is the visible top card. The pile is frozen
/// exactly when the card currently on top is wild or a black three, so
/// burying a freezing card under a natural discard unfreezes the pile.
///
/// Taking the pile supports a single reversible checkpoint consumed by
/// `revert_take_discard_pile`.
#[derive(Debug, Clone)]
pub struct ServerDeck {
    main_deck: Vec<Card>,
    discard_pile: Vec<Card>,
    pending_revert: Option<Vec<Card>>,
}

impl ServerDeck {
    /// A freshly shuffled 108-card deck using the process RNG.
    pub fn new() -> Self {
        Self::from_rng(&mut rand::rng())
    }

    /// Deterministically shuffled deck for reproducible rounds and tests.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(&mut ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn from_rng<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut main_deck = full_deck();
        main_deck.shuffle(rng);
        Self {
            main_deck,
            discard_pile: Vec::new(),
            pending_revert: None,
        }
    }

    /// Draw the top card of the main deck. `None` when exhausted.
    pub fn draw_card(&mut self) -> Option<Card> {
        self.main_deck.pop()
    }

    /// Put a card on top of the discard pile.
    pub fn discard_card(&mut self, card: Card) {
        self.discard_pile.push(card);
    }

    pub fn top_discard(&self) -> Option<Card> {
        self.discard_pile.last().copied()
    }

    /// True when the top discard is wild or a black three.
    pub fn is_frozen(&self) -> bool {
        matches!(
            self.top_discard().map(Card::card_type),
            Some(CardType::Wild | CardType::BlackThree)
        )
    }

    /// Remove and return the whole discard pile, bottom-first. With
    /// `reversible` set, the pile is snapshotted for one level of undo.
    pub fn take_discard_pile(&mut self, reversible: bool) -> Vec<Card> {
        if reversible {
            self.pending_revert = Some(self.discard_pile.clone());
        }
        std::mem::take(&mut self.discard_pile)
    }

    /// Restore the pile removed by the last reversible take.
    ///
    /// Panics when no take is pending; the turn flow guarantees a revert
    /// is only requested after a successful take.
    pub fn revert_take_discard_pile(&mut self) {
        let snapshot = self
            .pending_revert
            .take()
            .expect("no pending discard pile take to revert");
        self.discard_pile = snapshot;
    }

    pub fn clear_pending_revert(&mut self) {
        self.pending_revert = None;
    }

    /// Return a card underneath the main deck. Used while seeding the
    /// discard pile, where red threes go back into the deck.
    pub fn place_at_bottom(&mut self, card: Card) {
        self.main_deck.insert(0, card);
    }

    pub fn main_deck_size(&self) -> usize {
        self.main_deck.len()
    }

    pub fn discard_pile_size(&self) -> usize {
        self.discard_pile.len()
    }

    #[cfg(test)]
    pub fn from_parts(main_deck: Vec<Card>, discard_pile: Vec<Card>) -> Self {
        Self {
            main_deck,
            discard_pile,
            pending_revert: None,
        }
    }
}

impl Default for ServerDeck {
    fn default() -> Self {
        Self::new()
    }
}

/// The unshuffled 108-card set: every (rank, color) pair twice per suit
/// color, plus four jokers (two per color for a stable representation).
pub fn full_deck() -> Vec<Card> {
    let mut cards = Vec::with_capacity(DECK_SIZE);
    for _ in 0..2 {
        for color in [CardColor::Red, CardColor::Black] {
            cards.push(Card::new(Rank::Joker, color));
            for &rank in &[
                Rank::Two,
                Rank::Three,
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
            ] {
                // Two suits of each color per 52-card deck.
                cards.push(Card::new(rank, color));
                cards.push(Card::new(rank, color));
            }
        }
    }
    cards
}
