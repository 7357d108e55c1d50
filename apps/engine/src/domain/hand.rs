//! A player's hand: a sorted multiset of cards with one level of undo.

use crate::domain::cards_types::{Card, Rank};

/// Ordered multiset of cards belonging to one player.
///
/// The card list is always kept sorted by `Card` ordering so every view of
/// the hand is deterministic. A single reversible checkpoint supports the
/// take-discard-pile undo: the snapshot is taken by `add_cards(.., true)`
/// and restored by `revert_add_cards`. Other mutations (single adds,
/// removals) deliberately leave a pending snapshot in place — cards melded
/// after taking the pile must still be recoverable by the snapshot restore.
#[derive(Debug, Clone, Default)]
pub struct Hand {
    cards: Vec<Card>,
    pending_revert: Option<Vec<Card>>,
}

impl Hand {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a card, keeping the hand sorted.
    pub fn add_card(&mut self, card: Card) {
        let idx = self.cards.partition_point(|c| c <= &card);
        self.cards.insert(idx, card);
    }

    /// Insert a batch of cards. With `reversible` set, the pre-addition
    /// hand is snapshotted and can be restored by `revert_add_cards`.
    pub fn add_cards(&mut self, cards: &[Card], reversible: bool) {
        if reversible {
            self.pending_revert = Some(self.cards.clone());
        }
        for &card in cards {
            self.add_card(card);
        }
    }

    /// Restore the hand to the state captured by the last reversible add.
    /// No-op when nothing is pending.
    pub fn revert_add_cards(&mut self) {
        if let Some(snapshot) = self.pending_revert.take() {
            self.cards = snapshot;
        }
    }

    /// Drop the pending snapshot once the turn's mutations are committed.
    pub fn clear_pending_revert(&mut self) {
        self.pending_revert = None;
    }

    /// Remove the first occurrence of `card`. Returns false when absent.
    pub fn remove_card(&mut self, card: Card) -> bool {
        match self.cards.iter().position(|&c| c == card) {
            Some(idx) => {
                self.cards.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn has_card(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    /// Number of cards of the given rank currently held.
    pub fn count_rank(&self, rank: Rank) -> usize {
        self.cards.iter().filter(|c| c.rank == rank).count()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    pub fn clear(&mut self) {
        self.cards.clear();
        self.pending_revert = None;
    }

    /// Sum of card points left in hand, counted against the team at round end.
    pub fn penalty(&self) -> i32 {
        self.cards.iter().map(|c| c.points()).sum()
    }
}
