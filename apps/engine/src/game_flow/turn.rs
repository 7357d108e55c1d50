//! One player's turn: draw/take, meld, discard, revert.
//!
//! `TurnManager` holds only the transient per-turn state (phase flags, the
//! outstanding pile commitment, the proposals applied this turn). The
//! durable state — hand, team melds, deck — is borrowed per call from the
//! round, so exactly one mutable path into it exists at a time.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::cards_types::{Card, CardType, Rank};
use crate::domain::deck::ServerDeck;
use crate::domain::hand::Hand;
use crate::domain::rules::{
    self, BlackThreeMeldProposal, CommitmentKind, MeldCommitment, MeldSuggestion, RankMeldProposal,
};
use crate::domain::team_state::TeamRoundState;

/// Exhaustive result codes for a turn action.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TurnActionStatus {
    SuccessTurnContinues,
    SuccessTurnOver,
    SuccessWentOut,
    ErrorMainDeckEmpty,
    ErrorMainDeckEmptyDiscardPileCantBeTaken,
    ErrorInvalidAction,
    ErrorInvalidMeld,
    ErrorMeldRequirementNotMet,
}

impl TurnActionStatus {
    pub fn is_success(self) -> bool {
        matches!(
            self,
            TurnActionStatus::SuccessTurnContinues
                | TurnActionStatus::SuccessTurnOver
                | TurnActionStatus::SuccessWentOut
        )
    }
}

/// Machine-checkable status plus a human-readable message.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnActionResult {
    pub status: TurnActionStatus,
    pub message: String,
}

impl TurnActionResult {
    pub fn new(status: TurnActionStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    fn invalid_action(message: impl Into<String>) -> Self {
        Self::new(TurnActionStatus::ErrorInvalidAction, message)
    }

    fn invalid_meld(message: impl Into<String>) -> Self {
        Self::new(TurnActionStatus::ErrorInvalidMeld, message)
    }

    fn requirement_not_met(message: impl Into<String>) -> Self {
        Self::new(TurnActionStatus::ErrorMeldRequirementNotMet, message)
    }
}

/// One meld request as submitted by the player: a card set plus an
/// optional target rank. With a target rank it extends that existing
/// meld; without one it is classified as a fresh initialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeldRequest {
    pub cards: Vec<Card>,
    pub add_to_rank: Option<Rank>,
}

/// Per-turn orchestrator. Created fresh at the start of every turn.
#[derive(Debug, Default)]
pub struct TurnManager {
    drew_from_deck: bool,
    took_discard_pile: bool,
    melds_handled: bool,
    commitment: Option<MeldCommitment>,
    applied_initializations: Vec<RankMeldProposal>,
    applied_additions: Vec<RankMeldProposal>,
    applied_black_three: Option<BlackThreeMeldProposal>,
}

impl TurnManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drew_from_deck(&self) -> bool {
        self.drew_from_deck
    }

    pub fn took_discard_pile(&self) -> bool {
        self.took_discard_pile
    }

    pub fn melds_handled(&self) -> bool {
        self.melds_handled
    }

    pub fn commitment(&self) -> Option<MeldCommitment> {
        self.commitment
    }

    fn acquired_card(&self) -> bool {
        self.drew_from_deck || self.took_discard_pile
    }

    /// Draw from the main deck. Red threes drawn on the way go straight
    /// into the team's red three meld; drawing stops at the first card
    /// that lands in hand. Drawing is irreversible.
    pub fn handle_draw_deck(
        &mut self,
        hand: &mut Hand,
        team: &mut TeamRoundState,
        deck: &mut ServerDeck,
    ) -> TurnActionResult {
        if self.acquired_card() {
            return TurnActionResult::invalid_action("a card was already taken this turn");
        }
        let mut red_threes = Vec::new();
        let drawn = loop {
            match deck.draw_card() {
                Some(card) if card.card_type() == CardType::RedThree => red_threes.push(card),
                Some(card) => break Some(card),
                None => break None,
            }
        };
        // Red threes picked up on the way are kept even when the deck
        // runs out underneath them.
        rules::add_red_three_cards_to_meld(&red_threes, team.red_three_meld_mut());
        match drawn {
            Some(card) => {
                hand.add_card(card);
                self.drew_from_deck = true;
                debug!(
                    red_threes = red_threes.len(),
                    deck_left = deck.main_deck_size(),
                    "drew from deck"
                );
                TurnActionResult::new(TurnActionStatus::SuccessTurnContinues, "card drawn")
            }
            None => TurnActionResult::new(
                TurnActionStatus::ErrorMainDeckEmpty,
                "the main deck is empty",
            ),
        }
    }

    /// Take the whole discard pile, reversibly, recording the meld
    /// commitment the take incurs.
    pub fn handle_take_discard_pile(
        &mut self,
        hand: &mut Hand,
        team: &mut TeamRoundState,
        deck: &mut ServerDeck,
    ) -> TurnActionResult {
        if self.acquired_card() {
            return TurnActionResult::invalid_action("a card was already taken this turn");
        }
        let Some(top_card) = deck.top_discard() else {
            return TurnActionResult::invalid_action("the discard pile is empty");
        };
        let commitment =
            match rules::check_taking_discard_pile(hand, top_card, team, deck.is_frozen()) {
                Ok(commitment) => commitment,
                Err(err) => return TurnActionResult::invalid_action(err.detail()),
            };
        let cards = deck.take_discard_pile(true);
        hand.add_cards(&cards, true);
        self.commitment = Some(commitment);
        self.took_discard_pile = true;
        debug!(
            taken = cards.len(),
            rank = ?commitment.rank,
            kind = ?commitment.kind,
            "took discard pile"
        );
        TurnActionResult::new(
            TurnActionStatus::SuccessTurnContinues,
            format!("discard pile taken; must meld rank {:?}", commitment.rank),
        )
    }

    /// Process the turn's meld batch. The batch is all-or-nothing: any
    /// failed check rejects every request, and a failed going-out check
    /// after application reverts the whole batch.
    pub fn handle_melds(
        &mut self,
        requests: &[MeldRequest],
        hand: &mut Hand,
        team: &mut TeamRoundState,
        deck: &mut ServerDeck,
        team_total_score: i32,
    ) -> TurnActionResult {
        if !self.acquired_card() {
            return TurnActionResult::invalid_action("a card must be drawn or taken before melding");
        }
        if self.melds_handled {
            return TurnActionResult::invalid_action("melds were already handled this turn");
        }
        if requests.is_empty() {
            return TurnActionResult::invalid_action("no meld requests submitted");
        }

        // Every proposed card must be found in a working copy of the hand;
        // this rejects reusing one physical card across requests.
        let mut working: Vec<Card> = hand.cards().to_vec();
        for request in requests {
            for &card in &request.cards {
                match working.iter().position(|&c| c == card) {
                    Some(idx) => {
                        working.remove(idx);
                    }
                    None => {
                        return TurnActionResult::invalid_meld(format!("{card} is not in hand"))
                    }
                }
            }
        }
        let cards_left = working.len();

        let mut initializations: Vec<RankMeldProposal> = Vec::new();
        let mut additions: Vec<RankMeldProposal> = Vec::new();
        let mut black_three: Option<BlackThreeMeldProposal> = None;
        for request in requests {
            if let Some(rank) = request.add_to_rank {
                additions.push(RankMeldProposal {
                    rank,
                    cards: request.cards.clone(),
                });
                continue;
            }
            match rules::suggest_meld(&request.cards) {
                Ok(MeldSuggestion::Rank(rank)) => initializations.push(RankMeldProposal {
                    rank,
                    cards: request.cards.clone(),
                }),
                Ok(MeldSuggestion::BlackThree) => {
                    if black_three.is_some() {
                        return TurnActionResult::invalid_meld(
                            "more than one black three meld proposed",
                        );
                    }
                    black_three = Some(BlackThreeMeldProposal {
                        cards: request.cards.clone(),
                    });
                }
                Err(err) => return TurnActionResult::invalid_meld(err.detail()),
            }
        }

        let had_initial_meld = team.has_made_initial_meld();
        let initialization_points =
            match rules::validate_rank_meld_initialization_proposals(&initializations, team) {
                Ok(points) => points,
                Err(err) => return TurnActionResult::invalid_meld(err.detail()),
            };
        if !had_initial_meld {
            if initializations.is_empty() {
                return TurnActionResult::invalid_meld(
                    "the team must initialize at least one meld first",
                );
            }
            if let Err(required) =
                rules::validate_points_for_initial_melds(initialization_points, team_total_score)
            {
                return TurnActionResult::requirement_not_met(format!(
                    "the initial meld requires at least {required} points"
                ));
            }
        }
        if let Err(err) = rules::validate_rank_meld_addition_proposals(&additions, team) {
            return TurnActionResult::invalid_meld(err.detail());
        }
        if let Some(proposal) = &black_three {
            if let Err(err) = rules::validate_black_three_meld_initialization_proposal(proposal, team)
            {
                return TurnActionResult::invalid_meld(err.detail());
            }
        }
        if let Some(result) = self.check_commitment(&initializations, &additions) {
            return result;
        }

        // Validation passed; apply the whole batch.
        for proposal in &initializations {
            team.rank_meld_mut(proposal.rank).initialize(&proposal.cards);
        }
        for proposal in &additions {
            team.rank_meld_mut(proposal.rank)
                .add_cards(&proposal.cards, true);
        }
        if let Some(proposal) = &black_three {
            team.black_three_meld_mut().initialize(&proposal.cards);
        }
        for request in requests {
            for &card in &request.cards {
                let removed = hand.remove_card(card);
                assert!(removed, "melded card {card} vanished from hand");
            }
        }
        self.applied_initializations = initializations;
        self.applied_additions = additions;
        self.applied_black_three = black_three;

        // Going-out consistency: an emptied hand, or laying down black
        // threes at all, is only legal when the team may go out.
        if (cards_left == 0 || self.applied_black_three.is_some())
            && !rules::can_going_out(cards_left, team)
        {
            let black_three_was_cause = self.applied_black_three.is_some() && cards_left > 0;
            self.revert_applied_melds(hand, team);
            return if black_three_was_cause {
                TurnActionResult::invalid_meld("black threes may only be melded while going out")
            } else {
                TurnActionResult::invalid_action(
                    "cannot go out without a canasta; meld batch reverted",
                )
            };
        }

        self.melds_handled = true;
        self.commitment = None;
        debug!(cards_left, "melds applied");
        if cards_left == 0 {
            self.commit_pending(hand, team, deck);
            TurnActionResult::new(TurnActionStatus::SuccessWentOut, "went out by melding")
        } else {
            TurnActionResult::new(TurnActionStatus::SuccessTurnContinues, "melds accepted")
        }
    }

    /// Discard one card, ending the turn and committing all pending
    /// reversible state.
    pub fn handle_discard(
        &mut self,
        card: Card,
        hand: &mut Hand,
        team: &mut TeamRoundState,
        deck: &mut ServerDeck,
    ) -> TurnActionResult {
        if !self.acquired_card() {
            return TurnActionResult::invalid_action(
                "a card must be drawn or taken before discarding",
            );
        }
        if self.took_discard_pile && !self.melds_handled {
            return TurnActionResult::invalid_action(
                "the pile commitment must be melded before discarding",
            );
        }
        if !hand.has_card(card) {
            return TurnActionResult::invalid_action(format!("{card} is not in hand"));
        }
        if hand.card_count() == 1 && !rules::can_going_out(0, team) {
            return TurnActionResult::invalid_action(
                "discarding the last card requires a canasta to go out",
            );
        }
        hand.remove_card(card);
        deck.discard_card(card);
        self.commit_pending(hand, team, deck);
        debug!(%card, frozen = deck.is_frozen(), "discarded");
        if hand.is_empty() {
            TurnActionResult::new(TurnActionStatus::SuccessWentOut, "went out")
        } else {
            TurnActionResult::new(TurnActionStatus::SuccessTurnOver, "turn over")
        }
    }

    /// Undo this turn's melds and pile take. Drawing is never reverted.
    pub fn handle_revert(
        &mut self,
        hand: &mut Hand,
        team: &mut TeamRoundState,
        deck: &mut ServerDeck,
    ) -> TurnActionResult {
        if !self.melds_handled && !self.took_discard_pile {
            return TurnActionResult::invalid_action("nothing to revert this turn");
        }
        // Melds go back first so the pile-take hand snapshot, which
        // predates both, can then overwrite the re-added cards.
        self.revert_applied_melds(hand, team);
        if self.took_discard_pile {
            hand.revert_add_cards();
            deck.revert_take_discard_pile();
            self.took_discard_pile = false;
        }
        self.commitment = None;
        debug!("turn reverted");
        TurnActionResult::new(TurnActionStatus::SuccessTurnContinues, "turn state reverted")
    }

    /// Enforce an outstanding pile commitment against the matching
    /// proposal set. Returns the rejection, if any.
    fn check_commitment(
        &self,
        initializations: &[RankMeldProposal],
        additions: &[RankMeldProposal],
    ) -> Option<TurnActionResult> {
        let commitment = self.commitment?;
        let proposals = match commitment.kind {
            CommitmentKind::Initialize => initializations,
            CommitmentKind::AddToExisting => additions,
        };
        let satisfied = proposals
            .iter()
            .any(|p| p.rank == commitment.rank && p.cards.len() >= commitment.count);
        if satisfied {
            None
        } else {
            Some(TurnActionResult::requirement_not_met(format!(
                "taking the pile requires melding at least {} cards of rank {:?}",
                commitment.count, commitment.rank
            )))
        }
    }

    /// Return every meld applied this turn to its pre-meld state and put
    /// the cards back into the hand.
    fn revert_applied_melds(&mut self, hand: &mut Hand, team: &mut TeamRoundState) {
        for proposal in self.applied_initializations.drain(..) {
            team.rank_meld_mut(proposal.rank).reset();
            hand.add_cards(&proposal.cards, false);
        }
        for proposal in self.applied_additions.drain(..) {
            team.rank_meld_mut(proposal.rank).revert_add_cards();
            hand.add_cards(&proposal.cards, false);
        }
        if let Some(proposal) = self.applied_black_three.take() {
            team.black_three_meld_mut().reset();
            hand.add_cards(&proposal.cards, false);
        }
        self.melds_handled = false;
    }

    /// Drop every pending undo snapshot once the turn's mutations are
    /// final.
    fn commit_pending(&mut self, hand: &mut Hand, team: &mut TeamRoundState, deck: &mut ServerDeck) {
        hand.clear_pending_revert();
        deck.clear_pending_revert();
        for proposal in &self.applied_additions {
            team.rank_meld_mut(proposal.rank).clear_pending_revert();
        }
        self.applied_initializations.clear();
        self.applied_additions.clear();
        self.applied_black_three = None;
    }
}
