//! Stateless rule checks: pure functions over hands, melds and team state.
//!
//! Nothing in this module mutates game state except
//! `add_red_three_cards_to_meld`, which exists because dealing and drawing
//! both route red threes the same way.

use serde::{Deserialize, Serialize};

use crate::domain::cards_types::{Card, CardType, Rank};
use crate::domain::hand::Hand;
use crate::domain::meld::RedThreeMeld;
use crate::domain::team_state::TeamRoundState;
use crate::errors::domain::{DomainError, ValidationKind};

/// A team wins by reaching this cumulative score.
pub const WINNING_SCORE: i32 = 3000;
/// Credited to the team whose player empties their hand.
pub const GOING_OUT_BONUS: i32 = 100;
/// Canastas a team must hold before any player of it may go out.
pub const MIN_CANASTAS_TO_GO_OUT: usize = 1;
/// Cards dealt to each player at round start.
pub const INITIAL_HAND_SIZE: usize = 11;
/// Cards a strict pile-take commitment must place in the target meld.
pub const STRICT_COMMITMENT_COUNT: usize = 3;
/// Cards an easy pile-take commitment must place in the target meld.
pub const EASY_COMMITMENT_COUNT: usize = 1;

/// Classification of a card set a player intends to meld.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MeldSuggestion {
    BlackThree,
    Rank(Rank),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum CommitmentKind {
    /// The pile take must initialize the rank's meld.
    Initialize,
    /// The pile take must extend the rank's existing meld.
    AddToExisting,
}

/// Obligation incurred by taking the discard pile: this turn's meld batch
/// must put at least `count` cards of `rank` into the matching meld.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct MeldCommitment {
    pub kind: CommitmentKind,
    pub rank: Rank,
    pub count: usize,
}

/// A proposed initialization or extension of one rank meld.
#[derive(Debug, Clone)]
pub struct RankMeldProposal {
    pub rank: Rank,
    pub cards: Vec<Card>,
}

/// A proposed black three meld, legal only while going out.
#[derive(Debug, Clone)]
pub struct BlackThreeMeldProposal {
    pub cards: Vec<Card>,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum GameOutcome {
    Continue,
    Team1Wins,
    Team2Wins,
    Draw,
}

/// Classify the cards of one meld request.
///
/// Red threes are never melded by hand; black threes dominate the
/// classification when present; otherwise the first natural card names the
/// target rank. Wild-only sets are unclassifiable.
pub fn suggest_meld(cards: &[Card]) -> Result<MeldSuggestion, DomainError> {
    if cards.is_empty() {
        return Err(DomainError::validation(
            ValidationKind::TooFewCards,
            "cannot suggest a meld from no cards",
        ));
    }
    if cards.iter().any(|c| c.card_type() == CardType::RedThree) {
        return Err(DomainError::validation(
            ValidationKind::WrongCardForMeld,
            "red threes cannot be melded directly",
        ));
    }
    if cards.iter().any(|c| c.card_type() == CardType::BlackThree) {
        return Ok(MeldSuggestion::BlackThree);
    }
    match cards.iter().find(|c| c.card_type() == CardType::Natural) {
        Some(card) => Ok(MeldSuggestion::Rank(card.rank)),
        None => Err(DomainError::validation(
            ValidationKind::WrongCardForMeld,
            "cannot meld wild cards on their own",
        )),
    }
}

/// Decide whether the player may take the discard pile and, if so, what
/// they become committed to. The branches are ordered: a strict
/// initialization match beats every other consideration, including the
/// frozen flag.
pub fn check_taking_discard_pile(
    hand: &Hand,
    top_card: Card,
    team: &TeamRoundState,
    pile_frozen: bool,
) -> Result<MeldCommitment, DomainError> {
    if top_card.card_type() != CardType::Natural {
        return Err(DomainError::validation(
            ValidationKind::PileFrozen,
            format!("the discard pile cannot be taken while {top_card} is on top"),
        ));
    }
    let rank = top_card.rank;
    let holds_pair = hand.count_rank(rank) >= 2;
    let meld_initialized = team.rank_meld(rank).is_initialized();

    if holds_pair && !meld_initialized {
        return Ok(MeldCommitment {
            kind: CommitmentKind::Initialize,
            rank,
            count: STRICT_COMMITMENT_COUNT,
        });
    }
    if !team.has_made_initial_meld() {
        return Err(DomainError::validation(
            ValidationKind::NoInitialMeld,
            "the discard pile cannot be taken before the team's initial meld",
        ));
    }
    if pile_frozen {
        if holds_pair && meld_initialized {
            return Ok(MeldCommitment {
                kind: CommitmentKind::AddToExisting,
                rank,
                count: STRICT_COMMITMENT_COUNT,
            });
        }
        return Err(DomainError::validation(
            ValidationKind::PileFrozen,
            "the discard pile is frozen",
        ));
    }
    if !meld_initialized {
        return Err(DomainError::validation(
            ValidationKind::MeldNotInitialized,
            format!("no meld of rank {rank:?} to receive the pile"),
        ));
    }
    if team.rank_meld(rank).is_canasta() {
        return Err(DomainError::validation(
            ValidationKind::MeldIsCanasta,
            format!("the meld of rank {rank:?} is already a canasta"),
        ));
    }
    Ok(MeldCommitment {
        kind: CommitmentKind::AddToExisting,
        rank,
        count: EASY_COMMITMENT_COUNT,
    })
}

fn reject_duplicate_ranks(proposals: &[RankMeldProposal]) -> Result<(), DomainError> {
    for (i, proposal) in proposals.iter().enumerate() {
        if proposals[..i].iter().any(|p| p.rank == proposal.rank) {
            return Err(DomainError::validation(
                ValidationKind::DuplicateMeldProposal,
                format!("rank {:?} appears twice in one meld batch", proposal.rank),
            ));
        }
    }
    Ok(())
}

/// Validate a batch of rank meld initializations against the team's
/// current slots and return the summed card points of all proposals.
/// Canasta bonuses do not count toward the initial meld threshold.
pub fn validate_rank_meld_initialization_proposals(
    proposals: &[RankMeldProposal],
    team: &TeamRoundState,
) -> Result<i32, DomainError> {
    reject_duplicate_ranks(proposals)?;
    let mut points = 0;
    for proposal in proposals {
        if !Rank::MELDABLE.contains(&proposal.rank) {
            return Err(DomainError::validation(
                ValidationKind::InvalidMeldRank,
                format!("rank {:?} cannot form a meld", proposal.rank),
            ));
        }
        team.rank_meld(proposal.rank)
            .check_initialization(&proposal.cards)?;
        points += proposal.cards.iter().map(|c| c.points()).sum::<i32>();
    }
    Ok(points)
}

/// Validate a batch of additions to already-initialized rank melds.
pub fn validate_rank_meld_addition_proposals(
    proposals: &[RankMeldProposal],
    team: &TeamRoundState,
) -> Result<(), DomainError> {
    reject_duplicate_ranks(proposals)?;
    for proposal in proposals {
        if !Rank::MELDABLE.contains(&proposal.rank) {
            return Err(DomainError::validation(
                ValidationKind::InvalidMeldRank,
                format!("rank {:?} cannot form a meld", proposal.rank),
            ));
        }
        team.rank_meld(proposal.rank)
            .check_cards_addition(&proposal.cards)?;
    }
    Ok(())
}

pub fn validate_black_three_meld_initialization_proposal(
    proposal: &BlackThreeMeldProposal,
    team: &TeamRoundState,
) -> Result<(), DomainError> {
    team.black_three_meld().check_initialization(&proposal.cards)
}

/// Check the summed initial-meld points against the threshold for the
/// team's cumulative score. On failure the minimum required is returned.
pub fn validate_points_for_initial_melds(points: i32, team_total_score: i32) -> Result<(), i32> {
    let required = if team_total_score < 0 {
        15
    } else if team_total_score < 1500 {
        50
    } else if team_total_score < 3000 {
        90
    } else {
        120
    };
    if points >= required {
        Ok(())
    } else {
        Err(required)
    }
}

/// A player may go out only with at most one card left and the team
/// holding at least one canasta.
pub fn can_going_out(cards_left_in_hand: usize, team: &TeamRoundState) -> bool {
    cards_left_in_hand <= 1 && team.canasta_count() >= MIN_CANASTAS_TO_GO_OUT
}

/// Compare cumulative team scores at a round boundary.
pub fn check_game_outcome(team1_score: i32, team2_score: i32) -> GameOutcome {
    if team1_score < WINNING_SCORE && team2_score < WINNING_SCORE {
        return GameOutcome::Continue;
    }
    match team1_score.cmp(&team2_score) {
        std::cmp::Ordering::Greater => GameOutcome::Team1Wins,
        std::cmp::Ordering::Less => GameOutcome::Team2Wins,
        std::cmp::Ordering::Equal => GameOutcome::Draw,
    }
}

/// Route incidentally drawn red threes into the team's red three meld,
/// initializing it on first contact. Shared by dealing and drawing.
pub fn add_red_three_cards_to_meld(cards: &[Card], meld: &mut RedThreeMeld) {
    if cards.is_empty() {
        return;
    }
    if meld.is_initialized() {
        meld.add_cards(cards, false);
    } else {
        meld.initialize(cards);
    }
}
