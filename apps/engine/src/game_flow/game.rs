//! Game-level state: players, teams, cumulative scores, round lifecycle.

use tracing::info;

use crate::domain::cards_types::Card;
use crate::domain::deck::ServerDeck;
use crate::domain::hand::Hand;
use crate::domain::rules::{self, GameOutcome};
use crate::domain::scoring::ScoreBreakdown;
use crate::errors::domain::{DomainError, ValidationKind};
use crate::game_flow::round::{team_for_seat, RoundManager};
use crate::game_flow::turn::{MeldRequest, TurnActionResult, TurnActionStatus};

#[derive(Debug)]
pub struct Player {
    pub name: String,
    pub hand: Hand,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hand: Hand::new(),
        }
    }
}

#[derive(Debug)]
pub struct Team {
    pub name: String,
    pub total_score: i32,
}

/// Owns the players and both teams across rounds; creates one
/// `RoundManager` at a time and forwards the five turn actions to it.
#[derive(Debug)]
pub struct GameManager {
    players: Vec<Player>,
    teams: [Team; 2],
    round: Option<RoundManager>,
}

impl GameManager {
    /// A new game for 2 or 4 players. Alternating seats form the two
    /// partnerships.
    pub fn new(player_names: Vec<String>) -> Result<Self, DomainError> {
        if player_names.len() != 2 && player_names.len() != 4 {
            return Err(DomainError::validation(
                ValidationKind::InvalidPlayerCount,
                format!("a game takes 2 or 4 players, got {}", player_names.len()),
            ));
        }
        let players: Vec<Player> = player_names.into_iter().map(Player::new).collect();
        let teams: [Team; 2] = std::array::from_fn(|team| {
            let members: Vec<&str> = players
                .iter()
                .enumerate()
                .filter(|(seat, _)| team_for_seat(*seat) == team)
                .map(|(_, p)| p.name.as_str())
                .collect();
            Team {
                name: members.join(" & "),
                total_score: 0,
            }
        });
        Ok(Self {
            players,
            teams,
            round: None,
        })
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn teams(&self) -> &[Team; 2] {
        &self.teams
    }

    pub fn round(&self) -> Option<&RoundManager> {
        self.round.as_ref()
    }

    pub fn start_round(&mut self) -> Result<(), DomainError> {
        self.start_round_with_deck(ServerDeck::new())
    }

    /// Start a round from a deterministic shuffle, for replays and tests.
    pub fn start_round_with_seed(&mut self, seed: u64) -> Result<(), DomainError> {
        self.start_round_with_deck(ServerDeck::with_seed(seed))
    }

    fn start_round_with_deck(&mut self, deck: ServerDeck) -> Result<(), DomainError> {
        if self.round.as_ref().is_some_and(|r| !r.is_finished()) {
            return Err(DomainError::validation(
                ValidationKind::RoundNotInProgress,
                "a round is already in progress",
            ));
        }
        let scores = [self.teams[0].total_score, self.teams[1].total_score];
        self.round = Some(RoundManager::start(deck, scores, &mut self.players)?);
        Ok(())
    }

    pub fn handle_draw_deck(&mut self) -> TurnActionResult {
        match &mut self.round {
            Some(round) => round.handle_draw_deck(&mut self.players),
            None => no_round_result(),
        }
    }

    pub fn handle_take_discard_pile(&mut self) -> TurnActionResult {
        match &mut self.round {
            Some(round) => round.handle_take_discard_pile(&mut self.players),
            None => no_round_result(),
        }
    }

    pub fn handle_melds(&mut self, requests: &[MeldRequest]) -> TurnActionResult {
        match &mut self.round {
            Some(round) => round.handle_melds(&mut self.players, requests),
            None => no_round_result(),
        }
    }

    pub fn handle_discard(&mut self, card: Card) -> TurnActionResult {
        match &mut self.round {
            Some(round) => round.handle_discard(&mut self.players, card),
            None => no_round_result(),
        }
    }

    pub fn handle_revert(&mut self) -> TurnActionResult {
        match &mut self.round {
            Some(round) => round.handle_revert(&mut self.players),
            None => no_round_result(),
        }
    }

    /// Fold the finished round's breakdowns into the cumulative team
    /// scores and close the round.
    pub fn finish_round(&mut self) -> Result<[ScoreBreakdown; 2], DomainError> {
        let round = self.round.take().ok_or_else(|| {
            DomainError::validation(ValidationKind::RoundNotInProgress, "no round to finish")
        })?;
        if !round.is_finished() {
            self.round = Some(round);
            return Err(DomainError::validation(
                ValidationKind::RoundNotInProgress,
                "the round is still in progress",
            ));
        }
        let breakdowns = round.calculate_scores(&self.players);
        for (team, breakdown) in self.teams.iter_mut().zip(breakdowns.iter()) {
            team.total_score += breakdown.total();
            info!(
                team = %team.name,
                round_total = breakdown.total(),
                total = team.total_score,
                "round scored"
            );
        }
        Ok(breakdowns)
    }

    /// Game standing based on cumulative scores.
    pub fn game_outcome(&self) -> GameOutcome {
        rules::check_game_outcome(self.teams[0].total_score, self.teams[1].total_score)
    }
}

fn no_round_result() -> TurnActionResult {
    TurnActionResult::new(TurnActionStatus::ErrorInvalidAction, "no round in progress")
}
