//! One round: dealing, turn rotation, deck exhaustion, scoring.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::cards_types::{Card, CardType};
use crate::domain::deck::ServerDeck;
use crate::domain::rules::{self, INITIAL_HAND_SIZE};
use crate::domain::scoring::{self, ScoreBreakdown};
use crate::domain::team_state::TeamRoundState;
use crate::errors::domain::{DomainError, ValidationKind};
use crate::game_flow::game::Player;
use crate::game_flow::turn::{MeldRequest, TurnActionResult, TurnActionStatus, TurnManager};
use crate::protocol::snapshots::{ClientDeck, PlayerPublicInfo};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum RoundPhase {
    InProgress,
    Finished,
}

/// Owns the deck and both team states for one round, and lends them to
/// one `TurnManager` at a time. Players are owned by the game and lent
/// per call.
#[derive(Debug)]
pub struct RoundManager {
    deck: ServerDeck,
    team_states: [TeamRoundState; 2],
    team_total_scores: [i32; 2],
    player_count: usize,
    current_player_index: usize,
    phase: RoundPhase,
    turn: TurnManager,
    main_deck_empty: bool,
    went_out_player: Option<usize>,
}

/// Team index of a seat: seats alternate between the two partnerships.
pub fn team_for_seat(seat: usize) -> usize {
    seat % 2
}

impl RoundManager {
    /// Deal a new round: 11 cards per player (red threes routed to the
    /// team meld) and a seeded discard pile.
    pub fn start(
        mut deck: ServerDeck,
        team_total_scores: [i32; 2],
        players: &mut [Player],
    ) -> Result<Self, DomainError> {
        if players.len() != 2 && players.len() != 4 {
            return Err(DomainError::validation(
                ValidationKind::InvalidPlayerCount,
                format!("a round takes 2 or 4 players, got {}", players.len()),
            ));
        }
        let mut team_states = [TeamRoundState::new(), TeamRoundState::new()];
        for (seat, player) in players.iter_mut().enumerate() {
            player.hand.clear();
            let team = &mut team_states[team_for_seat(seat)];
            for _ in 0..INITIAL_HAND_SIZE {
                let card = deal_one(&mut deck, team)?;
                player.hand.add_card(card);
            }
        }
        seed_discard_pile(&mut deck)?;
        info!(
            players = players.len(),
            deck_left = deck.main_deck_size(),
            pile = deck.discard_pile_size(),
            "round started"
        );
        Ok(Self {
            deck,
            team_states,
            team_total_scores,
            player_count: players.len(),
            current_player_index: 0,
            phase: RoundPhase::InProgress,
            turn: TurnManager::new(),
            main_deck_empty: false,
            went_out_player: None,
        })
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase == RoundPhase::Finished
    }

    pub fn current_player_index(&self) -> usize {
        self.current_player_index
    }

    pub fn went_out_player(&self) -> Option<usize> {
        self.went_out_player
    }

    pub fn handle_draw_deck(&mut self, players: &mut [Player]) -> TurnActionResult {
        if let Some(result) = self.round_over_guard() {
            return result;
        }
        if self.main_deck_empty {
            return TurnActionResult::new(
                TurnActionStatus::ErrorMainDeckEmpty,
                "the main deck is empty; only the discard pile can be taken",
            );
        }
        let seat = self.current_player_index;
        let result = self.turn.handle_draw_deck(
            &mut players[seat].hand,
            &mut self.team_states[team_for_seat(seat)],
            &mut self.deck,
        );
        self.process_turn_result(result)
    }

    pub fn handle_take_discard_pile(&mut self, players: &mut [Player]) -> TurnActionResult {
        if let Some(result) = self.round_over_guard() {
            return result;
        }
        let seat = self.current_player_index;
        let result = self.turn.handle_take_discard_pile(
            &mut players[seat].hand,
            &mut self.team_states[team_for_seat(seat)],
            &mut self.deck,
        );
        // With the deck already exhausted, a refused pile take deadlocks
        // the round.
        if !result.is_success() && self.main_deck_empty {
            let result = TurnActionResult::new(
                TurnActionStatus::ErrorMainDeckEmptyDiscardPileCantBeTaken,
                "the deck is empty and the discard pile cannot be taken",
            );
            return self.process_turn_result(result);
        }
        self.process_turn_result(result)
    }

    pub fn handle_melds(
        &mut self,
        players: &mut [Player],
        requests: &[MeldRequest],
    ) -> TurnActionResult {
        if let Some(result) = self.round_over_guard() {
            return result;
        }
        let seat = self.current_player_index;
        let team = team_for_seat(seat);
        let result = self.turn.handle_melds(
            requests,
            &mut players[seat].hand,
            &mut self.team_states[team],
            &mut self.deck,
            self.team_total_scores[team],
        );
        self.process_turn_result(result)
    }

    pub fn handle_discard(&mut self, players: &mut [Player], card: Card) -> TurnActionResult {
        if let Some(result) = self.round_over_guard() {
            return result;
        }
        let seat = self.current_player_index;
        let result = self.turn.handle_discard(
            card,
            &mut players[seat].hand,
            &mut self.team_states[team_for_seat(seat)],
            &mut self.deck,
        );
        self.process_turn_result(result)
    }

    pub fn handle_revert(&mut self, players: &mut [Player]) -> TurnActionResult {
        if let Some(result) = self.round_over_guard() {
            return result;
        }
        let seat = self.current_player_index;
        let result = self.turn.handle_revert(
            &mut players[seat].hand,
            &mut self.team_states[team_for_seat(seat)],
            &mut self.deck,
        );
        self.process_turn_result(result)
    }

    /// Itemized round scores, one breakdown per team.
    pub fn calculate_scores(&self, players: &[Player]) -> [ScoreBreakdown; 2] {
        let went_out_team = self.went_out_player.map(team_for_seat);
        std::array::from_fn(|team| {
            let hand_penalty: i32 = players
                .iter()
                .enumerate()
                .filter(|(seat, _)| team_for_seat(*seat) == team)
                .map(|(_, p)| p.hand.penalty())
                .sum();
            scoring::team_score_breakdown(
                &self.team_states[team],
                hand_penalty,
                went_out_team == Some(team),
            )
        })
    }

    /// Read-only deck snapshot for clients.
    pub fn client_deck(&self) -> ClientDeck {
        ClientDeck::from_deck(&self.deck)
    }

    /// Deep clone of one team's meld state for clients.
    pub fn team_state(&self, team: usize) -> TeamRoundState {
        self.team_states[team].clone()
    }

    pub fn players_public_info(&self, players: &[Player]) -> Vec<PlayerPublicInfo> {
        players
            .iter()
            .enumerate()
            .map(|(seat, player)| PlayerPublicInfo {
                name: player.name.clone(),
                card_count: player.hand.card_count(),
                is_current_turn: !self.is_finished() && seat == self.current_player_index,
            })
            .collect()
    }

    fn round_over_guard(&self) -> Option<TurnActionResult> {
        if self.is_finished() {
            Some(TurnActionResult::new(
                TurnActionStatus::ErrorInvalidAction,
                "the round is over",
            ))
        } else {
            None
        }
    }

    fn process_turn_result(&mut self, result: TurnActionResult) -> TurnActionResult {
        match result.status {
            TurnActionStatus::SuccessTurnOver => {
                self.current_player_index = (self.current_player_index + 1) % self.player_count;
                self.turn = TurnManager::new();
                debug!(next = self.current_player_index, "turn advanced");
            }
            TurnActionStatus::SuccessWentOut => {
                self.went_out_player = Some(self.current_player_index);
                self.phase = RoundPhase::Finished;
                info!(player = self.current_player_index, "round finished: went out");
            }
            TurnActionStatus::ErrorMainDeckEmpty => {
                self.main_deck_empty = true;
            }
            TurnActionStatus::ErrorMainDeckEmptyDiscardPileCantBeTaken => {
                self.phase = RoundPhase::Finished;
                info!("round finished: deck exhausted");
            }
            _ => {}
        }
        result
    }
}

/// Draw one card for dealing, routing red threes into the team meld.
fn deal_one(deck: &mut ServerDeck, team: &mut TeamRoundState) -> Result<Card, DomainError> {
    let mut red_threes = Vec::new();
    let dealt = loop {
        match deck.draw_card() {
            Some(card) if card.card_type() == CardType::RedThree => red_threes.push(card),
            Some(card) => break Some(card),
            None => break None,
        }
    };
    rules::add_red_three_cards_to_meld(&red_threes, team.red_three_meld_mut());
    dealt.ok_or_else(|| {
        DomainError::validation(ValidationKind::DeckExhausted, "deck exhausted while dealing")
    })
}

/// Seed the discard pile: draw until a natural card tops the pile. Red
/// threes belong to no team at this point and go back under the deck;
/// wilds and black threes stay in the pile, buried once a natural lands.
fn seed_discard_pile(deck: &mut ServerDeck) -> Result<(), DomainError> {
    loop {
        let card = deck.draw_card().ok_or_else(|| {
            DomainError::validation(
                ValidationKind::DeckExhausted,
                "deck exhausted while seeding the discard pile",
            )
        })?;
        match card.card_type() {
            CardType::RedThree => deck.place_at_bottom(card),
            CardType::Natural => {
                deck.discard_card(card);
                return Ok(());
            }
            CardType::Wild | CardType::BlackThree => deck.discard_card(card),
        }
    }
}
