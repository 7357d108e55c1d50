//! Unit tests for round-end scoring.

use crate::domain::cards_types::{Card, CardColor, Rank};
use crate::domain::rules::GOING_OUT_BONUS;
use crate::domain::scoring::team_score_breakdown;
use crate::domain::team_state::TeamRoundState;

fn naturals(rank: Rank, n: usize) -> Vec<Card> {
    vec![Card::new(rank, CardColor::Red); n]
}

fn red_threes(n: usize) -> Vec<Card> {
    vec![Card::new(Rank::Three, CardColor::Red); n]
}

#[test]
fn breakdown_itemizes_canastas_cards_and_bonuses() {
    let mut team = TeamRoundState::new();
    // Natural canasta of kings, mixed canasta of fives.
    team.rank_meld_mut(Rank::King)
        .initialize(&naturals(Rank::King, 7));
    let mut fives = naturals(Rank::Five, 6);
    fives.push(Card::new(Rank::Two, CardColor::Red));
    team.rank_meld_mut(Rank::Five).initialize(&fives);
    // A plain meld of aces.
    team.rank_meld_mut(Rank::Ace)
        .initialize(&naturals(Rank::Ace, 3));
    team.red_three_meld_mut().initialize(&red_threes(2));

    let breakdown = team_score_breakdown(&team, 35, true);
    assert_eq!(breakdown.natural_canasta_bonus, 500);
    assert_eq!(breakdown.mixed_canasta_bonus, 300);
    // Kings 7*10, fives 6*5 + two 20, aces 3*20.
    assert_eq!(breakdown.melded_cards_points, 70 + 50 + 60);
    assert_eq!(breakdown.red_three_bonus_points, 200);
    assert_eq!(breakdown.hand_penalty_points, -35);
    assert_eq!(breakdown.going_out_bonus, GOING_OUT_BONUS);
    assert_eq!(
        breakdown.total(),
        500 + 300 + 180 + 200 - 35 + GOING_OUT_BONUS
    );
}

#[test]
fn red_three_bonus_negates_without_initial_meld() {
    let mut team = TeamRoundState::new();
    team.red_three_meld_mut().initialize(&red_threes(3));

    let breakdown = team_score_breakdown(&team, 120, false);
    assert_eq!(breakdown.red_three_bonus_points, -300);
    assert_eq!(breakdown.going_out_bonus, 0);
    assert_eq!(breakdown.total(), -300 - 120);
}

#[test]
fn four_red_threes_score_800() {
    let mut team = TeamRoundState::new();
    team.rank_meld_mut(Rank::Nine)
        .initialize(&naturals(Rank::Nine, 3));
    team.red_three_meld_mut().initialize(&red_threes(4));

    let breakdown = team_score_breakdown(&team, 0, false);
    assert_eq!(breakdown.red_three_bonus_points, 800);
}

#[test]
fn black_three_cards_count_as_melded_points() {
    let mut team = TeamRoundState::new();
    team.rank_meld_mut(Rank::Seven)
        .initialize(&naturals(Rank::Seven, 7));
    team.black_three_meld_mut().initialize(&[
        Card::new(Rank::Three, CardColor::Black),
        Card::new(Rank::Three, CardColor::Black),
        Card::new(Rank::Three, CardColor::Black),
    ]);

    let breakdown = team_score_breakdown(&team, 0, true);
    assert_eq!(breakdown.melded_cards_points, 7 * 5 + 3 * 5);
}
