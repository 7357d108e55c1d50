//! Round-end score calculation.

use serde::{Deserialize, Serialize};

use crate::domain::cards_types::Rank;
use crate::domain::meld::{CanastaType, MIXED_CANASTA_BONUS, NATURAL_CANASTA_BONUS};
use crate::domain::rules::GOING_OUT_BONUS;
use crate::domain::team_state::TeamRoundState;

/// One team's round result, itemized the way it is reported to players.
/// All fields are signed contributions; `total()` is their plain sum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub natural_canasta_bonus: i32,
    pub mixed_canasta_bonus: i32,
    pub melded_cards_points: i32,
    pub red_three_bonus_points: i32,
    pub hand_penalty_points: i32,
    pub going_out_bonus: i32,
}

impl ScoreBreakdown {
    pub fn total(&self) -> i32 {
        self.natural_canasta_bonus
            + self.mixed_canasta_bonus
            + self.melded_cards_points
            + self.red_three_bonus_points
            + self.hand_penalty_points
            + self.going_out_bonus
    }
}

/// Itemize one team's round score.
///
/// `hand_penalty` is the (non-negative) sum of card points the team's
/// players still hold; it enters the breakdown negated. The red three
/// bonus also turns negative when the team never made an initial meld.
pub fn team_score_breakdown(
    team: &TeamRoundState,
    hand_penalty: i32,
    went_out: bool,
) -> ScoreBreakdown {
    let mut natural_bonus = 0;
    let mut mixed_bonus = 0;
    let mut melded_points = 0;
    for &rank in &Rank::MELDABLE {
        let meld = team.rank_meld(rank);
        match meld.canasta_type() {
            Some(CanastaType::Natural) => natural_bonus += NATURAL_CANASTA_BONUS,
            Some(CanastaType::Mixed) => mixed_bonus += MIXED_CANASTA_BONUS,
            None => {}
        }
        // Card points only; the canasta bonus is itemized above.
        melded_points += meld
            .natural_cards()
            .iter()
            .chain(meld.wild_cards().iter())
            .map(|c| c.points())
            .sum::<i32>();
    }
    melded_points += team.black_three_meld().points();

    let mut red_three_bonus = team.red_three_meld().points();
    if !team.has_made_initial_meld() {
        red_three_bonus = -red_three_bonus;
    }

    ScoreBreakdown {
        natural_canasta_bonus: natural_bonus,
        mixed_canasta_bonus: mixed_bonus,
        melded_cards_points: melded_points,
        red_three_bonus_points: red_three_bonus,
        hand_penalty_points: -hand_penalty,
        going_out_bonus: if went_out { GOING_OUT_BONUS } else { 0 },
    }
}
