//! Per-round meld state for one team.

use crate::domain::cards_types::Rank;
use crate::domain::meld::{BlackThreeMeld, Meld, RankMeld, RedThreeMeld};

const RED_THREE_SLOT: usize = 0;
const BLACK_THREE_SLOT: usize = 1;
const RANK_SLOT_OFFSET: usize = 2;
const SLOT_COUNT: usize = 13;

/// All melds a team can hold in one round, in fixed slots: red threes,
/// black threes, then one slot per meldable rank (Four..Ace).
///
/// `Clone` is deep, so a cloned state is a fully independent snapshot.
#[derive(Debug, Clone)]
pub struct TeamRoundState {
    melds: Vec<Meld>,
}

impl Default for TeamRoundState {
    fn default() -> Self {
        Self::new()
    }
}

impl TeamRoundState {
    pub fn new() -> Self {
        let mut melds = Vec::with_capacity(SLOT_COUNT);
        melds.push(Meld::RedThree(RedThreeMeld::new()));
        melds.push(Meld::BlackThree(BlackThreeMeld::new()));
        for rank in Rank::MELDABLE {
            melds.push(Meld::Rank(RankMeld::new(rank)));
        }
        Self { melds }
    }

    fn rank_slot(rank: Rank) -> usize {
        let idx = Rank::MELDABLE
            .iter()
            .position(|&r| r == rank)
            .unwrap_or_else(|| panic!("rank {rank:?} has no meld slot"));
        RANK_SLOT_OFFSET + idx
    }

    pub fn rank_meld(&self, rank: Rank) -> &RankMeld {
        match &self.melds[Self::rank_slot(rank)] {
            Meld::Rank(m) => m,
            other => panic!("rank slot holds {other:?}"),
        }
    }

    pub fn rank_meld_mut(&mut self, rank: Rank) -> &mut RankMeld {
        match &mut self.melds[Self::rank_slot(rank)] {
            Meld::Rank(m) => m,
            other => panic!("rank slot holds {other:?}"),
        }
    }

    pub fn red_three_meld(&self) -> &RedThreeMeld {
        match &self.melds[RED_THREE_SLOT] {
            Meld::RedThree(m) => m,
            other => panic!("red three slot holds {other:?}"),
        }
    }

    pub fn red_three_meld_mut(&mut self) -> &mut RedThreeMeld {
        match &mut self.melds[RED_THREE_SLOT] {
            Meld::RedThree(m) => m,
            other => panic!("red three slot holds {other:?}"),
        }
    }

    pub fn black_three_meld(&self) -> &BlackThreeMeld {
        match &self.melds[BLACK_THREE_SLOT] {
            Meld::BlackThree(m) => m,
            other => panic!("black three slot holds {other:?}"),
        }
    }

    pub fn black_three_meld_mut(&mut self) -> &mut BlackThreeMeld {
        match &mut self.melds[BLACK_THREE_SLOT] {
            Meld::BlackThree(m) => m,
            other => panic!("black three slot holds {other:?}"),
        }
    }

    pub fn melds(&self) -> &[Meld] {
        &self.melds
    }

    /// True once the team has initialized any rank meld. Red and black
    /// three melds do not count toward the initial meld.
    pub fn has_made_initial_meld(&self) -> bool {
        Rank::MELDABLE
            .iter()
            .any(|&rank| self.rank_meld(rank).is_initialized())
    }

    pub fn canasta_count(&self) -> usize {
        self.melds.iter().filter(|m| m.is_canasta()).count()
    }

    /// Sum of all meld points, canasta bonuses included.
    pub fn meld_points(&self) -> i32 {
        self.melds.iter().map(Meld::points).sum()
    }

    pub fn reset(&mut self) {
        for meld in &mut self.melds {
            meld.reset();
        }
    }
}
