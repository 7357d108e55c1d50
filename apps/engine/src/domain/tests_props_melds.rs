//! Property tests for melds and hands.
//!
//! Properties tested:
//! - wild ≤ natural holds after every accepted initialize/add
//! - canasta status and type follow card counts exactly
//! - red three points are linear except at the four-card double
//! - a hand stays sorted under arbitrary insertions

use proptest::prelude::*;

use crate::domain::cards_types::{Card, CardColor, Rank};
use crate::domain::hand::Hand;
use crate::domain::meld::{CanastaType, RankMeld, RedThreeMeld};
use crate::domain::test_gens;

proptest! {
    /// Property: an accepted initialization plus accepted additions can
    /// never leave the meld with more wilds than naturals.
    #[test]
    fn prop_wild_never_exceeds_natural(
        rank in test_gens::meldable_rank(),
        init_naturals in 1usize..6,
        init_wilds in 0usize..6,
        added_wilds in 0usize..4,
    ) {
        let mut meld = RankMeld::new(rank);
        let mut cards: Vec<Card> = vec![Card::new(rank, CardColor::Red); init_naturals];
        cards.extend(vec![Card::new(Rank::Joker, CardColor::Red); init_wilds]);

        if meld.check_initialization(&cards).is_ok() {
            meld.initialize(&cards);
            prop_assert!(meld.wild_cards().len() <= meld.natural_cards().len());

            let wilds = vec![Card::new(Rank::Two, CardColor::Black); added_wilds];
            if !wilds.is_empty() && meld.check_cards_addition(&wilds).is_ok() {
                meld.add_cards(&wilds, false);
            }
            prop_assert!(meld.wild_cards().len() <= meld.natural_cards().len());
        } else {
            // The only rejection reachable here is the wild excess or
            // the minimum size.
            prop_assert!(init_wilds > init_naturals || cards.len() < 3);
        }
    }

    /// Property: canasta iff total cards ≥ 7; Mixed iff any wild present.
    #[test]
    fn prop_canasta_classification(
        rank in test_gens::meldable_rank(),
        naturals in 3usize..10,
        wilds in 0usize..3,
    ) {
        prop_assume!(wilds <= naturals);
        let mut cards: Vec<Card> = vec![Card::new(rank, CardColor::Black); naturals];
        cards.extend(vec![Card::new(Rank::Joker, CardColor::Red); wilds]);

        let mut meld = RankMeld::new(rank);
        meld.initialize(&cards);

        let total = naturals + wilds;
        prop_assert_eq!(meld.is_canasta(), total >= 7);
        match meld.canasta_type() {
            None => prop_assert!(total < 7),
            Some(CanastaType::Natural) => prop_assert!(total >= 7 && wilds == 0),
            Some(CanastaType::Mixed) => prop_assert!(total >= 7 && wilds > 0),
        }
    }

    /// Property: red three points are 100 per card, doubled only at four.
    #[test]
    fn prop_red_three_points(count in 1usize..=4) {
        let cards = vec![Card::new(Rank::Three, CardColor::Red); count];
        let mut meld = RedThreeMeld::new();
        meld.initialize(&cards);

        let expected = if count == 4 { 800 } else { 100 * count as i32 };
        prop_assert_eq!(meld.points(), expected);
    }

    /// Property: a hand is sorted after any insertion order.
    #[test]
    fn prop_hand_stays_sorted(
        cards in proptest::collection::vec(
            prop_oneof![test_gens::natural_card(), test_gens::wild_card()],
            0..20,
        ),
    ) {
        let mut hand = Hand::new();
        for card in cards {
            hand.add_card(card);
        }
        prop_assert!(hand.cards().windows(2).all(|w| w[0] <= w[1]));
    }
}
