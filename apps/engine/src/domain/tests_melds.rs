//! Unit tests for the meld types.

use crate::domain::cards_types::{Card, CardColor, Rank};
use crate::domain::meld::{
    BlackThreeMeld, CanastaType, RankMeld, RedThreeMeld, MIXED_CANASTA_BONUS,
    NATURAL_CANASTA_BONUS,
};
use crate::errors::domain::ValidationKind;

fn natural(rank: Rank) -> Card {
    Card::new(rank, CardColor::Red)
}

fn naturals(rank: Rank, n: usize) -> Vec<Card> {
    vec![natural(rank); n]
}

fn joker() -> Card {
    Card::new(Rank::Joker, CardColor::Red)
}

fn two() -> Card {
    Card::new(Rank::Two, CardColor::Black)
}

fn red_three() -> Card {
    Card::new(Rank::Three, CardColor::Red)
}

fn black_three() -> Card {
    Card::new(Rank::Three, CardColor::Black)
}

#[test]
fn rank_meld_rejects_fewer_than_three_cards() {
    let meld = RankMeld::new(Rank::Seven);
    let err = meld.check_initialization(&naturals(Rank::Seven, 2)).unwrap_err();
    assert_eq!(*err.kind(), ValidationKind::TooFewCards);
}

#[test]
fn rank_meld_rejects_foreign_ranks_and_red_threes() {
    let meld = RankMeld::new(Rank::Seven);
    let mut cards = naturals(Rank::Seven, 2);
    cards.push(natural(Rank::Eight));
    let err = meld.check_initialization(&cards).unwrap_err();
    assert_eq!(*err.kind(), ValidationKind::WrongCardForMeld);

    let mut cards = naturals(Rank::Seven, 2);
    cards.push(red_three());
    assert!(meld.check_initialization(&cards).is_err());
}

#[test]
fn rank_meld_enforces_wild_limit() {
    let meld = RankMeld::new(Rank::Nine);
    // 2 naturals + 2 wilds: allowed.
    let cards = vec![natural(Rank::Nine), natural(Rank::Nine), joker(), two()];
    assert!(meld.check_initialization(&cards).is_ok());
    // 1 natural + 2 wilds: wilds outnumber naturals.
    let cards = vec![natural(Rank::Nine), joker(), two()];
    let err = meld.check_initialization(&cards).unwrap_err();
    assert_eq!(*err.kind(), ValidationKind::TooManyWildCards);
}

#[test]
fn rank_meld_wild_limit_applies_across_additions() {
    let mut meld = RankMeld::new(Rank::Nine);
    meld.initialize(&[natural(Rank::Nine), natural(Rank::Nine), joker()]);
    // One more wild would make it 2 wilds vs 2 naturals: still legal.
    assert!(meld.check_cards_addition(&[two()]).is_ok());
    meld.add_cards(&[two()], false);
    // A third wild against two naturals is not.
    let err = meld.check_cards_addition(&[joker()]).unwrap_err();
    assert_eq!(*err.kind(), ValidationKind::TooManyWildCards);
}

#[test]
fn rank_meld_becomes_canasta_at_seven_cards() {
    let mut meld = RankMeld::new(Rank::King);
    meld.initialize(&naturals(Rank::King, 6));
    assert!(!meld.is_canasta());
    assert_eq!(meld.canasta_type(), None);

    meld.add_cards(&naturals(Rank::King, 1), false);
    assert!(meld.is_canasta());
    assert_eq!(meld.canasta_type(), Some(CanastaType::Natural));
    assert_eq!(meld.points(), 7 * 10 + NATURAL_CANASTA_BONUS);
}

#[test]
fn canasta_with_wilds_is_mixed() {
    let mut meld = RankMeld::new(Rank::Five);
    meld.initialize(&naturals(Rank::Five, 6));
    meld.add_cards(&[joker()], false);
    assert_eq!(meld.canasta_type(), Some(CanastaType::Mixed));
    assert_eq!(meld.points(), 6 * 5 + 50 + MIXED_CANASTA_BONUS);
}

#[test]
fn rank_meld_revert_restores_cards_and_points() {
    let mut meld = RankMeld::new(Rank::Queen);
    meld.initialize(&naturals(Rank::Queen, 3));
    let points_before = meld.points();

    meld.add_cards(&[natural(Rank::Queen), two()], true);
    assert_eq!(meld.card_count(), 5);

    meld.revert_add_cards();
    assert_eq!(meld.card_count(), 3);
    assert_eq!(meld.points(), points_before);
    assert!(meld.wild_cards().is_empty());

    // The snapshot is single-shot.
    meld.revert_add_cards();
    assert_eq!(meld.card_count(), 3);
}

#[test]
fn rank_meld_reset_returns_to_uninitialized() {
    let mut meld = RankMeld::new(Rank::Four);
    meld.initialize(&naturals(Rank::Four, 3));
    meld.reset();
    assert!(!meld.is_initialized());
    assert_eq!(meld.card_count(), 0);
    assert_eq!(meld.points(), 0);
    assert_eq!(meld.rank(), Rank::Four);
}

#[test]
fn rank_meld_clone_is_independent() {
    let mut meld = RankMeld::new(Rank::Ten);
    meld.initialize(&naturals(Rank::Ten, 3));
    let snapshot = meld.clone();
    meld.add_cards(&naturals(Rank::Ten, 4), false);

    assert_eq!(snapshot.card_count(), 3);
    assert_eq!(snapshot.points(), 3 * 10);
    assert!(!snapshot.is_canasta());
}

#[test]
fn double_initialization_is_rejected() {
    let mut meld = RankMeld::new(Rank::Six);
    meld.initialize(&naturals(Rank::Six, 3));
    let err = meld.check_initialization(&naturals(Rank::Six, 3)).unwrap_err();
    assert_eq!(*err.kind(), ValidationKind::MeldAlreadyInitialized);
}

#[test]
fn red_three_meld_doubles_only_at_four() {
    let mut meld = RedThreeMeld::new();
    meld.initialize(&[red_three()]);
    assert_eq!(meld.points(), 100);

    meld.add_cards(&[red_three(), red_three()], false);
    assert_eq!(meld.points(), 300);

    meld.add_cards(&[red_three()], false);
    assert_eq!(meld.points(), 800);
}

#[test]
fn red_three_meld_caps_at_four_cards() {
    let mut meld = RedThreeMeld::new();
    meld.initialize(&[red_three(), red_three(), red_three(), red_three()]);
    let err = meld.check_cards_addition(&[red_three()]).unwrap_err();
    assert_eq!(*err.kind(), ValidationKind::TooManyCards);
}

#[test]
fn red_three_meld_rejects_other_cards() {
    let meld = RedThreeMeld::new();
    let err = meld.check_initialization(&[black_three()]).unwrap_err();
    assert_eq!(*err.kind(), ValidationKind::WrongCardForMeld);
}

#[test]
fn black_three_meld_takes_three_or_four_cards_once() {
    let mut meld = BlackThreeMeld::new();
    assert!(meld.check_initialization(&[black_three(); 2]).is_err());
    assert!(meld.check_initialization(&vec![black_three(); 5]).is_err());

    meld.initialize(&[black_three(), black_three(), black_three()]);
    assert_eq!(meld.points(), 15);

    // Additions are an error, not silently ignored.
    let err = meld.check_cards_addition(&[black_three()]).unwrap_err();
    assert_eq!(*err.kind(), ValidationKind::WrongCardForMeld);
}
