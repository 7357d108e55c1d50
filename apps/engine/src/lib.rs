#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

//! Server-authoritative rule engine for a partnership Canasta variant.
//!
//! The crate is pure, synchronous and in-memory: `domain` holds the card,
//! meld, deck and scoring types plus the stateless rule checks;
//! `game_flow` orchestrates turns, rounds and cumulative game scores; and
//! `protocol` carries the read-only snapshots a transport layer may send
//! to clients. Transport, sessions and persistence live outside this
//! crate.

pub mod domain;
pub mod errors;
pub mod game_flow;
pub mod protocol;


// Re-exports for public API
pub use domain::cards_types::{Card, CardColor, CardType, Rank};
pub use domain::deck::ServerDeck;
pub use domain::hand::Hand;
pub use domain::rules::GameOutcome;
pub use domain::scoring::ScoreBreakdown;
pub use domain::team_state::TeamRoundState;
pub use errors::{DomainError, ValidationKind};
pub use game_flow::game::{GameManager, Player, Team};
pub use game_flow::round::{RoundManager, RoundPhase};
pub use game_flow::turn::{MeldRequest, TurnActionResult, TurnActionStatus, TurnManager};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
