//! Domain layer: pure game types and rule functions.

pub mod cards_types;
pub mod deck;
pub mod hand;
pub mod meld;
pub mod rules;
pub mod scoring;
pub mod team_state;

#[cfg(test)]
mod tests_melds;
#[cfg(test)]
mod tests_props_melds;
#[cfg(test)]
mod tests_scoring;

// Re-exports for ergonomics
pub use cards_types::{Card, CardColor, CardType, Rank};
pub use deck::ServerDeck;
pub use hand::Hand;
pub use meld::{BlackThreeMeld, CanastaType, Meld, RankMeld, RedThreeMeld};
pub use scoring::ScoreBreakdown;
pub use team_state::TeamRoundState;
