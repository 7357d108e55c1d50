//! Turn, round and game orchestration over the domain types.

pub mod game;
pub mod round;
pub mod turn;


pub use game::{GameManager, Player, Team};
pub use round::{team_for_seat, RoundManager, RoundPhase};
pub use turn::{MeldRequest, TurnActionResult, TurnActionStatus, TurnManager};
