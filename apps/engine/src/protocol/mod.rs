//! Client-visible value types handed to the transport layer.

pub mod snapshots;

pub use snapshots::{ClientDeck, PlayerPublicInfo};
