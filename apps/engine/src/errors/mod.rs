//! Error handling for the Canasta rule engine.

pub mod domain;

pub use domain::{DomainError, ValidationKind};
