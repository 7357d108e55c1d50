//! Domain-level error type used across the rule engine.
//!
//! Only recoverable rule violations are represented here; invariant
//! violations (preconditions the engine itself guarantees) are asserted
//! and never surfaced to a player. The transport layer maps
//! `DomainError` into player-facing turn results.

use thiserror::Error;

/// Discriminates the kind of rule violation for callers that branch on it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    CardNotInHand,
    MeldAlreadyInitialized,
    MeldNotInitialized,
    WrongCardForMeld,
    TooFewCards,
    TooManyCards,
    TooManyWildCards,
    DuplicateMeldProposal,
    InvalidMeldRank,
    PileEmpty,
    PileFrozen,
    NoInitialMeld,
    MeldIsCanasta,
    DeckExhausted,
    RoundNotInProgress,
    InvalidPlayerCount,
    Other(String),
}

/// Central domain error type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum DomainError {
    /// Input/user validation or business rule violation.
    #[error("validation error: {1}")]
    Validation(ValidationKind, String),
}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }

    pub fn validation_other(detail: impl Into<String>) -> Self {
        let detail = detail.into();
        Self::Validation(ValidationKind::Other(detail.clone()), detail)
    }

    /// The human-readable detail carried by this error.
    pub fn detail(&self) -> &str {
        match self {
            DomainError::Validation(_, detail) => detail,
        }
    }

    pub fn kind(&self) -> &ValidationKind {
        match self {
            DomainError::Validation(kind, _) => kind,
        }
    }
}
