//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Reasons an identifier could not be produced.
///
/// `Clone` because a generator built with bad parameters hands the same
/// error back on every call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdError {
    #[error("alphabet must contain exactly 64 unique symbols, got {unique} unique of {len}")]
    InvalidAlphabet { len: usize, unique: usize },

    #[error("worker must be in 0..=31, got {0}")]
    InvalidWorker(u8),

    #[error("id sequence exhausted")]
    SequenceExhausted,
}

/// Domain errors represent failures of the outline parse itself.
///
/// Malformed indentation is never an error; the only way a parse fails is
/// when no identifier can be produced for an entry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("identifier generation failed: {0}")]
    IdGeneration(#[from] IdError),
}

/// Result type for tree operations.
pub type TreeResult<T> = Result<T, DomainError>;
