//! Error types for C-finite sequence operations.

use thiserror::Error;

/// Errors raised while building, indexing, guessing or combining sequences.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CFiniteError {
    /// The generating function is not over the rationals.
    #[error("o.g.f. base not rational: {0}")]
    InvalidDomain(String),

    /// The generating function involves more than one variable.
    #[error("multidimensional o.g.f. not implemented: {0}")]
    UnsupportedDimension(String),

    /// Numerator or denominator is not a polynomial.
    #[error("numerator and denominator must be polynomials: {0}")]
    TypeMismatch(String),

    /// A coefficient or start value list has the wrong shape.
    #[error("wrong type for {0}")]
    InvalidArgumentType(String),

    /// An index is neither an integer nor a slice.
    #[error("invalid index: {0}")]
    InvalidIndexType(String),

    /// Too few samples for the requested guessing strategy.
    #[error("sequence too short for guessing with {strategy}: need at least {required} terms, got {actual}")]
    SampleTooShort {
        /// Name of the strategy.
        strategy: &'static str,
        /// Minimum number of samples.
        required: usize,
        /// Number of samples supplied.
        actual: usize,
    },

    /// Division by the zero sequence or a zero denominator.
    #[error("division by zero")]
    DivisionByZero,

    /// The lattice reduction session failed to start or answer.
    #[error("lattice oracle failure: {0}")]
    Oracle(String),
}

/// Result type for C-finite sequence operations.
pub type Result<T> = std::result::Result<T, CFiniteError>;
