//! Error types for the expression compiler

use lumen_nfa::NfaError;
use thiserror::Error;

/// Expression construction and compilation error type
#[derive(Debug, Error)]
pub enum LpeError {
    /// Bounded repetition constructed with max < min
    #[error("invalid repetition bounds {{{min},{max}}}: max must be >= min")]
    InvalidBounds { min: u32, max: u32 },

    /// Alternation constructed with no children
    #[error("alternation requires at least one child expression")]
    EmptyAlternation,

    /// Failure raised by the automaton collaborator, passed through unchanged
    #[error(transparent)]
    Automata(#[from] NfaError),
}

/// Result type for expression operations
pub type LpeResult<T> = Result<T, LpeError>;
