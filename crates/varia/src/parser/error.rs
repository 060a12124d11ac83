//! Validation error types.

use thiserror::Error;

/// A template failed validation.
///
/// Validation runs before substitution; the substitution passes themselves
/// never fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A `}` without an open group, or a `{` that is never closed.
    #[error("mismatched braces at {line}:{column}")]
    MismatchedBraces { line: usize, column: usize },

    /// A group with several alternatives where one of them is empty.
    #[error("empty spintax option at {line}:{column}")]
    EmptyAlternative { line: usize, column: usize },
}

impl ValidationError {
    /// Returns the 1-based `(line, column)` the error points at.
    pub fn position(&self) -> (usize, usize) {
        match self {
            ValidationError::MismatchedBraces { line, column }
            | ValidationError::EmptyAlternative { line, column } => (*line, *column),
        }
    }
}
