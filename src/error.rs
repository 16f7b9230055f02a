//! Error type shared by every module.
//!
//! All failures in this crate are programming or configuration errors:
//! there is nothing to retry. They surface to the caller immediately.

use crate::solution::SolutionKind;
use thiserror::Error;

/// Errors raised while configuring or running a search.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SearchError {
    /// Invalid hyperparameter, unknown strategy selector, or malformed
    /// problem instance. Raised at construction time.
    #[error("configuration error: {0}")]
    Config(String),

    /// A solution (or operator) of one encoding was handed to a component
    /// that only understands another.
    #[error("type mismatch: expected {expected} solution, got {found}")]
    TypeMismatch {
        expected: SolutionKind,
        found: SolutionKind,
    },

    /// Solution length does not match the problem dimension.
    #[error("dimension mismatch: expected {expected}, got {found}")]
    DimensionMismatch { expected: usize, found: usize },

    /// The operation is not defined for this solution kind.
    #[error("unsupported operation: {0}")]
    Unsupported(String),
}

impl SearchError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        SearchError::Config(msg.into())
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, SearchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = SearchError::config("unknown crossover 'twopoint'");
        assert_eq!(
            err.to_string(),
            "configuration error: unknown crossover 'twopoint'"
        );

        let err = SearchError::TypeMismatch {
            expected: SolutionKind::Binary,
            found: SolutionKind::Real,
        };
        assert_eq!(
            err.to_string(),
            "type mismatch: expected binary solution, got real"
        );
    }
}
