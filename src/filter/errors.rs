//! Filter error types.

use thiserror::Error;

/// Result type for filter evaluation.
pub type FilterResult<T> = Result<T, FilterError>;

/// Errors surfaced while evaluating a filter chain.
///
/// The engine itself never fails here; the only source of failure is a
/// caller-supplied fallible predicate.
#[derive(Debug, Clone, Error)]
pub enum FilterError {
    /// A caller-supplied predicate reported a failure.
    #[error("predicate failed: {0}")]
    Predicate(String),
}

impl FilterError {
    /// Creates a predicate failure with the given reason.
    pub fn predicate(reason: impl Into<String>) -> Self {
        Self::Predicate(reason.into())
    }
}
