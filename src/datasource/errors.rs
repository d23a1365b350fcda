//! Datasource error types.

use thiserror::Error;

use crate::filter::FilterError;

/// Result type for datasource enumeration.
pub type DatasourceResult<T> = Result<T, DatasourceError>;

/// Errors surfaced while enumerating a datasource.
///
/// Adapters never fail of their own accord; the only failure mode is a
/// caller-supplied predicate rejecting during eager filtering.
#[derive(Debug, Error)]
pub enum DatasourceError {
    /// A filter predicate failed while entries were being enumerated.
    #[error(transparent)]
    Filter(#[from] FilterError),
}
