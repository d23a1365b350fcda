//! Query error types.

use thiserror::Error;

use crate::datasource::DatasourceError;

/// Result type for query execution.
pub type QueryResult<T> = Result<T, QueryError>;

/// Errors surfaced by `run()`.
///
/// Usage errors reject immediately, before any datasource is pulled; a
/// predicate failure rejects the whole run with no partial results. There
/// is no internal recovery or retry anywhere.
#[derive(Debug, Error)]
pub enum QueryError {
    /// `run()` was invoked with an empty datasource repository.
    #[error("cannot run a query without a source; use from(...) to set one")]
    EmptySource,

    /// `run()` was invoked without a projection ever being established.
    #[error("cannot run a query without a projection; use select(...) to set one")]
    MissingProjection,

    /// A datasource rejected while entries were being pulled.
    #[error(transparent)]
    Datasource(#[from] DatasourceError),
}
