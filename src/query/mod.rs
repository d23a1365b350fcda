//! Query builder and executor.
//!
//! The user-facing fluent API gluing projection, datasources, filter, sort
//! rules and limit/offset into one asynchronous execution yielding a finite
//! materialized result list.

mod builder;
mod errors;

pub use builder::{select, Query, Select};
pub use errors::{QueryError, QueryResult};
