//! sequel - SQL-like queries over heterogeneous in-memory data
//!
//! An in-process engine for projecting, filtering, sorting, limiting and
//! joining plain objects, arrays of objects and document-tree node sets,
//! behind one asynchronous execution pipeline:
//!
//! ```no_run
//! use sequel::{select, SortDirection};
//! use serde_json::json;
//!
//! # async fn demo() -> Result<(), sequel::QueryError> {
//! let people = json!([
//!     {"name": "Alice", "age": 34},
//!     {"name": "Bob", "age": 27},
//! ]);
//!
//! let adults = select(["name"])
//!     .from([people])
//!     .where_fn(|el| el["age"].as_i64().unwrap_or(0) >= 30)
//!     .order_by("name", SortDirection::Ascending)
//!     .run()
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod datasource;
pub mod element;
pub mod filter;
pub mod query;
pub mod sort;

pub use datasource::{
    datasource, global_document, inner_join, join, join_identity, left_join, right_join,
    set_global_document, ArrayDatasource, Datasource, DatasourceError, DatasourceRepository,
    DatasourceResult, DocumentDatasource, DocumentRoot, EmptyDocument, FullJoined, InnerJoined,
    JoinCondition, LeftJoined, ObjectDatasource, RightJoined, Source,
};
pub use element::{Element, Projection};
pub use filter::{
    and, filter, identity, not, or, ChainOperator, Filter, FilterError, FilterNode, FilterResult,
    Predicate,
};
pub use query::{select, Query, QueryError, QueryResult, Select};
pub use sort::{sort, SortDirection, SortRule};
