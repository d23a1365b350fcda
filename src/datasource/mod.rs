//! Datasource adapters and composition.
//!
//! A datasource wraps exactly one backing value (object, array, or document
//! root) captured at construction and exposes uniform asynchronous
//! enumeration. Joins are themselves datasources composing two others, so
//! anything accepting a datasource accepts a join.

mod array;
mod document;
mod errors;
mod joined;
mod object;
mod operators;
mod repository;
mod source;

use async_trait::async_trait;

use crate::element::{Element, Projection};
use crate::filter::Filter;

pub use array::ArrayDatasource;
pub use document::{
    global_document, set_global_document, DocumentDatasource, DocumentRoot, EmptyDocument,
};
pub use errors::{DatasourceError, DatasourceResult};
pub use joined::{join_identity, FullJoined, InnerJoined, JoinCondition, LeftJoined, RightJoined};
pub use object::ObjectDatasource;
pub use operators::{inner_join, join, left_join, right_join};
pub use repository::DatasourceRepository;
pub use source::{datasource, Source};

/// Uniform asynchronous enumeration over one backing value.
///
/// `filter` lets the source filter eagerly, as close to the backing value as
/// possible; `projection` is applied per entry after filtering. Both are
/// optional: no filter means every entry is yielded, no projection means
/// entries come back whole.
#[async_trait]
pub trait Datasource: Send + Sync {
    /// Enumerates the entries of this datasource.
    async fn entries(
        &self,
        filter: Option<&Filter>,
        projection: Option<&Projection>,
    ) -> DatasourceResult<Vec<Element>>;
}

/// Shared filtering/projection loop for adapters backed by a node sequence.
///
/// Predicates are awaited strictly in element order, one at a time, so
/// ordering-sensitive side effects in caller predicates stay deterministic.
async fn filter_entries<'a, I>(
    items: I,
    filter: Option<&Filter>,
    projection: Option<&Projection>,
) -> DatasourceResult<Vec<Element>>
where
    I: IntoIterator<Item = &'a Element>,
{
    let mut entries = Vec::new();
    for item in items {
        let keep = match filter {
            Some(filter) => filter.apply(item).await?,
            None => true,
        };
        if keep {
            entries.push(match projection {
                Some(projection) => projection.project(item),
                None => item.clone(),
            });
        }
    }
    Ok(entries)
}
