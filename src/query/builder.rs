//! The fluent query builder and executor.
//!
//! A query is assembled in two stages. The projection stage (`Select`)
//! fixes the output field set; `from(...)` transitions to the filterable
//! stage (`Query`), which accumulates sources, a filter, sort rules and
//! limit/offset before the terminal `run()`.

use tracing::{debug, trace};

use crate::datasource::{DatasourceRepository, Source};
use crate::element::{Element, Projection};
use crate::filter::{and, or, Filter, FilterNode, Predicate};
use crate::sort::{self, SortDirection, SortRule};

use super::errors::{QueryError, QueryResult};

/// Projection stage: output fields are fixed, sources are not yet known.
#[derive(Debug, Clone)]
pub struct Select {
    projection: Projection,
}

/// Creates a query, fixing the projected field paths.
///
/// `"*"` entries are stripped: an empty projection already means "all
/// fields". Duplicates are dropped, first occurrence wins.
pub fn select<I, S>(fields: I) -> Select
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Select {
        projection: Projection::new(fields),
    }
}

impl Select {
    /// Sets the sources for the query, transitioning to the filterable
    /// stage. Each raw source is normalized per [`Source`]'s dispatch.
    pub fn from<I>(self, sources: I) -> Query
    where
        I: IntoIterator,
        I::Item: Into<Source>,
    {
        let mut repository = DatasourceRepository::new();
        for source in sources {
            repository.add(source);
        }
        Query {
            repository,
            projection: Some(self.projection),
            filter: None,
            sort_rules: Vec::new(),
            result_limit: 0,
            result_offset: 0,
        }
    }
}

/// Filterable stage: transient builder state, fully assembled before
/// `run()` and reusable afterwards.
#[derive(Default)]
pub struct Query {
    repository: DatasourceRepository,
    projection: Option<Projection>,
    filter: Option<Filter>,
    sort_rules: Vec<SortRule>,
    result_limit: usize,
    result_offset: usize,
}

impl Query {
    /// Appends one more source to the repository.
    pub fn source(mut self, source: impl Into<Source>) -> Self {
        self.repository.add(source);
        self
    }

    /// Appends one more source under an alias.
    pub fn source_aliased(mut self, source: impl Into<Source>, alias: impl Into<String>) -> Self {
        self.repository.add_aliased(source, alias);
        self
    }

    /// Sets the filter from a single condition. A bare predicate is wrapped
    /// as an intersection chain of one; a full filter is taken as-is.
    pub fn where_(mut self, condition: impl Into<FilterNode>) -> Self {
        self.filter = Some(Filter::of(condition.into()));
        self
    }

    /// Sets the filter from a plain synchronous closure.
    pub fn where_fn<F>(self, predicate: F) -> Self
    where
        F: Fn(&Element) -> bool + Send + Sync + 'static,
    {
        self.where_(Predicate::sync(predicate))
    }

    /// Sets the filter from several conditions combined with AND.
    pub fn where_all<I>(mut self, conditions: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<FilterNode>,
    {
        self.filter = Some(and(conditions));
        self
    }

    /// Intersects the existing filter with another condition. Without an
    /// existing filter this behaves as `where_`.
    pub fn and(mut self, condition: impl Into<FilterNode>) -> Self {
        self.filter = Some(match self.filter.take() {
            Some(existing) => and([FilterNode::from(existing), condition.into()]),
            None => Filter::of(condition.into()),
        });
        self
    }

    /// Intersects the existing filter with a plain synchronous closure.
    pub fn and_fn<F>(self, predicate: F) -> Self
    where
        F: Fn(&Element) -> bool + Send + Sync + 'static,
    {
        self.and(Predicate::sync(predicate))
    }

    /// Unions the existing filter with another condition. Without an
    /// existing filter the condition becomes a union chain of one.
    pub fn or(mut self, condition: impl Into<FilterNode>) -> Self {
        self.filter = Some(match self.filter.take() {
            Some(existing) => or([FilterNode::from(existing), condition.into()]),
            None => or([condition.into()]),
        });
        self
    }

    /// Unions the existing filter with a plain synchronous closure.
    pub fn or_fn<F>(self, predicate: F) -> Self
    where
        F: Fn(&Element) -> bool + Send + Sync + 'static,
    {
        self.or(Predicate::sync(predicate))
    }

    /// Appends a sort rule; rules apply in call order, each as a full
    /// re-sort pass over the accumulated results.
    pub fn order_by(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.sort_rules.push(SortRule {
            field: field.into(),
            direction,
        });
        self
    }

    /// Caps the number of returned entries. Zero means unlimited.
    pub fn limit(mut self, n: usize) -> Self {
        self.result_limit = n;
        self
    }

    /// Skips the first `n` entries of the accumulated result.
    pub fn offset(mut self, n: usize) -> Self {
        self.result_offset = n;
        self
    }

    /// Executes the query: pulls all entries from every source (each source
    /// applying the filter as close to the backing value as possible),
    /// concatenates, applies each sort rule as an independent re-sort pass,
    /// slices by offset/limit, and projects the survivors.
    ///
    /// The offset/limit slice preserves a historical quirk: with an offset
    /// but no limit, the final element of the accumulated list is dropped.
    pub async fn run(&self) -> QueryResult<Vec<Element>> {
        if self.repository.is_empty() {
            return Err(QueryError::EmptySource);
        }
        let projection = self
            .projection
            .as_ref()
            .ok_or(QueryError::MissingProjection)?;

        let mut results = Vec::new();
        for datasource in self.repository.merge() {
            let entries = datasource.entries(self.filter.as_ref(), None).await?;
            trace!(count = entries.len(), "pulled datasource entries");
            results.extend(entries);
        }

        for rule in &self.sort_rules {
            sort::sort(&mut results, rule);
            trace!(field = %rule.field, "applied sort pass");
        }

        if self.result_limit != 0 || self.result_offset != 0 {
            let len = results.len();
            let end = if self.result_limit == 0 {
                len.saturating_sub(1)
            } else {
                self.result_offset.saturating_add(self.result_limit).min(len)
            };
            let start = self.result_offset.min(end);
            results = results[start..end].to_vec();
        }

        debug!(rows = results.len(), "query returned");
        Ok(results.iter().map(|entry| projection.project(entry)).collect())
    }

    /// JSON summary of the assembled query state.
    pub fn describe(&self) -> String {
        serde_json::json!({
            "projection": self.projection.as_ref().map(Projection::fields),
            "sources": self.repository.len(),
            "filtered": self.filter.is_some(),
            "sort_rules": self.sort_rules,
            "limit": self.result_limit,
            "offset": self.result_offset,
        })
        .to_string()
    }
}
