//! Array datasource adapter.

use async_trait::async_trait;

use crate::element::{Element, Projection};
use crate::filter::Filter;

use super::errors::DatasourceResult;
use super::Datasource;

/// Wraps an array of elements; yields each accepted element in original
/// array order. Filtering is per-element and sequential: each predicate is
/// awaited before the next element is considered.
#[derive(Debug, Clone, Default)]
pub struct ArrayDatasource {
    source: Vec<Element>,
}

impl ArrayDatasource {
    /// Captures the backing array.
    pub fn new(source: Vec<Element>) -> Self {
        Self { source }
    }
}

#[async_trait]
impl Datasource for ArrayDatasource {
    async fn entries(
        &self,
        filter: Option<&Filter>,
        projection: Option<&Projection>,
    ) -> DatasourceResult<Vec<Element>> {
        super::filter_entries(&self.source, filter, projection).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::builtin::not_null;
    use crate::filter::{Filter, FilterError, FilterNode, Predicate};
    use serde_json::json;

    fn sample() -> ArrayDatasource {
        ArrayDatasource::new(vec![json!({"a": 1}), json!({"a": 2}), json!({"a": null})])
    }

    #[tokio::test]
    async fn test_entries_without_filter_preserve_order() {
        let entries = sample().entries(None, None).await.unwrap();
        assert_eq!(
            entries,
            vec![json!({"a": 1}), json!({"a": 2}), json!({"a": null})]
        );
    }

    #[tokio::test]
    async fn test_entries_filtered() {
        let filter = Filter::of(FilterNode::from(not_null("a")));
        let entries = sample().entries(Some(&filter), None).await.unwrap();
        assert_eq!(entries, vec![json!({"a": 1}), json!({"a": 2})]);
    }

    #[tokio::test]
    async fn test_async_predicate_awaited_per_element() {
        let filter = Filter::of(FilterNode::async_fn(|el| async move {
            el["a"] == json!(2)
        }));
        let entries = sample().entries(Some(&filter), None).await.unwrap();
        assert_eq!(entries, vec![json!({"a": 2})]);
    }

    #[tokio::test]
    async fn test_failing_predicate_rejects_enumeration() {
        let filter = Filter::of(FilterNode::from(Predicate::try_sync(|_| {
            Err(FilterError::predicate("boom"))
        })));
        let result = sample().entries(Some(&filter), None).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_entries_projected() {
        let ds = ArrayDatasource::new(vec![json!({"a": 1, "b": 2})]);
        let projection = Projection::new(["b"]);
        let entries = ds.entries(None, Some(&projection)).await.unwrap();
        assert_eq!(entries, vec![json!({"b": 2})]);
    }
}
