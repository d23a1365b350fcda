//! Single-object datasource adapter.

use async_trait::async_trait;

use crate::element::{Element, Projection};
use crate::filter::Filter;

use super::errors::DatasourceResult;
use super::Datasource;

/// Wraps a single object; yields exactly one entry when the filter accepts
/// it (or no filter is given), zero otherwise.
#[derive(Debug, Clone)]
pub struct ObjectDatasource {
    source: Element,
}

impl ObjectDatasource {
    /// Captures the backing object. Its identity is fixed for the
    /// datasource's lifetime.
    pub fn new(source: Element) -> Self {
        Self { source }
    }
}

#[async_trait]
impl Datasource for ObjectDatasource {
    async fn entries(
        &self,
        filter: Option<&Filter>,
        projection: Option<&Projection>,
    ) -> DatasourceResult<Vec<Element>> {
        super::filter_entries([&self.source], filter, projection).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::builtin::prop_eq;
    use crate::filter::{and, FilterNode};
    use serde_json::json;

    #[tokio::test]
    async fn test_entries_without_filter() {
        let ds = ObjectDatasource::new(json!({"a": 1, "b": 2, "c": {"d": 1}}));
        let entries = ds.entries(None, None).await.unwrap();
        assert_eq!(entries, vec![json!({"a": 1, "b": 2, "c": {"d": 1}})]);
    }

    #[tokio::test]
    async fn test_entries_with_rejecting_filter() {
        let ds = ObjectDatasource::new(json!({"a": 1, "b": 2}));
        let rejecting = and([FilterNode::from(prop_eq("b", json!(1)))]);
        let entries = ds.entries(Some(&rejecting), None).await.unwrap();
        assert!(entries.is_empty());
    }

    #[tokio::test]
    async fn test_entries_with_dotted_path_filter() {
        let ds = ObjectDatasource::new(json!({"a": 1, "c": {"d": 1}}));
        let accepting = and([FilterNode::from(prop_eq("c.d", json!(1)))]);
        let entries = ds.entries(Some(&accepting), None).await.unwrap();
        assert_eq!(entries.len(), 1);
    }

    #[tokio::test]
    async fn test_entries_with_projection() {
        let ds = ObjectDatasource::new(json!({"a": 1, "b": 2}));
        let projection = Projection::new(["a"]);
        let entries = ds.entries(None, Some(&projection)).await.unwrap();
        assert_eq!(entries, vec![json!({"a": 1})]);
    }
}
