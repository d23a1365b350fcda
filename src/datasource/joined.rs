//! Join datasources.
//!
//! Each join composes a left and a right datasource plus a binary match
//! condition into a derived datasource. Joins are pure: every `entries`
//! call recomputes from the children's current entries. Both children are
//! awaited concurrently with the filter passed through, so each side
//! filters independently BEFORE the join combines them; the combination
//! itself is synchronous and deterministic.
//!
//! Merged rows are produced by clone-then-shallow-merge with right-hand
//! fields overriding left-hand fields; no original entry is mutated.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use futures_util::future::try_join;
use tracing::trace;

use crate::element::{self, Element, Projection};
use crate::filter::Filter;

use super::errors::DatasourceResult;
use super::source::Source;
use super::Datasource;

/// Binary match condition deciding whether a (left, right) pair joins.
pub type JoinCondition = Arc<dyn Fn(&Element, &Element) -> bool + Send + Sync>;

/// The default join condition: every pair matches, yielding the full cross
/// product for inner/full joins.
pub fn join_identity(_left: &Element, _right: &Element) -> bool {
    true
}

macro_rules! join_constructors {
    ($name:ident) => {
        impl $name {
            /// Joins two sources with the default (always matching)
            /// condition.
            pub fn new(left: impl Into<Source>, right: impl Into<Source>) -> Self {
                Self::on(left, right, join_identity)
            }

            /// Joins two sources on the given match condition.
            pub fn on<P>(left: impl Into<Source>, right: impl Into<Source>, condition: P) -> Self
            where
                P: Fn(&Element, &Element) -> bool + Send + Sync + 'static,
            {
                Self {
                    left: left.into().into_datasource(),
                    right: right.into().into_datasource(),
                    condition: Arc::new(condition),
                }
            }
        }
    };
}

/// Inner join: the cartesian product of matching (left, right) pairs, each
/// emitted as the shallow merge of the pair.
pub struct InnerJoined {
    left: Arc<dyn Datasource>,
    right: Arc<dyn Datasource>,
    condition: JoinCondition,
}

join_constructors!(InnerJoined);

#[async_trait]
impl Datasource for InnerJoined {
    async fn entries(
        &self,
        filter: Option<&Filter>,
        _projection: Option<&Projection>,
    ) -> DatasourceResult<Vec<Element>> {
        let (lh, rh) = try_join(
            self.left.entries(filter, None),
            self.right.entries(filter, None),
        )
        .await?;

        let mut items = Vec::new();
        for l_item in &lh {
            for r_item in &rh {
                if (self.condition)(l_item, r_item) {
                    items.push(element::merge(l_item, r_item));
                }
            }
        }
        trace!(rows = items.len(), "inner join combined");
        Ok(items)
    }
}

/// Full join: every matching pair merged, plus every unmatched left entry
/// and every unmatched right entry emitted alone.
///
/// Matches are tracked by position index, since entries need not be
/// comparable by identity.
pub struct FullJoined {
    left: Arc<dyn Datasource>,
    right: Arc<dyn Datasource>,
    condition: JoinCondition,
}

join_constructors!(FullJoined);

#[async_trait]
impl Datasource for FullJoined {
    async fn entries(
        &self,
        filter: Option<&Filter>,
        _projection: Option<&Projection>,
    ) -> DatasourceResult<Vec<Element>> {
        let (lh, rh) = try_join(
            self.left.entries(filter, None),
            self.right.entries(filter, None),
        )
        .await?;

        let mut items = Vec::new();
        let mut matched_left: HashSet<usize> = HashSet::new();
        let mut matched_right: HashSet<usize> = HashSet::new();

        for (i, l_item) in lh.iter().enumerate() {
            for (j, r_item) in rh.iter().enumerate() {
                if (self.condition)(l_item, r_item) {
                    items.push(element::merge(l_item, r_item));
                    matched_left.insert(i);
                    matched_right.insert(j);
                }
            }
        }

        for (i, l_item) in lh.iter().enumerate() {
            if !matched_left.contains(&i) {
                items.push(l_item.clone());
            }
        }
        for (j, r_item) in rh.iter().enumerate() {
            if !matched_right.contains(&j) {
                items.push(r_item.clone());
            }
        }

        trace!(rows = items.len(), "full join combined");
        Ok(items)
    }
}

/// Left join: one merged row per (left, right) match; a left entry matching
/// nothing is emitted alone. Right entries with no match are dropped.
pub struct LeftJoined {
    left: Arc<dyn Datasource>,
    right: Arc<dyn Datasource>,
    condition: JoinCondition,
}

join_constructors!(LeftJoined);

#[async_trait]
impl Datasource for LeftJoined {
    async fn entries(
        &self,
        filter: Option<&Filter>,
        _projection: Option<&Projection>,
    ) -> DatasourceResult<Vec<Element>> {
        let (lh, rh) = try_join(
            self.left.entries(filter, None),
            self.right.entries(filter, None),
        )
        .await?;

        let mut items = Vec::new();
        for l_item in &lh {
            let mut matched = false;
            for r_item in &rh {
                if (self.condition)(l_item, r_item) {
                    items.push(element::merge(l_item, r_item));
                    matched = true;
                }
            }
            if !matched {
                items.push(l_item.clone());
            }
        }

        trace!(rows = items.len(), "left join combined");
        Ok(items)
    }
}

/// Right join: mirror of the left join, anchored on the right datasource.
/// Left entries with no match are dropped; merged rows still take
/// right-hand fields over left-hand fields.
pub struct RightJoined {
    left: Arc<dyn Datasource>,
    right: Arc<dyn Datasource>,
    condition: JoinCondition,
}

join_constructors!(RightJoined);

#[async_trait]
impl Datasource for RightJoined {
    async fn entries(
        &self,
        filter: Option<&Filter>,
        _projection: Option<&Projection>,
    ) -> DatasourceResult<Vec<Element>> {
        let (lh, rh) = try_join(
            self.left.entries(filter, None),
            self.right.entries(filter, None),
        )
        .await?;

        let mut items = Vec::new();
        for r_item in &rh {
            let mut matched = false;
            for l_item in &lh {
                if (self.condition)(l_item, r_item) {
                    items.push(element::merge(l_item, r_item));
                    matched = true;
                }
            }
            if !matched {
                items.push(r_item.clone());
            }
        }

        trace!(rows = items.len(), "right join combined");
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn left_rows() -> Vec<Element> {
        vec![json!({"id": 1}), json!({"id": 2}), json!({"id": 3})]
    }

    fn right_rows() -> Vec<Element> {
        vec![
            json!({"fk": 1, "data": "first"}),
            json!({"fk": 2, "data": "second"}),
        ]
    }

    fn id_matches_fk(l: &Element, r: &Element) -> bool {
        l["id"] == r["fk"]
    }

    #[tokio::test]
    async fn test_inner_join_matching_pairs() {
        let joined = InnerJoined::on(left_rows(), right_rows(), id_matches_fk);
        let rows = joined.entries(None, None).await.unwrap();
        assert_eq!(
            rows,
            vec![
                json!({"id": 1, "fk": 1, "data": "first"}),
                json!({"id": 2, "fk": 2, "data": "second"}),
            ]
        );
    }

    #[tokio::test]
    async fn test_inner_join_no_intersection() {
        let joined = InnerJoined::on(
            vec![json!({"id": 1})],
            vec![json!({"fk": 2})],
            id_matches_fk,
        );
        assert!(joined.entries(None, None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_inner_join_default_is_cross_product() {
        let joined = InnerJoined::new(left_rows(), right_rows());
        let rows = joined.entries(None, None).await.unwrap();
        assert_eq!(rows.len(), 6);
    }

    #[tokio::test]
    async fn test_full_join_keeps_unmatched_sides() {
        let joined = FullJoined::on(left_rows(), right_rows(), id_matches_fk);
        let rows = joined.entries(None, None).await.unwrap();
        // 2 matched pairs + 1 unmatched left + 0 unmatched right
        assert_eq!(
            rows,
            vec![
                json!({"id": 1, "fk": 1, "data": "first"}),
                json!({"id": 2, "fk": 2, "data": "second"}),
                json!({"id": 3}),
            ]
        );
    }

    #[tokio::test]
    async fn test_left_join_keeps_bare_left() {
        let joined = LeftJoined::on(left_rows(), right_rows(), id_matches_fk);
        let rows = joined.entries(None, None).await.unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2], json!({"id": 3}));
    }

    #[tokio::test]
    async fn test_right_join_drops_unmatched_left() {
        let joined = RightJoined::on(left_rows(), right_rows(), id_matches_fk);
        let rows = joined.entries(None, None).await.unwrap();
        assert_eq!(
            rows,
            vec![
                json!({"id": 1, "fk": 1, "data": "first"}),
                json!({"id": 2, "fk": 2, "data": "second"}),
            ]
        );
    }

    #[tokio::test]
    async fn test_merge_right_overrides_left() {
        let joined = InnerJoined::new(
            vec![json!({"k": "left", "only_left": 1})],
            vec![json!({"k": "right"})],
        );
        let rows = joined.entries(None, None).await.unwrap();
        assert_eq!(rows, vec![json!({"k": "right", "only_left": 1})]);
    }

    #[tokio::test]
    async fn test_join_originals_not_mutated() {
        let left = vec![json!({"id": 1})];
        let right = vec![json!({"fk": 1, "data": "x"})];
        let joined = InnerJoined::on(left.clone(), right.clone(), id_matches_fk);
        let _ = joined.entries(None, None).await.unwrap();
        let again = joined.entries(None, None).await.unwrap();
        assert_eq!(again, vec![json!({"id": 1, "fk": 1, "data": "x"})]);
    }
}
