//! The composable boolean filter chain.
//!
//! A `Filter` is an immutable node in a boolean expression tree: a chain
//! operator (intersection or union), a negation flag, and an ordered list of
//! children, each either a nested filter or a bare predicate. Do not build
//! `Filter` values by hand; use `filter`, `and`, `or` and `not`.

use std::fmt;

use futures_util::future::{BoxFuture, FutureExt};

use crate::element::Element;

use super::errors::FilterResult;
use super::predicate::Predicate;

/// The operator folding a chain's children: logical AND (intersection) or
/// logical OR (union).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainOperator {
    Intersection,
    Union,
}

/// One child of a filter chain: a nested filter or a bare predicate.
#[derive(Clone, Debug)]
pub enum FilterNode {
    Filter(Filter),
    Predicate(Predicate),
}

impl FilterNode {
    /// Wraps an infallible synchronous closure as a predicate node.
    pub fn sync<F>(predicate: F) -> Self
    where
        F: Fn(&Element) -> bool + Send + Sync + 'static,
    {
        Self::Predicate(Predicate::sync(predicate))
    }

    /// Wraps an infallible asynchronous closure as a predicate node.
    pub fn async_fn<F, Fut>(predicate: F) -> Self
    where
        F: Fn(Element) -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = bool> + Send + 'static,
    {
        Self::Predicate(Predicate::async_fn(predicate))
    }

    fn eval<'a>(&'a self, element: &'a Element) -> BoxFuture<'a, FilterResult<bool>> {
        match self {
            FilterNode::Filter(filter) => filter.apply(element).boxed(),
            FilterNode::Predicate(predicate) => predicate.eval(element),
        }
    }
}

impl From<Filter> for FilterNode {
    fn from(filter: Filter) -> Self {
        Self::Filter(filter)
    }
}

impl From<Predicate> for FilterNode {
    fn from(predicate: Predicate) -> Self {
        Self::Predicate(predicate)
    }
}

/// An immutable boolean expression over elements.
#[derive(Clone)]
pub struct Filter {
    chain_op: ChainOperator,
    negated: bool,
    children: Vec<FilterNode>,
}

impl Filter {
    pub(crate) fn new(chain_op: ChainOperator, negated: bool, children: Vec<FilterNode>) -> Self {
        Self {
            chain_op,
            negated,
            children,
        }
    }

    /// Wraps a single node as an intersection chain of one.
    pub(crate) fn of(node: FilterNode) -> Self {
        match node {
            FilterNode::Filter(filter) => filter,
            node => Self::new(ChainOperator::Intersection, false, vec![node]),
        }
    }

    /// The operator folding this chain's children.
    pub fn chain_op(&self) -> ChainOperator {
        self.chain_op
    }

    /// Whether the folded result is complemented.
    pub fn negated(&self) -> bool {
        self.negated
    }

    /// The chain's children, in evaluation order.
    pub fn children(&self) -> &[FilterNode] {
        &self.children
    }

    /// Applies this filter to one element.
    ///
    /// Children evaluate sequentially, left to right, each awaited before
    /// the next starts. There is no short-circuit: every child runs even
    /// after the chain's result is determined, so side effects in
    /// caller-supplied predicates stay fully visible. A failing predicate
    /// aborts the evaluation with its error.
    pub async fn apply(&self, element: &Element) -> FilterResult<bool> {
        let mut folded = matches!(self.chain_op, ChainOperator::Intersection);
        for child in &self.children {
            let matched = child.eval(element).await?;
            folded = match self.chain_op {
                ChainOperator::Intersection => folded && matched,
                ChainOperator::Union => folded || matched,
            };
        }
        Ok(if self.negated { !folded } else { folded })
    }
}

impl fmt::Debug for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Filter")
            .field("chain_op", &self.chain_op)
            .field("negated", &self.negated)
            .field("children", &self.children.len())
            .finish()
    }
}

/// Wraps one predicate closure as an intersection chain of one.
pub fn filter<F>(predicate: F) -> Filter
where
    F: Fn(&Element) -> bool + Send + Sync + 'static,
{
    Filter::new(
        ChainOperator::Intersection,
        false,
        vec![FilterNode::Predicate(Predicate::sync(predicate))],
    )
}

/// Builds an intersection (AND) chain: true iff every child is true.
///
/// An empty chain is always true.
pub fn and<I>(children: I) -> Filter
where
    I: IntoIterator,
    I::Item: Into<FilterNode>,
{
    Filter::new(
        ChainOperator::Intersection,
        false,
        children.into_iter().map(Into::into).collect(),
    )
}

/// Builds a union (OR) chain: true iff at least one child is true.
///
/// An empty chain is always false.
pub fn or<I>(children: I) -> Filter
where
    I: IntoIterator,
    I::Item: Into<FilterNode>,
{
    Filter::new(
        ChainOperator::Union,
        false,
        children.into_iter().map(Into::into).collect(),
    )
}

/// Negates a single filter or predicate.
pub fn not(child: impl Into<FilterNode>) -> Filter {
    Filter::new(ChainOperator::Intersection, true, vec![child.into()])
}

/// The always-true filter.
pub fn identity() -> Filter {
    filter(|_| true)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_and_all_children_true() {
        let chain = and([
            FilterNode::sync(|el| el["a"] == json!(1)),
            FilterNode::sync(|el| el["b"] == json!(2)),
        ]);
        assert!(chain.apply(&json!({"a": 1, "b": 2})).await.unwrap());
        assert!(!chain.apply(&json!({"a": 1, "b": 3})).await.unwrap());
    }

    #[tokio::test]
    async fn test_empty_and_is_true() {
        let chain = and(Vec::<FilterNode>::new());
        assert!(chain.apply(&json!({})).await.unwrap());
    }

    #[tokio::test]
    async fn test_empty_or_is_false() {
        let chain = or(Vec::<FilterNode>::new());
        assert!(!chain.apply(&json!({})).await.unwrap());
    }

    #[tokio::test]
    async fn test_or_any_child_true() {
        let chain = or([
            FilterNode::sync(|el| el["a"] == json!(1)),
            FilterNode::sync(|el| el["b"] == json!(2)),
        ]);
        assert!(chain.apply(&json!({"a": 0, "b": 2})).await.unwrap());
        assert!(!chain.apply(&json!({"a": 0, "b": 0})).await.unwrap());
    }

    #[tokio::test]
    async fn test_not_complements() {
        let negated = not(filter(|el| el["a"] == json!(1)));
        assert!(!negated.apply(&json!({"a": 1})).await.unwrap());
        assert!(negated.apply(&json!({"a": 2})).await.unwrap());
    }

    #[tokio::test]
    async fn test_double_negation_is_identity() {
        let original = filter(|el| el["a"] == json!(1));
        let doubled = not(not(filter(|el| el["a"] == json!(1))));
        for element in [json!({"a": 1}), json!({"a": 2}), json!({})] {
            assert_eq!(
                original.apply(&element).await.unwrap(),
                doubled.apply(&element).await.unwrap()
            );
        }
    }

    #[tokio::test]
    async fn test_no_short_circuit() {
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_first = Arc::clone(&calls);
        let calls_second = Arc::clone(&calls);

        let chain = and([
            FilterNode::sync(move |_| {
                calls_first.fetch_add(1, Ordering::SeqCst);
                false
            }),
            FilterNode::sync(move |_| {
                calls_second.fetch_add(1, Ordering::SeqCst);
                true
            }),
        ]);

        assert!(!chain.apply(&json!({})).await.unwrap());
        // Both children ran even though the first already settled the AND.
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_mixed_sync_async_children() {
        let chain = and([
            FilterNode::sync(|el| el["a"] == json!(1)),
            FilterNode::async_fn(|el| async move { el["b"] == json!(2) }),
        ]);
        assert!(chain.apply(&json!({"a": 1, "b": 2})).await.unwrap());
    }

    #[tokio::test]
    async fn test_nested_chains() {
        let chain = and([
            FilterNode::from(or([
                FilterNode::sync(|el| el["a"] == json!(1)),
                FilterNode::sync(|el| el["a"] == json!(2)),
            ])),
            FilterNode::sync(|el| el["b"] == json!(3)),
        ]);
        assert!(chain.apply(&json!({"a": 2, "b": 3})).await.unwrap());
        assert!(!chain.apply(&json!({"a": 3, "b": 3})).await.unwrap());
    }

    #[tokio::test]
    async fn test_identity_always_true() {
        assert!(identity().apply(&json!(null)).await.unwrap());
        assert!(identity().apply(&json!({"anything": 1})).await.unwrap());
    }
}
