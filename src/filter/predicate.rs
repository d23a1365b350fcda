//! Predicate unification.
//!
//! A predicate is a boolean test over one element. Callers may supply it as
//! a synchronous closure, an asynchronous closure, or the fallible variant
//! of either; the shape is resolved once at construction and `eval` exposes
//! a single uniform future-returning call path, so chain evaluation never
//! branches on sync-vs-async.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures_util::future::{self, BoxFuture, FutureExt};

use crate::element::Element;

use super::errors::FilterResult;

type SyncPredicateFn = dyn Fn(&Element) -> FilterResult<bool> + Send + Sync;
type AsyncPredicateFn = dyn Fn(Element) -> BoxFuture<'static, FilterResult<bool>> + Send + Sync;

/// A (possibly asynchronous) boolean test over one element.
///
/// Stateless and immutable after construction; cloning shares the underlying
/// closure.
#[derive(Clone)]
pub struct Predicate(Inner);

#[derive(Clone)]
enum Inner {
    Sync(Arc<SyncPredicateFn>),
    Async(Arc<AsyncPredicateFn>),
}

impl Predicate {
    /// Wraps an infallible synchronous closure.
    pub fn sync<F>(predicate: F) -> Self
    where
        F: Fn(&Element) -> bool + Send + Sync + 'static,
    {
        Self(Inner::Sync(Arc::new(move |element| Ok(predicate(element)))))
    }

    /// Wraps a fallible synchronous closure. An `Err` surfaces as a rejected
    /// evaluation of the whole chain.
    pub fn try_sync<F>(predicate: F) -> Self
    where
        F: Fn(&Element) -> FilterResult<bool> + Send + Sync + 'static,
    {
        Self(Inner::Sync(Arc::new(predicate)))
    }

    /// Wraps an infallible asynchronous closure. The element is handed over
    /// by value so the closure can suspend freely.
    pub fn async_fn<F, Fut>(predicate: F) -> Self
    where
        F: Fn(Element) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = bool> + Send + 'static,
    {
        Self(Inner::Async(Arc::new(move |element| {
            let pending = predicate(element);
            async move { Ok(pending.await) }.boxed()
        })))
    }

    /// Wraps a fallible asynchronous closure.
    pub fn try_async<F, Fut>(predicate: F) -> Self
    where
        F: Fn(Element) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = FilterResult<bool>> + Send + 'static,
    {
        Self(Inner::Async(Arc::new(move |element| {
            predicate(element).boxed()
        })))
    }

    /// Evaluates the predicate against one element.
    ///
    /// Returns a future uniformly regardless of the underlying closure
    /// shape. Synchronous predicates run eagerly and the future is
    /// immediately ready; asynchronous predicates receive a clone of the
    /// element and settle when their own future does.
    pub fn eval(&self, element: &Element) -> BoxFuture<'static, FilterResult<bool>> {
        match &self.0 {
            Inner::Sync(predicate) => future::ready(predicate(element)).boxed(),
            Inner::Async(predicate) => predicate(element.clone()),
        }
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Inner::Sync(_) => f.write_str("Predicate(sync)"),
            Inner::Async(_) => f.write_str("Predicate(async)"),
        }
    }
}
