//! Composable boolean filters over elements.
//!
//! Filters form an expression tree combined with `and`, `or` and `not`,
//! mixing synchronous and asynchronous predicates behind one asynchronous
//! `apply` contract. Evaluation is sequential and left-to-right with no
//! short-circuit, so caller-visible side effects in predicates occur in a
//! deterministic order.

pub mod builtin;
mod chain;
mod errors;
mod predicate;

pub use chain::{and, filter, identity, not, or, ChainOperator, Filter, FilterNode};
pub use errors::{FilterError, FilterResult};
pub use predicate::Predicate;
