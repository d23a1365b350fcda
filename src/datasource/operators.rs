//! Join operator entry points.

use crate::element::Element;

use super::joined::{FullJoined, InnerJoined, LeftJoined, RightJoined};
use super::source::Source;

/// Full join of two sources on a match condition. Pass
/// [`super::join_identity`] for an unconditional join.
pub fn join<P>(left: impl Into<Source>, right: impl Into<Source>, condition: P) -> FullJoined
where
    P: Fn(&Element, &Element) -> bool + Send + Sync + 'static,
{
    FullJoined::on(left, right, condition)
}

/// Inner join of two sources on a match condition.
pub fn inner_join<P>(left: impl Into<Source>, right: impl Into<Source>, condition: P) -> InnerJoined
where
    P: Fn(&Element, &Element) -> bool + Send + Sync + 'static,
{
    InnerJoined::on(left, right, condition)
}

/// Left join of two sources on a match condition.
pub fn left_join<P>(left: impl Into<Source>, right: impl Into<Source>, condition: P) -> LeftJoined
where
    P: Fn(&Element, &Element) -> bool + Send + Sync + 'static,
{
    LeftJoined::on(left, right, condition)
}

/// Right join of two sources on a match condition.
pub fn right_join<P>(left: impl Into<Source>, right: impl Into<Source>, condition: P) -> RightJoined
where
    P: Fn(&Element, &Element) -> bool + Send + Sync + 'static,
{
    RightJoined::on(left, right, condition)
}
