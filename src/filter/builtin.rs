//! Built-in predicate constructors.
//!
//! Thin wrappers over the element model, not engine logic. Document-tree
//! nodes follow the JSON convention of carrying `tagName`, `classList` and
//! `attributes` properties; plain objects exposing the same properties match
//! identically, which is what makes hybrid document/object queries work.

use regex::Regex;
use serde_json::Value;

use crate::element;

use super::predicate::Predicate;

const TAG_NAME_PROP: &str = "tagName";
const CLASS_LIST_PROP: &str = "classList";
const ATTRIBUTES_PROP: &str = "attributes";

/// Matches elements whose `tagName` equals any of the expected names,
/// case-insensitively. An empty (or all-blank) name list never matches.
pub fn tag_name<I, S>(expected: I) -> Predicate
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let expected: Vec<String> = expected
        .into_iter()
        .map(Into::into)
        .filter(|name| !name.is_empty())
        .collect();

    Predicate::sync(move |el| {
        if expected.is_empty() {
            return false;
        }
        match element::get_path(el, TAG_NAME_PROP) {
            Some(Value::String(tag)) => expected.iter().any(|name| name.eq_ignore_ascii_case(tag)),
            _ => false,
        }
    })
}

/// Matches elements whose `classList` contains ALL the given classes.
/// Elements without a `classList` array never match.
pub fn has_class<I, S>(classes: I) -> Predicate
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let classes: Vec<String> = classes.into_iter().map(Into::into).collect();

    Predicate::sync(move |el| match element::get_path(el, CLASS_LIST_PROP) {
        Some(Value::Array(list)) => classes
            .iter()
            .all(|class| list.iter().any(|entry| entry.as_str() == Some(class.as_str()))),
        _ => false,
    })
}

/// Matches elements carrying the named attribute, regardless of value.
pub fn attr(name: impl Into<String>) -> Predicate {
    let name = name.into();
    Predicate::sync(move |el| match element::get_path(el, ATTRIBUTES_PROP) {
        Some(Value::Object(attributes)) => attributes.contains_key(&name),
        _ => false,
    })
}

/// Matches elements whose named attribute equals `expected` exactly.
pub fn attr_eq(name: impl Into<String>, expected: Value) -> Predicate {
    let name = name.into();
    Predicate::sync(move |el| match element::get_path(el, ATTRIBUTES_PROP) {
        Some(Value::Object(attributes)) => attributes.get(&name) == Some(&expected),
        _ => false,
    })
}

/// Matches elements carrying a value (including null) at the dotted path.
pub fn prop(path: impl Into<String>) -> Predicate {
    let path = path.into();
    Predicate::sync(move |el| element::get_path(el, &path).is_some())
}

/// Matches elements whose value at the dotted path equals `expected`
/// exactly, with no type coercion. An absent path resolves to null before
/// the comparison, so `prop_eq("a", Value::Null)` matches both a null field
/// and a missing one.
pub fn prop_eq(path: impl Into<String>, expected: Value) -> Predicate {
    let path = path.into();
    Predicate::sync(move |el| {
        element::get_path(el, &path).cloned().unwrap_or(Value::Null) == expected
    })
}

/// Matches elements whose string value at the dotted path matches the
/// pattern. Non-string and absent values never match.
pub fn prop_matches(path: impl Into<String>, pattern: Regex) -> Predicate {
    let path = path.into();
    Predicate::sync(move |el| match element::get_path(el, &path) {
        Some(Value::String(text)) => pattern.is_match(text),
        _ => false,
    })
}

/// Matches elements whose value at the dotted path is null or absent.
pub fn is_null(path: impl Into<String>) -> Predicate {
    let path = path.into();
    Predicate::sync(move |el| {
        matches!(element::get_path(el, &path), None | Some(Value::Null))
    })
}

/// Matches elements carrying a non-null value at the dotted path.
pub fn not_null(path: impl Into<String>) -> Predicate {
    let path = path.into();
    Predicate::sync(move |el| {
        !matches!(element::get_path(el, &path), None | Some(Value::Null))
    })
}
