//! Stable multi-pass sort over query results.
//!
//! Each `SortRule` is applied as one full re-sort pass: a stable ascending
//! sort by the value at the rule's field path, literally reversed when the
//! direction is descending. Reversal (rather than an inverted comparator)
//! also flips the relative order of equal keys; callers chaining several
//! rules observe the last pass winning.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::element::{self, Element};

/// Sort direction for a single rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// A (field path, direction) pair applied as one re-sort pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortRule {
    /// Dotted field path the pass sorts by.
    pub field: String,
    /// Direction of the pass.
    pub direction: SortDirection,
}

impl SortRule {
    /// Creates an ascending rule.
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Ascending,
        }
    }

    /// Creates a descending rule.
    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Descending,
        }
    }
}

/// Sorts `collection` in place according to `rule`.
///
/// The ascending pass is stable; a descending rule reverses the ascending
/// result wholesale.
pub fn sort(collection: &mut [Element], rule: &SortRule) {
    collection.sort_by(|a, b| {
        compare_values(
            element::get_path(a, &rule.field),
            element::get_path(b, &rule.field),
        )
    });

    if rule.direction == SortDirection::Descending {
        collection.reverse();
    }
}

/// Compares two optional field values for sorting.
///
/// Ordering rules: absent < present; then null < bool < number < string <
/// array < object; same-type values use their natural ordering. Numbers
/// compare as f64. Arrays and objects have no internal ordering.
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a_val), Some(b_val)) => {
            let a_type = type_order(a_val);
            let b_type = type_order(b_val);
            if a_type != b_type {
                return a_type.cmp(&b_type);
            }

            match (a_val, b_val) {
                (Value::Bool(a_b), Value::Bool(b_b)) => a_b.cmp(b_b),
                (Value::Number(a_n), Value::Number(b_n)) => {
                    let a_f = a_n.as_f64().unwrap_or(0.0);
                    let b_f = b_n.as_f64().unwrap_or(0.0);
                    a_f.partial_cmp(&b_f).unwrap_or(Ordering::Equal)
                }
                (Value::String(a_s), Value::String(b_s)) => a_s.cmp(b_s),
                _ => Ordering::Equal,
            }
        }
    }
}

fn type_order(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sort_ascending() {
        let mut items = vec![json!({"p": 2}), json!({"p": 1}), json!({"p": 3})];
        sort(&mut items, &SortRule::asc("p"));
        assert_eq!(items, vec![json!({"p": 1}), json!({"p": 2}), json!({"p": 3})]);
    }

    #[test]
    fn test_sort_descending_is_literal_reversal() {
        let mut items = vec![
            json!({"p": 1, "tag": "a"}),
            json!({"p": 1, "tag": "b"}),
            json!({"p": 2, "tag": "c"}),
        ];
        sort(&mut items, &SortRule::desc("p"));
        // Reversing the stable ascending order flips equal keys too.
        assert_eq!(
            items,
            vec![
                json!({"p": 2, "tag": "c"}),
                json!({"p": 1, "tag": "b"}),
                json!({"p": 1, "tag": "a"}),
            ]
        );
    }

    #[test]
    fn test_sort_stable_on_equal_keys() {
        let mut items = vec![
            json!({"p": 1, "tag": "a"}),
            json!({"p": 1, "tag": "b"}),
            json!({"p": 1, "tag": "c"}),
        ];
        sort(&mut items, &SortRule::asc("p"));
        assert_eq!(items[0]["tag"], json!("a"));
        assert_eq!(items[1]["tag"], json!("b"));
        assert_eq!(items[2]["tag"], json!("c"));
    }

    #[test]
    fn test_sort_by_dotted_path() {
        let mut items = vec![
            json!({"user": {"age": 30}}),
            json!({"user": {"age": 20}}),
        ];
        sort(&mut items, &SortRule::asc("user.age"));
        assert_eq!(items[0]["user"]["age"], json!(20));
    }

    #[test]
    fn test_sort_missing_field_first() {
        let mut items = vec![json!({"p": 1}), json!({}), json!({"p": 0})];
        sort(&mut items, &SortRule::asc("p"));
        assert_eq!(items, vec![json!({}), json!({"p": 0}), json!({"p": 1})]);
    }

    #[test]
    fn test_sort_by_string_values() {
        let mut items = vec![
            json!({"name": "charlie"}),
            json!({"name": "alice"}),
            json!({"name": "bob"}),
        ];
        sort(&mut items, &SortRule::asc("name"));
        assert_eq!(items[0]["name"], json!("alice"));
        assert_eq!(items[1]["name"], json!("bob"));
        assert_eq!(items[2]["name"], json!("charlie"));
    }

    #[test]
    fn test_sort_mixed_types_by_type_order() {
        let mut items = vec![json!({"p": "text"}), json!({"p": 1}), json!({"p": null})];
        sort(&mut items, &SortRule::asc("p"));
        assert_eq!(items, vec![json!({"p": null}), json!({"p": 1}), json!({"p": "text"})]);
    }
}
