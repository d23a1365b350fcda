//! Element model shared by every datasource.
//!
//! An element is any value a datasource can yield: a plain object, an array
//! item, or a document-tree node. There is no fixed schema; fields are
//! addressed by dotted path and missing paths resolve to absent rather than
//! raising.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Any value yielded by a datasource.
pub type Element = serde_json::Value;

/// Resolves a dotted path against an element.
///
/// Object keys and numeric array indices are both valid segments, so
/// `"items.0.name"` reaches into nested arrays. Returns `None` when any
/// segment is missing.
pub fn get_path<'a>(element: &'a Element, path: &str) -> Option<&'a Element> {
    let mut current = element;
    for segment in path.split('.') {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Writes `value` at a dotted path, creating intermediate objects as needed.
///
/// Non-object values encountered along the path are replaced by objects.
pub fn set_path(element: &mut Element, path: &str, value: Value) {
    let mut current = element;
    let mut segments = path.split('.').peekable();
    while let Some(segment) = segments.next() {
        if !matches!(current, Value::Object(_)) {
            *current = Value::Object(Map::new());
        }
        if segments.peek().is_none() {
            if let Value::Object(map) = current {
                map.insert(segment.to_string(), value);
            }
            return;
        }
        current = match current {
            Value::Object(map) => map.entry(segment.to_string()).or_insert(Value::Null),
            _ => return,
        };
    }
}

/// Shallow-merges two elements into a new one; right-hand fields override
/// left-hand fields on key collision. Neither input is mutated.
pub fn merge(left: &Element, right: &Element) -> Element {
    match (left, right) {
        (Value::Object(lhs), Value::Object(rhs)) => {
            let mut merged = lhs.clone();
            for (key, value) in rhs {
                merged.insert(key.clone(), value.clone());
            }
            Value::Object(merged)
        }
        (Value::Object(_), _) => left.clone(),
        _ => right.clone(),
    }
}

/// The ordered set of field paths retained in output elements.
///
/// Duplicates are dropped (first occurrence wins) and the `"*"` wildcard is
/// stripped, since an empty projection already means "all fields".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Projection {
    fields: Vec<String>,
}

impl Projection {
    /// Builds a projection from field paths, deduplicating and stripping `"*"`.
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut deduplicated: Vec<String> = Vec::new();
        for field in fields {
            let field = field.into();
            if field != "*" && !deduplicated.contains(&field) {
                deduplicated.push(field);
            }
        }
        Self {
            fields: deduplicated,
        }
    }

    /// True when no fields are retained, meaning "project everything".
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The retained field paths, in declaration order.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Applies the projection to one element, producing a new element holding
    /// only the listed paths. Missing paths become null; an empty projection
    /// returns the full element.
    pub fn project(&self, element: &Element) -> Element {
        if self.fields.is_empty() {
            return element.clone();
        }
        let mut projected = Value::Object(Map::new());
        for field in &self.fields {
            let value = get_path(element, field).cloned().unwrap_or(Value::Null);
            set_path(&mut projected, field, value);
        }
        projected
    }
}
