//! Shared helpers for the integration suites.

use std::sync::Arc;

use sequel::{DocumentRoot, Element};
use serde_json::json;

/// Minimal structured-document collaborator for tests.
///
/// Selectors are `"*"` (all nodes) or a comma-separated list of tag names
/// matched case-insensitively; that is all the engine ever needs from the
/// collaborator contract.
pub struct StaticDocument {
    nodes: Vec<Element>,
}

impl StaticDocument {
    pub fn new(nodes: Vec<Element>) -> Self {
        Self { nodes }
    }

    pub fn shared(nodes: Vec<Element>) -> Arc<dyn DocumentRoot> {
        Arc::new(Self::new(nodes))
    }
}

impl DocumentRoot for StaticDocument {
    fn query_selector_all(&self, selector: &str) -> Vec<Element> {
        if selector == "*" {
            return self.nodes.clone();
        }
        let wanted: Vec<&str> = selector.split(',').map(str::trim).collect();
        self.nodes
            .iter()
            .filter(|node| {
                node["tagName"].as_str().is_some_and(|tag| {
                    wanted.iter().any(|name| name.eq_ignore_ascii_case(tag))
                })
            })
            .cloned()
            .collect()
    }
}

/// Builds a document node element following the JSON node convention.
pub fn node(tag: &str, classes: &[&str]) -> Element {
    json!({
        "tagName": tag.to_uppercase(),
        "classList": classes,
        "attributes": {},
    })
}
