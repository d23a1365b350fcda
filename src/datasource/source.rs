//! Raw source normalization.
//!
//! A query can be fed anything enumerable: a pre-built datasource, a
//! document root, an array, a `document.<selector>` shorthand string, or a
//! plain object. `Source` names each supported kind explicitly and is
//! resolved into an adapter exactly once, at construction time.

use std::sync::Arc;

use crate::element::Element;

use super::array::ArrayDatasource;
use super::document::{global_document, DocumentDatasource, DocumentRoot, EmptyDocument};
use super::joined::{FullJoined, InnerJoined, LeftJoined, RightJoined};
use super::object::ObjectDatasource;
use super::Datasource;

/// One raw value a query can enumerate, tagged by kind.
pub enum Source {
    /// A pre-built datasource, passed through unchanged.
    Datasource(Arc<dyn Datasource>),
    /// A document root queried with the given selector.
    Document {
        root: Arc<dyn DocumentRoot>,
        selector: String,
    },
    /// An array of elements.
    Array(Vec<Element>),
    /// A string routed through the `document.<selector>` shorthand grammar.
    Shorthand(String),
    /// A single object.
    Object(Element),
}

impl Source {
    /// A document root enumerated wholesale (selector `"*"`).
    pub fn document(root: Arc<dyn DocumentRoot>) -> Self {
        Self::document_with_selector(root, "*")
    }

    /// A document root enumerated with an explicit selector.
    pub fn document_with_selector(root: Arc<dyn DocumentRoot>, selector: impl Into<String>) -> Self {
        Self::Document {
            root,
            selector: selector.into(),
        }
    }

    /// Resolves this source into its datasource adapter.
    ///
    /// Shorthand strings that do not match the grammar fall back to the
    /// whole document (`"*"`); a missing global document behaves as an empty
    /// one. Normalization never errors.
    pub fn into_datasource(self) -> Arc<dyn Datasource> {
        match self {
            Source::Datasource(datasource) => datasource,
            Source::Document { root, selector } => {
                Arc::new(DocumentDatasource::new(root, selector))
            }
            Source::Array(items) => Arc::new(ArrayDatasource::new(items)),
            Source::Shorthand(value) => {
                let root: Arc<dyn DocumentRoot> =
                    global_document().unwrap_or_else(|| Arc::new(EmptyDocument));
                match DocumentDatasource::from_shorthand(&value, Arc::clone(&root)) {
                    Some(datasource) => Arc::new(datasource),
                    None => Arc::new(DocumentDatasource::new(root, "*")),
                }
            }
            Source::Object(value) => Arc::new(ObjectDatasource::new(value)),
        }
    }
}

/// Normalizes a raw value into a datasource adapter.
pub fn datasource(source: impl Into<Source>) -> Arc<dyn Datasource> {
    source.into().into_datasource()
}

impl From<Element> for Source {
    /// Dispatches on the value's shape: arrays become array sources, strings
    /// route through the shorthand grammar, everything else is wrapped as a
    /// single object.
    fn from(value: Element) -> Self {
        match value {
            Element::Array(items) => Source::Array(items),
            Element::String(text) => Source::Shorthand(text),
            other => Source::Object(other),
        }
    }
}

impl From<&str> for Source {
    fn from(value: &str) -> Self {
        Source::Shorthand(value.to_string())
    }
}

impl From<String> for Source {
    fn from(value: String) -> Self {
        Source::Shorthand(value)
    }
}

impl From<Vec<Element>> for Source {
    fn from(items: Vec<Element>) -> Self {
        Source::Array(items)
    }
}

impl From<Arc<dyn Datasource>> for Source {
    fn from(datasource: Arc<dyn Datasource>) -> Self {
        Source::Datasource(datasource)
    }
}

impl From<ObjectDatasource> for Source {
    fn from(datasource: ObjectDatasource) -> Self {
        Source::Datasource(Arc::new(datasource))
    }
}

impl From<ArrayDatasource> for Source {
    fn from(datasource: ArrayDatasource) -> Self {
        Source::Datasource(Arc::new(datasource))
    }
}

impl From<DocumentDatasource> for Source {
    fn from(datasource: DocumentDatasource) -> Self {
        Source::Datasource(Arc::new(datasource))
    }
}

impl From<FullJoined> for Source {
    fn from(datasource: FullJoined) -> Self {
        Source::Datasource(Arc::new(datasource))
    }
}

impl From<InnerJoined> for Source {
    fn from(datasource: InnerJoined) -> Self {
        Source::Datasource(Arc::new(datasource))
    }
}

impl From<LeftJoined> for Source {
    fn from(datasource: LeftJoined) -> Self {
        Source::Datasource(Arc::new(datasource))
    }
}

impl From<RightJoined> for Source {
    fn from(datasource: RightJoined) -> Self {
        Source::Datasource(Arc::new(datasource))
    }
}
