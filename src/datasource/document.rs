//! Document-tree datasource adapter.
//!
//! Selector matching itself is delegated to the `DocumentRoot` collaborator;
//! this adapter only turns the selected node sequence into the uniform
//! entries contract. The document root is an explicit constructor
//! dependency; a process-wide default is consulted only by the shorthand
//! normalization path in [`super::Source`].

use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use async_trait::async_trait;
use regex::Regex;

use crate::element::{Element, Projection};
use crate::filter::Filter;

use super::errors::DatasourceResult;
use super::Datasource;

/// External structured-document collaborator: given a selector string,
/// produces the matching nodes in document order.
pub trait DocumentRoot: Send + Sync {
    /// Returns the nodes matching `selector`.
    fn query_selector_all(&self, selector: &str) -> Vec<Element>;
}

/// A document root with no nodes. Stands in when no global document has
/// been configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyDocument;

impl DocumentRoot for EmptyDocument {
    fn query_selector_all(&self, _selector: &str) -> Vec<Element> {
        Vec::new()
    }
}

static GLOBAL_DOCUMENT: RwLock<Option<Arc<dyn DocumentRoot>>> = RwLock::new(None);

/// Installs the process-wide default document used by string-shorthand
/// sources that carry no explicit root.
pub fn set_global_document(document: Arc<dyn DocumentRoot>) {
    let mut guard = GLOBAL_DOCUMENT
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    *guard = Some(document);
}

/// The process-wide default document, if one has been installed.
pub fn global_document() -> Option<Arc<dyn DocumentRoot>> {
    GLOBAL_DOCUMENT
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

fn shorthand_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"document\.(.*)").expect("shorthand pattern is valid"))
}

/// Wraps a document root plus a selector string; yields the nodes selected
/// by the collaborator, filtered like the array case.
#[derive(Clone)]
pub struct DocumentDatasource {
    root: Arc<dyn DocumentRoot>,
    selector: String,
}

impl DocumentDatasource {
    /// Captures the document root and selector.
    pub fn new(root: Arc<dyn DocumentRoot>, selector: impl Into<String>) -> Self {
        Self {
            root,
            selector: selector.into(),
        }
    }

    /// Extracts the selector from a `document.<selector>` shorthand string,
    /// or `None` when the string is not shorthand.
    pub fn match_shorthand(value: &str) -> Option<&str> {
        shorthand_pattern()
            .captures(value)
            .and_then(|captures| captures.get(1))
            .map(|group| group.as_str())
    }

    /// Builds an adapter from a shorthand string over the given root, or
    /// `None` when the string is not shorthand. Callers fall back to the
    /// whole document (`"*"`) on `None`; shorthand parsing never errors.
    pub fn from_shorthand(value: &str, root: Arc<dyn DocumentRoot>) -> Option<Self> {
        Self::match_shorthand(value).map(|selector| Self::new(root, selector))
    }

    /// The selector this adapter queries with.
    pub fn selector(&self) -> &str {
        &self.selector
    }
}

#[async_trait]
impl Datasource for DocumentDatasource {
    async fn entries(
        &self,
        filter: Option<&Filter>,
        projection: Option<&Projection>,
    ) -> DatasourceResult<Vec<Element>> {
        let nodes = self.root.query_selector_all(&self.selector);
        super::filter_entries(&nodes, filter, projection).await
    }
}
