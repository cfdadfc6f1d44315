//! Parse malformed HTML into a tree and query it with CSS selectors.
//!
//! # Scope
//!
//! This crate provides:
//! - **Parsing** - [`parse_html`] never fails; recovered problems are kept
//!   as [`Issue`]s on the [`Document`]
//! - **Querying** - [`find`] and [`find_all`] with selector text, or
//!   [`Document::select`] with a pre-parsed [`Selector`]
//! - **Conversion** - [`to_generic_tree`] and HTML serialization
//!
//! # Not Yet Implemented
//!
//! - Fetching documents and crawl scheduling
//! - Encoding detection; input is already decoded text
//!
//! ```
//! let doc = trawl::parse_html("<html><p><b></p><p></p>");
//! let paragraphs = trawl::find_all(&doc, doc.root(), "p").unwrap();
//! assert_eq!(paragraphs.len(), 2);
//! assert!(trawl::find(&doc, doc.root(), "p > b").unwrap().is_some());
//! ```

pub mod document;
pub mod error;

pub use document::{Document, Issue, ParseOptions};
pub use error::{Error, Result};

pub use trawl_dom as dom;
pub use trawl_html as html;
pub use trawl_select as select;

pub use trawl_dom::{DomTree, GenericTreeNode, NodeId, NodeType};
pub use trawl_select::{SelectorSyntaxError, parse as parse_selector};

/// A parsed selector list, for parsing once and matching many times.
///
/// ```
/// use trawl::{Selector, parse_html};
///
/// let selector: Selector = "li:nth-child(odd)".parse().unwrap();
/// let doc = parse_html("<ul><li>a<li>b<li>c</ul>");
/// let odd = doc.select(doc.root(), &selector).unwrap().count();
/// assert_eq!(odd, 2);
/// ```
pub type Selector = trawl_select::SelectorList;

/// Parse `html` into a [`Document`]. Malformed markup is recovered from,
/// never rejected.
#[must_use]
pub fn parse_html(html: &str) -> Document {
    Document::parse(html)
}

/// The first element under `node`, in document order, that matches
/// `selector`.
///
/// # Errors
///
/// [`Error::Selector`] for invalid selector text, [`Error::UnknownNode`] if
/// `node` is not in `doc`.
pub fn find(doc: &Document, node: NodeId, selector: &str) -> Result<Option<NodeId>> {
    doc.find(node, selector)
}

/// Every element under `node` that matches `selector`, in document order.
///
/// # Errors
///
/// As for [`find`].
pub fn find_all(doc: &Document, node: NodeId, selector: &str) -> Result<Vec<NodeId>> {
    doc.find_all(node, selector)
}

/// Convert `doc` into an owned, serializable [`GenericTreeNode`].
#[must_use]
pub fn to_generic_tree(doc: &Document) -> GenericTreeNode {
    doc.to_generic_tree()
}
