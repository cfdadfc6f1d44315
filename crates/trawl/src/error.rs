//! Fatal errors from the query API.
//!
//! Malformed HTML is never an error; see [`Issue`](crate::Issue) for how
//! recovered problems are reported.

use thiserror::Error;
use trawl_dom::NodeId;
use trawl_select::SelectorSyntaxError;

/// Errors returned by [`Document`](crate::Document) queries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The selector text could not be parsed.
    #[error(transparent)]
    Selector(#[from] SelectorSyntaxError),

    /// A node id that does not belong to the document's tree.
    #[error("node {0:?} is not in this document")]
    UnknownNode(NodeId),
}

/// Result type for the query API.
pub type Result<T> = core::result::Result<T, Error>;
