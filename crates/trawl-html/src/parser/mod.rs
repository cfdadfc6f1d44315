//! HTML tree construction.
//!
//! Implements [§ 13.2.6 Tree construction](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction)
//! over the token stream produced by [`crate::tokenizer`].

/// Parser state, node insertion and the stack of open elements.
pub mod core;
/// html5lib-style tree dump.
pub mod dump;
/// Optional end tag table.
pub mod implied;
mod modes;
mod open_elements;
mod table;

pub use self::core::{HTMLParser, InsertionMode, ParseIssue, ParserOptions};
pub use dump::tree_dump;
pub use implied::AUTO_CLOSED_BY;
