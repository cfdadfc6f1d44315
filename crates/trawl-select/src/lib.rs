//! CSS selector engine for trawl.
//!
//! # Scope
//!
//! This crate implements:
//! - **Selector Parsing** ([Selectors Level 4 § 18](https://www.w3.org/TR/selectors-4/#grammar))
//!   - Type, universal, id, class and attribute selectors
//!   - Descendant, child, next-sibling and subsequent-sibling combinators
//!   - Structural pseudo-classes, `:nth-*()` with the An+B microsyntax, `:not()`
//!   - CSS escapes in identifiers and strings
//!
//! - **Selector Matching** against a [`trawl_dom::DomTree`]
//!   - Lazy, document-order results ([`select`])
//!   - Backtracking over ancestors and preceding siblings
//!   - A per-query sibling index ([`NthIndexCache`])
//!
//! # Not Yet Implemented
//!
//! - Namespaces (`ns|E`)
//! - Pseudo-elements and user-action pseudo-classes (`:hover`, `::before`)
//! - `:is()`, `:where()`, `:has()` and the `of S` form of `:nth-child()`
//! - Attribute selector case flags (`[a=b i]`)
//!
//! ```
//! use trawl_select::{parse, select};
//!
//! let list = parse("p.note").unwrap();
//! # let tree = trawl_dom::DomTree::new();
//! let hits: Vec<_> = select(&tree, tree.root(), &list).collect();
//! # assert!(hits.is_empty());
//! ```

pub mod ast;
pub mod error;
pub mod matcher;
pub mod nth;
pub mod parser;

pub use ast::{
    AttributeSelector, Combinator, ComplexSelector, CompoundSelector, Nth, PseudoClass,
    SelectorList, SimpleSelector,
};
pub use error::{SelectorErrorKind, SelectorSyntaxError};
pub use matcher::{Matches, matches, select, select_first};
pub use nth::{NthIndexCache, SiblingPosition};
pub use parser::parse;
