//! Lenient HTML tokenizer and tree builder for trawl.
//!
//! # Scope
//!
//! This crate implements:
//! - **HTML Tokenizer** ([WHATWG § 13.2.5](https://html.spec.whatwg.org/multipage/parsing.html#tokenization))
//!   - Data, RCDATA, RAWTEXT, script data and PLAINTEXT content states
//!   - Tag, attribute, comment and DOCTYPE states
//!   - Named and numeric character references
//!   - Parse errors with byte offsets, never fatal
//!
//! - **HTML Parser / Tree Builder** ([WHATWG § 13.2.6](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction))
//!   - Head, body, text, table and frameset insertion modes
//!   - Table-driven optional end tags ([`parser::AUTO_CLOSED_BY`])
//!   - Foster parenting for misplaced table content
//!
//! # Not Yet Implemented
//!
//! - Adoption agency algorithm (misnested `</b>` closes like any other end tag)
//! - Script data escape states and CDATA sections
//! - `select` and `template` insertion modes
//! - Foreign content namespaces

/// HTML parser and tree construction.
pub mod parser;
/// HTML tokenizer for converting input into tokens.
pub mod tokenizer;

pub use parser::{HTMLParser, InsertionMode, ParseIssue, ParserOptions, tree_dump};
pub use tokenizer::{Attribute, HTMLTokenizer, Token, TokenizerOptions};
