//! HTML tokenizer module.
//!
//! Implements [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
//! of the WHATWG HTML Living Standard.

/// Character reference states per § 13.2.5.72 - § 13.2.5.80.
pub mod character_reference;
/// HTML tokenizer state machine implementation.
pub mod core;
/// DOCTYPE states per § 13.2.5.53 - § 13.2.5.68.
pub mod doctype;
/// Parse error codes reported by the tokenizer.
pub mod error;
/// Helper methods for tokenizer state transitions.
pub mod helpers;
/// Named character reference lookup table per § 13.5.
pub mod named_character_references;
/// Token types produced by the tokenizer.
pub mod token;

pub use self::core::{HTMLTokenizer, TokenizerOptions, TokenizerState};
pub use error::{ParseErrorCode, TokenizerIssue};
pub use token::{Attribute, Token};

/// Tokenize `input` from the data state.
///
/// ```
/// use trawl_html::tokenizer::{Token, tokenize};
///
/// let tokens: Vec<Token> = tokenize("<p>hi").collect();
/// assert_eq!(tokens[0], Token::start_tag("p", &[]));
/// assert_eq!(tokens.last(), Some(&Token::EndOfFile));
/// ```
#[must_use]
pub fn tokenize(input: &str) -> HTMLTokenizer {
    HTMLTokenizer::new(input)
}
