//! Selector syntax errors.
//!
//! Unlike HTML, selector text is not recovered from: the first problem ends
//! parsing and is reported with the character offset where it was found.

use thiserror::Error;

/// A selector string that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid selector: {kind} at position {position}")]
pub struct SelectorSyntaxError {
    /// What went wrong.
    pub kind: SelectorErrorKind,
    /// Character (not byte) offset into the selector text.
    pub position: usize,
}

impl SelectorSyntaxError {
    pub(crate) const fn new(kind: SelectorErrorKind, position: usize) -> Self {
        Self { kind, position }
    }
}

/// The kinds of [`SelectorSyntaxError`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorErrorKind {
    /// Nothing but whitespace.
    #[error("empty selector")]
    Empty,
    /// A combinator or comma with nothing on one side, e.g. `> a` or `a,,b`.
    #[error("expected a compound selector")]
    EmptyCompound,
    /// A character that cannot appear here.
    #[error("unexpected character {0:?}")]
    UnexpectedChar(char),
    /// `#`, `.`, `:` or `[` not followed by a name.
    #[error("expected an identifier")]
    ExpectedIdentifier,
    /// An unclosed `[` or `(`, or a stray `]` or `)`.
    #[error("unbalanced {0:?}")]
    Unbalanced(char),
    /// A quoted attribute value with no closing quote.
    #[error("unterminated string")]
    UnterminatedString,
    /// Something other than `=`, `~=`, `|=`, `^=`, `$=` or `*=`.
    #[error("unknown attribute operator {0:?}")]
    UnknownAttributeOperator(String),
    /// A pseudo-class (or pseudo-element) this engine does not evaluate.
    #[error("unknown pseudo-class {0:?}")]
    UnknownPseudoClass(String),
    /// A functional pseudo-class with a missing or malformed argument, or a
    /// plain pseudo-class given one.
    #[error("invalid argument to :{0}")]
    InvalidPseudoArgument(String),
}
