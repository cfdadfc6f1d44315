//! Tokenizer parse errors.
//!
//! [§ 13.2.2 Parse errors](https://html.spec.whatwg.org/multipage/parsing.html#parse-errors)
//!
//! None of these stop tokenization. Each one marks a spot where the
//! tokenizer applied its recovery rule; they are collected for callers that
//! want diagnostics and otherwise only logged.

use strum_macros::Display;
use trawl_common::SourcePosition;

/// The standard error codes, rendered in their kebab-case WHATWG spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ParseErrorCode {
    /// `<!DOCTYPE html PUBLIC "foo>`
    AbruptDoctypePublicIdentifier,
    /// `<!DOCTYPE html SYSTEM "foo>`
    AbruptDoctypeSystemIdentifier,
    /// `<!-->` or `<!--->`
    AbruptClosingOfEmptyComment,
    /// `&#;` or `&#x;`
    AbsenceOfDigitsInNumericCharacterReference,
    /// `<![CDATA[` outside foreign content.
    CdataInHtmlContent,
    /// `&#x110000;`
    CharacterReferenceOutsideUnicodeRange,
    /// `&#x80;` and other C0/C1 controls.
    ControlCharacterReference,
    /// `</div id="x">`
    EndTagWithAttributes,
    /// `<p id=a id=b>`
    DuplicateAttribute,
    /// `</div/>`
    EndTagWithTrailingSolidus,
    /// Input ends right after `<` or `</`.
    EofBeforeTagName,
    /// Input ends inside a comment.
    EofInComment,
    /// Input ends inside a DOCTYPE.
    EofInDoctype,
    /// Input ends inside a tag.
    EofInTag,
    /// `<!-- a --!>`
    IncorrectlyClosedComment,
    /// `<!foo>`
    IncorrectlyOpenedComment,
    /// `<!DOCTYPE html junk>`
    InvalidCharacterSequenceAfterDoctypeName,
    /// `<1>` or `</ >`
    InvalidFirstCharacterOfTagName,
    /// `<a href=>`
    MissingAttributeValue,
    /// `<!DOCTYPE>`
    MissingDoctypeName,
    /// `<!DOCTYPE html PUBLIC>`
    MissingDoctypePublicIdentifier,
    /// `<!DOCTYPE html SYSTEM>`
    MissingDoctypeSystemIdentifier,
    /// `</>`
    MissingEndTagName,
    /// `<!DOCTYPE html PUBLIC -//W3C>`
    MissingQuoteBeforeDoctypePublicIdentifier,
    /// `<!DOCTYPE html SYSTEM about:legacy>`
    MissingQuoteBeforeDoctypeSystemIdentifier,
    /// `&amp` without `;`
    MissingSemicolonAfterCharacterReference,
    /// `<!DOCTYPE html PUBLIC"x">`
    MissingWhitespaceAfterDoctypePublicKeyword,
    /// `<!DOCTYPE html SYSTEM"x">`
    MissingWhitespaceAfterDoctypeSystemKeyword,
    /// `<!DOCTYPEhtml>`
    MissingWhitespaceBeforeDoctypeName,
    /// `<a b="1"c="2">`
    MissingWhitespaceBetweenAttributes,
    /// `<!DOCTYPE html PUBLIC "a""b">`
    MissingWhitespaceBetweenDoctypePublicAndSystemIdentifiers,
    /// `<!-- <!-- -->`
    NestedComment,
    /// `&#xFFFE;`
    NoncharacterCharacterReference,
    /// `&#0;`
    NullCharacterReference,
    /// `&#xD800;`
    SurrogateCharacterReference,
    /// `<!DOCTYPE html SYSTEM "x" junk>`
    UnexpectedCharacterAfterDoctypeSystemIdentifier,
    /// `<a "b">`
    UnexpectedCharacterInAttributeName,
    /// `<a b=c"d>`
    UnexpectedCharacterInUnquotedAttributeValue,
    /// `<a =b>`
    UnexpectedEqualsSignBeforeAttributeName,
    /// A U+0000 in the input.
    UnexpectedNullCharacter,
    /// `<?xml ...>`
    UnexpectedQuestionMarkInsteadOfTagName,
    /// `<a / b>`
    UnexpectedSolidusInTag,
    /// `&nosuchthing;`
    UnknownNamedCharacterReference,
}

/// A recovered parse error and where it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizerIssue {
    /// What went wrong.
    pub code: ParseErrorCode,
    /// Where the tokenizer was when it noticed.
    pub position: SourcePosition,
}
