//! Selector text to [`SelectorList`].
//!
//! [§ 18 Grammar](https://www.w3.org/TR/selectors-4/#grammar)
//!
//! A hand-written recursive descent parser over characters. Identifiers and
//! strings follow [CSS Syntax § 4.3](https://www.w3.org/TR/css-syntax-3/#tokenizer-algorithms),
//! including backslash escapes.

use core::str::FromStr;

use crate::ast::{
    AttributeSelector, Combinator, ComplexSelector, CompoundSelector, Nth, PseudoClass,
    SelectorList, SimpleSelector,
};
use crate::error::{SelectorErrorKind, SelectorSyntaxError};

type Result<T> = core::result::Result<T, SelectorSyntaxError>;

/// Parse a comma-separated selector list.
///
/// ```
/// use trawl_select::{parse, Combinator};
///
/// let list = parse("ul > li.item, p").unwrap();
/// assert_eq!(list.len(), 2);
/// assert_eq!(list.selectors[0].combinators[0].0, Combinator::Child);
/// ```
///
/// # Errors
///
/// Returns a [`SelectorSyntaxError`] for any syntax this engine does not
/// accept, positioned at the offending character.
pub fn parse(input: &str) -> Result<SelectorList> {
    let mut parser = Parser::new(input);
    let _ = parser.skip_whitespace();
    if parser.peek().is_none() {
        return Err(SelectorSyntaxError::new(SelectorErrorKind::Empty, 0));
    }
    let list = parser.parse_selector_list(false)?;
    log::trace!(target: "selector", "parsed {input:?} as {list}");
    Ok(list)
}

impl FromStr for SelectorList {
    type Err = SelectorSyntaxError;

    fn from_str(s: &str) -> Result<Self> {
        parse(s)
    }
}

/// [§ 4.3.8 Check if two code points are a valid escape](https://www.w3.org/TR/css-syntax-3/#starts-with-a-valid-escape)
fn is_valid_escape(first: Option<char>, second: Option<char>) -> bool {
    first == Some('\\') && second != Some('\n')
}

/// [§ 4.2 ident-start code point](https://www.w3.org/TR/css-syntax-3/#ident-start-code-point)
const fn is_ident_start_char(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || !c.is_ascii()
}

/// [§ 4.2 ident code point](https://www.w3.org/TR/css-syntax-3/#ident-code-point)
const fn is_ident_char(c: char) -> bool {
    is_ident_start_char(c) || c.is_ascii_digit() || c == '-'
}

/// [§ 4.2 whitespace](https://www.w3.org/TR/css-syntax-3/#whitespace)
const fn is_css_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\u{000C}')
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
}

impl Parser {
    fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, ahead: usize) -> Option<char> {
        self.chars.get(self.pos + ahead).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    /// Returns whether any whitespace was consumed.
    fn skip_whitespace(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(is_css_whitespace) {
            self.pos += 1;
        }
        self.pos > start
    }

    const fn error(&self, kind: SelectorErrorKind) -> SelectorSyntaxError {
        SelectorSyntaxError::new(kind, self.pos)
    }

    // ===== Grammar =====

    /// `<complex-selector-list>`. When `nested`, a `)` ends the list and is
    /// left for the caller.
    fn parse_selector_list(&mut self, nested: bool) -> Result<SelectorList> {
        let mut selectors = Vec::new();
        loop {
            let _ = self.skip_whitespace();
            selectors.push(self.parse_complex()?);
            match self.peek() {
                Some(',') => self.pos += 1,
                None => break,
                Some(')') if nested => break,
                Some(c @ (')' | ']')) => {
                    return Err(self.error(SelectorErrorKind::Unbalanced(c)));
                }
                Some(c) => return Err(self.error(SelectorErrorKind::UnexpectedChar(c))),
            }
        }
        Ok(SelectorList { selectors })
    }

    /// `<complex-selector>`. Consumes trailing whitespace.
    fn parse_complex(&mut self) -> Result<ComplexSelector> {
        let mut subject = self.parse_required_compound()?;
        let mut left_to_right = Vec::new();

        loop {
            let had_whitespace = self.skip_whitespace();
            let combinator = match self.peek() {
                Some('>') => Combinator::Child,
                Some('+') => Combinator::NextSibling,
                Some('~') => Combinator::SubsequentSibling,
                None | Some(',' | ')' | ']') => break,
                Some(_) if had_whitespace => Combinator::Descendant,
                Some(c) => return Err(self.error(SelectorErrorKind::UnexpectedChar(c))),
            };
            if combinator != Combinator::Descendant {
                self.pos += 1;
                let _ = self.skip_whitespace();
            }
            let next = self.parse_required_compound()?;
            left_to_right.push((combinator, std::mem::replace(&mut subject, next)));
        }

        // [(A, >), (B, ' ')] for `A > B C`; matching wants it from the right.
        left_to_right.reverse();
        Ok(ComplexSelector {
            subject,
            combinators: left_to_right,
        })
    }

    fn parse_required_compound(&mut self) -> Result<CompoundSelector> {
        let compound = self.parse_compound()?;
        if !compound.simple_selectors.is_empty() {
            return Ok(compound);
        }
        Err(self.error(match self.peek() {
            None | Some(',' | ')' | '>' | '+' | '~') => SelectorErrorKind::EmptyCompound,
            Some(']') => SelectorErrorKind::Unbalanced(']'),
            Some(c) => SelectorErrorKind::UnexpectedChar(c),
        }))
    }

    /// [§ 4.2 Compound selectors](https://www.w3.org/TR/selectors-4/#compound)
    ///
    /// "If it contains a type selector or universal selector, that selector
    /// must come first in the sequence."
    fn parse_compound(&mut self) -> Result<CompoundSelector> {
        let mut simple_selectors = Vec::new();

        if self.peek() == Some('*') {
            self.pos += 1;
            simple_selectors.push(SimpleSelector::Universal);
        } else if let Some(name) = self.consume_ident() {
            simple_selectors.push(SimpleSelector::Type(name));
        }

        loop {
            let selector = match self.peek() {
                Some('#') => {
                    self.pos += 1;
                    // A hash token's name may start with a digit.
                    let id = self.consume_name();
                    if id.is_empty() {
                        return Err(self.error(SelectorErrorKind::ExpectedIdentifier));
                    }
                    SimpleSelector::Id(id)
                }
                Some('.') => {
                    self.pos += 1;
                    let class = self
                        .consume_ident()
                        .ok_or_else(|| self.error(SelectorErrorKind::ExpectedIdentifier))?;
                    SimpleSelector::Class(class)
                }
                Some('[') => SimpleSelector::Attribute(self.parse_attribute()?),
                Some(':') => SimpleSelector::PseudoClass(self.parse_pseudo_class()?),
                _ => break,
            };
            simple_selectors.push(selector);
        }

        Ok(CompoundSelector { simple_selectors })
    }

    /// [§ 6 Attribute selectors](https://www.w3.org/TR/selectors-4/#attribute-selectors)
    fn parse_attribute(&mut self) -> Result<AttributeSelector> {
        let open = self.pos;
        self.pos += 1;
        let unbalanced = || SelectorSyntaxError::new(SelectorErrorKind::Unbalanced('['), open);

        let _ = self.skip_whitespace();
        let name = match self.consume_ident() {
            Some(name) => name.to_ascii_lowercase(),
            None if self.peek().is_none() => return Err(unbalanced()),
            None => return Err(self.error(SelectorErrorKind::ExpectedIdentifier)),
        };
        let _ = self.skip_whitespace();

        let operator_pos = self.pos;
        let operator = match self.bump() {
            None => return Err(unbalanced()),
            Some(']') => return Ok(AttributeSelector::Exists(name)),
            Some('=') => '=',
            Some(c @ ('~' | '|' | '^' | '$' | '*' | '!')) => {
                if c != '!' && self.peek() == Some('=') {
                    self.pos += 1;
                    c
                } else {
                    let mut text = c.to_string();
                    if let Some(next) = self.peek().filter(|&n| n == '=') {
                        text.push(next);
                    }
                    return Err(SelectorSyntaxError::new(
                        SelectorErrorKind::UnknownAttributeOperator(text),
                        operator_pos,
                    ));
                }
            }
            Some(c) => {
                return Err(SelectorSyntaxError::new(
                    SelectorErrorKind::UnexpectedChar(c),
                    operator_pos,
                ));
            }
        };

        let _ = self.skip_whitespace();
        let value = match self.peek() {
            Some(quote @ ('"' | '\'')) => self.consume_string(quote)?,
            None => return Err(unbalanced()),
            Some(c) => {
                // Unquoted values are read leniently as names, so `[width=100]` works.
                let value = self.consume_name();
                if value.is_empty() {
                    return Err(self.error(SelectorErrorKind::UnexpectedChar(c)));
                }
                value
            }
        };
        let _ = self.skip_whitespace();

        match self.bump() {
            Some(']') => {}
            None => return Err(unbalanced()),
            Some(c) => {
                self.pos -= 1;
                return Err(self.error(SelectorErrorKind::UnexpectedChar(c)));
            }
        }

        Ok(match operator {
            '~' => AttributeSelector::Includes(name, value),
            '|' => AttributeSelector::DashMatch(name, value),
            '^' => AttributeSelector::PrefixMatch(name, value),
            '$' => AttributeSelector::SuffixMatch(name, value),
            '*' => AttributeSelector::SubstringMatch(name, value),
            _ => AttributeSelector::Equals(name, value),
        })
    }

    /// [§ 3.4 Pseudo-classes](https://www.w3.org/TR/selectors-4/#pseudo-classes)
    ///
    /// "Pseudo-classes are simple selectors that permit selection based on
    /// information that lies outside of the document tree or that can be
    /// awkward or impossible to express using the other simple selectors."
    fn parse_pseudo_class(&mut self) -> Result<PseudoClass> {
        let colon = self.pos;
        self.pos += 1;
        let unknown = |name: String| {
            SelectorSyntaxError::new(SelectorErrorKind::UnknownPseudoClass(name), colon)
        };

        if self.peek() == Some(':') {
            self.pos += 1;
            let name = self.consume_ident().unwrap_or_default();
            return Err(unknown(format!(":{name}")));
        }

        let name = self
            .consume_ident()
            .ok_or_else(|| self.error(SelectorErrorKind::ExpectedIdentifier))?
            .to_ascii_lowercase();

        if self.peek() != Some('(') {
            return match name.as_str() {
                "root" => Ok(PseudoClass::Root),
                "empty" => Ok(PseudoClass::Empty),
                "first-child" => Ok(PseudoClass::FirstChild),
                "last-child" => Ok(PseudoClass::LastChild),
                "only-child" => Ok(PseudoClass::OnlyChild),
                "first-of-type" => Ok(PseudoClass::FirstOfType),
                "last-of-type" => Ok(PseudoClass::LastOfType),
                "only-of-type" => Ok(PseudoClass::OnlyOfType),
                "nth-child" | "nth-last-child" | "nth-of-type" | "nth-last-of-type" | "not" => {
                    Err(self.error(SelectorErrorKind::InvalidPseudoArgument(name)))
                }
                _ => Err(unknown(name)),
            };
        }

        let open = self.pos;
        self.pos += 1;
        let unbalanced = SelectorSyntaxError::new(SelectorErrorKind::Unbalanced('('), open);

        let nth_kind: fn(Nth) -> PseudoClass = match name.as_str() {
            "nth-child" => PseudoClass::NthChild,
            "nth-last-child" => PseudoClass::NthLastChild,
            "nth-of-type" => PseudoClass::NthOfType,
            "nth-last-of-type" => PseudoClass::NthLastOfType,
            "not" => {
                let list = self.parse_selector_list(true)?;
                return match self.bump() {
                    Some(')') => Ok(PseudoClass::Not(list)),
                    _ => Err(unbalanced),
                };
            }
            "root" | "empty" | "first-child" | "last-child" | "only-child" | "first-of-type"
            | "last-of-type" | "only-of-type" => {
                return Err(SelectorSyntaxError::new(
                    SelectorErrorKind::InvalidPseudoArgument(name),
                    open,
                ));
            }
            _ => return Err(unknown(name)),
        };

        let argument_start = self.pos;
        let mut argument = String::new();
        loop {
            match self.bump() {
                Some(')') => break,
                Some(c) => argument.push(c),
                None => return Err(unbalanced),
            }
        }
        parse_nth(&argument).map(nth_kind).ok_or_else(|| {
            SelectorSyntaxError::new(SelectorErrorKind::InvalidPseudoArgument(name), argument_start)
        })
    }

    // ===== Tokens =====

    /// [§ 4.3.9 Check if three code points would start an ident sequence](https://www.w3.org/TR/css-syntax-3/#would-start-an-identifier)
    fn at_ident_start(&self) -> bool {
        match self.peek() {
            Some('-') => match self.peek_at(1) {
                Some(c) if is_ident_start_char(c) || c == '-' => true,
                second => is_valid_escape(second, self.peek_at(2)),
            },
            Some('\\') => is_valid_escape(Some('\\'), self.peek_at(1)),
            Some(c) => is_ident_start_char(c),
            None => false,
        }
    }

    fn consume_ident(&mut self) -> Option<String> {
        if self.at_ident_start() {
            Some(self.consume_name())
        } else {
            None
        }
    }

    /// [§ 4.3.12 Consume an ident sequence](https://www.w3.org/TR/css-syntax-3/#consume-name)
    fn consume_name(&mut self) -> String {
        let mut name = String::new();
        loop {
            match self.peek() {
                Some(c) if is_ident_char(c) => {
                    name.push(c);
                    self.pos += 1;
                }
                Some('\\') if is_valid_escape(Some('\\'), self.peek_at(1)) => {
                    self.pos += 1;
                    name.push(self.consume_escape());
                }
                _ => return name,
            }
        }
    }

    /// [§ 4.3.7 Consume an escaped code point](https://www.w3.org/TR/css-syntax-3/#consume-escaped-code-point)
    ///
    /// Called with the backslash already consumed.
    fn consume_escape(&mut self) -> char {
        let Some(first) = self.bump() else {
            return char::REPLACEMENT_CHARACTER;
        };
        if !first.is_ascii_hexdigit() {
            return first;
        }

        let mut digits = first.to_string();
        while digits.len() < 6 && self.peek().is_some_and(|c| c.is_ascii_hexdigit()) {
            if let Some(c) = self.bump() {
                digits.push(c);
            }
        }
        // "If the next input code point is whitespace, consume it as well."
        if self.peek().is_some_and(is_css_whitespace) {
            self.pos += 1;
        }

        u32::from_str_radix(&digits, 16)
            .ok()
            .filter(|&code| code != 0)
            .and_then(char::from_u32)
            .unwrap_or(char::REPLACEMENT_CHARACTER)
    }

    /// [§ 4.3.5 Consume a string token](https://www.w3.org/TR/css-syntax-3/#consume-string-token)
    fn consume_string(&mut self, quote: char) -> Result<String> {
        let start = self.pos;
        self.pos += 1;
        let unterminated =
            || SelectorSyntaxError::new(SelectorErrorKind::UnterminatedString, start);

        let mut value = String::new();
        loop {
            match self.bump() {
                None | Some('\n') => return Err(unterminated()),
                Some(c) if c == quote => return Ok(value),
                Some('\\') => match self.peek() {
                    None => {}
                    Some('\n') => self.pos += 1,
                    Some(_) => value.push(self.consume_escape()),
                },
                Some(c) => value.push(c),
            }
        }
    }
}

/// [§ 6 The An+B microsyntax](https://www.w3.org/TR/css-syntax-3/#anb-microsyntax)
///
/// Accepts `odd`, `even`, `b`, `an`, `an+b`, `-n+b` and friends, ASCII
/// case-insensitively, with whitespace around the argument and around the
/// sign before `b`.
fn parse_nth(argument: &str) -> Option<Nth> {
    let text = argument.trim_matches(is_css_whitespace).to_ascii_lowercase();
    match text.as_str() {
        "odd" => return Some(Nth::ODD),
        "even" => return Some(Nth::EVEN),
        _ => {}
    }

    let (sign, rest) = split_sign(&text);
    let digit_count = rest.bytes().take_while(u8::is_ascii_digit).count();
    let (digits, rest) = rest.split_at(digit_count);

    let Some(rest) = rest.strip_prefix('n') else {
        // Plain integer: `b`.
        if digits.is_empty() || !rest.is_empty() {
            return None;
        }
        return Some(Nth::new(0, sign * digits.parse::<i32>().ok()?));
    };

    let a = if digits.is_empty() {
        sign
    } else {
        sign * digits.parse::<i32>().ok()?
    };

    let rest = rest.trim_start_matches(is_css_whitespace);
    if rest.is_empty() {
        return Some(Nth::new(a, 0));
    }
    let (b_sign, b_digits) = match rest.as_bytes().first() {
        Some(b'+') => (1, &rest[1..]),
        Some(b'-') => (-1, &rest[1..]),
        _ => return None,
    };
    let b_digits = b_digits.trim_start_matches(is_css_whitespace);
    if b_digits.is_empty() || !b_digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(Nth::new(a, b_sign * b_digits.parse::<i32>().ok()?))
}

/// Split a leading `+` or `-` off the `a` part. No whitespace may follow it.
fn split_sign(text: &str) -> (i32, &str) {
    if let Some(rest) = text.strip_prefix('-') {
        (-1, rest)
    } else if let Some(rest) = text.strip_prefix('+') {
        (1, rest)
    } else {
        (1, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("odd", 2, 1)]
    #[test_case("EVEN", 2, 0)]
    #[test_case("5", 0, 5)]
    #[test_case("-3", 0, -3)]
    #[test_case("+4", 0, 4)]
    #[test_case("n", 1, 0)]
    #[test_case("-n", -1, 0)]
    #[test_case("+n", 1, 0)]
    #[test_case("3n", 3, 0)]
    #[test_case("2n+1", 2, 1)]
    #[test_case("2n-1", 2, -1)]
    #[test_case("-n+3", -1, 3)]
    #[test_case(" 2n + 1 ", 2, 1 ; "spaces around sign")]
    #[test_case("2n +1", 2, 1 ; "space before sign")]
    #[test_case("2N+0", 2, 0 ; "uppercase n")]
    fn test_parse_nth(text: &str, a: i32, b: i32) {
        assert_eq!(parse_nth(text), Some(Nth::new(a, b)));
    }

    #[test_case("" ; "empty")]
    #[test_case("x" ; "letter")]
    #[test_case("2n+" ; "dangling sign")]
    #[test_case("n+-1" ; "double sign")]
    #[test_case("- n" ; "space after leading sign")]
    #[test_case("2n 1" ; "missing sign")]
    #[test_case("1.5" ; "fraction")]
    #[test_case("99999999999" ; "overflow")]
    fn test_parse_nth_rejects(text: &str) {
        assert_eq!(parse_nth(text), None);
    }

    #[test]
    fn test_escape_sequences() {
        let mut parser = Parser::new("a\\62 c\\.d");
        assert_eq!(parser.consume_ident().as_deref(), Some("abc.d"));
    }

    #[test]
    fn test_escape_null_is_replacement() {
        let mut parser = Parser::new("\\0 x");
        assert_eq!(parser.consume_ident().as_deref(), Some("\u{FFFD}x"));
    }

    #[test]
    fn test_ident_start() {
        assert!(Parser::new("-foo").at_ident_start());
        assert!(Parser::new("--x").at_ident_start());
        assert!(!Parser::new("-1").at_ident_start());
        assert!(!Parser::new("1a").at_ident_start());
        assert!(!Parser::new("\\\n").at_ident_start());
    }
}
