//! Character reference states.
//!
//! [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
//! through [§ 13.2.5.80](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-end-state).

use super::core::{HTMLTokenizer, TokenizerState};
use super::error::ParseErrorCode;
use super::named_character_references::{any_entity_has_prefix, lookup_entity};

/// [§ 13.2.5.80](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-end-state)
///
/// "If the number is one of the numbers in the first column of the following
/// table, then find the row with that number in the first column, and set the
/// character reference code to the number in the second column of that row."
const C1_REPLACEMENTS: &[(u32, u32)] = &[
    (0x80, 0x20AC),
    (0x82, 0x201A),
    (0x83, 0x0192),
    (0x84, 0x201E),
    (0x85, 0x2026),
    (0x86, 0x2020),
    (0x87, 0x2021),
    (0x88, 0x02C6),
    (0x89, 0x2030),
    (0x8A, 0x0160),
    (0x8B, 0x2039),
    (0x8C, 0x0152),
    (0x8E, 0x017D),
    (0x91, 0x2018),
    (0x92, 0x2019),
    (0x93, 0x201C),
    (0x94, 0x201D),
    (0x95, 0x2022),
    (0x96, 0x2013),
    (0x97, 0x2014),
    (0x98, 0x02DC),
    (0x99, 0x2122),
    (0x9A, 0x0161),
    (0x9B, 0x203A),
    (0x9C, 0x0153),
    (0x9E, 0x017E),
    (0x9F, 0x0178),
];

/// A named reference found at the current position.
struct NamedMatch {
    /// Byte length of the matched name, including any `;`.
    len: usize,
    replacement: &'static str,
    ends_with_semicolon: bool,
    next_char: Option<char>,
}

impl HTMLTokenizer {
    /// "If the character reference was consumed as part of an attribute"
    const fn is_consumed_as_part_of_attribute(&self) -> bool {
        matches!(
            self.return_state,
            TokenizerState::AttributeValueDoubleQuoted
                | TokenizerState::AttributeValueSingleQuoted
                | TokenizerState::AttributeValueUnquoted
        )
    }

    /// "Flush code points consumed as a character reference"
    ///
    /// "If the character reference was consumed as part of an attribute, then
    /// append each character to the current attribute's value. Otherwise, emit
    /// each character as a character token."
    fn flush_code_points_consumed_as_character_reference(&mut self) {
        let buffer = std::mem::take(&mut self.temporary_buffer);
        if self.is_consumed_as_part_of_attribute() {
            for c in buffer.chars() {
                self.append_to_current_attribute_value(c);
            }
        } else {
            for c in buffer.chars() {
                self.emit_character_token(c);
            }
        }
    }

    /// [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
    pub(super) fn handle_character_reference_state(&mut self) {
        // "Set the temporary buffer to the empty string. Append a U+0026
        // AMPERSAND (&) character to the temporary buffer."
        self.temporary_buffer.clear();
        self.temporary_buffer.push('&');

        match self.current_input_character {
            Some(c) if c.is_ascii_alphanumeric() => {
                self.reconsume_in(TokenizerState::NamedCharacterReference);
            }
            Some('#') => {
                self.temporary_buffer.push('#');
                self.switch_to(TokenizerState::NumericCharacterReference);
            }
            // "Flush code points consumed as a character reference. Reconsume
            // in the return state."
            _ => {
                self.flush_code_points_consumed_as_character_reference();
                self.reconsume_in(self.return_state);
            }
        }
    }

    /// Longest entity name starting at the current input character.
    fn longest_named_match(&self) -> Option<NamedMatch> {
        let first = self.current_input_character?;
        let start = self.current_pos - first.len_utf8();
        let rest = &self.input[start..];

        let mut best = None;
        for (i, c) in rest.char_indices() {
            let end = i + c.len_utf8();
            let candidate = &rest[..end];
            if let Some(replacement) = lookup_entity(candidate) {
                best = Some((end, replacement));
            }
            if !any_entity_has_prefix(candidate) {
                break;
            }
        }

        best.map(|(len, replacement)| NamedMatch {
            len,
            replacement,
            ends_with_semicolon: rest[..len].ends_with(';'),
            next_char: rest[len..].chars().next(),
        })
    }

    /// [§ 13.2.5.73 Named character reference state](https://html.spec.whatwg.org/multipage/parsing.html#named-character-reference-state)
    ///
    /// "Consume the maximum number of characters possible, where the consumed
    /// characters are one of the identifiers in the first column of the named
    /// character references table."
    pub(super) fn handle_named_character_reference_state(&mut self) {
        let Some(found) = self.longest_named_match() else {
            // "Otherwise - Flush code points consumed as a character reference.
            // Switch to the ambiguous ampersand state."
            self.flush_code_points_consumed_as_character_reference();
            self.reconsume_in(TokenizerState::AmbiguousAmpersand);
            return;
        };

        // Consume exactly the matched name.
        let start = self.current_pos - self.current_input_character.map_or(0, char::len_utf8);
        let matched = self.input[start..start + found.len].to_string();
        self.current_pos = start + found.len;

        // "If the character reference was consumed as part of an attribute, and
        // the last character matched is not a U+003B SEMICOLON character (;), and
        // the next input character is either a U+003D EQUALS SIGN character (=) or
        // an ASCII alphanumeric, then, for historical reasons, flush code points
        // consumed as a character reference and switch to the return state."
        if self.is_consumed_as_part_of_attribute()
            && !found.ends_with_semicolon
            && found
                .next_char
                .is_some_and(|c| c == '=' || c.is_ascii_alphanumeric())
        {
            self.temporary_buffer.push_str(&matched);
            self.flush_code_points_consumed_as_character_reference();
            self.switch_to(self.return_state);
            return;
        }

        // "If the last character matched is not a U+003B SEMICOLON character (;),
        // then this is a missing-semicolon-after-character-reference parse error."
        if !found.ends_with_semicolon {
            self.log_parse_error(ParseErrorCode::MissingSemicolonAfterCharacterReference);
        }

        // "Set the temporary buffer to the empty string. Append one or two
        // characters corresponding to the character reference name to the
        // temporary buffer. Flush code points consumed as a character reference.
        // Switch to the return state."
        self.temporary_buffer.clear();
        self.temporary_buffer.push_str(found.replacement);
        self.flush_code_points_consumed_as_character_reference();
        self.switch_to(self.return_state);
    }

    /// [§ 13.2.5.74 Ambiguous ampersand state](https://html.spec.whatwg.org/multipage/parsing.html#ambiguous-ampersand-state)
    pub(super) fn handle_ambiguous_ampersand_state(&mut self) {
        match self.current_input_character {
            Some(c) if c.is_ascii_alphanumeric() => {
                if self.is_consumed_as_part_of_attribute() {
                    self.append_to_current_attribute_value(c);
                } else {
                    self.emit_character_token(c);
                }
            }
            // "This is an unknown-named-character-reference parse error.
            // Reconsume in the return state."
            Some(';') => {
                self.log_parse_error(ParseErrorCode::UnknownNamedCharacterReference);
                self.reconsume_in(self.return_state);
            }
            _ => self.reconsume_in(self.return_state),
        }
    }

    /// [§ 13.2.5.75 Numeric character reference state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-state)
    pub(super) fn handle_numeric_character_reference_state(&mut self) {
        self.character_reference_code = 0;

        match self.current_input_character {
            Some(c @ ('x' | 'X')) => {
                self.temporary_buffer.push(c);
                self.switch_to(TokenizerState::HexadecimalCharacterReferenceStart);
            }
            _ => self.reconsume_in(TokenizerState::DecimalCharacterReferenceStart),
        }
    }

    /// [§ 13.2.5.76](https://html.spec.whatwg.org/multipage/parsing.html#hexadecimal-character-reference-start-state)
    /// and [§ 13.2.5.77](https://html.spec.whatwg.org/multipage/parsing.html#decimal-character-reference-start-state)
    /// Hexadecimal / decimal character reference start states.
    pub(super) fn handle_numeric_character_reference_start_state(&mut self, radix: u32) {
        match self.current_input_character {
            Some(c) if c.is_digit(radix) => {
                self.reconsume_in(if radix == 16 {
                    TokenizerState::HexadecimalCharacterReference
                } else {
                    TokenizerState::DecimalCharacterReference
                });
            }
            // "This is an absence-of-digits-in-numeric-character-reference parse
            // error. Flush code points consumed as a character reference.
            // Reconsume in the return state."
            _ => {
                self.log_parse_error(ParseErrorCode::AbsenceOfDigitsInNumericCharacterReference);
                self.flush_code_points_consumed_as_character_reference();
                self.reconsume_in(self.return_state);
            }
        }
    }

    /// [§ 13.2.5.78](https://html.spec.whatwg.org/multipage/parsing.html#hexadecimal-character-reference-state)
    /// and [§ 13.2.5.79](https://html.spec.whatwg.org/multipage/parsing.html#decimal-character-reference-state)
    /// Hexadecimal / decimal character reference states.
    pub(super) fn handle_numeric_character_reference_digits_state(&mut self, radix: u32) {
        match self.current_input_character {
            // Saturates instead of overflowing; anything that large is
            // outside the Unicode range either way.
            Some(c) if c.is_digit(radix) => {
                let digit = c.to_digit(radix).unwrap_or(0);
                self.character_reference_code = self
                    .character_reference_code
                    .saturating_mul(radix)
                    .saturating_add(digit);
            }
            Some(';') => self.reconsume_in(TokenizerState::NumericCharacterReferenceEnd),
            // "This is a missing-semicolon-after-character-reference parse error.
            // Reconsume in the numeric character reference end state."
            _ => {
                self.log_parse_error(ParseErrorCode::MissingSemicolonAfterCharacterReference);
                self.reconsume_in(TokenizerState::NumericCharacterReferenceEnd);
            }
        }
    }

    /// [§ 13.2.5.80 Numeric character reference end state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-end-state)
    ///
    /// Entered by reconsuming either the terminating `;`, which belongs to the
    /// reference, or whatever character ended the digits, which does not.
    pub(super) fn handle_numeric_character_reference_end_state(&mut self) {
        let code = self.checked_character_reference_code();

        self.temporary_buffer.clear();
        self.temporary_buffer.push(char::from_u32(code).unwrap_or('\u{FFFD}'));
        self.flush_code_points_consumed_as_character_reference();

        if self.current_input_character == Some(';') {
            self.switch_to(self.return_state);
        } else {
            self.reconsume_in(self.return_state);
        }
    }

    /// "Check the character reference code", reporting and replacing the
    /// values that cannot appear in a document.
    fn checked_character_reference_code(&mut self) -> u32 {
        let code = self.character_reference_code;

        // "If the number is 0x00, then this is a null-character-reference parse
        // error. Set the character reference code to 0xFFFD."
        if code == 0 {
            self.log_parse_error(ParseErrorCode::NullCharacterReference);
            return 0xFFFD;
        }
        // "If the number is greater than 0x10FFFF, then this is a
        // character-reference-outside-unicode-range parse error."
        if code > 0x0010_FFFF {
            self.log_parse_error(ParseErrorCode::CharacterReferenceOutsideUnicodeRange);
            return 0xFFFD;
        }
        // "If the number is a surrogate, then this is a
        // surrogate-character-reference parse error."
        if (0xD800..=0xDFFF).contains(&code) {
            self.log_parse_error(ParseErrorCode::SurrogateCharacterReference);
            return 0xFFFD;
        }
        // "If the number is a noncharacter, then this is a
        // noncharacter-character-reference parse error." The code point is kept.
        if (0xFDD0..=0xFDEF).contains(&code) || code & 0xFFFE == 0xFFFE {
            self.log_parse_error(ParseErrorCode::NoncharacterCharacterReference);
            return code;
        }
        // "If the number is 0x0D, or a control that's not ASCII whitespace, then
        // this is a control-character-reference parse error."
        let is_control = code < 0x20 || (0x7F..=0x9F).contains(&code);
        let is_whitespace = matches!(code, 0x09 | 0x0A | 0x0C | 0x20);
        if code == 0x0D || (is_control && !is_whitespace) {
            self.log_parse_error(ParseErrorCode::ControlCharacterReference);
        }

        C1_REPLACEMENTS
            .iter()
            .find(|&&(from, _)| from == code)
            .map_or(code, |&(_, to)| to)
    }
}
