//! DOCTYPE states.
//!
//! [§ 13.2.5.53 - § 13.2.5.68](https://html.spec.whatwg.org/multipage/parsing.html#doctype-state)
//!
//! The public and system identifier states mirror each other, so each pair
//! shares a handler parameterized by which identifier it fills in.

use super::core::{HTMLTokenizer, TokenizerState};
use super::error::ParseErrorCode;
use super::token::Token;

impl HTMLTokenizer {
    /// [§ 13.2.5.53 DOCTYPE state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-state)
    pub(super) fn handle_doctype_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::BeforeDOCTYPEName);
            }
            Some('>') => self.reconsume_in(TokenizerState::BeforeDOCTYPEName),
            None => self.emit_doctype_at_eof(),
            // "This is a missing-whitespace-before-doctype-name parse error.
            // Reconsume in the before DOCTYPE name state."
            Some(_) => {
                self.log_parse_error(ParseErrorCode::MissingWhitespaceBeforeDoctypeName);
                self.reconsume_in(TokenizerState::BeforeDOCTYPEName);
            }
        }
    }

    /// [§ 13.2.5.54 Before DOCTYPE name state](https://html.spec.whatwg.org/multipage/parsing.html#before-doctype-name-state)
    pub(super) fn handle_before_doctype_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            // "This is a missing-doctype-name parse error. Create a new DOCTYPE
            // token. Set its force-quirks flag to on. Switch to the data state.
            // Emit the current token."
            Some('>') => {
                self.log_parse_error(ParseErrorCode::MissingDoctypeName);
                let mut token = Token::new_doctype();
                token.set_force_quirks();
                self.current_token = Some(token);
                self.switch_to(TokenizerState::Data);
                self.emit_token();
            }
            None => self.emit_doctype_at_eof(),
            // "Create a new DOCTYPE token. Set the token's name to the current
            // input character [lowercased, or U+FFFD for NULL]. Switch to the
            // DOCTYPE name state."
            Some(c) => {
                let mut token = Token::new_doctype();
                if c == '\0' {
                    self.log_parse_error(ParseErrorCode::UnexpectedNullCharacter);
                    token.append_to_doctype_name('\u{FFFD}');
                } else {
                    token.append_to_doctype_name(c.to_ascii_lowercase());
                }
                self.current_token = Some(token);
                self.switch_to(TokenizerState::DOCTYPEName);
            }
        }
    }

    /// [§ 13.2.5.55 DOCTYPE name state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-name-state)
    pub(super) fn handle_doctype_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::AfterDOCTYPEName);
            }
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_token();
            }
            None => self.emit_doctype_at_eof(),
            Some(c) => {
                let c = if c == '\0' {
                    self.log_parse_error(ParseErrorCode::UnexpectedNullCharacter);
                    '\u{FFFD}'
                } else {
                    c.to_ascii_lowercase()
                };
                if let Some(ref mut token) = self.current_token {
                    token.append_to_doctype_name(c);
                }
            }
        }
    }

    /// [§ 13.2.5.56 After DOCTYPE name state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-name-state)
    pub(super) fn handle_after_doctype_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_token();
            }
            None => self.emit_doctype_at_eof(),
            // "If the six characters starting from the current input character are
            // an ASCII case-insensitive match for the word "PUBLIC", then consume
            // those characters and switch to the after DOCTYPE public keyword state."
            Some(c) if c.eq_ignore_ascii_case(&'p')
                && self.next_few_characters_are_case_insensitive("UBLIC") =>
            {
                self.consume_string("UBLIC");
                self.switch_to(TokenizerState::AfterDOCTYPEPublicKeyword);
            }
            Some(c) if c.eq_ignore_ascii_case(&'s')
                && self.next_few_characters_are_case_insensitive("YSTEM") =>
            {
                self.consume_string("YSTEM");
                self.switch_to(TokenizerState::AfterDOCTYPESystemKeyword);
            }
            // "Otherwise, this is an invalid-character-sequence-after-doctype-name
            // parse error. Set the current DOCTYPE token's force-quirks flag to on.
            // Reconsume in the bogus DOCTYPE state."
            Some(_) => {
                self.log_parse_error(ParseErrorCode::InvalidCharacterSequenceAfterDoctypeName);
                self.set_current_force_quirks();
                self.reconsume_in(TokenizerState::BogusDOCTYPE);
            }
        }
    }

    /// [§ 13.2.5.57](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-public-keyword-state)
    /// and [§ 13.2.5.63](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-system-keyword-state)
    /// After DOCTYPE public / system keyword states.
    pub(super) fn handle_after_doctype_keyword_state(&mut self, public: bool) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(if public {
                    TokenizerState::BeforeDOCTYPEPublicIdentifier
                } else {
                    TokenizerState::BeforeDOCTYPESystemIdentifier
                });
            }
            // "This is a missing-whitespace-after-doctype-public-keyword parse error.
            // Set the current DOCTYPE token's public identifier to the empty string
            // (not missing), then switch to the DOCTYPE public identifier
            // (double-quoted) state."
            Some(quote @ ('"' | '\'')) => {
                self.log_parse_error(if public {
                    ParseErrorCode::MissingWhitespaceAfterDoctypePublicKeyword
                } else {
                    ParseErrorCode::MissingWhitespaceAfterDoctypeSystemKeyword
                });
                self.begin_identifier(public, quote);
            }
            _ => self.handle_missing_doctype_identifier(public),
        }
    }

    /// [§ 13.2.5.58](https://html.spec.whatwg.org/multipage/parsing.html#before-doctype-public-identifier-state)
    /// and [§ 13.2.5.64](https://html.spec.whatwg.org/multipage/parsing.html#before-doctype-system-identifier-state)
    /// Before DOCTYPE public / system identifier states.
    pub(super) fn handle_before_doctype_identifier_state(&mut self, public: bool) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            Some(quote @ ('"' | '\'')) => self.begin_identifier(public, quote),
            _ => self.handle_missing_doctype_identifier(public),
        }
    }

    /// [§ 13.2.5.59 - § 13.2.5.60](https://html.spec.whatwg.org/multipage/parsing.html#doctype-public-identifier-(double-quoted)-state)
    /// and [§ 13.2.5.65 - § 13.2.5.66](https://html.spec.whatwg.org/multipage/parsing.html#doctype-system-identifier-(double-quoted)-state)
    /// DOCTYPE public / system identifier (double-quoted / single-quoted) states.
    pub(super) fn handle_doctype_identifier_quoted_state(&mut self, public: bool, quote: char) {
        match self.current_input_character {
            Some(c) if c == quote => {
                self.switch_to(if public {
                    TokenizerState::AfterDOCTYPEPublicIdentifier
                } else {
                    TokenizerState::AfterDOCTYPESystemIdentifier
                });
            }
            // "This is an abrupt-doctype-public-identifier parse error. Set the
            // current DOCTYPE token's force-quirks flag to on. Switch to the data
            // state. Emit the current DOCTYPE token."
            Some('>') => {
                self.log_parse_error(if public {
                    ParseErrorCode::AbruptDoctypePublicIdentifier
                } else {
                    ParseErrorCode::AbruptDoctypeSystemIdentifier
                });
                self.set_current_force_quirks();
                self.switch_to(TokenizerState::Data);
                self.emit_token();
            }
            None => self.emit_doctype_at_eof(),
            Some(c) => {
                let c = if c == '\0' {
                    self.log_parse_error(ParseErrorCode::UnexpectedNullCharacter);
                    '\u{FFFD}'
                } else {
                    c
                };
                if let Some(ref mut token) = self.current_token {
                    if public {
                        token.append_to_public_identifier(c);
                    } else {
                        token.append_to_system_identifier(c);
                    }
                }
            }
        }
    }

    /// [§ 13.2.5.61 After DOCTYPE public identifier state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-public-identifier-state)
    pub(super) fn handle_after_doctype_public_identifier_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::BetweenDOCTYPEPublicAndSystemIdentifiers);
            }
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_token();
            }
            Some(quote @ ('"' | '\'')) => {
                self.log_parse_error(
                    ParseErrorCode::MissingWhitespaceBetweenDoctypePublicAndSystemIdentifiers,
                );
                self.begin_identifier(false, quote);
            }
            None => self.emit_doctype_at_eof(),
            Some(_) => self.bogus_doctype_missing_quote(false),
        }
    }

    /// [§ 13.2.5.62 Between DOCTYPE public and system identifiers state](https://html.spec.whatwg.org/multipage/parsing.html#between-doctype-public-and-system-identifiers-state)
    pub(super) fn handle_between_doctype_public_and_system_identifiers_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_token();
            }
            Some(quote @ ('"' | '\'')) => self.begin_identifier(false, quote),
            None => self.emit_doctype_at_eof(),
            Some(_) => self.bogus_doctype_missing_quote(false),
        }
    }

    /// [§ 13.2.5.67 After DOCTYPE system identifier state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-system-identifier-state)
    pub(super) fn handle_after_doctype_system_identifier_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_token();
            }
            None => self.emit_doctype_at_eof(),
            // "This is an unexpected-character-after-doctype-system-identifier parse
            // error. Reconsume in the bogus DOCTYPE state. (This does not set the
            // current DOCTYPE token's force-quirks flag to on.)"
            Some(_) => {
                self.log_parse_error(ParseErrorCode::UnexpectedCharacterAfterDoctypeSystemIdentifier);
                self.reconsume_in(TokenizerState::BogusDOCTYPE);
            }
        }
    }

    /// [§ 13.2.5.68 Bogus DOCTYPE state](https://html.spec.whatwg.org/multipage/parsing.html#bogus-doctype-state)
    pub(super) fn handle_bogus_doctype_state(&mut self) {
        match self.current_input_character {
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_token();
            }
            Some('\0') => self.log_parse_error(ParseErrorCode::UnexpectedNullCharacter),
            // "EOF - Emit the DOCTYPE token. Emit an end-of-file token."
            None => {
                self.emit_token();
                self.emit_eof_token();
            }
            Some(_) => {}
        }
    }

    // ===== shared steps =====

    /// Set the identifier to the empty string (not missing) and switch to the
    /// matching quoted state.
    fn begin_identifier(&mut self, public: bool, quote: char) {
        if let Some(ref mut token) = self.current_token {
            if public {
                token.begin_public_identifier();
            } else {
                token.begin_system_identifier();
            }
        }
        let next = match (public, quote) {
            (true, '"') => TokenizerState::DOCTYPEPublicIdentifierDoubleQuoted,
            (true, _) => TokenizerState::DOCTYPEPublicIdentifierSingleQuoted,
            (false, '"') => TokenizerState::DOCTYPESystemIdentifierDoubleQuoted,
            (false, _) => TokenizerState::DOCTYPESystemIdentifierSingleQuoted,
        };
        self.switch_to(next);
    }

    /// The `>`, EOF and "anything else" entries shared by the keyword and
    /// before-identifier states.
    fn handle_missing_doctype_identifier(&mut self, public: bool) {
        match self.current_input_character {
            // "This is a missing-doctype-public-identifier parse error. Set the
            // current DOCTYPE token's force-quirks flag to on. Switch to the data
            // state. Emit the current DOCTYPE token."
            Some('>') => {
                self.log_parse_error(if public {
                    ParseErrorCode::MissingDoctypePublicIdentifier
                } else {
                    ParseErrorCode::MissingDoctypeSystemIdentifier
                });
                self.set_current_force_quirks();
                self.switch_to(TokenizerState::Data);
                self.emit_token();
            }
            None => self.emit_doctype_at_eof(),
            Some(_) => self.bogus_doctype_missing_quote(public),
        }
    }

    /// "This is a missing-quote-before-doctype-public-identifier parse error.
    /// Set the current DOCTYPE token's force-quirks flag to on. Reconsume in
    /// the bogus DOCTYPE state."
    fn bogus_doctype_missing_quote(&mut self, public: bool) {
        self.log_parse_error(if public {
            ParseErrorCode::MissingQuoteBeforeDoctypePublicIdentifier
        } else {
            ParseErrorCode::MissingQuoteBeforeDoctypeSystemIdentifier
        });
        self.set_current_force_quirks();
        self.reconsume_in(TokenizerState::BogusDOCTYPE);
    }

    fn set_current_force_quirks(&mut self) {
        if let Some(ref mut token) = self.current_token {
            token.set_force_quirks();
        }
    }

    /// "EOF - This is an eof-in-doctype parse error. [Create a new DOCTYPE
    /// token if there is none.] Set its force-quirks flag to on. Emit the
    /// current token. Emit an end-of-file token."
    fn emit_doctype_at_eof(&mut self) {
        self.log_parse_error(ParseErrorCode::EofInDoctype);
        let mut token = self.current_token.take().unwrap_or_else(Token::new_doctype);
        token.set_force_quirks();
        self.current_token = Some(token);
        self.emit_token();
        self.emit_eof_token();
    }
}
