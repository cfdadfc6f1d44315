//! Shared plumbing for the tokenizer states.
//!
//! [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
//!
//! State transitions, input lookahead, token emission and error recording
//! live here so the state handlers read like the algorithm text.

use trawl_common::warning::warn_once;

use super::core::{HTMLTokenizer, TokenizerState};
use super::error::ParseErrorCode;
use super::token::Token;

// =============================================================================
// State Transitions
// =============================================================================

impl HTMLTokenizer {
    /// "Switch to the X state"
    ///
    /// The next character is consumed on the next step.
    pub(super) const fn switch_to(&mut self, new_state: TokenizerState) {
        self.state = new_state;
    }

    /// "Reconsume in the X state"
    ///
    /// The current character is processed again in the new state.
    pub(super) const fn reconsume_in(&mut self, new_state: TokenizerState) {
        self.reconsume = true;
        self.state = new_state;
    }
}

// =============================================================================
// Input
// =============================================================================

impl HTMLTokenizer {
    /// "Consume the next input character"
    pub(super) fn consume(&mut self) -> Option<char> {
        let c = self.input[self.current_pos..].chars().next()?;
        self.current_pos += c.len_utf8();
        Some(c)
    }

    /// "If the next few characters are..."
    pub(super) fn next_few_characters_are(&self, target: &str) -> bool {
        self.input[self.current_pos..].starts_with(target)
    }

    /// "ASCII case-insensitive match for the word ..."
    pub(super) fn next_few_characters_are_case_insensitive(&self, target: &str) -> bool {
        self.input[self.current_pos..]
            .get(..target.len())
            .is_some_and(|next| next.eq_ignore_ascii_case(target))
    }

    /// Skip over `target`, which the caller has already matched.
    /// Only used with ASCII keywords, so byte length equals character count.
    pub(super) const fn consume_string(&mut self, target: &str) {
        self.current_pos += target.len();
    }

    /// [ASCII whitespace](https://infra.spec.whatwg.org/#ascii-whitespace)
    /// minus CR, which never survives input preprocessing.
    pub(super) const fn is_whitespace_char(input_char: char) -> bool {
        matches!(input_char, ' ' | '\t' | '\n' | '\x0C')
    }
}

// =============================================================================
// Current Token Mutation
// =============================================================================

impl HTMLTokenizer {
    pub(super) fn append_to_current_tag_name(&mut self, c: char) {
        if let Some(ref mut token) = self.current_token {
            token.append_to_tag_name(c);
        }
    }

    pub(super) fn append_to_current_attribute_name(&mut self, c: char) {
        if let Some(ref mut token) = self.current_token {
            token.append_to_current_attribute_name(c);
        }
    }

    pub(super) fn append_to_current_attribute_value(&mut self, c: char) {
        if let Some(ref mut token) = self.current_token {
            token.append_to_current_attribute_value(c);
        }
    }

    pub(super) fn append_to_current_comment(&mut self, c: char) {
        if let Some(ref mut token) = self.current_token {
            token.append_to_comment(c);
        }
    }

    pub(super) fn append_str_to_current_comment(&mut self, s: &str) {
        if let Some(ref mut token) = self.current_token {
            token.append_str_to_comment(s);
        }
    }

    /// "When the user agent leaves the attribute name state (and before
    /// emitting the tag token, if appropriate), the complete attribute's name
    /// must be compared to the other attributes on the same token; if there is
    /// already an attribute on the token with the exact same name, then this
    /// is a duplicate-attribute parse error and the new attribute must be
    /// removed from the token."
    pub(super) fn check_duplicate_attribute(&mut self) {
        let is_duplicate = self
            .current_token
            .as_ref()
            .is_some_and(Token::current_attribute_name_is_duplicate);

        if is_duplicate {
            self.log_parse_error(ParseErrorCode::DuplicateAttribute);
            if let Some(ref mut token) = self.current_token {
                token.remove_current_attribute();
            }
        }
    }
}

// =============================================================================
// Token Emission
// =============================================================================

impl HTMLTokenizer {
    /// "Emit the current token"
    ///
    /// The tree builder normally switches the tokenizer into RCDATA, RAWTEXT,
    /// script data or PLAINTEXT after inserting certain elements. The tokenizer
    /// runs ahead of the tree builder here, so the switch happens on emission
    /// of the start tag instead.
    pub(super) fn emit_token(&mut self) {
        let Some(mut token) = self.current_token.take() else {
            return;
        };

        match token {
            Token::StartTag { ref name, .. } => {
                if let Some(content_state) = self.content_state_for(name) {
                    self.switch_to(content_state);
                }
                self.last_start_tag_name = Some(name.clone());
            }
            Token::EndTag {
                ref mut attributes, ..
            } => {
                // "When an end tag token is emitted with attributes, that is an
                // end-tag-with-attributes parse error."
                if !attributes.is_empty() {
                    attributes.clear();
                    self.log_parse_error(ParseErrorCode::EndTagWithAttributes);
                }
            }
            _ => {}
        }

        self.token_stream.push_back(token);
    }

    /// Which content state the element named `name` puts the tokenizer in.
    ///
    /// - title, textarea: RCDATA
    /// - style, xmp, iframe, noembed, noframes: RAWTEXT
    /// - noscript: RAWTEXT, only with scripting enabled
    /// - script: script data
    /// - plaintext: PLAINTEXT
    fn content_state_for(&self, name: &str) -> Option<TokenizerState> {
        let lower = name.to_ascii_lowercase();
        match lower.as_str() {
            "title" | "textarea" => Some(TokenizerState::RCDATA),
            "style" | "xmp" | "iframe" | "noembed" | "noframes" => Some(TokenizerState::RAWTEXT),
            "noscript" if self.scripting_enabled => Some(TokenizerState::RAWTEXT),
            "script" => Some(TokenizerState::ScriptData),
            "plaintext" => Some(TokenizerState::PLAINTEXT),
            _ => None,
        }
    }

    /// "Emit the current input character as a character token."
    pub(super) fn emit_character_token(&mut self, c: char) {
        self.token_stream.push_back(Token::new_character(c));
    }

    /// "Emit an end-of-file token."
    ///
    /// Only the first call has an effect; the token stream ends there.
    pub(super) fn emit_eof_token(&mut self) {
        if !self.at_eof {
            self.at_eof = true;
            self.token_stream.push_back(Token::EndOfFile);
        }
    }
}

// =============================================================================
// RCDATA / RAWTEXT / Script Data
// =============================================================================

impl HTMLTokenizer {
    /// "An appropriate end tag token is an end tag token whose tag name matches
    /// the tag name of the last start tag to have been emitted from this
    /// tokenizer, if any. If no start tag has been emitted from this tokenizer,
    /// then no end tag token is appropriate."
    ///
    /// Compared ASCII case-insensitively since names keep source casing.
    pub(super) fn is_appropriate_end_tag_token(&self) -> bool {
        match (&self.last_start_tag_name, &self.current_token) {
            (Some(last_start_tag), Some(Token::EndTag { name, .. })) => {
                name.eq_ignore_ascii_case(last_start_tag)
            }
            _ => false,
        }
    }

    /// "Anything else - Emit a U+003C LESS-THAN SIGN character token, a U+002F
    /// SOLIDUS character token, and a character token for each of the characters
    /// in the temporary buffer (in the order they were added to the buffer).
    /// Reconsume in the ... state."
    pub(super) fn emit_end_tag_name_anything_else(&mut self, text_state: TokenizerState) {
        self.emit_character_token('<');
        self.emit_character_token('/');
        let buffer = std::mem::take(&mut self.temporary_buffer);
        for c in buffer.chars() {
            self.emit_character_token(c);
        }
        self.current_token = None;
        self.reconsume_in(text_state);
    }
}

// =============================================================================
// Error Handling
// =============================================================================

impl HTMLTokenizer {
    /// [§ 13.2.2 Parse errors](https://html.spec.whatwg.org/multipage/parsing.html#parse-errors)
    ///
    /// Records the error and logs it once. Tokenization always continues.
    pub(super) fn log_parse_error(&mut self, code: ParseErrorCode) {
        let pos = self.current_pos;
        self.errors.push((code, pos));
        warn_once("HTML Tokenizer", &format!("{code} at byte {pos}"));
    }
}
