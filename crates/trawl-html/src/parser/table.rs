//! Table insertion modes.
//!
//! [§ 13.2.6.4.9](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intable)
//! through [§ 13.2.6.4.15](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incell).

use super::core::{HTMLParser, InsertionMode};
use crate::tokenizer::Token;

/// "clear the stack back to a table context"
const TABLE_CONTEXT: &[&str] = &["table", "template"];

/// "clear the stack back to a table body context"
const TABLE_BODY_CONTEXT: &[&str] = &["tbody", "tfoot", "thead", "template"];

/// "clear the stack back to a table row context"
const TABLE_ROW_CONTEXT: &[&str] = &["tr", "template"];

const TABLE_SECTIONS: &[&str] = &["tbody", "tfoot", "thead"];

impl HTMLParser {
    /// [§ 13.2.6.4.9 The "in table" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intable)
    pub(super) fn handle_in_table_mode(&mut self, token: &Token) {
        match token {
            // "A character token, if the current node is table, tbody, template,
            // tfoot, thead, or tr element": "Let the pending table character
            // tokens be an empty list of tokens. Let the original insertion mode
            // be the current insertion mode. Switch the insertion mode to "in
            // table text" and reprocess the token."
            Token::Character { .. }
                if self.current_node_is(&["table", "tbody", "template", "tfoot", "thead", "tr"]) =>
            {
                self.pending_table_character_tokens.clear();
                self.original_insertion_mode = Some(self.insertion_mode);
                self.switch_mode(InsertionMode::InTableText);
                self.reprocess_token(token);
            }

            Token::Comment { data } => self.insert_comment(data),

            Token::Doctype { .. } => self.ignore_token(token),

            // "Clear the stack back to a table context. Insert a marker at the
            // end of the list of active formatting elements. Insert an HTML
            // element for the token, then switch the insertion mode to "in caption"."
            Token::StartTag { name, .. } if name == "caption" => {
                self.clear_stack_back_to(TABLE_CONTEXT);
                let _ = self.insert_html_element(token);
                self.switch_mode(InsertionMode::InCaption);
            }

            Token::StartTag { name, .. } if name == "colgroup" => {
                self.clear_stack_back_to(TABLE_CONTEXT);
                let _ = self.insert_html_element(token);
                self.switch_mode(InsertionMode::InColumnGroup);
            }

            // "Insert an HTML element for a "colgroup" start tag token with no
            // attributes, then switch the insertion mode to "in column group".
            // Reprocess the current token."
            Token::StartTag { name, .. } if name == "col" => {
                self.clear_stack_back_to(TABLE_CONTEXT);
                let _ = self.insert_element("colgroup", &[]);
                self.switch_mode(InsertionMode::InColumnGroup);
                self.reprocess_token(token);
            }

            Token::StartTag { name, .. } if TABLE_SECTIONS.contains(&name.as_str()) => {
                self.clear_stack_back_to(TABLE_CONTEXT);
                let _ = self.insert_html_element(token);
                self.switch_mode(InsertionMode::InTableBody);
            }

            // "Insert an HTML element for a "tbody" start tag token with no
            // attributes, then switch the insertion mode to "in table body".
            // Reprocess the current token."
            Token::StartTag { name, .. } if matches!(name.as_str(), "td" | "th" | "tr") => {
                self.clear_stack_back_to(TABLE_CONTEXT);
                let _ = self.insert_element("tbody", &[]);
                self.switch_mode(InsertionMode::InTableBody);
                self.reprocess_token(token);
            }

            // "Parse error. If the stack of open elements does not have a table
            // element in table scope, ignore the token. Otherwise: Pop elements
            // ... until a table element has been popped from the stack. Reset
            // the insertion mode appropriately. Reprocess the token."
            Token::StartTag { name, .. } if name == "table" => {
                self.parse_error("<table> inside a table");
                if self.has_element_in_table_scope("table") {
                    self.pop_until_tag("table");
                    self.reset_insertion_mode_appropriately();
                    self.reprocess_token(token);
                }
            }

            Token::EndTag { name, .. } if name == "table" => {
                if self.has_element_in_table_scope("table") {
                    self.pop_until_tag("table");
                    self.reset_insertion_mode_appropriately();
                } else {
                    self.ignore_token(token);
                }
            }

            Token::EndTag { name, .. }
                if matches!(
                    name.as_str(),
                    "body"
                        | "caption"
                        | "col"
                        | "colgroup"
                        | "html"
                        | "tbody"
                        | "td"
                        | "tfoot"
                        | "th"
                        | "thead"
                        | "tr"
                ) =>
            {
                self.ignore_token(token);
            }

            // "Process the token using the rules for the "in head" insertion mode."
            Token::StartTag { name, .. }
                if matches!(name.as_str(), "style" | "script" | "template") =>
            {
                self.handle_in_head_mode(token);
            }
            Token::EndTag { name, .. } if name == "template" => self.handle_in_head_mode(token),

            // "If the token does not have an attribute with the name "type", or
            // if it does, but that attribute's value is not an ASCII
            // case-insensitive match for the string "hidden", then: act as
            // described in the "anything else" entry below."
            Token::StartTag {
                name, attributes, ..
            } if name == "input"
                && attributes.iter().any(|attr| {
                    attr.name.eq_ignore_ascii_case("type")
                        && attr.value.eq_ignore_ascii_case("hidden")
                }) =>
            {
                self.parse_error("hidden <input> directly inside a table");
                self.insert_void_element(token);
            }

            // "Parse error. If there is a template element on the stack of open
            // elements, or if the form element pointer is not null, ignore the
            // token. Otherwise: Insert an HTML element for the token, and set the
            // form element pointer to point to the element created. Pop that
            // form element off the stack of open elements."
            Token::StartTag { name, .. } if name == "form" => {
                if self.stack_contains("template") || self.form_element_pointer.is_some() {
                    self.ignore_token(token);
                    return;
                }
                self.parse_error("<form> directly inside a table");
                let form = self.insert_html_element(token);
                self.form_element_pointer = Some(form);
                let _ = self.stack_of_open_elements.pop();
            }

            Token::EndOfFile => self.handle_in_body_mode(token),

            _ => self.handle_in_table_anything_else(token),
        }
    }

    /// "Parse error. Enable foster parenting, process the token using the rules
    /// for the "in body" insertion mode, and then disable foster parenting."
    fn handle_in_table_anything_else(&mut self, token: &Token) {
        let message = format!("{token} foster-parented out of a table");
        self.parse_error(&message);
        self.foster_parenting = true;
        self.handle_in_body_mode(token);
        self.foster_parenting = false;
    }

    /// [§ 13.2.6.4.10 The "in table text" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intabletext)
    pub(super) fn handle_in_table_text_mode(&mut self, token: &Token) {
        match token {
            Token::Character { data: '\0' } => self.ignore_token(token),

            // "Append the character token to the pending table character tokens list."
            Token::Character { data } => self.pending_table_character_tokens.push(*data),

            _ => {
                let pending = std::mem::take(&mut self.pending_table_character_tokens);
                // "If any of the tokens in the pending table character tokens
                // list are character tokens that are not ASCII whitespace, then
                // this is a parse error: reprocess the character tokens in the
                // pending table character tokens list using the rules given in
                // the "anything else" entry in the "in table" insertion mode."
                if pending.iter().any(|&c| !Self::is_whitespace(c)) {
                    self.parse_error("text directly inside a table");
                    self.foster_parenting = true;
                    for c in pending {
                        self.handle_in_body_mode(&Token::new_character(c));
                    }
                    self.foster_parenting = false;
                } else {
                    // "Otherwise, insert the characters given by the pending
                    // table character tokens list."
                    for c in pending {
                        self.insert_character(c);
                    }
                }

                self.return_to_original_mode();
                self.reprocess_token(token);
            }
        }
    }

    /// [§ 13.2.6.4.11 The "in caption" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incaption)
    pub(super) fn handle_in_caption_mode(&mut self, token: &Token) {
        match token {
            Token::EndTag { name, .. } if name == "caption" => {
                let _ = self.close_caption();
            }

            // "If the stack of open elements does not have a caption element in
            // table scope, this is a parse error; ignore the token. Otherwise:
            // ... Reprocess the token."
            Token::StartTag { name, .. }
                if matches!(
                    name.as_str(),
                    "caption"
                        | "col"
                        | "colgroup"
                        | "tbody"
                        | "td"
                        | "tfoot"
                        | "th"
                        | "thead"
                        | "tr"
                ) =>
            {
                if self.close_caption() {
                    self.reprocess_token(token);
                }
            }
            Token::EndTag { name, .. } if name == "table" => {
                if self.close_caption() {
                    self.reprocess_token(token);
                }
            }

            Token::EndTag { name, .. }
                if matches!(
                    name.as_str(),
                    "body"
                        | "col"
                        | "colgroup"
                        | "html"
                        | "tbody"
                        | "td"
                        | "tfoot"
                        | "th"
                        | "thead"
                        | "tr"
                ) =>
            {
                self.ignore_token(token);
            }

            _ => self.handle_in_body_mode(token),
        }
    }

    /// "Generate implied end tags. ... Pop elements from this stack until a
    /// caption element has been popped from the stack. ... Switch the
    /// insertion mode to "in table"."
    ///
    /// Returns false when no caption was in table scope.
    fn close_caption(&mut self) -> bool {
        if !self.has_element_in_table_scope("caption") {
            self.parse_error("no caption in table scope");
            return false;
        }
        self.close_element("caption");
        self.switch_mode(InsertionMode::InTable);
        true
    }

    /// [§ 13.2.6.4.12 The "in column group" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incolumngroup)
    pub(super) fn handle_in_column_group_mode(&mut self, token: &Token) {
        match token {
            Token::Character { data } if Self::is_whitespace(*data) => {
                self.insert_character(*data);
            }
            Token::Comment { data } => self.insert_comment(data),
            Token::Doctype { .. } => self.ignore_token(token),
            Token::StartTag { name, .. } if name == "html" => self.handle_in_body_mode(token),

            Token::StartTag { name, .. } if name == "col" => self.insert_void_element(token),

            // "If the current node is not a colgroup element, then this is a
            // parse error; ignore the token. Otherwise, pop the current node
            // from the stack of open elements. Switch the insertion mode to "in table"."
            Token::EndTag { name, .. } if name == "colgroup" => {
                if self.current_node_is(&["colgroup"]) {
                    let _ = self.stack_of_open_elements.pop();
                    self.switch_mode(InsertionMode::InTable);
                } else {
                    self.ignore_token(token);
                }
            }

            Token::EndTag { name, .. } if name == "col" => self.ignore_token(token),

            Token::StartTag { name, .. } | Token::EndTag { name, .. } if name == "template" => {
                self.handle_in_head_mode(token);
            }

            Token::EndOfFile => self.handle_in_body_mode(token),

            _ => {
                if self.current_node_is(&["colgroup"]) {
                    let _ = self.stack_of_open_elements.pop();
                    self.switch_mode(InsertionMode::InTable);
                    self.reprocess_token(token);
                } else {
                    self.ignore_token(token);
                }
            }
        }
    }

    /// [§ 13.2.6.4.13 The "in table body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intablebody)
    pub(super) fn handle_in_table_body_mode(&mut self, token: &Token) {
        match token {
            // "Clear the stack back to a table body context. Insert an HTML
            // element for the token, then switch the insertion mode to "in row"."
            Token::StartTag { name, .. } if name == "tr" => {
                self.clear_stack_back_to(TABLE_BODY_CONTEXT);
                let _ = self.insert_html_element(token);
                self.switch_mode(InsertionMode::InRow);
            }

            // "Parse error. Clear the stack back to a table body context. Insert
            // an HTML element for a "tr" start tag token with no attributes,
            // then switch the insertion mode to "in row". Reprocess the current token."
            Token::StartTag { name, .. } if matches!(name.as_str(), "th" | "td") => {
                self.parse_error("table cell outside of a row");
                self.clear_stack_back_to(TABLE_BODY_CONTEXT);
                let _ = self.insert_element("tr", &[]);
                self.switch_mode(InsertionMode::InRow);
                self.reprocess_token(token);
            }

            Token::EndTag { name, .. } if TABLE_SECTIONS.contains(&name.as_str()) => {
                if self.has_element_in_table_scope(name) {
                    self.clear_stack_back_to(TABLE_BODY_CONTEXT);
                    let _ = self.stack_of_open_elements.pop();
                    self.switch_mode(InsertionMode::InTable);
                } else {
                    self.ignore_token(token);
                }
            }

            // "If the stack of open elements does not have a tbody, thead, or
            // tfoot element in table scope, this is a parse error; ignore the
            // token. Otherwise: Clear the stack back to a table body context.
            // Pop the current node from the stack of open elements. Switch the
            // insertion mode to "in table". Reprocess the token."
            Token::StartTag { name, .. }
                if matches!(
                    name.as_str(),
                    "caption" | "col" | "colgroup" | "tbody" | "tfoot" | "thead"
                ) =>
            {
                self.close_table_section(token);
            }
            Token::EndTag { name, .. } if name == "table" => self.close_table_section(token),

            Token::EndTag { name, .. }
                if matches!(
                    name.as_str(),
                    "body" | "caption" | "col" | "colgroup" | "html" | "td" | "th" | "tr"
                ) =>
            {
                self.ignore_token(token);
            }

            _ => self.handle_in_table_mode(token),
        }
    }

    fn close_table_section(&mut self, token: &Token) {
        if !TABLE_SECTIONS
            .iter()
            .any(|section| self.has_element_in_table_scope(section))
        {
            self.ignore_token(token);
            return;
        }
        self.clear_stack_back_to(TABLE_BODY_CONTEXT);
        let _ = self.stack_of_open_elements.pop();
        self.switch_mode(InsertionMode::InTable);
        self.reprocess_token(token);
    }

    /// [§ 13.2.6.4.14 The "in row" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inrow)
    pub(super) fn handle_in_row_mode(&mut self, token: &Token) {
        match token {
            // "Clear the stack back to a table row context. Insert an HTML
            // element for the token, then switch the insertion mode to "in cell"."
            Token::StartTag { name, .. } if matches!(name.as_str(), "th" | "td") => {
                self.clear_stack_back_to(TABLE_ROW_CONTEXT);
                let _ = self.insert_html_element(token);
                self.switch_mode(InsertionMode::InCell);
            }

            Token::EndTag { name, .. } if name == "tr" => {
                let _ = self.close_row();
            }

            Token::StartTag { name, .. }
                if matches!(
                    name.as_str(),
                    "caption" | "col" | "colgroup" | "tbody" | "tfoot" | "thead" | "tr"
                ) =>
            {
                if self.close_row() {
                    self.reprocess_token(token);
                }
            }
            Token::EndTag { name, .. } if name == "table" => {
                if self.close_row() {
                    self.reprocess_token(token);
                }
            }

            // "If the stack of open elements does not have an element in table
            // scope that is an HTML element with the same tag name as the token,
            // this is a parse error; ignore the token."
            Token::EndTag { name, .. } if TABLE_SECTIONS.contains(&name.as_str()) => {
                if !self.has_element_in_table_scope(name) {
                    self.ignore_token(token);
                    return;
                }
                if self.close_row() {
                    self.reprocess_token(token);
                }
            }

            Token::EndTag { name, .. }
                if matches!(
                    name.as_str(),
                    "body" | "caption" | "col" | "colgroup" | "html" | "td" | "th"
                ) =>
            {
                self.ignore_token(token);
            }

            _ => self.handle_in_table_mode(token),
        }
    }

    /// "If the stack of open elements does not have a tr element in table
    /// scope, this is a parse error; ignore the token. Otherwise: Clear the
    /// stack back to a table row context. Pop the current node (which will be
    /// a tr element) from the stack of open elements. Switch the insertion mode
    /// to "in table body"."
    fn close_row(&mut self) -> bool {
        if !self.has_element_in_table_scope("tr") {
            self.parse_error("no tr in table scope");
            return false;
        }
        self.clear_stack_back_to(TABLE_ROW_CONTEXT);
        let _ = self.stack_of_open_elements.pop();
        self.switch_mode(InsertionMode::InTableBody);
        true
    }

    /// [§ 13.2.6.4.15 The "in cell" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incell)
    pub(super) fn handle_in_cell_mode(&mut self, token: &Token) {
        match token {
            // "Generate implied end tags. ... Pop elements from the stack of open
            // elements until an HTML element with the same tag name as the token
            // has been popped from the stack. ... Switch the insertion mode to "in row"."
            Token::EndTag { name, .. } if matches!(name.as_str(), "td" | "th") => {
                if self.has_element_in_table_scope(name) {
                    self.close_element(name);
                    self.switch_mode(InsertionMode::InRow);
                } else {
                    self.ignore_token(token);
                }
            }

            // "Assert: The stack of open elements has a td or th element in
            // table scope. Close the cell (see below) and reprocess the token."
            Token::StartTag { name, .. }
                if matches!(
                    name.as_str(),
                    "caption"
                        | "col"
                        | "colgroup"
                        | "tbody"
                        | "td"
                        | "tfoot"
                        | "th"
                        | "thead"
                        | "tr"
                ) =>
            {
                if self.has_element_in_table_scope("td") || self.has_element_in_table_scope("th")
                {
                    self.close_the_cell();
                    self.reprocess_token(token);
                } else {
                    self.ignore_token(token);
                }
            }

            Token::EndTag { name, .. }
                if matches!(name.as_str(), "body" | "caption" | "col" | "colgroup" | "html") =>
            {
                self.ignore_token(token);
            }

            Token::EndTag { name, .. }
                if matches!(name.as_str(), "table" | "tbody" | "tfoot" | "thead" | "tr") =>
            {
                if self.has_element_in_table_scope(name) {
                    self.close_the_cell();
                    self.reprocess_token(token);
                } else {
                    self.ignore_token(token);
                }
            }

            _ => self.handle_in_body_mode(token),
        }
    }

    /// [§ 13.2.6.4.15](https://html.spec.whatwg.org/multipage/parsing.html#close-the-cell)
    ///
    /// "Generate implied end tags. ... Pop elements from the stack of open
    /// elements stack until a td element or a th element has been popped from
    /// the stack. ... Switch the insertion mode to "in row"."
    fn close_the_cell(&mut self) {
        self.generate_implied_end_tags();
        if !self.current_node_is(&["td", "th"]) {
            self.parse_error("closing a cell with other elements still open");
        }
        self.pop_until_one_of(&["td", "th"]);
        self.switch_mode(InsertionMode::InRow);
    }
}
