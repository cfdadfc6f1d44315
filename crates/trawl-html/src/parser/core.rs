use strum_macros::Display;

use trawl_common::warning::warn_once;
use trawl_dom::{Attributes, DocumentTypeData, DomTree, ElementData, NodeId, NodeType};

use super::implied::{Reach, has_implied_end_tag, rows_closed_by};
use super::open_elements::OpenElements;
use crate::tokenizer::{Attribute, Token};

/// [§ 13.2.4.1 The insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-insertion-mode)
///
/// "The insertion mode is a state variable that controls the primary operation
/// of the tree construction stage."
///
/// The select and template modes are not implemented: `select` parses as an
/// ordinary element and `template` contents are regular children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum InsertionMode {
    /// [§ 13.2.6.4.1 The "initial" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-initial-insertion-mode)
    Initial,
    /// [§ 13.2.6.4.2 The "before html" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-before-html-insertion-mode)
    BeforeHtml,
    /// [§ 13.2.6.4.3 The "before head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-before-head-insertion-mode)
    BeforeHead,
    /// [§ 13.2.6.4.4 The "in head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inhead)
    InHead,
    /// [§ 13.2.6.4.5 The "in head noscript" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inheadnoscript)
    InHeadNoscript,
    /// [§ 13.2.6.4.6 The "after head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-head-insertion-mode)
    AfterHead,
    /// [§ 13.2.6.4.7 The "in body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inbody)
    InBody,
    /// [§ 13.2.6.4.8 The "text" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incdata)
    Text,
    /// [§ 13.2.6.4.9 The "in table" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intable)
    InTable,
    /// [§ 13.2.6.4.10 The "in table text" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intabletext)
    InTableText,
    /// [§ 13.2.6.4.11 The "in caption" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incaption)
    InCaption,
    /// [§ 13.2.6.4.12 The "in column group" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incolumngroup)
    InColumnGroup,
    /// [§ 13.2.6.4.13 The "in table body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intablebody)
    InTableBody,
    /// [§ 13.2.6.4.14 The "in row" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inrow)
    InRow,
    /// [§ 13.2.6.4.15 The "in cell" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incell)
    InCell,
    /// [§ 13.2.6.4.19 The "after body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-afterbody)
    AfterBody,
    /// [§ 13.2.6.4.20 The "in frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inframeset)
    InFrameset,
    /// [§ 13.2.6.4.21 The "after frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-afterframeset)
    AfterFrameset,
    /// [§ 13.2.6.4.22 The "after after body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-after-body-insertion-mode)
    AfterAfterBody,
    /// [§ 13.2.6.4.23 The "after after frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-after-frameset-insertion-mode)
    AfterAfterFrameset,
}

/// [§ 13.2.2 Parse errors](https://html.spec.whatwg.org/multipage/parsing.html#parse-errors)
///
/// A tree construction error the parser recovered from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIssue {
    /// What the parser saw and how it recovered.
    pub message: String,
    /// Index of the offending token in the token stream.
    pub token_index: usize,
}

/// Tree builder configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParserOptions {
    /// [§ 13.2.4.5 Other parsing state flags](https://html.spec.whatwg.org/multipage/parsing.html#scripting-flag)
    ///
    /// "The scripting flag is set to "enabled" if scripting was enabled for
    /// the Document with which the parser is associated when the parser was
    /// created, and "disabled" otherwise."
    ///
    /// Must agree with the tokenizer's setting for `<noscript>` to come out right.
    pub scripting_enabled: bool,
}

/// [§ 13.2.6 Tree construction](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction)
///
/// The HTML parser builds a DOM tree from a stream of tokens.
///
/// Tag names arrive with source casing. Each token is lowercased once on the
/// way in, and the original spelling is kept aside so created elements still
/// carry it.
pub struct HTMLParser {
    /// [§ 13.2.4.1 The insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-insertion-mode)
    pub(super) insertion_mode: InsertionMode,

    /// [§ 13.2.4.1](https://html.spec.whatwg.org/multipage/parsing.html#original-insertion-mode)
    /// "the original insertion mode", for the text and in table text modes.
    pub(super) original_insertion_mode: Option<InsertionMode>,

    /// [§ 13.2.4.2 The stack of open elements](https://html.spec.whatwg.org/multipage/parsing.html#the-stack-of-open-elements)
    pub(super) stack_of_open_elements: OpenElements,

    /// [§ 13.2.4.4 The element pointers](https://html.spec.whatwg.org/multipage/parsing.html#the-element-pointers)
    pub(super) head_element_pointer: Option<NodeId>,

    /// "The form element pointer points to the last form element that was opened
    /// and whose end tag has not yet been seen."
    pub(super) form_element_pointer: Option<NodeId>,

    /// `NodeId::ROOT` is the Document node.
    pub(super) tree: DomTree,

    pub(super) token_index: usize,

    /// Set by an end-of-file token.
    pub(super) stopped: bool,

    pub(super) issues: Vec<ParseIssue>,

    /// [§ 13.2.6.1 Foster parenting](https://html.spec.whatwg.org/multipage/parsing.html#foster-parent)
    pub(super) foster_parenting: bool,

    /// "The pending table character tokens list"
    pub(super) pending_table_character_tokens: Vec<char>,

    /// [§ 13.2.4.5](https://html.spec.whatwg.org/multipage/parsing.html#frameset-ok-flag)
    /// "The frameset-ok flag is set to "ok" when the parser is created."
    pub(super) frameset_ok: bool,

    /// Set by the initial insertion mode for missing or legacy doctypes.
    /// Only consulted for `<table>` closing an open `<p>`.
    pub(super) quirks_mode: bool,

    /// "If the next token is a U+000A LINE FEED (LF) character token, then
    /// ignore that token and move on to the next one." (pre, listing, textarea)
    pub(super) skip_next_newline: bool,

    pub(super) scripting_enabled: bool,

    /// Source spelling of the current token's tag name, when it differs from
    /// the lowercased name used for dispatch.
    source_tag_name: Option<String>,
}

impl HTMLParser {
    /// Create a new parser.
    #[must_use]
    pub fn new(options: ParserOptions) -> Self {
        Self {
            insertion_mode: InsertionMode::Initial,
            original_insertion_mode: None,
            stack_of_open_elements: OpenElements::default(),
            head_element_pointer: None,
            form_element_pointer: None,
            tree: DomTree::new(),
            token_index: 0,
            stopped: false,
            issues: Vec::new(),
            foster_parenting: false,
            pending_table_character_tokens: Vec::new(),
            frameset_ok: true,
            quirks_mode: false,
            skip_next_newline: false,
            scripting_enabled: options.scripting_enabled,
            source_tag_name: None,
        }
    }

    /// Run the parser over `tokens` and return the DOM tree.
    ///
    /// Construction stops at the first end-of-file token, or when the
    /// token source runs dry.
    #[must_use]
    pub fn run<I: IntoIterator<Item = Token>>(self, tokens: I) -> DomTree {
        self.run_with_issues(tokens).0
    }

    /// Run the parser and return both the `DomTree` and any parse issues.
    #[must_use]
    pub fn run_with_issues<I: IntoIterator<Item = Token>>(
        mut self,
        tokens: I,
    ) -> (DomTree, Vec<ParseIssue>) {
        for token in tokens {
            let token = self.normalize_tag_name(token);
            self.process_token(&token);
            self.token_index += 1;
            if self.stopped {
                break;
            }
        }
        (self.tree, self.issues)
    }

    /// Lowercase a tag token's name, remembering the source spelling.
    fn normalize_tag_name(&mut self, mut token: Token) -> Token {
        self.source_tag_name = None;
        if let Token::StartTag { name, .. } | Token::EndTag { name, .. } = &mut token
            && name.bytes().any(|b| b.is_ascii_uppercase())
        {
            let lower = name.to_ascii_lowercase();
            self.source_tag_name = Some(std::mem::replace(name, lower));
        }
        token
    }

    /// [§ 13.2.6 Tree construction dispatcher](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction-dispatcher)
    pub(super) fn process_token(&mut self, token: &Token) {
        if std::mem::take(&mut self.skip_next_newline)
            && matches!(token, Token::Character { data: '\n' })
        {
            return;
        }

        match self.insertion_mode {
            InsertionMode::Initial => self.handle_initial_mode(token),
            InsertionMode::BeforeHtml => self.handle_before_html_mode(token),
            InsertionMode::BeforeHead => self.handle_before_head_mode(token),
            InsertionMode::InHead => self.handle_in_head_mode(token),
            InsertionMode::InHeadNoscript => self.handle_in_head_noscript_mode(token),
            InsertionMode::AfterHead => self.handle_after_head_mode(token),
            InsertionMode::InBody => self.handle_in_body_mode(token),
            InsertionMode::Text => self.handle_text_mode(token),
            InsertionMode::InTable => self.handle_in_table_mode(token),
            InsertionMode::InTableText => self.handle_in_table_text_mode(token),
            InsertionMode::InCaption => self.handle_in_caption_mode(token),
            InsertionMode::InColumnGroup => self.handle_in_column_group_mode(token),
            InsertionMode::InTableBody => self.handle_in_table_body_mode(token),
            InsertionMode::InRow => self.handle_in_row_mode(token),
            InsertionMode::InCell => self.handle_in_cell_mode(token),
            InsertionMode::AfterBody => self.handle_after_body_mode(token),
            InsertionMode::InFrameset => self.handle_in_frameset_mode(token),
            InsertionMode::AfterFrameset => self.handle_after_frameset_mode(token),
            InsertionMode::AfterAfterBody => self.handle_after_after_body_mode(token),
            InsertionMode::AfterAfterFrameset => self.handle_after_after_frameset_mode(token),
        }
    }

    /// "Reprocess the token" in the current (new) insertion mode.
    pub(super) fn reprocess_token(&mut self, token: &Token) {
        self.process_token(token);
    }

    /// "Switch the insertion mode to ..."
    pub(super) fn switch_mode(&mut self, mode: InsertionMode) {
        if self.insertion_mode != mode {
            log::trace!("insertion mode {} -> {}", self.insertion_mode, mode);
        }
        self.insertion_mode = mode;
    }

    /// Record a parse error and log it once.
    pub(super) fn parse_error(&mut self, message: &str) {
        warn_once("HTML Parser", message);
        self.issues.push(ParseIssue {
            message: message.to_string(),
            token_index: self.token_index,
        });
    }

    /// Report `token` as unexpected in the current mode and drop it.
    pub(super) fn ignore_token(&mut self, token: &Token) {
        let message = format!("unexpected {token} in {}", self.insertion_mode);
        self.parse_error(&message);
    }

    /// [ASCII whitespace](https://infra.spec.whatwg.org/#ascii-whitespace)
    pub(super) const fn is_whitespace(c: char) -> bool {
        matches!(c, '\t' | '\n' | '\x0C' | '\r' | ' ')
    }

    /// "The current node is the bottommost node in this stack of open elements."
    pub(super) fn current_node(&self) -> Option<NodeId> {
        self.stack_of_open_elements.last()
    }

    /// Lowercase local name of an element node.
    pub(super) fn get_tag_name(&self, id: NodeId) -> Option<&str> {
        self.tree.as_element(id).map(ElementData::local_name)
    }

    pub(super) fn current_node_is(&self, names: &[&str]) -> bool {
        self.current_node()
            .and_then(|id| self.get_tag_name(id))
            .is_some_and(|tag| names.contains(&tag))
    }

    pub(super) fn stack_contains(&self, name: &str) -> bool {
        self.stack_of_open_elements.contains_name(name)
    }

    // =========================================================================
    // Creating and inserting nodes
    // =========================================================================

    /// [§ 13.2.6.1 Creating and inserting nodes](https://html.spec.whatwg.org/multipage/parsing.html#appropriate-place-for-inserting-a-node)
    ///
    /// "The appropriate place for inserting a node". Returns the parent and,
    /// when foster parenting, the node to insert before.
    pub(super) fn adjusted_insertion_location(&self) -> (NodeId, Option<NodeId>) {
        let target = self.current_node().unwrap_or(NodeId::ROOT);

        // "If foster parenting is enabled and target is a table, tbody, tfoot,
        // thead, or tr element"
        if self.foster_parenting
            && let Some(tag) = self.get_tag_name(target)
            && matches!(tag, "table" | "tbody" | "tfoot" | "thead" | "tr")
        {
            return self.foster_parent_location();
        }

        (target, None)
    }

    /// [§ 13.2.6.1](https://html.spec.whatwg.org/multipage/parsing.html#foster-parent)
    fn foster_parent_location(&self) -> (NodeId, Option<NodeId>) {
        // "Let last table be the last table element in the stack of open elements, if any."
        let last_table_pos = self
            .stack_of_open_elements
            .iter()
            .rposition(|(_, name)| name == "table");

        let Some(table_pos) = last_table_pos else {
            // "If there is no last table ... the adjusted insertion location is
            // inside the first element in the stack of open elements (the html element)"
            let first = self.stack_of_open_elements.first().unwrap_or(NodeId::ROOT);
            return (first, None);
        };

        let table_id = self.stack_of_open_elements[table_pos];
        // "If last table has a parent node, then let adjusted insertion location
        // be inside last table's parent node, immediately before last table"
        if let Some(parent_id) = self.tree.parent(table_id) {
            return (parent_id, Some(table_id));
        }
        // "let previous element be the element immediately above last table in
        // the stack of open elements"
        let above = table_pos
            .checked_sub(1)
            .map_or(NodeId::ROOT, |pos| self.stack_of_open_elements[pos]);
        (above, None)
    }

    fn insert_at(&mut self, (parent, before): (NodeId, Option<NodeId>), node: NodeId) {
        match before {
            Some(reference) => self.tree.insert_before(parent, node, reference),
            None => self.tree.append_child(parent, node),
        }
    }

    /// [§ 13.2.6.1](https://html.spec.whatwg.org/multipage/parsing.html#create-an-element-for-the-token)
    /// "Create an element for a token"
    ///
    /// Duplicate attributes were already dropped by the tokenizer; the
    /// attribute list keeps the first of any that remain.
    pub(super) fn create_element(&mut self, name: &str, attributes: &[Attribute]) -> NodeId {
        let tag_name = match &self.source_tag_name {
            Some(source) if source.eq_ignore_ascii_case(name) => source.clone(),
            _ => name.to_string(),
        };
        let attrs: Attributes = attributes
            .iter()
            .map(|attr| (attr.name.clone(), attr.value.clone()))
            .collect();
        self.tree
            .alloc(NodeType::Element(ElementData::new(tag_name, attrs)))
    }

    /// [§ 13.2.6.1 Insert an HTML element](https://html.spec.whatwg.org/multipage/parsing.html#insert-an-html-element)
    ///
    /// Non-tag tokens insert nothing and return the current node.
    pub(super) fn insert_html_element(&mut self, token: &Token) -> NodeId {
        match token {
            Token::StartTag {
                name, attributes, ..
            } => self.insert_element(name, attributes),
            _ => self.current_node().unwrap_or(NodeId::ROOT),
        }
    }

    /// Insert an element for a start tag the parser made up, like the implied
    /// `tbody` around a bare `tr`.
    pub(super) fn insert_element(&mut self, name: &str, attributes: &[Attribute]) -> NodeId {
        let element_id = self.create_element(name, attributes);
        let location = self.adjusted_insertion_location();
        self.insert_at(location, element_id);
        self.stack_of_open_elements.push(element_id, name);
        element_id
    }

    /// Insert an element and immediately pop it. Used for void elements.
    pub(super) fn insert_void_element(&mut self, token: &Token) {
        let _ = self.insert_html_element(token);
        let _ = self.stack_of_open_elements.pop();
    }

    /// [§ 13.2.6.1 Insert a character](https://html.spec.whatwg.org/multipage/parsing.html#insert-a-character)
    pub(super) fn insert_character(&mut self, c: char) {
        let (parent, before) = self.adjusted_insertion_location();

        // "If the adjusted insertion location is in a Document node, then return."
        if parent == NodeId::ROOT {
            return;
        }

        // "If there is a Text node immediately before the adjusted insertion
        // location, then append data to that Text node's data."
        let adjacent = match before {
            Some(reference) => self.tree.prev_sibling(reference),
            None => self.tree.last_child(parent),
        };
        if let Some(text_id) = adjacent
            && let Some(node) = self.tree.get_mut(text_id)
            && let NodeType::Text(ref mut data) = node.node_type
        {
            data.push(c);
            return;
        }

        let text_id = self.tree.alloc(NodeType::Text(String::from(c)));
        self.insert_at((parent, before), text_id);
    }

    /// [§ 13.2.6.1 Insert a comment](https://html.spec.whatwg.org/multipage/parsing.html#insert-a-comment)
    pub(super) fn insert_comment(&mut self, data: &str) {
        let location = self.adjusted_insertion_location();
        let comment_id = self.tree.alloc(NodeType::Comment(data.to_string()));
        self.insert_at(location, comment_id);
    }

    /// "Insert a comment as the last child of the Document object."
    pub(super) fn insert_comment_to_document(&mut self, data: &str) {
        let comment_id = self.tree.alloc(NodeType::Comment(data.to_string()));
        self.tree.append_child(NodeId::ROOT, comment_id);
    }

    /// "Insert a comment as the last child of the first element in the stack
    /// of open elements (the html element)."
    pub(super) fn insert_comment_to_html(&mut self, data: &str) {
        let html = self.stack_of_open_elements.first().unwrap_or(NodeId::ROOT);
        let comment_id = self.tree.alloc(NodeType::Comment(data.to_string()));
        self.tree.append_child(html, comment_id);
    }

    /// "Append a DocumentType node to the Document node"
    pub(super) fn insert_doctype(&mut self, token: &Token) {
        if let Token::Doctype {
            name,
            public_identifier,
            system_identifier,
            ..
        } = token
        {
            let doctype = DocumentTypeData {
                name: name.clone().unwrap_or_default(),
                public_id: public_identifier.clone().unwrap_or_default(),
                system_id: system_identifier.clone().unwrap_or_default(),
            };
            let id = self.tree.alloc(NodeType::DocumentType(doctype));
            self.tree.append_child(NodeId::ROOT, id);
        }
    }

    /// "For each attribute on the token, check to see if the attribute is
    /// already present on the top element of the stack of open elements. If it
    /// is not, add the attribute and its corresponding value to that element."
    pub(super) fn merge_attributes(&mut self, element: NodeId, token: &Token) {
        let Token::StartTag { attributes, .. } = token else {
            return;
        };
        if let Some(node) = self.tree.get_mut(element)
            && let NodeType::Element(ref mut data) = node.node_type
        {
            for attr in attributes {
                let _ = data.attrs.insert(attr.name.clone(), attr.value.clone());
            }
        }
    }

    // =========================================================================
    // The stack of open elements
    // =========================================================================

    /// Pop elements until one named `tag_name` has been popped.
    pub(super) fn pop_until_tag(&mut self, tag_name: &str) {
        self.pop_until_one_of(&[tag_name]);
    }

    /// Pop elements until one with any of `tag_names` has been popped.
    pub(super) fn pop_until_one_of(&mut self, tag_names: &[&str]) {
        while let Some(id) = self.stack_of_open_elements.pop() {
            if self
                .get_tag_name(id)
                .is_some_and(|name| tag_names.contains(&name))
            {
                break;
            }
        }
    }

    /// [§ 13.2.4.2](https://html.spec.whatwg.org/multipage/parsing.html#has-an-element-in-the-specific-scope)
    ///
    /// "The stack of open elements is said to have an element target node in a
    /// specific scope consisting of a list of element types list when the
    /// following algorithm terminates in a match state"
    fn has_element_in_specific_scope(&self, tag_names: &[&str], scope_markers: &[&str]) -> bool {
        if !tag_names
            .iter()
            .any(|name| self.stack_of_open_elements.contains_name(name))
        {
            return false;
        }
        for (_, node_tag) in self.stack_of_open_elements.iter().rev() {
            if tag_names.contains(&node_tag) {
                return true;
            }
            if scope_markers.contains(&node_tag) {
                return false;
            }
        }
        false
    }

    /// "has an element in scope"
    pub(super) fn has_element_in_scope(&self, tag_name: &str) -> bool {
        self.has_element_in_specific_scope(&[tag_name], DEFAULT_SCOPE)
    }

    /// "has an h1, h2, h3, h4, h5, or h6 element in scope"
    pub(super) fn has_heading_in_scope(&self) -> bool {
        self.has_element_in_specific_scope(HEADINGS, DEFAULT_SCOPE)
    }

    /// "has an element in button scope"
    pub(super) fn has_element_in_button_scope(&self, tag_name: &str) -> bool {
        self.has_element_in_specific_scope(&[tag_name], BUTTON_SCOPE)
    }

    /// "has an element in list item scope"
    pub(super) fn has_element_in_list_item_scope(&self, tag_name: &str) -> bool {
        self.has_element_in_specific_scope(&[tag_name], LIST_ITEM_SCOPE)
    }

    /// "has an element in table scope"
    pub(super) fn has_element_in_table_scope(&self, tag_name: &str) -> bool {
        self.has_element_in_specific_scope(&[tag_name], TABLE_SCOPE)
    }

    /// [§ 13.2.6.3](https://html.spec.whatwg.org/multipage/parsing.html#generate-implied-end-tags)
    /// "generate implied end tags"
    pub(super) fn generate_implied_end_tags(&mut self) {
        self.generate_implied_end_tags_excluding(None);
    }

    /// "If a step requires the user agent to generate implied end tags but lists
    /// an element to exclude from the process, then the user agent must perform
    /// the above steps as if that element was not in the above list."
    pub(super) fn generate_implied_end_tags_excluding(&mut self, exclude: Option<&str>) {
        while let Some(current) = self.current_node()
            && let Some(tag) = self.get_tag_name(current)
            && has_implied_end_tag(tag)
            && exclude != Some(tag)
        {
            let _ = self.stack_of_open_elements.pop();
        }
    }

    /// Generate implied end tags (except `tag_name`), then pop through `tag_name`.
    pub(super) fn close_element(&mut self, tag_name: &str) {
        self.generate_implied_end_tags_excluding(Some(tag_name));
        if !self.current_node_is(&[tag_name]) {
            let message = format!("closing <{tag_name}> with other elements still open");
            self.parse_error(&message);
        }
        self.pop_until_tag(tag_name);
    }

    /// Apply every [`AUTO_CLOSED_BY`](super::implied::AUTO_CLOSED_BY) row
    /// triggered by a `start_tag` start tag.
    pub(super) fn close_auto_closed_by(&mut self, start_tag: &str) {
        for row in rows_closed_by(start_tag) {
            // "If the Document is not set to quirks mode, and the stack of open
            // elements has a p element in button scope, then close a p element."
            if start_tag == "table" && self.quirks_mode {
                continue;
            }
            if self.find_open(row.element, row.reach).is_some() {
                self.close_element(row.element);
            }
        }
    }

    /// Position on the stack of an open `element` reachable under `reach`.
    fn find_open(&self, element: &str, reach: Reach) -> Option<usize> {
        if !self.stack_of_open_elements.contains_name(element) {
            return None;
        }
        for (pos, (_, tag)) in self.stack_of_open_elements.iter().enumerate().rev() {
            if tag == element {
                return Some(pos);
            }
            let boundary = match reach {
                Reach::CurrentNode => true,
                Reach::ListItem => {
                    is_special_element(tag) && !matches!(tag, "address" | "div" | "p")
                }
                Reach::Button => BUTTON_SCOPE.contains(&tag),
                Reach::Ruby => tag == "ruby" || DEFAULT_SCOPE.contains(&tag),
            };
            if boundary {
                return None;
            }
        }
        None
    }

    /// [§ 13.2.6.4.7 "in body" - Any other end tag](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inbody)
    ///
    /// "1. Initialize node to be the current node (the bottommost node of the stack).
    /// 2. Loop: If node is an HTML element with the same tag name as the token, then:
    ///    generate implied end tags, except for HTML elements with the same tag
    ///    name as the token; pop all the nodes from the current node up to node,
    ///    including node, then stop these steps.
    /// 3. Otherwise, if node is in the special category, then this is a parse
    ///    error; ignore the token, and return."
    ///
    /// Also serves misnested formatting end tags such as `</b>`, in place of
    /// the adoption agency algorithm.
    pub(super) fn any_other_end_tag(&mut self, tag_name: &str) {
        let mut blocked_by = None;
        let mut found = None;
        if self.stack_of_open_elements.contains_name(tag_name) {
            for (pos, (_, node_tag)) in self.stack_of_open_elements.iter().enumerate().rev() {
                if node_tag == tag_name {
                    found = Some(pos);
                    break;
                }
                if is_special_element(node_tag) {
                    blocked_by = Some(node_tag.to_string());
                    break;
                }
            }
        }
        if let Some(pos) = found {
            self.generate_implied_end_tags_excluding(Some(tag_name));
            self.stack_of_open_elements.truncate(pos);
            return;
        }
        if let Some(node_tag) = blocked_by {
            let message = format!("end tag </{tag_name}> blocked by open <{node_tag}>");
            self.parse_error(&message);
            return;
        }
        let message = format!("end tag </{tag_name}> matches no open element");
        self.parse_error(&message);
    }

    /// [§ 13.2.4.1 Reset the insertion mode appropriately](https://html.spec.whatwg.org/multipage/parsing.html#reset-the-insertion-mode-appropriately)
    pub(super) fn reset_insertion_mode_appropriately(&mut self) {
        let mut reset_to = None;
        for (pos, (_, tag)) in self.stack_of_open_elements.iter().enumerate().rev() {
            // "If node is the first node in the stack of open elements, then set last to true"
            let last = pos == 0;
            let mode = match tag {
                "td" | "th" if !last => Some(InsertionMode::InCell),
                "tr" => Some(InsertionMode::InRow),
                "tbody" | "thead" | "tfoot" => Some(InsertionMode::InTableBody),
                "caption" => Some(InsertionMode::InCaption),
                "colgroup" => Some(InsertionMode::InColumnGroup),
                "table" => Some(InsertionMode::InTable),
                "head" if !last => Some(InsertionMode::InHead),
                "body" => Some(InsertionMode::InBody),
                "frameset" => Some(InsertionMode::InFrameset),
                "html" => Some(if self.head_element_pointer.is_none() {
                    InsertionMode::BeforeHead
                } else {
                    InsertionMode::AfterHead
                }),
                _ if last => Some(InsertionMode::InBody),
                _ => None,
            };
            if mode.is_some() {
                reset_to = mode;
                break;
            }
        }
        self.switch_mode(reset_to.unwrap_or(InsertionMode::InBody));
    }

    /// "clear the stack back to a table context" and friends: pop until the
    /// current node is one of `stop_at` (or html).
    pub(super) fn clear_stack_back_to(&mut self, stop_at: &[&str]) {
        while let Some(current) = self.current_node()
            && let Some(tag) = self.get_tag_name(current)
            && tag != "html"
            && !stop_at.contains(&tag)
        {
            let _ = self.stack_of_open_elements.pop();
        }
    }

    /// Whether the insertion point is inside an `svg` or `math` subtree.
    ///
    /// Foreign content is not parsed as such; inside it, self-closing start
    /// tags are honored so `<path/>` does not swallow its siblings.
    pub(super) fn in_foreign_content(&self) -> bool {
        self.stack_of_open_elements.contains_name("svg")
            || self.stack_of_open_elements.contains_name("math")
    }
}

pub(super) const HEADINGS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6"];

const DEFAULT_SCOPE: &[&str] = &[
    "applet", "caption", "html", "table", "td", "th", "marquee", "object", "template",
];

const BUTTON_SCOPE: &[&str] = &[
    "applet", "caption", "html", "table", "td", "th", "marquee", "object", "template", "button",
];

const LIST_ITEM_SCOPE: &[&str] = &[
    "applet", "caption", "html", "table", "td", "th", "marquee", "object", "template", "ol",
    "ul",
];

const TABLE_SCOPE: &[&str] = &["html", "table", "template"];

/// [§ 13.2.4.2 Special](https://html.spec.whatwg.org/multipage/parsing.html#special)
///
/// "The following elements have varying levels of special parsing rules"
pub(super) fn is_special_element(tag_name: &str) -> bool {
    matches!(
        tag_name,
        "address"
            | "applet"
            | "area"
            | "article"
            | "aside"
            | "base"
            | "basefont"
            | "bgsound"
            | "blockquote"
            | "body"
            | "br"
            | "button"
            | "caption"
            | "center"
            | "col"
            | "colgroup"
            | "dd"
            | "details"
            | "dir"
            | "div"
            | "dl"
            | "dt"
            | "embed"
            | "fieldset"
            | "figcaption"
            | "figure"
            | "footer"
            | "form"
            | "frame"
            | "frameset"
            | "h1"
            | "h2"
            | "h3"
            | "h4"
            | "h5"
            | "h6"
            | "head"
            | "header"
            | "hgroup"
            | "hr"
            | "html"
            | "iframe"
            | "img"
            | "input"
            | "keygen"
            | "li"
            | "link"
            | "listing"
            | "main"
            | "marquee"
            | "menu"
            | "meta"
            | "nav"
            | "noembed"
            | "noframes"
            | "noscript"
            | "object"
            | "ol"
            | "p"
            | "param"
            | "plaintext"
            | "pre"
            | "script"
            | "search"
            | "section"
            | "select"
            | "source"
            | "style"
            | "summary"
            | "table"
            | "tbody"
            | "td"
            | "template"
            | "textarea"
            | "tfoot"
            | "th"
            | "thead"
            | "title"
            | "tr"
            | "track"
            | "ul"
            | "wbr"
            | "xmp"
    )
}
