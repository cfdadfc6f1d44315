//! Insertion modes outside of tables.
//!
//! [§ 13.2.6.4 The rules for parsing tokens in HTML content](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inhtml)

use trawl_dom::NodeId;

use super::core::{HEADINGS, HTMLParser, InsertionMode};
use crate::tokenizer::Token;

/// Start tags that close an open `p` and then open a plain container.
const BLOCK_CONTAINERS: &[&str] = &[
    "address",
    "article",
    "aside",
    "blockquote",
    "center",
    "details",
    "dialog",
    "dir",
    "div",
    "dl",
    "fieldset",
    "figcaption",
    "figure",
    "footer",
    "header",
    "hgroup",
    "main",
    "menu",
    "nav",
    "ol",
    "p",
    "search",
    "section",
    "summary",
    "ul",
];

/// End tags that close a block container when one is in scope.
const BLOCK_END_TAGS: &[&str] = &[
    "address",
    "article",
    "aside",
    "blockquote",
    "button",
    "center",
    "details",
    "dialog",
    "dir",
    "div",
    "dl",
    "fieldset",
    "figcaption",
    "figure",
    "footer",
    "header",
    "hgroup",
    "listing",
    "main",
    "menu",
    "nav",
    "ol",
    "pre",
    "search",
    "section",
    "summary",
    "ul",
];

impl HTMLParser {
    /// [§ 13.2.6.2 Parsing elements that contain only text](https://html.spec.whatwg.org/multipage/parsing.html#generic-raw-text-element-parsing-algorithm)
    ///
    /// "Insert an HTML element for the token. ... Let the original insertion
    /// mode be the current insertion mode. Then, switch the insertion mode to
    /// "text"."
    ///
    /// The tokenizer picks RAWTEXT, RCDATA or script data on its own when it
    /// emits the start tag.
    fn parse_text_element(&mut self, token: &Token) {
        let _ = self.insert_html_element(token);
        self.original_insertion_mode = Some(self.insertion_mode);
        self.switch_mode(InsertionMode::Text);
    }

    /// [§ 13.2.6.4.1 The "initial" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-initial-insertion-mode)
    pub(super) fn handle_initial_mode(&mut self, token: &Token) {
        match token {
            // "Ignore the token."
            Token::Character { data } if Self::is_whitespace(*data) => {}

            // "Insert a comment as the last child of the Document object."
            Token::Comment { data } => self.insert_comment_to_document(data),

            // "Append a DocumentType node to the Document node ... Then, if the
            // document is not an iframe srcdoc document, and the parser cannot
            // change the mode flag is false, and the DOCTYPE token matches one
            // of the conditions in the following list, then set the Document
            // to quirks mode"
            //
            // Only the force-quirks flag and a non-html name are checked.
            Token::Doctype {
                name, force_quirks, ..
            } => {
                let is_html = name.as_deref() == Some("html");
                if !is_html {
                    self.parse_error("DOCTYPE name is not html");
                }
                self.quirks_mode = *force_quirks || !is_html;
                self.insert_doctype(token);
                self.switch_mode(InsertionMode::BeforeHtml);
            }

            // "If the document is not an iframe srcdoc document, then this is a
            // parse error; ... set the Document to quirks mode. In any case,
            // switch the insertion mode to "before html", then reprocess the token."
            _ => {
                self.parse_error("missing DOCTYPE");
                self.quirks_mode = true;
                self.switch_mode(InsertionMode::BeforeHtml);
                self.reprocess_token(token);
            }
        }
    }

    /// [§ 13.2.6.4.2 The "before html" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-before-html-insertion-mode)
    pub(super) fn handle_before_html_mode(&mut self, token: &Token) {
        match token {
            Token::Doctype { .. } => self.ignore_token(token),

            Token::Comment { data } => self.insert_comment_to_document(data),

            Token::Character { data } if Self::is_whitespace(*data) => {}

            // "Create an element for the token in the HTML namespace, with the
            // Document as the intended parent. Append it to the Document object.
            // Put this element in the stack of open elements."
            Token::StartTag {
                name, attributes, ..
            } if name == "html" => {
                let html = self.create_element(name, attributes);
                self.tree.append_child(NodeId::ROOT, html);
                self.stack_of_open_elements.push(html, "html");
                self.switch_mode(InsertionMode::BeforeHead);
            }

            // "An end tag whose tag name is one of: "head", "body", "html", "br""
            // "Act as described in the "anything else" entry below."
            Token::EndTag { name, .. }
                if !matches!(name.as_str(), "head" | "body" | "html" | "br") =>
            {
                self.ignore_token(token);
            }

            // "Create an html element whose node document is the Document
            // object. Append it to the Document object. Put this element in the
            // stack of open elements. Switch the insertion mode to "before
            // head", then reprocess the token."
            _ => {
                let html = self.create_element("html", &[]);
                self.tree.append_child(NodeId::ROOT, html);
                self.stack_of_open_elements.push(html, "html");
                self.switch_mode(InsertionMode::BeforeHead);
                self.reprocess_token(token);
            }
        }
    }

    /// [§ 13.2.6.4.3 The "before head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-before-head-insertion-mode)
    pub(super) fn handle_before_head_mode(&mut self, token: &Token) {
        match token {
            Token::Character { data } if Self::is_whitespace(*data) => {}

            Token::Comment { data } => self.insert_comment(data),

            Token::Doctype { .. } => self.ignore_token(token),

            Token::StartTag { name, .. } if name == "html" => self.handle_in_body_mode(token),

            // "Insert an HTML element for the token. Set the head element
            // pointer to the newly created head element."
            Token::StartTag { name, .. } if name == "head" => {
                let head = self.insert_html_element(token);
                self.head_element_pointer = Some(head);
                self.switch_mode(InsertionMode::InHead);
            }

            Token::EndTag { name, .. }
                if !matches!(name.as_str(), "head" | "body" | "html" | "br") =>
            {
                self.ignore_token(token);
            }

            // "Insert an HTML element for a "head" start tag token with no
            // attributes. ... Switch the insertion mode to "in head". Reprocess
            // the current token."
            _ => {
                let head = self.insert_element("head", &[]);
                self.head_element_pointer = Some(head);
                self.switch_mode(InsertionMode::InHead);
                self.reprocess_token(token);
            }
        }
    }

    /// [§ 13.2.6.4.4 The "in head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inhead)
    pub(super) fn handle_in_head_mode(&mut self, token: &Token) {
        match token {
            Token::Character { data } if Self::is_whitespace(*data) => {
                self.insert_character(*data);
            }

            Token::Comment { data } => self.insert_comment(data),

            Token::Doctype { .. } => self.ignore_token(token),

            Token::StartTag { name, .. } if name == "html" => self.handle_in_body_mode(token),

            // "Insert an HTML element for the token. Immediately pop the
            // current node off the stack of open elements."
            Token::StartTag { name, .. }
                if matches!(
                    name.as_str(),
                    "base" | "basefont" | "bgsound" | "link" | "meta"
                ) =>
            {
                self.insert_void_element(token);
            }

            // "Follow the generic RCDATA element parsing algorithm."
            Token::StartTag { name, .. } if name == "title" => self.parse_text_element(token),

            // "A start tag whose tag name is "noscript", if the scripting flag
            // is enabled" / "A start tag whose tag name is one of: "noframes",
            // "style"": "Follow the generic raw text element parsing algorithm."
            Token::StartTag { name, .. }
                if matches!(name.as_str(), "noframes" | "style" | "script")
                    || (name == "noscript" && self.scripting_enabled) =>
            {
                self.parse_text_element(token);
            }

            // "A start tag whose tag name is "noscript", if the scripting flag
            // is disabled": "Insert an HTML element for the token. Switch the
            // insertion mode to "in head noscript"."
            Token::StartTag { name, .. } if name == "noscript" => {
                let _ = self.insert_html_element(token);
                self.switch_mode(InsertionMode::InHeadNoscript);
            }

            // Template contents are parsed as ordinary children.
            Token::StartTag { name, .. } if name == "template" => {
                let _ = self.insert_html_element(token);
                self.frameset_ok = false;
            }

            Token::EndTag { name, .. } if name == "template" => {
                if self.stack_contains("template") {
                    self.close_element("template");
                } else {
                    self.ignore_token(token);
                }
            }

            Token::StartTag { name, .. } if name == "head" => self.ignore_token(token),

            // "Pop the current node (which will be the head element) off the
            // stack of open elements. Switch the insertion mode to "after head"."
            Token::EndTag { name, .. } if name == "head" => {
                let _ = self.stack_of_open_elements.pop();
                self.switch_mode(InsertionMode::AfterHead);
            }

            Token::EndTag { name, .. } if !matches!(name.as_str(), "body" | "html" | "br") => {
                self.ignore_token(token);
            }

            _ => {
                let _ = self.stack_of_open_elements.pop();
                self.switch_mode(InsertionMode::AfterHead);
                self.reprocess_token(token);
            }
        }
    }

    /// [§ 13.2.6.4.5 The "in head noscript" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inheadnoscript)
    pub(super) fn handle_in_head_noscript_mode(&mut self, token: &Token) {
        match token {
            Token::Doctype { .. } => self.ignore_token(token),

            Token::StartTag { name, .. } if name == "html" => self.handle_in_body_mode(token),

            // "Pop the current node (which will be a noscript element) from the
            // stack of open elements; the new current node will be a head element."
            Token::EndTag { name, .. } if name == "noscript" => {
                let _ = self.stack_of_open_elements.pop();
                self.switch_mode(InsertionMode::InHead);
            }

            Token::Character { data } if Self::is_whitespace(*data) => {
                self.handle_in_head_mode(token);
            }
            Token::Comment { .. } => self.handle_in_head_mode(token),
            Token::StartTag { name, .. }
                if matches!(
                    name.as_str(),
                    "basefont" | "bgsound" | "link" | "meta" | "noframes" | "style"
                ) =>
            {
                self.handle_in_head_mode(token);
            }

            Token::StartTag { name, .. } if matches!(name.as_str(), "head" | "noscript") => {
                self.ignore_token(token);
            }
            Token::EndTag { name, .. } if name != "br" => self.ignore_token(token),

            // "Parse error. Pop the current node ... Switch the insertion mode
            // to "in head". Reprocess the token."
            _ => {
                self.ignore_token(token);
                let _ = self.stack_of_open_elements.pop();
                self.switch_mode(InsertionMode::InHead);
                self.reprocess_token(token);
            }
        }
    }

    /// [§ 13.2.6.4.6 The "after head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-head-insertion-mode)
    pub(super) fn handle_after_head_mode(&mut self, token: &Token) {
        match token {
            Token::Character { data } if Self::is_whitespace(*data) => {
                self.insert_character(*data);
            }

            Token::Comment { data } => self.insert_comment(data),

            Token::Doctype { .. } => self.ignore_token(token),

            Token::StartTag { name, .. } if name == "html" => self.handle_in_body_mode(token),

            // "Insert an HTML element for the token. Set the frameset-ok flag to
            // "not ok". Switch the insertion mode to "in body"."
            Token::StartTag { name, .. } if name == "body" => {
                let _ = self.insert_html_element(token);
                self.frameset_ok = false;
                self.switch_mode(InsertionMode::InBody);
            }

            Token::StartTag { name, .. } if name == "frameset" => {
                let _ = self.insert_html_element(token);
                self.switch_mode(InsertionMode::InFrameset);
            }

            // "Parse error. Push the node pointed to by the head element pointer
            // onto the stack of open elements. Process the token using the rules
            // for the "in head" insertion mode. Remove the node pointed to by the
            // head element pointer from the stack of open elements."
            Token::StartTag { name, .. }
                if matches!(
                    name.as_str(),
                    "base"
                        | "basefont"
                        | "bgsound"
                        | "link"
                        | "meta"
                        | "noframes"
                        | "script"
                        | "style"
                        | "template"
                        | "title"
                ) =>
            {
                self.parse_error("head content after </head>");
                let Some(head) = self.head_element_pointer else {
                    self.handle_in_head_mode(token);
                    return;
                };
                self.stack_of_open_elements.push(head, "head");
                self.handle_in_head_mode(token);
                self.stack_of_open_elements.remove(head);
            }

            Token::EndTag { name, .. } if name == "template" => self.handle_in_head_mode(token),

            Token::StartTag { name, .. } if name == "head" => self.ignore_token(token),

            Token::EndTag { name, .. } if !matches!(name.as_str(), "body" | "html" | "br") => {
                self.ignore_token(token);
            }

            // "Insert an HTML element for a "body" start tag token with no
            // attributes. Switch the insertion mode to "in body". Reprocess the
            // current token."
            _ => {
                let _ = self.insert_element("body", &[]);
                self.switch_mode(InsertionMode::InBody);
                self.reprocess_token(token);
            }
        }
    }

    /// [§ 13.2.6.4.7 The "in body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inbody)
    ///
    /// Formatting elements are inserted like any other element; there is no
    /// list of active formatting elements to reconstruct.
    pub(super) fn handle_in_body_mode(&mut self, token: &Token) {
        match token {
            // "A character token that is U+0000 NULL": "Parse error. Ignore the token."
            Token::Character { data: '\0' } | Token::Doctype { .. } => self.ignore_token(token),

            Token::Character { data } => {
                self.insert_character(*data);
                if !Self::is_whitespace(*data) {
                    self.frameset_ok = false;
                }
            }

            Token::Comment { data } => self.insert_comment(data),

            Token::StartTag { .. } => self.handle_in_body_start_tag(token),

            Token::EndTag { name, .. } => self.handle_in_body_end_tag(name),

            // "Stop parsing."
            Token::EndOfFile => self.stopped = true,
        }
    }

    fn handle_in_body_start_tag(&mut self, token: &Token) {
        let Token::StartTag {
            name, self_closing, ..
        } = token
        else {
            return;
        };
        let name = name.as_str();

        match name {
            // "Parse error. ... For each attribute on the token, check to see
            // if the attribute is already present on the top element of the
            // stack of open elements. If it is not, add the attribute"
            "html" => {
                self.parse_error("unexpected <html> in body");
                if let Some(html) = self.stack_of_open_elements.first() {
                    self.merge_attributes(html, token);
                }
            }

            "base" | "basefont" | "bgsound" | "link" | "meta" | "noframes" | "script"
            | "style" | "template" | "title" => self.handle_in_head_mode(token),

            "body" => {
                self.parse_error("unexpected <body> in body");
                let body = self.stack_of_open_elements.get(1);
                if let Some(body) = body
                    && self.get_tag_name(body) == Some("body")
                {
                    self.frameset_ok = false;
                    self.merge_attributes(body, token);
                }
            }

            // "If the second element on the stack of open elements is not a body
            // element ... or, if the frameset-ok flag is set to "not ok", ignore
            // the token."
            "frameset" => {
                let body = self.stack_of_open_elements.get(1);
                match body {
                    Some(body) if self.frameset_ok && self.get_tag_name(body) == Some("body") => {
                        if let Some(parent) = self.tree.parent(body) {
                            self.tree.remove_child(parent, body);
                        }
                        self.stack_of_open_elements.truncate(1);
                        let _ = self.insert_html_element(token);
                        self.switch_mode(InsertionMode::InFrameset);
                    }
                    _ => self.ignore_token(token),
                }
            }

            _ if BLOCK_CONTAINERS.contains(&name) => {
                self.close_auto_closed_by(name);
                let _ = self.insert_html_element(token);
            }

            // "If the current node is an HTML element whose tag name is one of
            // "h1", "h2", "h3", "h4", "h5", or "h6", then this is a parse error;
            // pop the current node off the stack of open elements."
            _ if HEADINGS.contains(&name) => {
                self.close_auto_closed_by(name);
                if self.current_node_is(HEADINGS) {
                    self.parse_error("nested heading");
                    let _ = self.stack_of_open_elements.pop();
                }
                let _ = self.insert_html_element(token);
            }

            "pre" | "listing" => {
                self.close_auto_closed_by(name);
                let _ = self.insert_html_element(token);
                self.skip_next_newline = true;
                self.frameset_ok = false;
            }

            // "If the form element pointer is not null ... then this is a parse
            // error; ignore the token."
            "form" => {
                if self.form_element_pointer.is_some() {
                    self.ignore_token(token);
                    return;
                }
                self.close_auto_closed_by(name);
                let form = self.insert_html_element(token);
                self.form_element_pointer = Some(form);
            }

            "li" | "dd" | "dt" => {
                self.frameset_ok = false;
                self.close_auto_closed_by(name);
                let _ = self.insert_html_element(token);
            }

            "plaintext" => {
                self.close_auto_closed_by(name);
                let _ = self.insert_html_element(token);
            }

            "button" => {
                if self.has_element_in_scope("button") {
                    self.parse_error("nested <button>");
                    self.generate_implied_end_tags();
                    self.pop_until_tag("button");
                }
                let _ = self.insert_html_element(token);
                self.frameset_ok = false;
            }

            // "If the list of active formatting elements contains an a element
            // ... then this is a parse error; run the adoption agency algorithm
            // for the token"
            "a" => {
                if self.has_element_in_scope("a") {
                    self.parse_error("nested <a>");
                    self.any_other_end_tag("a");
                }
                let _ = self.insert_html_element(token);
            }

            "nobr" => {
                if self.has_element_in_scope("nobr") {
                    self.parse_error("nested <nobr>");
                    self.any_other_end_tag("nobr");
                }
                let _ = self.insert_html_element(token);
            }

            "applet" | "marquee" | "object" => {
                let _ = self.insert_html_element(token);
                self.frameset_ok = false;
            }

            "table" => {
                self.close_auto_closed_by(name);
                let _ = self.insert_html_element(token);
                self.frameset_ok = false;
                self.switch_mode(InsertionMode::InTable);
            }

            "area" | "br" | "embed" | "img" | "keygen" | "wbr" => {
                self.insert_void_element(token);
                self.frameset_ok = false;
            }

            "input" => {
                self.insert_void_element(token);
                let hidden = match token {
                    Token::StartTag { attributes, .. } => attributes.iter().any(|attr| {
                        attr.name.eq_ignore_ascii_case("type")
                            && attr.value.eq_ignore_ascii_case("hidden")
                    }),
                    _ => false,
                };
                if !hidden {
                    self.frameset_ok = false;
                }
            }

            "param" | "source" | "track" => self.insert_void_element(token),

            "hr" => {
                self.close_auto_closed_by(name);
                self.insert_void_element(token);
                self.frameset_ok = false;
            }

            // "Parse error. Change the token's tag name to "img" and reprocess it."
            "image" => {
                self.parse_error("<image> treated as <img>");
                if let Token::StartTag {
                    self_closing,
                    attributes,
                    ..
                } = token
                {
                    let img = Token::StartTag {
                        name: "img".to_string(),
                        self_closing: *self_closing,
                        attributes: attributes.clone(),
                    };
                    self.reprocess_token(&img);
                }
            }

            "textarea" => {
                self.parse_text_element(token);
                self.skip_next_newline = true;
                self.frameset_ok = false;
            }

            "xmp" => {
                self.close_auto_closed_by(name);
                self.frameset_ok = false;
                self.parse_text_element(token);
            }

            "iframe" => {
                self.frameset_ok = false;
                self.parse_text_element(token);
            }

            "noembed" => self.parse_text_element(token),
            "noscript" if self.scripting_enabled => self.parse_text_element(token),

            "select" => {
                let _ = self.insert_html_element(token);
                self.frameset_ok = false;
            }

            "optgroup" | "option" | "rb" | "rp" | "rt" | "rtc" => {
                self.close_auto_closed_by(name);
                let _ = self.insert_html_element(token);
            }

            "caption" | "col" | "colgroup" | "frame" | "head" | "tbody" | "td" | "tfoot"
            | "th" | "thead" | "tr" => self.ignore_token(token),

            // "Any other start tag": "Insert an HTML element for the token."
            //
            // Inside svg and math, `/>` closes the element as XML would.
            _ => {
                let _ = self.insert_html_element(token);
                if *self_closing && self.in_foreign_content() {
                    let _ = self.stack_of_open_elements.pop();
                }
            }
        }
    }

    fn handle_in_body_end_tag(&mut self, name: &str) {
        match name {
            "template" => self.handle_in_head_mode(&Token::end_tag(name)),

            // "If the stack of open elements does not have a body element in
            // scope, this is a parse error; ignore the token."
            "body" | "html" => {
                if !self.has_element_in_scope("body") {
                    let message = format!("</{name}> without an open body");
                    self.parse_error(&message);
                    return;
                }
                self.switch_mode(InsertionMode::AfterBody);
                if name == "html" {
                    self.reprocess_token(&Token::end_tag(name));
                }
            }

            _ if BLOCK_END_TAGS.contains(&name) => {
                if self.has_element_in_scope(name) {
                    self.close_element(name);
                } else {
                    let message = format!("</{name}> without a matching element in scope");
                    self.parse_error(&message);
                }
            }

            // "Let node be the element that the form element pointer is set to,
            // or null if it is not set to an element. Set the form element
            // pointer to null. If node is null or ... not in scope, then this is
            // a parse error; return. ... Remove node from the stack of open elements."
            "form" => {
                let node = self.form_element_pointer.take();
                let Some(node) = node.filter(|_| self.has_element_in_scope("form")) else {
                    self.parse_error("</form> without an open form");
                    return;
                };
                self.generate_implied_end_tags();
                if self.current_node() != Some(node) {
                    self.parse_error("</form> with other elements still open");
                }
                self.stack_of_open_elements.remove(node);
            }

            // "If the stack of open elements does not have a p element in button
            // scope, then this is a parse error; insert an HTML element for a "p"
            // start tag token with no attributes. Close a p element."
            "p" => {
                if !self.has_element_in_button_scope("p") {
                    self.parse_error("</p> without an open p");
                    let _ = self.insert_element("p", &[]);
                }
                self.close_element("p");
            }

            "li" => {
                if self.has_element_in_list_item_scope("li") {
                    self.close_element("li");
                } else {
                    self.parse_error("</li> without an open li");
                }
            }

            "dd" | "dt" => {
                if self.has_element_in_scope(name) {
                    self.close_element(name);
                } else {
                    let message = format!("</{name}> without a matching element in scope");
                    self.parse_error(&message);
                }
            }

            _ if HEADINGS.contains(&name) => {
                if !self.has_heading_in_scope() {
                    let message = format!("</{name}> without an open heading");
                    self.parse_error(&message);
                    return;
                }
                self.generate_implied_end_tags();
                if !self.current_node_is(&[name]) {
                    let message = format!("</{name}> closes a different heading");
                    self.parse_error(&message);
                }
                self.pop_until_one_of(HEADINGS);
            }

            "applet" | "marquee" | "object" => {
                if self.has_element_in_scope(name) {
                    self.close_element(name);
                } else {
                    let message = format!("</{name}> without a matching element in scope");
                    self.parse_error(&message);
                }
            }

            // "Parse error. Drop the attributes from the token, and act as
            // described in the next entry; i.e. act as if this was a "br" start
            // tag token with no attributes, rather than the end tag token that
            // it actually is."
            "br" => {
                self.parse_error("</br> treated as <br>");
                let _ = self.insert_element("br", &[]);
                let _ = self.stack_of_open_elements.pop();
                self.frameset_ok = false;
            }

            _ => self.any_other_end_tag(name),
        }
    }

    /// [§ 13.2.6.4.8 The "text" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incdata)
    pub(super) fn handle_text_mode(&mut self, token: &Token) {
        match token {
            Token::Character { data } => self.insert_character(*data),

            // "Parse error. ... Pop the current node off the stack of open
            // elements. Switch the insertion mode to the original insertion
            // mode and reprocess the token."
            Token::EndOfFile => {
                self.parse_error("end of file in text element");
                let _ = self.stack_of_open_elements.pop();
                self.return_to_original_mode();
                self.reprocess_token(token);
            }

            // "Pop the current node off the stack of open elements. Switch the
            // insertion mode to the original insertion mode."
            Token::EndTag { .. } => {
                let _ = self.stack_of_open_elements.pop();
                self.return_to_original_mode();
            }

            // The tokenizer never produces these inside a text element.
            _ => self.ignore_token(token),
        }
    }

    pub(super) fn return_to_original_mode(&mut self) {
        let mode = self
            .original_insertion_mode
            .take()
            .unwrap_or(InsertionMode::InBody);
        self.switch_mode(mode);
    }

    /// [§ 13.2.6.4.19 The "after body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-afterbody)
    pub(super) fn handle_after_body_mode(&mut self, token: &Token) {
        match token {
            Token::Character { data } if Self::is_whitespace(*data) => {
                self.handle_in_body_mode(token);
            }

            // "Insert a comment as the last child of the first element in the
            // stack of open elements (the html element)."
            Token::Comment { data } => self.insert_comment_to_html(data),

            Token::Doctype { .. } => self.ignore_token(token),

            Token::StartTag { name, .. } if name == "html" => self.handle_in_body_mode(token),

            Token::EndTag { name, .. } if name == "html" => {
                self.switch_mode(InsertionMode::AfterAfterBody);
            }

            Token::EndOfFile => self.stopped = true,

            // "Parse error. Switch the insertion mode to "in body" and reprocess
            // the token."
            _ => {
                let message = format!("{token} after </body>");
                self.parse_error(&message);
                self.switch_mode(InsertionMode::InBody);
                self.reprocess_token(token);
            }
        }
    }

    /// [§ 13.2.6.4.20 The "in frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inframeset)
    pub(super) fn handle_in_frameset_mode(&mut self, token: &Token) {
        match token {
            Token::Character { data } if Self::is_whitespace(*data) => {
                self.insert_character(*data);
            }
            Token::Comment { data } => self.insert_comment(data),
            Token::StartTag { name, .. } if name == "html" => self.handle_in_body_mode(token),
            Token::StartTag { name, .. } if name == "frameset" => {
                let _ = self.insert_html_element(token);
            }

            // "If the current node is the root html element, then this is a parse
            // error; ignore the token. Otherwise, pop the current node ... If
            // the current node is no longer a frameset element, then switch the
            // insertion mode to "after frameset"."
            Token::EndTag { name, .. } if name == "frameset" => {
                if self.stack_of_open_elements.len() <= 1 {
                    self.ignore_token(token);
                    return;
                }
                let _ = self.stack_of_open_elements.pop();
                if !self.current_node_is(&["frameset"]) {
                    self.switch_mode(InsertionMode::AfterFrameset);
                }
            }

            Token::StartTag { name, .. } if name == "frame" => self.insert_void_element(token),
            Token::StartTag { name, .. } if name == "noframes" => self.handle_in_head_mode(token),
            Token::EndOfFile => self.stopped = true,
            _ => self.ignore_token(token),
        }
    }

    /// [§ 13.2.6.4.21 The "after frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-afterframeset)
    pub(super) fn handle_after_frameset_mode(&mut self, token: &Token) {
        match token {
            Token::Character { data } if Self::is_whitespace(*data) => {
                self.insert_character(*data);
            }
            Token::Comment { data } => self.insert_comment(data),
            Token::StartTag { name, .. } if name == "html" => self.handle_in_body_mode(token),
            Token::EndTag { name, .. } if name == "html" => {
                self.switch_mode(InsertionMode::AfterAfterFrameset);
            }
            Token::StartTag { name, .. } if name == "noframes" => self.handle_in_head_mode(token),
            Token::EndOfFile => self.stopped = true,
            _ => self.ignore_token(token),
        }
    }

    /// [§ 13.2.6.4.22 The "after after body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-after-body-insertion-mode)
    pub(super) fn handle_after_after_body_mode(&mut self, token: &Token) {
        match token {
            Token::Comment { data } => self.insert_comment_to_document(data),

            Token::Doctype { .. } => self.handle_in_body_mode(token),
            Token::Character { data } if Self::is_whitespace(*data) => {
                self.handle_in_body_mode(token);
            }
            Token::StartTag { name, .. } if name == "html" => self.handle_in_body_mode(token),

            Token::EndOfFile => self.stopped = true,

            _ => {
                let message = format!("{token} after </html>");
                self.parse_error(&message);
                self.switch_mode(InsertionMode::InBody);
                self.reprocess_token(token);
            }
        }
    }

    /// [§ 13.2.6.4.23 The "after after frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-after-frameset-insertion-mode)
    pub(super) fn handle_after_after_frameset_mode(&mut self, token: &Token) {
        match token {
            Token::Comment { data } => self.insert_comment_to_document(data),
            Token::Doctype { .. } => self.handle_in_body_mode(token),
            Token::Character { data } if Self::is_whitespace(*data) => {
                self.handle_in_body_mode(token);
            }
            Token::StartTag { name, .. } if name == "html" => self.handle_in_body_mode(token),
            Token::StartTag { name, .. } if name == "noframes" => self.handle_in_head_mode(token),
            Token::EndOfFile => self.stopped = true,
            _ => self.ignore_token(token),
        }
    }
}
