//! HTML serialization.
//!
//! [§ 13.3 Serializing HTML fragments](https://html.spec.whatwg.org/multipage/parsing.html#serialising-html-fragments)
//!
//! Output keeps the source casing of tag and attribute names and the source
//! order of attributes. Re-parsing the output yields an equivalent tree.

use crate::{DocumentTypeData, DomTree, NodeId, NodeType};

/// "If current node is an area, base, basefont, bgsound, br, col, embed,
/// frame, hr, img, input, keygen, link, meta, param, source, track or wbr
/// element, then continue on to the next child node at this point."
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "basefont", "bgsound", "br", "col", "embed", "frame", "hr", "img", "input",
    "keygen", "link", "meta", "param", "source", "track", "wbr",
];

/// "If the parent of current node is a style, script, xmp, iframe, noembed,
/// noframes, or plaintext element, or if the parent of current node is a
/// noscript element and scripting is enabled for the node, then append the
/// value of current node's data literally."
///
/// Scripting is never enabled for serialization, so `noscript` is escaped.
const RAW_TEXT_PARENTS: &[&str] = &[
    "style",
    "script",
    "xmp",
    "iframe",
    "noembed",
    "noframes",
    "plaintext",
];

/// Whether `name` is a void element (never has an end tag or children).
#[must_use]
pub fn is_void_element(name: &str) -> bool {
    VOID_ELEMENTS.iter().any(|v| v.eq_ignore_ascii_case(name))
}

/// Serialize `id` including its own tags.
///
/// For the document node this is the whole document.
#[must_use]
pub fn outer_html(tree: &DomTree, id: NodeId) -> String {
    let mut w = HtmlWriter::new(tree);
    w.run(vec![Step::Open(id)]);
    w.buffer
}

/// Serialize the children of `id`.
#[must_use]
pub fn inner_html(tree: &DomTree, id: NodeId) -> String {
    let mut w = HtmlWriter::new(tree);
    w.run(tree.children(id).iter().rev().map(|&child| Step::Open(child)).collect());
    w.buffer
}

/// Pending work for the writer. Children are pushed in reverse, so popping
/// visits them in document order; an element's `Close` sits below them.
enum Step {
    Open(NodeId),
    Close(NodeId),
}

struct HtmlWriter<'a> {
    tree: &'a DomTree,
    buffer: String,
}

impl<'a> HtmlWriter<'a> {
    const fn new(tree: &'a DomTree) -> Self {
        Self {
            tree,
            buffer: String::new(),
        }
    }

    fn run(&mut self, mut pending: Vec<Step>) {
        while let Some(step) = pending.pop() {
            match step {
                Step::Open(id) => self.open(id, &mut pending),
                Step::Close(id) => {
                    if let Some(data) = self.tree.as_element(id) {
                        self.buffer.push_str("</");
                        self.buffer.push_str(&data.tag_name);
                        self.buffer.push('>');
                    }
                }
            }
        }
    }

    /// Write everything for `id` that precedes its children, then schedule
    /// the children and the end tag.
    fn open(&mut self, id: NodeId, pending: &mut Vec<Step>) {
        let tree = self.tree;
        let Some(node) = tree.get(id) else {
            return;
        };
        let push_children = |pending: &mut Vec<Step>| {
            pending.extend(node.children.iter().rev().map(|&child| Step::Open(child)));
        };

        match &node.node_type {
            NodeType::Document => push_children(pending),
            NodeType::DocumentType(data) => self.write_doctype(data),
            NodeType::Text(text) => {
                let raw = node
                    .parent
                    .and_then(|p| tree.as_element(p))
                    .is_some_and(|e| RAW_TEXT_PARENTS.contains(&e.local_name()));
                if raw {
                    self.buffer.push_str(text);
                } else {
                    escape_into(&mut self.buffer, text, false);
                }
            }
            NodeType::Comment(text) => {
                self.buffer.push_str("<!--");
                self.buffer.push_str(text);
                self.buffer.push_str("-->");
            }
            NodeType::Element(data) => {
                self.buffer.push('<');
                self.buffer.push_str(&data.tag_name);
                for attr in &data.attrs {
                    self.buffer.push(' ');
                    self.buffer.push_str(&attr.name);
                    self.buffer.push_str("=\"");
                    escape_into(&mut self.buffer, &attr.value, true);
                    self.buffer.push('"');
                }
                self.buffer.push('>');

                if is_void_element(data.local_name()) {
                    return;
                }
                // A leading newline in these is dropped by the parser, so
                // one that survived parsing must be doubled to round-trip.
                if matches!(data.local_name(), "pre" | "textarea" | "listing")
                    && node
                        .children
                        .first()
                        .and_then(|&c| tree.as_text(c))
                        .is_some_and(|t| t.starts_with('\n'))
                {
                    self.buffer.push('\n');
                }
                pending.push(Step::Close(id));
                push_children(pending);
            }
        }
    }

    /// "If current node is a DocumentType node: `<!DOCTYPE` followed by a
    /// space, the value of current node's name, and `>`."
    ///
    /// Identifiers are written too, so a legacy doctype survives a re-parse.
    fn write_doctype(&mut self, data: &DocumentTypeData) {
        self.buffer.push_str("<!DOCTYPE ");
        self.buffer.push_str(&data.name);
        if !data.public_id.is_empty() {
            self.buffer.push_str(" PUBLIC ");
            push_quoted(&mut self.buffer, &data.public_id);
            if !data.system_id.is_empty() {
                self.buffer.push(' ');
                push_quoted(&mut self.buffer, &data.system_id);
            }
        } else if !data.system_id.is_empty() {
            self.buffer.push_str(" SYSTEM ");
            push_quoted(&mut self.buffer, &data.system_id);
        }
        self.buffer.push('>');
    }
}

/// Doctype identifiers have no escapes; pick the quote the value lacks.
fn push_quoted(out: &mut String, value: &str) {
    let quote = if value.contains('"') { '\'' } else { '"' };
    out.push(quote);
    out.push_str(value);
    out.push(quote);
}

/// [§ 13.3 Escaping a string](https://html.spec.whatwg.org/multipage/parsing.html#escapingString)
///
/// "Replace any occurrence of the "&" character by the string "&amp;"."
/// "Replace any occurrences of the U+00A0 NO-BREAK SPACE character by the string "&nbsp;"."
/// "If the algorithm was invoked in the attribute mode, replace any occurrences
/// of the """ character by the string "&quot;"."
/// "If the algorithm was not invoked in the attribute mode, replace any
/// occurrences of the "<" character by the string "&lt;", and any occurrences
/// of the ">" character by the string "&gt;"."
fn escape_into(out: &mut String, text: &str, attribute_mode: bool) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '\u{00A0}' => out.push_str("&nbsp;"),
            '"' if attribute_mode => out.push_str("&quot;"),
            '<' if !attribute_mode => out.push_str("&lt;"),
            '>' if !attribute_mode => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}
