//! Tree dump in the html5lib tree-construction test format.

use std::fmt::Write;

use trawl_dom::{DomTree, NodeId, NodeType};

/// Render `tree` the way html5lib's tree-construction tests spell expected
/// output: one node per line, `| ` prefix, two spaces per depth level.
///
/// ```text
/// | <!DOCTYPE html>
/// | <html>
/// |   <head>
/// |   <body>
/// |     <p>
/// |       class="x"
/// |       "hello"
/// ```
///
/// Attributes are sorted by name and indented one level below their element.
#[must_use]
pub fn tree_dump(tree: &DomTree) -> String {
    let mut out = String::new();
    let mut pending: Vec<(NodeId, usize)> = tree
        .children(NodeId::ROOT)
        .iter()
        .rev()
        .map(|&child| (child, 0))
        .collect();
    while let Some((id, depth)) = pending.pop() {
        dump_node(tree, id, depth, &mut out);
        pending.extend(tree.children(id).iter().rev().map(|&child| (child, depth + 1)));
    }
    out
}

/// Write the lines for `id` itself; children are handled by the caller.
fn dump_node(tree: &DomTree, id: NodeId, depth: usize, out: &mut String) {
    let Some(node) = tree.get(id) else {
        return;
    };
    let indent = "  ".repeat(depth);
    match &node.node_type {
        NodeType::Document => {}
        NodeType::DocumentType(doctype) => {
            if doctype.public_id.is_empty() && doctype.system_id.is_empty() {
                let _ = writeln!(out, "| {indent}<!DOCTYPE {}>", doctype.name);
            } else {
                let _ = writeln!(
                    out,
                    "| {indent}<!DOCTYPE {} \"{}\" \"{}\">",
                    doctype.name, doctype.public_id, doctype.system_id
                );
            }
        }
        NodeType::Element(data) => {
            let _ = writeln!(out, "| {indent}<{}>", data.local_name());
            let mut attrs: Vec<_> = data.attrs.iter().collect();
            attrs.sort_by(|a, b| a.name.cmp(&b.name));
            for attr in attrs {
                let _ = writeln!(out, "| {indent}  {}=\"{}\"", attr.name, attr.value);
            }
        }
        NodeType::Text(text) => {
            let _ = writeln!(out, "| {indent}\"{text}\"");
        }
        NodeType::Comment(data) => {
            let _ = writeln!(out, "| {indent}<!-- {data} -->");
        }
    }
}
