//! Tests for HTML serialization and generic tree conversion.

use trawl_dom::{
    Attributes, DocumentTypeData, DomTree, ElementData, GenericTreeNode, NodeId, NodeType,
    inner_html, outer_html, to_generic_tree,
};

fn element(tree: &mut DomTree, parent: NodeId, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
    let attrs: Attributes = attrs.iter().copied().collect();
    let id = tree.alloc(NodeType::Element(ElementData::new(tag, attrs)));
    tree.append_child(parent, id);
    id
}

fn leaf(tree: &mut DomTree, parent: NodeId, node_type: NodeType) -> NodeId {
    let id = tree.alloc(node_type);
    tree.append_child(parent, id);
    id
}

// ========== serialization ==========

#[test]
fn test_outer_html_preserves_case_and_attribute_order() {
    let mut tree = DomTree::new();
    let div = element(&mut tree, NodeId::ROOT, "DIV", &[("Zeta", "1"), ("alpha", "a\"b")]);
    let _ = leaf(&mut tree, div, NodeType::Text("x < y & z".to_string()));

    assert_eq!(
        outer_html(&tree, div),
        r#"<DIV Zeta="1" alpha="a&quot;b">x &lt; y &amp; z</DIV>"#
    );
}

#[test]
fn test_void_elements_have_no_end_tag() {
    let mut tree = DomTree::new();
    let p = element(&mut tree, NodeId::ROOT, "p", &[]);
    let _ = element(&mut tree, p, "br", &[]);
    let _ = element(&mut tree, p, "img", &[("src", "a.png")]);

    assert_eq!(inner_html(&tree, p), r#"<br><img src="a.png">"#);
}

#[test]
fn test_raw_text_children_are_not_escaped() {
    let mut tree = DomTree::new();
    let script = element(&mut tree, NodeId::ROOT, "script", &[]);
    let _ = leaf(&mut tree, script, NodeType::Text("if (a < b && c) {}".to_string()));

    assert_eq!(outer_html(&tree, script), "<script>if (a < b && c) {}</script>");
}

#[test]
fn test_document_serializes_doctype_and_comments() {
    let mut tree = DomTree::new();
    let _ = leaf(
        &mut tree,
        NodeId::ROOT,
        NodeType::DocumentType(DocumentTypeData {
            name: "html".to_string(),
            ..Default::default()
        }),
    );
    let _ = leaf(&mut tree, NodeId::ROOT, NodeType::Comment(" hi ".to_string()));
    let _ = element(&mut tree, NodeId::ROOT, "html", &[]);

    assert_eq!(outer_html(&tree, NodeId::ROOT), "<!DOCTYPE html><!-- hi --><html></html>");
}

#[test]
fn test_pre_leading_newline_is_doubled() {
    let mut tree = DomTree::new();
    let pre = element(&mut tree, NodeId::ROOT, "pre", &[]);
    let _ = leaf(&mut tree, pre, NodeType::Text("\ncode".to_string()));

    assert_eq!(outer_html(&tree, pre), "<pre>\n\ncode</pre>");
}

// ========== generic tree ==========

#[test]
fn test_generic_tree_mirrors_structure() {
    let mut tree = DomTree::new();
    let _ = leaf(
        &mut tree,
        NodeId::ROOT,
        NodeType::DocumentType(DocumentTypeData {
            name: "html".to_string(),
            public_id: "-//W3C//DTD HTML 4.01//EN".to_string(),
            system_id: String::new(),
        }),
    );
    let html = element(&mut tree, NodeId::ROOT, "html", &[("lang", "en"), ("dir", "ltr")]);
    let _ = leaf(&mut tree, html, NodeType::Comment("c".to_string()));
    let _ = leaf(&mut tree, html, NodeType::Text("t".to_string()));

    let generic = to_generic_tree(&tree, NodeId::ROOT).unwrap();
    let GenericTreeNode::Document { children } = &generic else {
        panic!("expected document, got {generic:?}");
    };
    assert_eq!(children.len(), 2);
    assert!(matches!(
        &children[0],
        GenericTreeNode::Declaration { name, public_id, .. }
            if name == "html" && public_id == "-//W3C//DTD HTML 4.01//EN"
    ));

    let GenericTreeNode::Element { name, attributes, children } = &children[1] else {
        panic!("expected element");
    };
    assert_eq!(name, "html");
    let names: Vec<_> = attributes.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, ["lang", "dir"]);
    assert_eq!(
        children,
        &vec![
            GenericTreeNode::Comment { content: "c".to_string() },
            GenericTreeNode::Text { content: "t".to_string() },
        ]
    );
}

#[test]
fn test_generic_tree_serializes_to_json() {
    let mut tree = DomTree::new();
    let p = element(&mut tree, NodeId::ROOT, "p", &[("class", "x")]);
    let _ = leaf(&mut tree, p, NodeType::Text("hi".to_string()));

    let generic = to_generic_tree(&tree, p).unwrap();
    let json = serde_json::to_value(&generic).unwrap();
    assert_eq!(json["kind"], "element");
    assert_eq!(json["name"], "p");
    assert_eq!(json["attributes"][0]["value"], "x");
    assert_eq!(json["children"][0]["kind"], "text");
    assert_eq!(json["children"][0]["content"], "hi");
}

#[test]
fn test_generic_tree_unknown_node() {
    let tree = DomTree::new();
    assert_eq!(to_generic_tree(&tree, NodeId(42)), None);
}
