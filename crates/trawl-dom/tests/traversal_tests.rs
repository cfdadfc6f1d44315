//! Tests for lazy traversal iterators and document helpers.

use trawl_dom::{Attributes, DocumentTypeData, DomTree, ElementData, NodeId, NodeType};

fn element(tree: &mut DomTree, parent: NodeId, tag: &str) -> NodeId {
    let id = tree.alloc(NodeType::Element(ElementData::new(tag, Attributes::new())));
    tree.append_child(parent, id);
    id
}

fn text(tree: &mut DomTree, parent: NodeId, data: &str) -> NodeId {
    let id = tree.alloc(NodeType::Text(data.to_string()));
    tree.append_child(parent, id);
    id
}

/// `<!DOCTYPE html><HTML><head></head><body><p>one</p><div><p>two</p></div><p>three</p></body></HTML>`
fn sample() -> (DomTree, Vec<NodeId>) {
    let mut tree = DomTree::new();
    let doctype = tree.alloc(NodeType::DocumentType(DocumentTypeData {
        name: "html".to_string(),
        ..Default::default()
    }));
    tree.append_child(NodeId::ROOT, doctype);
    let html = element(&mut tree, NodeId::ROOT, "HTML");
    let head = element(&mut tree, html, "head");
    let body = element(&mut tree, html, "body");
    let p1 = element(&mut tree, body, "p");
    let _ = text(&mut tree, p1, "one");
    let div = element(&mut tree, body, "div");
    let p2 = element(&mut tree, div, "p");
    let _ = text(&mut tree, p2, "two");
    let p3 = element(&mut tree, body, "p");
    let _ = text(&mut tree, p3, "three");
    (tree, vec![doctype, html, head, body, p1, div, p2, p3])
}

#[test]
fn test_descendants_are_in_document_order() {
    let (tree, ids) = sample();
    let elements: Vec<_> = tree
        .descendants(NodeId::ROOT)
        .filter(|&id| tree.is_element(id))
        .collect();
    assert_eq!(elements, ids[1..].to_vec());
}

#[test]
fn test_descendants_exclude_start_node() {
    let (tree, ids) = sample();
    let div = ids[5];
    let below: Vec<_> = tree.descendants(div).collect();
    assert_eq!(below.len(), 2);
    assert!(!below.contains(&div));
}

#[test]
fn test_ancestors_walk_to_root() {
    let (tree, ids) = sample();
    let p2 = ids[6];
    let chain: Vec<_> = tree.ancestors(p2).collect();
    assert_eq!(chain, vec![ids[5], ids[3], ids[1], NodeId::ROOT]);
}

#[test]
fn test_sibling_iterators() {
    let (tree, ids) = sample();
    let (p1, div, p3) = (ids[4], ids[5], ids[7]);
    assert_eq!(tree.preceding_siblings(p3).collect::<Vec<_>>(), vec![div, p1]);
    assert_eq!(tree.following_siblings(p1).collect::<Vec<_>>(), vec![div, p3]);
}

#[test]
fn test_element_children_skip_text() {
    let (tree, ids) = sample();
    let p1 = ids[4];
    assert_eq!(tree.children(p1).len(), 1);
    assert_eq!(tree.element_children(p1).count(), 0);
}

#[test]
fn test_document_helpers() {
    let (tree, ids) = sample();
    assert_eq!(tree.doctype(), Some(ids[0]));
    assert_eq!(tree.document_element(), Some(ids[1]));
    assert_eq!(tree.head(), Some(ids[2]));
    assert_eq!(tree.body(), Some(ids[3]));
    assert!(tree.as_element(ids[1]).is_some_and(|e| e.is("html")));
    assert_eq!(tree.as_element(ids[1]).map(|e| e.tag_name.as_str()), Some("HTML"));
}

#[test]
fn test_text_content_concatenates_in_order() {
    let (tree, ids) = sample();
    assert_eq!(tree.text_content(ids[3]), "onetwothree");
}

#[test]
fn test_xpath() {
    let (tree, ids) = sample();
    assert_eq!(tree.xpath(ids[7]), "/html[1]/body[1]/p[2]");
    assert_eq!(tree.xpath(ids[6]), "/html[1]/body[1]/div[1]/p[1]");
    let text = tree.first_child(ids[7]).unwrap();
    assert_eq!(tree.xpath(text), "/html[1]/body[1]/p[2]/text()[1]");
    assert_eq!(tree.xpath(NodeId::ROOT), "/");
}
