//! Tests for tree mutation methods: append_child, remove_child, insert_before.

use test_case::test_case;
use trawl_dom::{Attributes, DomTree, ElementData, NodeId, NodeType};

fn alloc_element(tree: &mut DomTree, tag: &str) -> NodeId {
    tree.alloc(NodeType::Element(ElementData::new(tag, Attributes::new())))
}

/// Helper to build `<div>` under the root with the given element children.
fn parent_with(tree: &mut DomTree, tags: &[&str]) -> (NodeId, Vec<NodeId>) {
    let parent = alloc_element(tree, "div");
    tree.append_child(NodeId::ROOT, parent);
    let children = tags
        .iter()
        .map(|tag| {
            let id = alloc_element(tree, tag);
            tree.append_child(parent, id);
            id
        })
        .collect();
    (parent, children)
}

// remove_child

#[test]
fn test_remove_child_single_child() {
    let mut tree = DomTree::new();
    let (parent, kids) = parent_with(&mut tree, &["p"]);
    let child = kids[0];

    tree.remove_child(parent, child);

    assert!(tree.children(parent).is_empty());
    assert_eq!(tree.parent(child), None);
    assert_eq!(tree.prev_sibling(child), None);
    assert_eq!(tree.next_sibling(child), None);
}

#[test_case(0, &[1, 2] ; "first of three")]
#[test_case(1, &[0, 2] ; "middle of three")]
#[test_case(2, &[0, 1] ; "last of three")]
fn test_remove_child_relinks_siblings(removed: usize, kept: &[usize]) {
    let mut tree = DomTree::new();
    let (parent, kids) = parent_with(&mut tree, &["a", "b", "c"]);

    tree.remove_child(parent, kids[removed]);

    let expected: Vec<NodeId> = kept.iter().map(|&i| kids[i]).collect();
    assert_eq!(tree.children(parent), expected.as_slice());
    let (left, right) = (expected[0], expected[1]);
    assert_eq!(tree.prev_sibling(left), None);
    assert_eq!(tree.next_sibling(left), Some(right));
    assert_eq!(tree.prev_sibling(right), Some(left));
    assert_eq!(tree.next_sibling(right), None);
    assert_eq!(tree.parent(kids[removed]), None);
}

#[test]
fn test_remove_child_of_wrong_parent_is_noop() {
    let mut tree = DomTree::new();
    let (parent, kids) = parent_with(&mut tree, &["a"]);
    let other = alloc_element(&mut tree, "section");
    tree.append_child(NodeId::ROOT, other);

    tree.remove_child(other, kids[0]);

    assert_eq!(tree.parent(kids[0]), Some(parent));
    assert_eq!(tree.children(parent), &[kids[0]]);
}

// insert_before

#[test]
fn test_insert_before_first_child() {
    let mut tree = DomTree::new();
    let (parent, kids) = parent_with(&mut tree, &["b"]);
    let existing = kids[0];

    let new_child = alloc_element(&mut tree, "a");
    tree.insert_before(parent, new_child, existing);

    assert_eq!(tree.children(parent), &[new_child, existing]);
    assert_eq!(tree.parent(new_child), Some(parent));
    assert_eq!(tree.next_sibling(new_child), Some(existing));
    assert_eq!(tree.prev_sibling(new_child), None);
    assert_eq!(tree.prev_sibling(existing), Some(new_child));
}

#[test]
fn test_insert_before_middle() {
    let mut tree = DomTree::new();
    let (parent, kids) = parent_with(&mut tree, &["a", "c"]);
    let (a, c) = (kids[0], kids[1]);

    let b = alloc_element(&mut tree, "b");
    tree.insert_before(parent, b, c);

    assert_eq!(tree.children(parent), &[a, b, c]);
    assert_eq!(tree.next_sibling(a), Some(b));
    assert_eq!(tree.prev_sibling(b), Some(a));
    assert_eq!(tree.next_sibling(b), Some(c));
    assert_eq!(tree.prev_sibling(c), Some(b));
}

#[test]
fn test_insert_before_unknown_reference_appends() {
    let mut tree = DomTree::new();
    let (parent, kids) = parent_with(&mut tree, &["a"]);
    let stranger = alloc_element(&mut tree, "x");

    let b = alloc_element(&mut tree, "b");
    tree.insert_before(parent, b, stranger);

    assert_eq!(tree.children(parent), &[kids[0], b]);
}

// reparenting

#[test]
fn test_append_child_moves_attached_node() {
    let mut tree = DomTree::new();
    let (first, kids) = parent_with(&mut tree, &["a", "b"]);
    let (second, _) = parent_with(&mut tree, &[]);

    tree.append_child(second, kids[0]);

    assert_eq!(tree.children(first), &[kids[1]]);
    assert_eq!(tree.prev_sibling(kids[1]), None);
    assert_eq!(tree.children(second), &[kids[0]]);
    assert_eq!(tree.parent(kids[0]), Some(second));
}
