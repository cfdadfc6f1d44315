//! Sibling positions for the structural pseudo-classes.
//!
//! [§ 14 Tree-Structural pseudo-classes](https://www.w3.org/TR/selectors-4/#structural-pseudos)
//!
//! Positions are computed for all element children of a parent in one pass
//! and remembered, so matching `:nth-child` against every element of a long
//! list costs one scan of that list instead of one per element.

use std::collections::{HashMap, HashSet};

use trawl_dom::{DomTree, NodeId};

/// Where an element sits among its parent's element children. All indices
/// are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SiblingPosition {
    /// Index among all element siblings.
    pub index: usize,
    /// Number of element siblings, this one included.
    pub count: usize,
    /// Index among siblings with the same local name.
    pub index_of_type: usize,
    /// Number of siblings with the same local name, this one included.
    pub count_of_type: usize,
}

impl SiblingPosition {
    /// Index counted from the last sibling.
    #[must_use]
    pub const fn index_from_end(&self) -> usize {
        self.count - self.index + 1
    }

    /// Index among same-named siblings, counted from the last one.
    #[must_use]
    pub const fn index_of_type_from_end(&self) -> usize {
        self.count_of_type - self.index_of_type + 1
    }
}

/// Per-call cache of [`SiblingPosition`]s, filled one parent at a time.
///
/// The tree must not change while a cache is in use; the matcher only ever
/// borrows it immutably, so a cache never outlives a single query.
#[derive(Debug, Default)]
pub struct NthIndexCache {
    indexed_parents: HashSet<NodeId>,
    positions: HashMap<NodeId, SiblingPosition>,
}

impl NthIndexCache {
    /// An empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The position of `element` among its siblings, or `None` for a node
    /// without a parent.
    pub fn position(&mut self, tree: &DomTree, element: NodeId) -> Option<SiblingPosition> {
        let parent = tree.parent(element)?;
        if self.indexed_parents.insert(parent) {
            self.index_children(tree, parent);
        }
        self.positions.get(&element).copied()
    }

    fn index_children(&mut self, tree: &DomTree, parent: NodeId) {
        let children: Vec<(NodeId, &str)> = tree
            .element_children(parent)
            .filter_map(|id| tree.as_element(id).map(|e| (id, e.local_name())))
            .collect();

        let mut type_totals: HashMap<&str, usize> = HashMap::new();
        for &(_, name) in &children {
            *type_totals.entry(name).or_default() += 1;
        }

        let count = children.len();
        let mut type_seen: HashMap<&str, usize> = HashMap::new();
        for (i, &(id, name)) in children.iter().enumerate() {
            let seen = type_seen.entry(name).or_default();
            *seen += 1;
            let _ = self.positions.insert(
                id,
                SiblingPosition {
                    index: i + 1,
                    count,
                    index_of_type: *seen,
                    count_of_type: type_totals.get(name).copied().unwrap_or(1),
                },
            );
        }
        log::trace!(target: "selector", "indexed {count} children of {parent:?}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trawl_dom::{Attributes, ElementData, NodeType};

    fn element(tree: &mut DomTree, parent: NodeId, name: &str) -> NodeId {
        let id = tree.alloc(NodeType::Element(ElementData::new(name, Attributes::new())));
        tree.append_child(parent, id);
        id
    }

    #[test]
    fn test_positions_skip_text_and_group_by_type() {
        let mut tree = DomTree::new();
        let root = tree.root();
        let div = element(&mut tree, root, "div");
        let p1 = element(&mut tree, div, "p");
        let text = tree.alloc(NodeType::Text("x".to_string()));
        tree.append_child(div, text);
        let span = element(&mut tree, div, "span");
        let p2 = element(&mut tree, div, "P");

        let mut cache = NthIndexCache::new();
        let first = cache.position(&tree, p1).unwrap();
        assert_eq!((first.index, first.count), (1, 3));
        assert_eq!((first.index_of_type, first.count_of_type), (1, 2));

        let last = cache.position(&tree, p2).unwrap();
        assert_eq!(last.index, 3);
        assert_eq!(last.index_of_type, 2);
        assert_eq!(last.index_from_end(), 1);
        assert_eq!(last.index_of_type_from_end(), 1);

        let middle = cache.position(&tree, span).unwrap();
        assert_eq!((middle.index_of_type, middle.count_of_type), (1, 1));
        assert_eq!(middle.index_from_end(), 2);

        assert_eq!(cache.position(&tree, text), None);
        assert_eq!(cache.position(&tree, root), None);
    }
}
