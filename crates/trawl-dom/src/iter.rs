//! Lazy tree traversals.
//!
//! Every iterator borrows the tree immutably and walks the index links, so
//! creating one is O(1) and restarting is just creating another.

use crate::{DomTree, NodeId};

/// Iterator over ancestors of a node, from parent to root.
pub struct Ancestors<'a> {
    pub(crate) tree: &'a DomTree,
    pub(crate) current: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.parent(id);
        Some(id)
    }
}

/// Iterator over preceding siblings (from immediately before to first child).
pub struct PrecedingSiblings<'a> {
    pub(crate) tree: &'a DomTree,
    pub(crate) current: Option<NodeId>,
}

impl Iterator for PrecedingSiblings<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.prev_sibling(id);
        Some(id)
    }
}

/// Iterator over following siblings (from immediately after to last child).
pub struct FollowingSiblings<'a> {
    pub(crate) tree: &'a DomTree,
    pub(crate) current: Option<NodeId>,
}

impl Iterator for FollowingSiblings<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.next_sibling(id);
        Some(id)
    }
}

/// Iterator over the element children of a node, skipping text and comments.
pub struct ElementChildren<'a> {
    pub(crate) tree: &'a DomTree,
    pub(crate) children: std::slice::Iter<'a, NodeId>,
}

impl Iterator for ElementChildren<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        self.children
            .by_ref()
            .copied()
            .find(|&id| self.tree.is_element(id))
    }
}

/// Pre-order (document order) traversal of a subtree, excluding its root.
///
/// [§ 4.2 Node tree](https://dom.spec.whatwg.org/#concept-tree-order)
/// "An object A is preceding an object B if A and B are in the same tree and
/// A comes before B in tree order."
///
/// Uses an explicit stack so deeply nested documents cannot overflow the
/// call stack.
pub struct Descendants<'a> {
    pub(crate) tree: &'a DomTree,
    pub(crate) stack: Vec<NodeId>,
}

impl<'a> Descendants<'a> {
    pub(crate) fn new(tree: &'a DomTree, root: NodeId) -> Self {
        let stack = tree.children(root).iter().rev().copied().collect();
        Self { tree, stack }
    }
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        self.stack.extend(self.tree.children(id).iter().rev());
        Some(id)
    }
}
