use std::collections::HashMap;
use std::ops::Index;

use trawl_dom::NodeId;

/// [§ 13.2.4.3 The stack of open elements](https://html.spec.whatwg.org/multipage/parsing.html#the-stack-of-open-elements)
///
/// "Initially, the stack of open elements is empty. The stack grows
/// downwards; the topmost node on the stack is the first one added to the
/// stack, and the bottommost node of the stack is the most recently added
/// node in the stack"
///
/// Entries carry the element's lowercase local name. A count per name
/// answers "is any `x` open" in O(1), which lets scope checks for absent
/// elements return without walking a deep stack.
#[derive(Debug, Default)]
pub(super) struct OpenElements {
    entries: Vec<(NodeId, String)>,
    counts: HashMap<String, usize>,
}

impl OpenElements {
    pub(super) fn push(&mut self, id: NodeId, name: &str) {
        *self.counts.entry(name.to_string()).or_default() += 1;
        self.entries.push((id, name.to_string()));
    }

    pub(super) fn pop(&mut self) -> Option<NodeId> {
        let (id, name) = self.entries.pop()?;
        self.forget(&name);
        Some(id)
    }

    /// Remove `id` wherever it is on the stack.
    pub(super) fn remove(&mut self, id: NodeId) {
        if let Some(pos) = self.entries.iter().rposition(|&(entry, _)| entry == id) {
            let (_, name) = self.entries.remove(pos);
            self.forget(&name);
        }
    }

    pub(super) fn truncate(&mut self, len: usize) {
        while self.entries.len() > len {
            let _ = self.pop();
        }
    }

    fn forget(&mut self, name: &str) {
        if let Some(count) = self.counts.get_mut(name) {
            *count -= 1;
            if *count == 0 {
                let _ = self.counts.remove(name);
            }
        }
    }

    /// Whether an element named `name` is anywhere on the stack.
    pub(super) fn contains_name(&self, name: &str) -> bool {
        self.counts.contains_key(name)
    }

    /// The current node.
    pub(super) fn last(&self) -> Option<NodeId> {
        self.entries.last().map(|&(id, _)| id)
    }

    /// The html element, once inserted.
    pub(super) fn first(&self) -> Option<NodeId> {
        self.entries.first().map(|&(id, _)| id)
    }

    pub(super) fn get(&self, index: usize) -> Option<NodeId> {
        self.entries.get(index).map(|&(id, _)| id)
    }

    pub(super) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Entries from the html element down to the current node.
    pub(super) fn iter(&self) -> impl DoubleEndedIterator<Item = (NodeId, &str)> + ExactSizeIterator {
        self.entries.iter().map(|(id, name)| (*id, name.as_str()))
    }
}

impl Index<usize> for OpenElements {
    type Output = NodeId;

    fn index(&self, index: usize) -> &NodeId {
        &self.entries[index].0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_follow_push_pop_and_remove() {
        let mut stack = OpenElements::default();
        stack.push(NodeId(1), "html");
        stack.push(NodeId(2), "div");
        stack.push(NodeId(3), "div");
        stack.push(NodeId(4), "p");

        assert!(stack.contains_name("div"));
        assert_eq!(stack.pop(), Some(NodeId(4)));
        assert!(!stack.contains_name("p"));

        stack.remove(NodeId(2));
        assert!(stack.contains_name("div"));
        assert_eq!(stack.len(), 2);
        assert_eq!(stack[1], NodeId(3));

        stack.truncate(1);
        assert!(!stack.contains_name("div"));
        assert_eq!(stack.last(), Some(NodeId(1)));
        assert_eq!(stack.first(), Some(NodeId(1)));
        assert_eq!(stack.get(1), None);
    }
}
