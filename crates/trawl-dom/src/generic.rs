//! Conversion to a generic markup tree.
//!
//! A one-to-one structural mapping for consumers that want an owned,
//! serializable tree rather than arena indices (record extraction, JSON
//! dumps). The doctype becomes a `Declaration` leaf in its document
//! position, ahead of the root element.

use serde::Serialize;

use crate::{DomTree, NodeId, NodeType};

/// An attribute in the generic tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenericAttribute {
    /// Attribute name with source casing.
    pub name: String,
    /// Decoded value.
    pub value: String,
}

/// A node of the generic markup tree.
#[derive(Debug, Clone, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GenericTreeNode {
    /// The document container.
    Document {
        /// Top-level nodes in order.
        children: Vec<GenericTreeNode>,
    },
    /// A `<!DOCTYPE>` declaration.
    Declaration {
        /// Doctype name.
        name: String,
        /// Public identifier, empty if absent.
        public_id: String,
        /// System identifier, empty if absent.
        system_id: String,
    },
    /// An element container.
    Element {
        /// Tag name with source casing.
        name: String,
        /// Attributes in source order.
        attributes: Vec<GenericAttribute>,
        /// Child nodes in order.
        children: Vec<GenericTreeNode>,
    },
    /// A text leaf.
    Text {
        /// Character data.
        content: String,
    },
    /// A comment leaf.
    Comment {
        /// Comment data.
        content: String,
    },
}

impl GenericTreeNode {
    /// Children of a container node; leaves have none.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        match self {
            Self::Document { children } | Self::Element { children, .. } => children,
            _ => &[],
        }
    }

    fn children_mut(&mut self) -> Option<&mut Vec<Self>> {
        match self {
            Self::Document { children } | Self::Element { children, .. } => Some(children),
            _ => None,
        }
    }

    /// Equality of everything except the children.
    fn same_shell(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Document { .. }, Self::Document { .. }) => true,
            (
                Self::Declaration {
                    name,
                    public_id,
                    system_id,
                },
                Self::Declaration {
                    name: other_name,
                    public_id: other_public_id,
                    system_id: other_system_id,
                },
            ) => name == other_name && public_id == other_public_id && system_id == other_system_id,
            (
                Self::Element {
                    name, attributes, ..
                },
                Self::Element {
                    name: other_name,
                    attributes: other_attributes,
                    ..
                },
            ) => name == other_name && attributes == other_attributes,
            (Self::Text { content }, Self::Text { content: other })
            | (Self::Comment { content }, Self::Comment { content: other }) => content == other,
            _ => false,
        }
    }

    /// Tag name if this is an element.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Element { name, .. } => Some(name),
            _ => None,
        }
    }
}

// Comparison and drop walk the tree with an explicit stack; the derived
// versions recurse once per level and overflow on deeply nested documents.
impl PartialEq for GenericTreeNode {
    fn eq(&self, other: &Self) -> bool {
        let mut pending = vec![(self, other)];
        while let Some((left, right)) = pending.pop() {
            if !left.same_shell(right) || left.children().len() != right.children().len() {
                return false;
            }
            pending.extend(left.children().iter().zip(right.children()));
        }
        true
    }
}

impl Drop for GenericTreeNode {
    fn drop(&mut self) {
        let Some(children) = self.children_mut() else {
            return;
        };
        let mut pending = std::mem::take(children);
        while let Some(mut node) = pending.pop() {
            if let Some(children) = node.children_mut() {
                pending.append(children);
            }
        }
    }
}

/// Convert the subtree rooted at `id` into a [`GenericTreeNode`].
///
/// Returns `None` if `id` is not in the tree. The walk keeps its own stack of
/// open containers, so nesting depth is bounded by memory, not call depth.
#[must_use]
pub fn to_generic_tree(tree: &DomTree, id: NodeId) -> Option<GenericTreeNode> {
    let root = shell(tree, id)?;
    let mut open = vec![(root, tree.children(id).iter())];

    loop {
        let (_, children) = open.last_mut()?;
        if let Some(&child) = children.next() {
            if let Some(node) = shell(tree, child) {
                open.push((node, tree.children(child).iter()));
            }
            continue;
        }

        let (done, _) = open.pop()?;
        match open.last_mut() {
            Some((parent, _)) => {
                if let Some(siblings) = parent.children_mut() {
                    siblings.push(done);
                }
            }
            None => return Some(done),
        }
    }
}

/// A node's own data, with no children yet.
fn shell(tree: &DomTree, id: NodeId) -> Option<GenericTreeNode> {
    Some(match &tree.get(id)?.node_type {
        NodeType::Document => GenericTreeNode::Document {
            children: Vec::new(),
        },
        NodeType::DocumentType(data) => GenericTreeNode::Declaration {
            name: data.name.clone(),
            public_id: data.public_id.clone(),
            system_id: data.system_id.clone(),
        },
        NodeType::Element(data) => GenericTreeNode::Element {
            name: data.tag_name.clone(),
            attributes: data
                .attrs
                .iter()
                .map(|attr| GenericAttribute {
                    name: attr.name.clone(),
                    value: attr.value.clone(),
                })
                .collect(),
            children: Vec::new(),
        },
        NodeType::Text(text) => GenericTreeNode::Text {
            content: text.clone(),
        },
        NodeType::Comment(text) => GenericTreeNode::Comment {
            content: text.clone(),
        },
    })
}
