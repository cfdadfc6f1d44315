//! Document tree implementation for trawl.
//!
//! This crate provides an arena-based tree structure following the
//! [DOM Living Standard](https://dom.spec.whatwg.org/) closely enough for
//! parsing and querying. It contains no parsing logic.
//!
//! # Design
//!
//! The tree uses arena allocation with [`NodeId`] indices for all relationships,
//! providing O(1) access and traversal without borrow checker issues.
//! Children are owned by position in their parent's child list; the parent
//! link is a plain index used only for upward traversal.
//!
//! Once the parser hands a tree back, consumers only ever borrow it
//! immutably. [`DomTree`] has no interior mutability, so it is `Send + Sync`
//! and can be queried from several threads at once.

pub mod attributes;
pub mod generic;
pub mod iter;
pub mod serialize;

use std::fmt::Write as _;

pub use attributes::{Attribute, Attributes};
pub use generic::{GenericAttribute, GenericTreeNode, to_generic_tree};
pub use iter::{Ancestors, Descendants, ElementChildren, FollowingSiblings, PrecedingSiblings};
pub use serialize::{inner_html, outer_html};

/// A type-safe index into the document tree.
///
/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
/// "Each node has an associated node document..."
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The root document node is always at index 0.
    pub const ROOT: Self = Self(0);
}

/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
///
/// "Node is an abstract interface that is used by all nodes in a tree."
///
/// This node stores indices for parent/child/sibling relationships,
/// enabling O(1) traversal in any direction.
#[derive(Debug, Clone)]
pub struct Node {
    /// "Each node has an associated node type"
    pub node_type: NodeType,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-parent)
    /// "An object that participates in a tree has a parent, which is either
    /// null or an object."
    pub parent: Option<NodeId>,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-child)
    /// "A node has an associated list of children"
    pub children: Vec<NodeId>,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-next-sibling)
    pub next_sibling: Option<NodeId>,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-previous-sibling)
    pub prev_sibling: Option<NodeId>,
}

impl Node {
    const fn detached(node_type: NodeType) -> Self {
        Self {
            node_type,
            parent: None,
            children: Vec::new(),
            next_sibling: None,
            prev_sibling: None,
        }
    }
}

/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
///
/// "Each node has an associated node type"
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeType {
    /// [§ 4.5 Interface Document](https://dom.spec.whatwg.org/#interface-document)
    Document,
    /// [§ 4.6 Interface DocumentType](https://dom.spec.whatwg.org/#interface-documenttype)
    /// "Doctypes have an associated name, public ID, and system ID."
    DocumentType(DocumentTypeData),
    /// [§ 4.9 Interface Element](https://dom.spec.whatwg.org/#interface-element)
    Element(ElementData),
    /// [§ 4.10 Interface Text](https://dom.spec.whatwg.org/#interface-text)
    Text(String),
    /// [§ 4.7 Interface Comment](https://dom.spec.whatwg.org/#interface-comment)
    Comment(String),
}

/// Doctype payload. Missing identifiers are empty strings, as in the DOM.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentTypeData {
    /// Doctype name, e.g. `html`.
    pub name: String,
    /// Public identifier.
    pub public_id: String,
    /// System identifier.
    pub system_id: String,
}

/// Element-specific data.
///
/// Per [§ 4.9 Interface Element](https://dom.spec.whatwg.org/#interface-element):
/// "When an element is created, its local name is always given."
///
/// NOTE: Namespaces are not modeled. The tag name keeps its source casing
/// for output; all comparisons go through the lowercased local name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementData {
    /// Tag name exactly as written in the source.
    pub tag_name: String,
    /// "An element has an associated attribute list"
    pub attrs: Attributes,
    local_name: String,
}

impl ElementData {
    /// Create element data, caching the lowercase local name.
    pub fn new(tag_name: impl Into<String>, attrs: Attributes) -> Self {
        let tag_name = tag_name.into();
        let local_name = tag_name.to_ascii_lowercase();
        Self {
            tag_name,
            attrs,
            local_name,
        }
    }

    /// ASCII-lowercased tag name, used for every comparison.
    #[must_use]
    pub fn local_name(&self) -> &str {
        &self.local_name
    }

    /// Whether this element's tag name equals `name`, ignoring ASCII case.
    #[must_use]
    pub fn is(&self, name: &str) -> bool {
        self.local_name.eq_ignore_ascii_case(name)
    }

    /// Returns the element's id attribute value if present.
    ///
    /// Per [§ 3.2.6 Global attributes](https://html.spec.whatwg.org/multipage/dom.html#global-attributes):
    /// "The id attribute specifies its element's unique identifier (ID)."
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.attrs.get("id")
    }

    /// Iterate the class names from the class attribute.
    ///
    /// "The class attribute, if specified, must have a value that is a set of
    /// space-separated tokens representing the various classes that the element belongs to."
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attrs
            .get("class")
            .unwrap_or_default()
            .split_ascii_whitespace()
    }

    /// Whether `class` is one of this element's classes (case-sensitive).
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|c| c == class)
    }
}

/// Arena-based document tree with O(1) node access and traversal.
///
/// [§ 4 Nodes](https://dom.spec.whatwg.org/#nodes)
///
/// "The DOM represents a document as a tree. A tree is a finite hierarchical
/// tree structure."
///
/// All nodes live in a contiguous vector. A removed node stays allocated but
/// detached: it has no parent and appears in no child list.
#[derive(Debug, Clone)]
pub struct DomTree {
    /// All nodes in the tree, indexed by `NodeId`.
    /// The Document node is always at index 0 (`NodeId::ROOT`).
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a new tree with just the Document node.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::detached(NodeType::Document)],
        }
    }

    /// Get the root document node ID.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by its ID.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Get a mutable reference to a node by its ID.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// Whether `id` refers to a node allocated in this tree.
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        id.0 < self.nodes.len()
    }

    /// Get the number of allocated nodes, detached ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree is empty (should always have at least the Document).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a new node and return its ID.
    /// The node is not yet attached to the tree.
    pub fn alloc(&mut self, node_type: NodeType) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::detached(node_type));
        id
    }

    // ===== Mutation =====

    /// [§ 4.2.2 Append](https://dom.spec.whatwg.org/#concept-node-append)
    ///
    /// "To append a node to a parent, pre-insert node into parent before null."
    ///
    /// Appends `child` as the last child of `parent`. A child that is still
    /// attached elsewhere is detached first.
    ///
    /// # Panics
    /// Panics if either id is not in this tree.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);

        let prev_last_child = self.nodes[parent.0].children.last().copied();
        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);

        if let Some(prev_id) = prev_last_child {
            self.nodes[prev_id.0].next_sibling = Some(child);
            self.nodes[child.0].prev_sibling = Some(prev_id);
        }
    }

    /// [§ 4.2.3 Pre-insert](https://dom.spec.whatwg.org/#concept-node-pre-insert)
    ///
    /// Inserts `new_child` into `parent` immediately before `reference`.
    /// If `reference` is not a child of `parent`, `new_child` is appended.
    ///
    /// # Panics
    /// Panics if any id is not in this tree.
    pub fn insert_before(&mut self, parent: NodeId, new_child: NodeId, reference: NodeId) {
        self.detach(new_child);

        let Some(index) = self.nodes[parent.0]
            .children
            .iter()
            .position(|&id| id == reference)
        else {
            self.append_child(parent, new_child);
            return;
        };

        let prev = self.nodes[reference.0].prev_sibling;
        self.nodes[parent.0].children.insert(index, new_child);

        let node = &mut self.nodes[new_child.0];
        node.parent = Some(parent);
        node.prev_sibling = prev;
        node.next_sibling = Some(reference);

        self.nodes[reference.0].prev_sibling = Some(new_child);
        if let Some(prev_id) = prev {
            self.nodes[prev_id.0].next_sibling = Some(new_child);
        }
    }

    /// [§ 4.2.3 Remove](https://dom.spec.whatwg.org/#concept-node-remove)
    ///
    /// Removes `child` from `parent`, clearing its parent and sibling links.
    /// Does nothing if `child` is not a child of `parent`.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) {
        if self.parent(child) == Some(parent) {
            self.detach(child);
        }
    }

    /// Unlink `id` from its parent, if it has one.
    fn detach(&mut self, id: NodeId) {
        let Some(node) = self.nodes.get_mut(id.0) else {
            return;
        };
        let Some(parent) = node.parent.take() else {
            return;
        };
        let prev = node.prev_sibling.take();
        let next = node.next_sibling.take();

        self.nodes[parent.0].children.retain(|&c| c != id);
        if let Some(prev_id) = prev {
            self.nodes[prev_id.0].next_sibling = next;
        }
        if let Some(next_id) = next {
            self.nodes[next_id.0].prev_sibling = prev;
        }
    }

    // ===== Navigation =====

    /// Get the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get all children of a node.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Get the first child of a node.
    #[must_use]
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.children.first().copied())
    }

    /// Get the last child of a node.
    #[must_use]
    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.children.last().copied())
    }

    /// Get the next sibling of a node.
    #[must_use]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.next_sibling)
    }

    /// Get the previous sibling of a node.
    #[must_use]
    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.prev_sibling)
    }

    /// [§ 4.2.6 Descendant](https://dom.spec.whatwg.org/#concept-tree-descendant)
    ///
    /// "An object A is called a descendant of an object B, if either A is a
    /// child of B or A is a child of an object C that is a descendant of B."
    #[must_use]
    pub fn is_descendant_of(&self, descendant: NodeId, ancestor: NodeId) -> bool {
        self.ancestors(descendant).any(|id| id == ancestor)
    }

    /// Iterate over all ancestors of a node, from parent to root.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            current: self.parent(id),
        }
    }

    /// Iterate over preceding siblings (from immediately before to first child).
    #[must_use]
    pub fn preceding_siblings(&self, id: NodeId) -> PrecedingSiblings<'_> {
        PrecedingSiblings {
            tree: self,
            current: self.prev_sibling(id),
        }
    }

    /// Iterate over following siblings (from immediately after to last child).
    #[must_use]
    pub fn following_siblings(&self, id: NodeId) -> FollowingSiblings<'_> {
        FollowingSiblings {
            tree: self,
            current: self.next_sibling(id),
        }
    }

    /// Iterate over the element children of a node.
    #[must_use]
    pub fn element_children(&self, id: NodeId) -> ElementChildren<'_> {
        ElementChildren {
            tree: self,
            children: self.children(id).iter(),
        }
    }

    /// Iterate every node below `id` in document order (`id` excluded).
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        Descendants::new(self, id)
    }

    // ===== Node data =====

    /// Get element data if this node is an element.
    #[must_use]
    pub fn as_element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Element(data) => Some(data),
            _ => None,
        })
    }

    /// Whether this node is an element.
    #[must_use]
    pub fn is_element(&self, id: NodeId) -> bool {
        self.as_element(id).is_some()
    }

    /// Get text content if this node is a text node.
    #[must_use]
    pub fn as_text(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Text(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// Get comment data if this node is a comment.
    #[must_use]
    pub fn as_comment(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Comment(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// Get doctype data if this node is a document type.
    #[must_use]
    pub fn as_doctype(&self, id: NodeId) -> Option<&DocumentTypeData> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::DocumentType(data) => Some(data),
            _ => None,
        })
    }

    /// [§ 4.10 textContent](https://dom.spec.whatwg.org/#dom-node-textcontent)
    ///
    /// "The descendant text content of a node node is the concatenation of
    /// the data of all the Text node descendants of node, in tree order."
    ///
    /// For a text or comment node this is its own data.
    #[must_use]
    pub fn text_content(&self, id: NodeId) -> String {
        if let Some(text) = self.as_text(id).or_else(|| self.as_comment(id)) {
            return text.to_string();
        }
        self.descendants(id)
            .filter_map(|child| self.as_text(child))
            .collect()
    }

    // ===== Document structure =====

    /// The document's doctype node, if one was parsed.
    #[must_use]
    pub fn doctype(&self) -> Option<NodeId> {
        self.children(NodeId::ROOT)
            .iter()
            .copied()
            .find(|&id| self.as_doctype(id).is_some())
    }

    /// [§ 3.1.1 The document element](https://html.spec.whatwg.org/multipage/dom.html#the-html-element-2)
    ///
    /// "The document element of a document is the element whose parent is that
    /// document, if it exists; otherwise null."
    #[must_use]
    pub fn document_element(&self) -> Option<NodeId> {
        self.element_children(NodeId::ROOT).next()
    }

    /// [§ 3.1.4 The head element](https://html.spec.whatwg.org/multipage/dom.html#the-head-element-2)
    ///
    /// "The head element of a document is the first head element that is a
    /// child of the html element, if there is one, or null otherwise."
    #[must_use]
    pub fn head(&self) -> Option<NodeId> {
        let html = self.document_element()?;
        self.element_children(html)
            .find(|&id| self.as_element(id).is_some_and(|e| e.is("head")))
    }

    /// [§ 3.1.3 The body element](https://html.spec.whatwg.org/multipage/dom.html#the-body-element-2)
    ///
    /// "The body element of a document is the first of the html element's children
    /// that is either a body element or a frameset element, or null if there is
    /// no such element."
    #[must_use]
    pub fn body(&self) -> Option<NodeId> {
        let html = self.document_element()?;
        self.element_children(html).find(|&id| {
            self.as_element(id)
                .is_some_and(|e| e.is("body") || e.is("frameset"))
        })
    }

    /// An XPath-like location for `id`, e.g. `/html[1]/body[1]/p[2]`.
    ///
    /// Positions are 1-based and count only same-named element siblings,
    /// or same-kind siblings for `text()` and `comment()` steps.
    #[must_use]
    pub fn xpath(&self, id: NodeId) -> String {
        let mut steps: Vec<String> = Vec::new();
        let mut current = Some(id);
        while let Some(node) = current {
            if node == NodeId::ROOT {
                break;
            }
            let step = match self.get(node).map(|n| &n.node_type) {
                Some(NodeType::Element(data)) => {
                    let position = self.position_among(node, |sib| {
                        self.as_element(sib).is_some_and(|e| e.is(data.local_name()))
                    });
                    format!("{}[{position}]", data.local_name())
                }
                Some(NodeType::Text(_)) => {
                    let position = self.position_among(node, |sib| self.as_text(sib).is_some());
                    format!("text()[{position}]")
                }
                Some(NodeType::Comment(_)) => {
                    let position = self.position_among(node, |sib| self.as_comment(sib).is_some());
                    format!("comment()[{position}]")
                }
                Some(NodeType::DocumentType(_)) => "doctype()".to_string(),
                Some(NodeType::Document) | None => break,
            };
            steps.push(step);
            current = self.parent(node);
        }

        if steps.is_empty() {
            return "/".to_string();
        }
        let mut path = String::new();
        for step in steps.iter().rev() {
            let _ = write!(path, "/{step}");
        }
        path
    }

    fn position_among(&self, id: NodeId, same_kind: impl Fn(NodeId) -> bool) -> usize {
        self.preceding_siblings(id).filter(|&sib| same_kind(sib)).count() + 1
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}
