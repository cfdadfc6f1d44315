//! Evaluating selectors against a [`DomTree`].
//!
//! [§ 4.1 Selector Matching](https://www.w3.org/TR/selectors-4/#match-a-selector-against-an-element)
//!
//! Matching starts at the subject (rightmost compound) and walks the
//! combinator chain leftward. The descendant and subsequent-sibling
//! combinators try every candidate, not only the nearest one, so
//! `div > p span` matches a `span` whose nearest `p` ancestor is not a
//! child of a `div` as long as some other `p` ancestor is. Outcomes are
//! remembered per (node, chain position) for the current subject, so a
//! long chain over a deep tree stays polynomial.

use std::collections::HashMap;

use trawl_dom::{Descendants, DomTree, ElementData, NodeId};

use crate::ast::{
    AttributeSelector, Combinator, ComplexSelector, CompoundSelector, PseudoClass, SelectorList,
    SimpleSelector,
};
use crate::nth::NthIndexCache;

/// Lazy iterator over the elements under a scope node that match a
/// selector list, in document order.
///
/// Created by [`select`]. Owns the positional cache for the query.
pub struct Matches<'a> {
    tree: &'a DomTree,
    selectors: &'a SelectorList,
    candidates: Descendants<'a>,
    cache: NthIndexCache,
}

impl Iterator for Matches<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.tree;
        let selectors = self.selectors;
        let cache = &mut self.cache;
        self.candidates
            .by_ref()
            .find(|&id| list_matches(tree, id, selectors, cache))
    }
}

/// All elements strictly below `scope` that match `selectors`, in document
/// order.
///
/// Only candidates are restricted to the scope. Combinators may look past
/// it, so `select(tree, body, "html p")` still finds paragraphs.
#[must_use]
pub fn select<'a>(tree: &'a DomTree, scope: NodeId, selectors: &'a SelectorList) -> Matches<'a> {
    Matches {
        tree,
        selectors,
        candidates: tree.descendants(scope),
        cache: NthIndexCache::new(),
    }
}

/// The first element below `scope` that matches, in document order.
#[must_use]
pub fn select_first(tree: &DomTree, scope: NodeId, selectors: &SelectorList) -> Option<NodeId> {
    select(tree, scope, selectors).next()
}

/// Whether the single node `id` matches `selectors`. Non-elements never match.
#[must_use]
pub fn matches(tree: &DomTree, id: NodeId, selectors: &SelectorList) -> bool {
    let mut cache = NthIndexCache::new();
    list_matches(tree, id, selectors, &mut cache)
}

impl SelectorList {
    /// Method form of [`matches`].
    #[must_use]
    pub fn matches(&self, tree: &DomTree, id: NodeId) -> bool {
        matches(tree, id, self)
    }
}

/// "A selector list matches an element if any of the selectors in the list
/// match the element."
fn list_matches(
    tree: &DomTree,
    id: NodeId,
    selectors: &SelectorList,
    cache: &mut NthIndexCache,
) -> bool {
    selectors
        .iter()
        .any(|complex| complex_matches(tree, id, complex, cache))
}

fn complex_matches(
    tree: &DomTree,
    id: NodeId,
    complex: &ComplexSelector,
    cache: &mut NthIndexCache,
) -> bool {
    let mut seen = ChainMemo::new();
    compound_matches(tree, id, &complex.subject, cache)
        && chain_matches(tree, id, &complex.combinators, cache, &mut seen)
}

/// Keyed by candidate and the length of the chain still to match.
type ChainMemo = HashMap<(NodeId, usize), bool>;

/// [§ 16 Combinators](https://www.w3.org/TR/selectors-4/#combinators)
///
/// `chain` is the right-to-left remainder of the combinator list; `id` has
/// already matched the compound to its right.
fn chain_matches(
    tree: &DomTree,
    id: NodeId,
    chain: &[(Combinator, CompoundSelector)],
    cache: &mut NthIndexCache,
    seen: &mut ChainMemo,
) -> bool {
    let Some(((combinator, compound), rest)) = chain.split_first() else {
        return true;
    };
    if let Some(&known) = seen.get(&(id, chain.len())) {
        return known;
    }
    let mut step = |candidate: NodeId| {
        compound_matches(tree, candidate, compound, cache)
            && chain_matches(tree, candidate, rest, cache, seen)
    };

    let matched = match combinator {
        // "an element B that is an arbitrary descendant of some ancestor element A"
        Combinator::Descendant => tree.ancestors(id).any(&mut step),

        // "an element B that is a direct child of element A"
        Combinator::Child => tree.parent(id).is_some_and(step),

        // Only element siblings count; text and comments in between are skipped.
        Combinator::NextSibling => tree
            .preceding_siblings(id)
            .find(|&sibling| tree.is_element(sibling))
            .is_some_and(step),

        Combinator::SubsequentSibling => tree
            .preceding_siblings(id)
            .filter(|&sibling| tree.is_element(sibling))
            .any(&mut step),
    };
    let _ = seen.insert((id, chain.len()), matched);
    matched
}

/// A compound matches when every simple selector in it does.
fn compound_matches(
    tree: &DomTree,
    id: NodeId,
    compound: &CompoundSelector,
    cache: &mut NthIndexCache,
) -> bool {
    let Some(element) = tree.as_element(id) else {
        return false;
    };
    compound.simple_selectors.iter().all(|simple| match simple {
        SimpleSelector::PseudoClass(pc) => pseudo_class_matches(tree, id, pc, cache),
        _ => simple.matches(element),
    })
}

impl SimpleSelector {
    /// Whether this selector matches `element` on its own attributes and
    /// name.
    ///
    /// Pseudo-classes need the element's position in the tree and always
    /// return `false` here; the tree matcher evaluates them separately.
    #[must_use]
    pub fn matches(&self, element: &ElementData) -> bool {
        match self {
            // "...represents an element in the document tree with the same
            // qualified name as the identifier."
            Self::Type(name) => element.is(name),
            Self::Universal => true,
            Self::Id(id) => element.id() == Some(id.as_str()),
            Self::Class(class) => element.has_class(class),
            Self::Attribute(attribute) => attribute.matches(element),
            Self::PseudoClass(_) => false,
        }
    }
}

impl AttributeSelector {
    /// [§ 6.1 Attribute presence and value selectors](https://www.w3.org/TR/selectors-4/#attribute-representation)
    ///
    /// Values compare ignoring ASCII case. An empty value never matches for
    /// `~=`, `^=`, `$=` and `*=`: "If "val" is the empty string, it will never
    /// represent anything."
    #[must_use]
    pub fn matches(&self, element: &ElementData) -> bool {
        let Some(actual) = element.attrs.get(self.name()) else {
            return false;
        };
        match self {
            Self::Exists(_) => true,
            Self::Equals(_, expected) => actual.eq_ignore_ascii_case(expected),
            Self::Includes(_, expected) => {
                !expected.is_empty()
                    && !expected.contains(|c: char| c.is_ascii_whitespace())
                    && actual
                        .split_ascii_whitespace()
                        .any(|word| word.eq_ignore_ascii_case(expected))
            }
            Self::DashMatch(_, expected) => {
                actual.eq_ignore_ascii_case(expected)
                    || (starts_with_ignore_case(actual, expected)
                        && actual.as_bytes().get(expected.len()) == Some(&b'-'))
            }
            Self::PrefixMatch(_, expected) => {
                !expected.is_empty() && starts_with_ignore_case(actual, expected)
            }
            Self::SuffixMatch(_, expected) => {
                !expected.is_empty()
                    && actual.len() >= expected.len()
                    && actual
                        .get(actual.len() - expected.len()..)
                        .is_some_and(|tail| tail.eq_ignore_ascii_case(expected))
            }
            Self::SubstringMatch(_, expected) => {
                !expected.is_empty()
                    && actual
                        .to_ascii_lowercase()
                        .contains(&expected.to_ascii_lowercase())
            }
        }
    }
}

fn starts_with_ignore_case(haystack: &str, prefix: &str) -> bool {
    haystack
        .get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

/// [§ 14 Tree-Structural pseudo-classes](https://www.w3.org/TR/selectors-4/#structural-pseudos)
///
/// "Standalone text and other non-element nodes are not counted when
/// calculating the position of an element in the list of children of its
/// parent."
fn pseudo_class_matches(
    tree: &DomTree,
    id: NodeId,
    pc: &PseudoClass,
    cache: &mut NthIndexCache,
) -> bool {
    match pc {
        PseudoClass::Root => tree.document_element() == Some(id),
        PseudoClass::Empty => tree.children(id).is_empty(),
        PseudoClass::Not(list) => !list_matches(tree, id, list, cache),
        positional => {
            let Some(position) = cache.position(tree, id) else {
                return false;
            };
            match positional {
                PseudoClass::FirstChild => position.index == 1,
                PseudoClass::LastChild => position.index == position.count,
                PseudoClass::OnlyChild => position.count == 1,
                PseudoClass::FirstOfType => position.index_of_type == 1,
                PseudoClass::LastOfType => position.index_of_type == position.count_of_type,
                PseudoClass::OnlyOfType => position.count_of_type == 1,
                PseudoClass::NthChild(nth) => nth.matches(position.index),
                PseudoClass::NthLastChild(nth) => nth.matches(position.index_from_end()),
                PseudoClass::NthOfType(nth) => nth.matches(position.index_of_type),
                PseudoClass::NthLastOfType(nth) => nth.matches(position.index_of_type_from_end()),
                PseudoClass::Root | PseudoClass::Empty | PseudoClass::Not(_) => false,
            }
        }
    }
}
