//! A parsed document and the queries run against it.

use core::fmt;

use trawl_common::SourcePosition;
use trawl_common::warning::clear_warnings;
use trawl_dom::{DomTree, GenericTreeNode, NodeId, inner_html, outer_html, to_generic_tree};
use trawl_html::tokenizer::{ParseErrorCode, TokenizerIssue};
use trawl_html::{HTMLParser, HTMLTokenizer, ParseIssue, ParserOptions, TokenizerOptions};
use trawl_select::{Matches, SelectorList, select, select_first};

use crate::error::{Error, Result};

/// Options for [`Document::parse_with_options`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Tokenizer settings.
    pub tokenizer: TokenizerOptions,
    /// Tree builder settings.
    pub parser: ParserOptions,
}

impl ParseOptions {
    /// Set the scripting flag on both stages, which must agree for
    /// `<noscript>` to parse consistently.
    #[must_use]
    pub const fn with_scripting(mut self, enabled: bool) -> Self {
        self.tokenizer.scripting_enabled = enabled;
        self.parser.scripting_enabled = enabled;
        self
    }
}

/// A problem the parser recovered from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    /// Lexical error, located in the source.
    Tokenizer(TokenizerIssue),
    /// Tree construction error, located by token index.
    TreeBuilder(ParseIssue),
}

impl Issue {
    /// The source position, for tokenizer issues.
    #[must_use]
    pub const fn position(&self) -> Option<SourcePosition> {
        match self {
            Self::Tokenizer(issue) => Some(issue.position),
            Self::TreeBuilder(_) => None,
        }
    }

    /// The tokenizer error code, for tokenizer issues.
    #[must_use]
    pub const fn code(&self) -> Option<ParseErrorCode> {
        match self {
            Self::Tokenizer(issue) => Some(issue.code),
            Self::TreeBuilder(_) => None,
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tokenizer(issue) => write!(f, "{}: {}", issue.position, issue.code),
            Self::TreeBuilder(issue) => write!(f, "token {}: {}", issue.token_index, issue.message),
        }
    }
}

/// A parsed HTML document.
///
/// Owns the tree and the issues recorded while building it. The tree is not
/// modified after parsing, so a `Document` can be shared freely between
/// threads and queried concurrently.
///
/// ```
/// use trawl::Document;
///
/// let doc = Document::parse("<ul><li>one<li>two</ul>");
/// let items = doc.find_all(doc.root(), "li").unwrap();
/// assert_eq!(items.len(), 2);
/// assert_eq!(doc.text(items[1]).unwrap(), "two");
/// ```
#[derive(Debug, Clone)]
pub struct Document {
    tree: DomTree,
    issues: Vec<Issue>,
}

impl Document {
    /// Parse `html` with default options. Never fails.
    #[must_use]
    pub fn parse(html: &str) -> Self {
        Self::parse_with_options(html, &ParseOptions::default())
    }

    /// Parse `html` with explicit options. Never fails.
    #[must_use]
    pub fn parse_with_options(html: &str, options: &ParseOptions) -> Self {
        clear_warnings();

        let mut tokenizer = HTMLTokenizer::with_options(html, options.tokenizer.clone());
        let (tree, builder_issues) = HTMLParser::new(options.parser).run_with_issues(&mut tokenizer);

        let mut issues: Vec<Issue> = tokenizer.issues().into_iter().map(Issue::Tokenizer).collect();
        issues.extend(builder_issues.into_iter().map(Issue::TreeBuilder));
        log::debug!(
            "parsed {} bytes into {} nodes with {} issues",
            html.len(),
            tree.len(),
            issues.len()
        );

        Self { tree, issues }
    }

    /// The underlying tree.
    #[must_use]
    pub const fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// The Document node.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        self.tree.root()
    }

    /// Problems recovered from while parsing: tokenizer issues in source
    /// order, then tree builder issues in token order.
    #[must_use]
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    /// The first element under `node`, in document order, matching `selector`.
    ///
    /// # Errors
    ///
    /// [`Error::Selector`] for invalid selector text, [`Error::UnknownNode`]
    /// if `node` is not in this document.
    pub fn find(&self, node: NodeId, selector: &str) -> Result<Option<NodeId>> {
        self.check(node)?;
        let list: SelectorList = selector.parse()?;
        Ok(select_first(&self.tree, node, &list))
    }

    /// Every element under `node` matching `selector`, in document order.
    ///
    /// # Errors
    ///
    /// As for [`find`](Self::find).
    pub fn find_all(&self, node: NodeId, selector: &str) -> Result<Vec<NodeId>> {
        self.check(node)?;
        let list: SelectorList = selector.parse()?;
        Ok(select(&self.tree, node, &list).collect())
    }

    /// Lazily match a pre-parsed selector under `node`.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownNode`] if `node` is not in this document.
    pub fn select<'a>(&'a self, node: NodeId, selector: &'a SelectorList) -> Result<Matches<'a>> {
        self.check(node)?;
        Ok(select(&self.tree, node, selector))
    }

    /// Whether the node `node` matches `selector`.
    ///
    /// # Errors
    ///
    /// As for [`select`](Self::select).
    pub fn matches(&self, node: NodeId, selector: &SelectorList) -> Result<bool> {
        self.check(node)?;
        Ok(selector.matches(&self.tree, node))
    }

    /// The whole document as a [`GenericTreeNode`].
    #[must_use]
    pub fn to_generic_tree(&self) -> GenericTreeNode {
        to_generic_tree(&self.tree, self.root()).unwrap_or(GenericTreeNode::Document {
            children: Vec::new(),
        })
    }

    /// Serialize the whole document.
    #[must_use]
    pub fn to_html(&self) -> String {
        outer_html(&self.tree, self.root())
    }

    /// Serialize `node` with its own tags.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownNode`] if `node` is not in this document.
    pub fn outer_html(&self, node: NodeId) -> Result<String> {
        self.check(node)?;
        Ok(outer_html(&self.tree, node))
    }

    /// Serialize the children of `node`.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownNode`] if `node` is not in this document.
    pub fn inner_html(&self, node: NodeId) -> Result<String> {
        self.check(node)?;
        Ok(inner_html(&self.tree, node))
    }

    /// The concatenated text below `node`.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownNode`] if `node` is not in this document.
    pub fn text(&self, node: NodeId) -> Result<String> {
        self.check(node)?;
        Ok(self.tree.text_content(node))
    }

    /// An XPath-like location such as `/html[1]/body[1]/p[2]`.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownNode`] if `node` is not in this document.
    pub fn xpath(&self, node: NodeId) -> Result<String> {
        self.check(node)?;
        Ok(self.tree.xpath(node))
    }

    fn check(&self, node: NodeId) -> Result<()> {
        if self.tree.contains(node) {
            Ok(())
        } else {
            Err(Error::UnknownNode(node))
        }
    }
}

impl From<&str> for Document {
    fn from(html: &str) -> Self {
        Self::parse(html)
    }
}
