//! Selector syntax tree.
//!
//! [§ 3 Selector Syntax and Structure](https://www.w3.org/TR/selectors-4/#structure)
//!
//! The tree mirrors the grammar: a [`SelectorList`] of comma-separated
//! [`ComplexSelector`]s, each a chain of [`CompoundSelector`]s joined by
//! [`Combinator`]s. Every node implements [`Display`](fmt::Display) and
//! prints back as selector text that parses to the same tree.

use core::fmt;

/// [§ 4.1 Selector Lists](https://www.w3.org/TR/selectors-4/#grouping)
///
/// "A comma-separated list of selectors represents the union of all elements
/// selected by each of the individual selectors in the selector list."
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorList {
    /// The comma-separated groups, in source order. Never empty.
    pub selectors: Vec<ComplexSelector>,
}

impl SelectorList {
    /// Number of comma-separated groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.selectors.len()
    }

    /// Always `false` for a parsed list.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }

    /// Iterate the groups in source order.
    pub fn iter(&self) -> std::slice::Iter<'_, ComplexSelector> {
        self.selectors.iter()
    }
}

impl<'a> IntoIterator for &'a SelectorList {
    type Item = &'a ComplexSelector;
    type IntoIter = std::slice::Iter<'a, ComplexSelector>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// [§ 4.3 Complex selectors](https://www.w3.org/TR/selectors-4/#complex)
///
/// "A complex selector is a chain of one or more compound selectors separated
/// by combinators."
///
/// Example: `div.container > ul.nav li a.active`
/// This would be parsed as:
/// ```text
/// [div.container] --(Child)--> [ul.nav] --(Descendant)--> [li] --(Descendant)--> [a.active]
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplexSelector {
    /// The rightmost compound selector (the subject of the selector).
    ///
    /// "The elements represented by a complex selector are the elements matched
    /// by the last compound selector in the complex selector."
    pub subject: CompoundSelector,

    /// Chain of (combinator, compound) pairs going left from the subject.
    ///
    /// For `A > B C`, this is `[(Descendant, B), (Child, A)]`. Right-to-left
    /// order is the order matching walks them in.
    pub combinators: Vec<(Combinator, CompoundSelector)>,
}

impl ComplexSelector {
    /// A selector with no combinators.
    #[must_use]
    pub const fn is_simple(&self) -> bool {
        self.combinators.is_empty()
    }
}

/// [§ 4.2 Compound selectors](https://www.w3.org/TR/selectors-4/#compound)
///
/// "A compound selector is a sequence of simple selectors that are not
/// separated by a combinator, and represents a set of simultaneous conditions
/// on a single element."
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompoundSelector {
    /// The conditions, in source order. A type or universal selector, if
    /// present, comes first.
    pub simple_selectors: Vec<SimpleSelector>,
}

/// [§ 16 Combinators](https://www.w3.org/TR/selectors-4/#combinators)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// [§ 16.1 Descendant combinator](https://www.w3.org/TR/selectors-4/#descendant-combinators)
    /// "A selector of the form 'A B' represents an element B that is an
    /// arbitrary descendant of some ancestor element A."
    Descendant,

    /// [§ 16.2 Child combinator](https://www.w3.org/TR/selectors-4/#child-combinators)
    /// "A selector of the form 'A > B' represents an element B that is a
    /// direct child of element A."
    Child,

    /// [§ 16.3 Next-sibling combinator](https://www.w3.org/TR/selectors-4/#adjacent-sibling-combinators)
    /// "A selector of the form 'A + B' represents an element B that
    /// immediately follows element A, where A and B share the same parent."
    NextSibling,

    /// [§ 16.4 Subsequent-sibling combinator](https://www.w3.org/TR/selectors-4/#general-sibling-combinators)
    /// "A selector of the form 'A ~ B' represents an element B that follows
    /// element A (not necessarily immediately), where A and B share the same
    /// parent."
    SubsequentSibling,
}

/// [§ 5 Elemental selectors](https://www.w3.org/TR/selectors-4/#elemental-selectors)
/// [§ 6 Attribute selectors](https://www.w3.org/TR/selectors-4/#attribute-selectors)
///
/// A simple selector is a single condition on an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimpleSelector {
    /// [§ 5.1 Type selector](https://www.w3.org/TR/selectors-4/#type-selectors)
    /// "A type selector is the name of a document language element type,
    /// and represents an instance of that element type in the document tree."
    ///
    /// Kept as written; compared ignoring ASCII case.
    Type(String),

    /// [§ 5.2 Universal selector](https://www.w3.org/TR/selectors-4/#universal-selector)
    /// "The universal selector is a single asterisk (*) and represents the
    /// qualified name of any element type."
    Universal,

    /// [§ 6.7 ID selector](https://www.w3.org/TR/selectors-4/#id-selectors)
    /// "An ID selector is a hash (#, U+0023) immediately followed by the
    /// ID value, which is an identifier."
    Id(String),

    /// [§ 6.6 Class selector](https://www.w3.org/TR/selectors-4/#class-html)
    /// "The class selector is given as a full stop (. U+002E) immediately
    /// followed by an identifier."
    Class(String),

    /// [§ 6.4 Attribute selectors](https://www.w3.org/TR/selectors-4/#attribute-selectors)
    ///
    /// Examples: `[href]`, `[type=text]`, `[lang|=en]`, `[src$=".png"]`
    Attribute(AttributeSelector),

    /// [§ 3.4 Pseudo-classes](https://www.w3.org/TR/selectors-4/#pseudo-classes)
    PseudoClass(PseudoClass),
}

/// [§ 6.4 Attribute selectors](https://www.w3.org/TR/selectors-4/#attribute-selectors)
///
/// Names are stored lowercased. Values keep their case; matching compares
/// them ignoring ASCII case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeSelector {
    /// `[att]`: "Represents an element with the att attribute, whatever the
    /// value of the attribute."
    Exists(String),
    /// `[att=val]`: "Represents an element with the att attribute whose value
    /// is exactly "val"."
    Equals(String, String),
    /// `[att~=val]`: "Represents an element with the att attribute whose value
    /// is a whitespace-separated list of words, one of which is exactly "val"."
    Includes(String, String),
    /// `[att|=val]`: "Represents an element with the att attribute, its value
    /// either being exactly "val" or beginning with "val" immediately followed
    /// by "-" (U+002D)."
    DashMatch(String, String),
    /// `[att^=val]`: "Represents an element with the att attribute whose value
    /// begins with the prefix "val"."
    PrefixMatch(String, String),
    /// `[att$=val]`: "Represents an element with the att attribute whose value
    /// ends with the suffix "val"."
    SuffixMatch(String, String),
    /// `[att*=val]`: "Represents an element with the att attribute whose value
    /// contains at least one instance of the substring "val"."
    SubstringMatch(String, String),
}

impl AttributeSelector {
    /// The attribute name this selector tests.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Exists(name)
            | Self::Equals(name, _)
            | Self::Includes(name, _)
            | Self::DashMatch(name, _)
            | Self::PrefixMatch(name, _)
            | Self::SuffixMatch(name, _)
            | Self::SubstringMatch(name, _) => name,
        }
    }
}

/// Structural and logical pseudo-classes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PseudoClass {
    /// [§ 14.1 :root](https://www.w3.org/TR/selectors-4/#the-root-pseudo)
    /// "The :root pseudo-class represents an element that is the root of the document."
    Root,

    /// [§ 14.2 :empty](https://www.w3.org/TR/selectors-4/#the-empty-pseudo)
    ///
    /// Matches only elements with no child nodes at all. Whitespace text and
    /// comments both count as children.
    Empty,

    /// [§ 14.4.3 :first-child](https://www.w3.org/TR/selectors-4/#the-first-child-pseudo)
    FirstChild,
    /// [§ 14.4.4 :last-child](https://www.w3.org/TR/selectors-4/#the-last-child-pseudo)
    LastChild,
    /// [§ 14.4.5 :only-child](https://www.w3.org/TR/selectors-4/#the-only-child-pseudo)
    OnlyChild,
    /// [§ 14.5.3 :first-of-type](https://www.w3.org/TR/selectors-4/#the-first-of-type-pseudo)
    FirstOfType,
    /// [§ 14.5.4 :last-of-type](https://www.w3.org/TR/selectors-4/#the-last-of-type-pseudo)
    LastOfType,
    /// [§ 14.5.5 :only-of-type](https://www.w3.org/TR/selectors-4/#the-only-of-type-pseudo)
    OnlyOfType,

    /// [§ 14.4.1 :nth-child()](https://www.w3.org/TR/selectors-4/#the-nth-child-pseudo)
    /// "The :nth-child(An+B) pseudo-class notation represents elements that
    /// are among An+Bth elements from the list composed of their inclusive
    /// siblings."
    NthChild(Nth),
    /// [§ 14.4.2 :nth-last-child()](https://www.w3.org/TR/selectors-4/#the-nth-last-child-pseudo)
    /// Like `:nth-child()`, counting from the last sibling.
    NthLastChild(Nth),
    /// [§ 14.5.1 :nth-of-type()](https://www.w3.org/TR/selectors-4/#the-nth-of-type-pseudo)
    /// "...the list composed of their inclusive siblings with the same type."
    NthOfType(Nth),
    /// [§ 14.5.2 :nth-last-of-type()](https://www.w3.org/TR/selectors-4/#the-nth-last-of-type-pseudo)
    NthLastOfType(Nth),

    /// [§ 4.3 :not()](https://www.w3.org/TR/selectors-4/#negation)
    /// "The negation pseudo-class, :not(), is a functional pseudo-class taking
    /// a selector list as an argument. It represents an element that is not
    /// represented by its argument."
    Not(SelectorList),
}

/// [§ 14.3 An+B microsyntax](https://www.w3.org/TR/selectors-4/#child-index)
///
/// "The An+B notation defines an integer step (A) and offset (B), and
/// represents the An+Bth elements in a list, for every positive integer or
/// zero value of n, with the first element in the list having index 1 (not 0)."
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Nth {
    /// Step.
    pub a: i32,
    /// Offset.
    pub b: i32,
}

impl Nth {
    /// `odd`, i.e. `2n+1`.
    pub const ODD: Self = Self { a: 2, b: 1 };
    /// `even`, i.e. `2n`.
    pub const EVEN: Self = Self { a: 2, b: 0 };

    /// Create a formula.
    #[must_use]
    pub const fn new(a: i32, b: i32) -> Self {
        Self { a, b }
    }

    /// Whether the 1-based `index` is `a*n + b` for some integer `n >= 0`.
    ///
    /// With `a == 0` only `index == b` matches.
    #[must_use]
    pub fn matches(self, index: usize) -> bool {
        let Ok(index) = i64::try_from(index) else {
            return false;
        };
        let a = i64::from(self.a);
        let offset = index - i64::from(self.b);
        if a == 0 {
            return offset == 0;
        }
        offset % a == 0 && offset / a >= 0
    }
}

// ===== Display =====

impl fmt::Display for SelectorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, selector) in self.selectors.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{selector}")?;
        }
        Ok(())
    }
}

impl fmt::Display for ComplexSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (combinator, compound) in self.combinators.iter().rev() {
            write!(f, "{compound}{combinator}")?;
        }
        write!(f, "{}", self.subject)
    }
}

impl fmt::Display for Combinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Descendant => " ",
            Self::Child => " > ",
            Self::NextSibling => " + ",
            Self::SubsequentSibling => " ~ ",
        })
    }
}

impl fmt::Display for CompoundSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for simple in &self.simple_selectors {
            write!(f, "{simple}")?;
        }
        Ok(())
    }
}

impl fmt::Display for SimpleSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Type(name) => write_identifier(f, name),
            Self::Universal => f.write_str("*"),
            Self::Id(id) => {
                f.write_str("#")?;
                write_identifier(f, id)
            }
            Self::Class(class) => {
                f.write_str(".")?;
                write_identifier(f, class)
            }
            Self::Attribute(attr) => write!(f, "{attr}"),
            Self::PseudoClass(pc) => write!(f, "{pc}"),
        }
    }
}

impl fmt::Display for AttributeSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (operator, value) = match self {
            Self::Exists(name) => {
                f.write_str("[")?;
                write_identifier(f, name)?;
                return f.write_str("]");
            }
            Self::Equals(_, v) => ("=", v),
            Self::Includes(_, v) => ("~=", v),
            Self::DashMatch(_, v) => ("|=", v),
            Self::PrefixMatch(_, v) => ("^=", v),
            Self::SuffixMatch(_, v) => ("$=", v),
            Self::SubstringMatch(_, v) => ("*=", v),
        };
        f.write_str("[")?;
        write_identifier(f, self.name())?;
        f.write_str(operator)?;
        f.write_str("\"")?;
        for c in value.chars() {
            match c {
                '"' | '\\' => write!(f, "\\{c}")?,
                '\n' => f.write_str("\\a ")?,
                _ => write!(f, "{c}")?,
            }
        }
        f.write_str("\"]")
    }
}

impl fmt::Display for PseudoClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Root => f.write_str(":root"),
            Self::Empty => f.write_str(":empty"),
            Self::FirstChild => f.write_str(":first-child"),
            Self::LastChild => f.write_str(":last-child"),
            Self::OnlyChild => f.write_str(":only-child"),
            Self::FirstOfType => f.write_str(":first-of-type"),
            Self::LastOfType => f.write_str(":last-of-type"),
            Self::OnlyOfType => f.write_str(":only-of-type"),
            Self::NthChild(nth) => write!(f, ":nth-child({nth})"),
            Self::NthLastChild(nth) => write!(f, ":nth-last-child({nth})"),
            Self::NthOfType(nth) => write!(f, ":nth-of-type({nth})"),
            Self::NthLastOfType(nth) => write!(f, ":nth-last-of-type({nth})"),
            Self::Not(list) => write!(f, ":not({list})"),
        }
    }
}

impl fmt::Display for Nth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.a {
            0 => return write!(f, "{}", self.b),
            1 => f.write_str("n")?,
            -1 => f.write_str("-n")?,
            a => write!(f, "{a}n")?,
        }
        match self.b {
            0 => Ok(()),
            b if b > 0 => write!(f, "+{b}"),
            b => write!(f, "{b}"),
        }
    }
}

/// [§ 2.1 Serialize an identifier](https://drafts.csswg.org/cssom/#serialize-an-identifier)
fn write_identifier(f: &mut fmt::Formatter<'_>, ident: &str) -> fmt::Result {
    for (i, c) in ident.chars().enumerate() {
        let leading_digit = c.is_ascii_digit()
            && (i == 0 || (i == 1 && ident.starts_with('-')));
        if leading_digit {
            write!(f, "\\{:x} ", u32::from(c))?;
        } else if c.is_ascii_alphanumeric() || c == '-' || c == '_' || !c.is_ascii() {
            write!(f, "{c}")?;
        } else {
            write!(f, "\\{c}")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::Nth;
    use test_case::test_case;

    #[test_case(Nth::new(0, 3), &[3] ; "exact position")]
    #[test_case(Nth::ODD, &[1, 3, 5, 7] ; "odd")]
    #[test_case(Nth::EVEN, &[2, 4, 6, 8] ; "even")]
    #[test_case(Nth::new(3, 0), &[3, 6] ; "every third")]
    #[test_case(Nth::new(1, 5), &[5, 6, 7, 8] ; "from fifth on")]
    #[test_case(Nth::new(-1, 3), &[1, 2, 3] ; "first three")]
    #[test_case(Nth::new(-2, 5), &[1, 3, 5] ; "negative step")]
    #[test_case(Nth::new(2, -1), &[1, 3, 5, 7] ; "negative offset")]
    #[test_case(Nth::new(0, -1), &[] ; "never")]
    fn test_nth_matches(nth: Nth, expected: &[usize]) {
        let matched: Vec<usize> = (1..=8).filter(|&i| nth.matches(i)).collect();
        assert_eq!(matched, expected);
    }

    #[test_case(Nth::ODD, "2n+1")]
    #[test_case(Nth::EVEN, "2n")]
    #[test_case(Nth::new(0, 4), "4")]
    #[test_case(Nth::new(-1, 3), "-n+3")]
    #[test_case(Nth::new(1, -2), "n-2")]
    fn test_nth_display(nth: Nth, expected: &str) {
        assert_eq!(nth.to_string(), expected);
    }
}
