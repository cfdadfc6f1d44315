//! Elements whose end tags may be omitted.
//!
//! [§ 13.1.2.4 Optional tags](https://html.spec.whatwg.org/multipage/syntax.html#optional-tags)
//!
//! "A p element's end tag may be omitted if the p element is immediately
//! followed by an address, article, aside, ... element". The tree builder
//! spreads these rules over many insertion-mode entries; here they are one
//! table keyed by the element that gets closed.

/// How far up the stack of open elements an auto-close may look.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reach {
    /// Only the current node.
    CurrentNode,
    /// Up to the nearest special element other than `address`, `div` and `p`.
    ListItem,
    /// "has a p element in button scope"
    Button,
    /// Up to the enclosing `ruby`, or a default-scope boundary.
    Ruby,
}

/// One row of [`AUTO_CLOSED_BY`].
#[derive(Debug)]
pub struct AutoClose {
    /// The element that is implicitly closed.
    pub element: &'static str,
    /// Start tags that close it.
    pub closed_by: &'static [&'static str],
    /// Where the search for an open `element` stops.
    pub reach: Reach,
}

const PARAGRAPH_CLOSERS: &[&str] = &[
    "address",
    "article",
    "aside",
    "blockquote",
    "center",
    "details",
    "dialog",
    "dir",
    "div",
    "dl",
    "fieldset",
    "figcaption",
    "figure",
    "footer",
    "form",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "header",
    "hgroup",
    "hr",
    "li",
    "dd",
    "dt",
    "listing",
    "main",
    "menu",
    "nav",
    "ol",
    "p",
    "plaintext",
    "pre",
    "search",
    "section",
    "summary",
    "table",
    "ul",
    "xmp",
];

const RUBY_CLOSERS: &[&str] = &["rb", "rp", "rt", "rtc"];

/// Element name to the start tags that auto-close it.
///
/// Rows are applied in order, so `option` is closed before `optgroup`, and
/// `li`/`dd`/`dt` before the enclosing `p`.
pub static AUTO_CLOSED_BY: &[AutoClose] = &[
    AutoClose {
        element: "option",
        closed_by: &["option", "optgroup", "hr"],
        reach: Reach::CurrentNode,
    },
    AutoClose {
        element: "optgroup",
        closed_by: &["optgroup"],
        reach: Reach::CurrentNode,
    },
    AutoClose {
        element: "li",
        closed_by: &["li"],
        reach: Reach::ListItem,
    },
    AutoClose {
        element: "dd",
        closed_by: &["dd", "dt"],
        reach: Reach::ListItem,
    },
    AutoClose {
        element: "dt",
        closed_by: &["dd", "dt"],
        reach: Reach::ListItem,
    },
    AutoClose {
        element: "rb",
        closed_by: RUBY_CLOSERS,
        reach: Reach::Ruby,
    },
    AutoClose {
        element: "rp",
        closed_by: RUBY_CLOSERS,
        reach: Reach::Ruby,
    },
    AutoClose {
        element: "rt",
        closed_by: RUBY_CLOSERS,
        reach: Reach::Ruby,
    },
    AutoClose {
        element: "rtc",
        closed_by: &["rb", "rtc"],
        reach: Reach::Ruby,
    },
    AutoClose {
        element: "p",
        closed_by: PARAGRAPH_CLOSERS,
        reach: Reach::Button,
    },
];

/// [§ 13.2.6.3 Closing elements that have implied end tags](https://html.spec.whatwg.org/multipage/parsing.html#generate-implied-end-tags)
///
/// The element types popped by "generate implied end tags": the keys of
/// [`AUTO_CLOSED_BY`].
#[must_use]
pub fn has_implied_end_tag(name: &str) -> bool {
    AUTO_CLOSED_BY.iter().any(|row| row.element == name)
}

/// Rows whose element is closed by a `start_tag` start tag, in application order.
pub fn rows_closed_by(start_tag: &str) -> impl Iterator<Item = &'static AutoClose> + '_ {
    AUTO_CLOSED_BY
        .iter()
        .filter(move |row| row.closed_by.contains(&start_tag))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("p", true)]
    #[test_case("li", true)]
    #[test_case("rtc", true)]
    #[test_case("optgroup", true)]
    #[test_case("div", false)]
    #[test_case("tr", false)]
    fn test_implied_end_tag_set(name: &str, expected: bool) {
        assert_eq!(has_implied_end_tag(name), expected);
    }

    #[test]
    fn test_li_closes_li_before_p() {
        let rows: Vec<_> = rows_closed_by("li").map(|row| row.element).collect();
        assert_eq!(rows, ["li", "p"]);
    }

    #[test]
    fn test_optgroup_closes_option_then_optgroup() {
        let rows: Vec<_> = rows_closed_by("optgroup").map(|row| row.element).collect();
        assert_eq!(rows, ["option", "optgroup"]);
    }

    #[test]
    fn test_inline_elements_close_nothing() {
        assert_eq!(rows_closed_by("span").count(), 0);
        assert_eq!(rows_closed_by("b").count(), 0);
    }

    #[test]
    fn test_rt_does_not_close_rtc() {
        assert!(rows_closed_by("rt").all(|row| row.element != "rtc"));
    }
}
