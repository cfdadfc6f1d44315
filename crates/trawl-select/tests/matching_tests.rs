//! Integration tests for selector matching against parsed documents.

use test_case::test_case;
use trawl_dom::{DomTree, NodeId};
use trawl_html::tokenizer::tokenize;
use trawl_html::{HTMLParser, ParserOptions};
use trawl_select::{matches, parse, select, select_first};

fn parse_html(html: &str) -> DomTree {
    HTMLParser::new(ParserOptions::default()).run(tokenize(html))
}

/// Run `selector` over the whole document and describe each hit as
/// `tag#id` (or just `tag`).
fn select_ids(html: &str, selector: &str) -> Vec<String> {
    let tree = parse_html(html);
    let list = parse(selector).unwrap();
    select(&tree, tree.root(), &list)
        .map(|id| describe(&tree, id))
        .collect()
}

fn describe(tree: &DomTree, id: NodeId) -> String {
    let element = tree.as_element(id).unwrap();
    match element.id() {
        Some(el_id) => format!("{}#{el_id}", element.local_name()),
        None => element.local_name().to_string(),
    }
}

fn by_id(tree: &DomTree, wanted: &str) -> NodeId {
    tree.descendants(tree.root())
        .find(|&id| tree.as_element(id).and_then(|e| e.id()) == Some(wanted))
        .unwrap()
}

const LIST: &str = "<ul id=u>\
    <li id=a class='x y'>1</li>\
    <li id=b>2</li>\
    <li id=c class=x>3</li>\
    <li id=d>4</li>\
    <li id=e>5</li>\
    </ul>";

// =============================================================================
// Simple selectors
// =============================================================================

#[test]
fn test_type_selector_ignores_case() {
    assert_eq!(select_ids("<P id=p1>a</P><p id=p2>b", "p"), ["p#p1", "p#p2"]);
    assert_eq!(select_ids("<p id=p1>a", "P"), ["p#p1"]);
}

#[test]
fn test_class_and_id_are_case_sensitive() {
    let html = "<div id=Main class=Box></div>";
    assert_eq!(select_ids(html, ".Box"), ["div#Main"]);
    assert!(select_ids(html, ".box").is_empty());
    assert_eq!(select_ids(html, "#Main"), ["div#Main"]);
    assert!(select_ids(html, "#main").is_empty());
}

#[test]
fn test_class_split_on_whitespace() {
    assert_eq!(select_ids(LIST, ".x"), ["li#a", "li#c"]);
    assert_eq!(select_ids(LIST, ".x.y"), ["li#a"]);
}

#[test]
fn test_universal_selects_every_element_in_document_order() {
    assert_eq!(
        select_ids("<p id=a><b id=b></b></p><i id=c>", "*"),
        ["html", "head", "body", "p#a", "b#b", "i#c"]
    );
}

// =============================================================================
// Attribute selectors
// =============================================================================

#[test_case("[lang]", &["p#a", "p#b", "p#c", "p#d"] ; "exists")]
#[test_case("[LANG]", &["p#a", "p#b", "p#c", "p#d"] ; "name ignores case")]
#[test_case("[lang=en]", &["p#a"] ; "equals")]
#[test_case("[lang=EN]", &["p#a"] ; "value ignores case")]
#[test_case("[lang|=en]", &["p#a", "p#b"] ; "dash match")]
#[test_case("[lang|=fake]", &[] ; "dash match none")]
#[test_case("[lang^=en]", &["p#a", "p#b", "p#c"] ; "prefix")]
#[test_case("[lang$=us]", &["p#b"] ; "suffix")]
#[test_case("[lang*=n-U]", &["p#b"] ; "substring")]
#[test_case("[lang~=fr]", &["p#d"] ; "includes word")]
#[test_case("[lang^='']", &[] ; "empty prefix never matches")]
fn test_attribute_operators(selector: &str, expected: &[&str]) {
    let html = "<p id=a lang=en></p>\
        <p id=b lang=en-US></p>\
        <p id=c lang=english></p>\
        <p id=d lang='de fr'></p>\
        <p id=e></p>";
    assert_eq!(select_ids(html, selector), expected);
}

// =============================================================================
// Combinators
// =============================================================================

#[test]
fn test_descendant_backtracks_over_ancestors() {
    // The nearest `div` is not a child of `body`, but an outer one is.
    let html = "<div id=o><section><div id=i><b id=t></b></div></section></div>";
    let tree = parse_html(html);
    let list = parse("body > div b").unwrap();
    assert!(matches(&tree, by_id(&tree, "t"), &list));
    assert!(!matches(&tree, by_id(&tree, "t"), &parse("section > div > section b").unwrap()));
}

#[test]
fn test_child_combinator() {
    let html = "<div id=d><p id=p1><span id=s1></span></p><span id=s2></span></div>";
    assert_eq!(select_ids(html, "div > span"), ["span#s2"]);
    assert_eq!(select_ids(html, "div span"), ["span#s1", "span#s2"]);
}

#[test]
fn test_next_sibling_skips_text_and_comments() {
    let html = "<h1 id=h>t</h1> text <!-- c --><p id=info>x</p><p id=next>y</p>";
    assert_eq!(select_ids(html, "h1 + p"), ["p#info"]);
    assert!(select_ids(html, "body + h1").is_empty());
}

#[test]
fn test_subsequent_sibling_backtracks() {
    let html = "<i class=k></i><b></b><i id=m></i><p id=p1></p><p id=p2></p>";
    assert_eq!(select_ids(html, ".k ~ p"), ["p#p1", "p#p2"]);
    assert_eq!(select_ids(html, "i.k ~ i ~ p"), ["p#p1", "p#p2"]);
    assert_eq!(select_ids(html, "p ~ i"), Vec::<String>::new());
}

#[test]
fn test_long_descendant_chain_on_deep_tree_fails_fast() {
    // No `p` ancestor exists, so every way of placing the divs is tried
    // before giving up unless earlier outcomes are reused.
    let html = format!("{}<span id=s></span>", "<div>".repeat(300));
    let tree = parse_html(&html);
    let span = by_id(&tree, "s");
    let missing = parse("p div div div div div div div div span").unwrap();
    assert!(!matches(&tree, span, &missing));
    assert!(select(&tree, tree.root(), &missing).next().is_none());

    let present = parse("body div div div div div div div div span").unwrap();
    assert!(matches(&tree, span, &present));
}

#[test]
fn test_long_subsequent_sibling_chain_fails_fast() {
    let html = format!("{}<b id=last></b>", "<i></i>".repeat(300));
    let tree = parse_html(&html);
    let last = by_id(&tree, "last");
    assert!(!matches(&tree, last, &parse("p ~ i ~ i ~ i ~ i ~ i ~ i ~ i ~ b").unwrap()));
    assert!(matches(&tree, last, &parse("i ~ i ~ i ~ i ~ i ~ i ~ i ~ b").unwrap()));
}

#[test]
fn test_selector_list_is_union_in_document_order() {
    assert_eq!(select_ids(LIST, "#d, #b, li#b"), ["li#b", "li#d"]);
}

// =============================================================================
// Pseudo-classes
// =============================================================================

#[test_case("li:first-child", &["li#a"])]
#[test_case("li:last-child", &["li#e"])]
#[test_case("li:nth-child(2)", &["li#b"])]
#[test_case("li:nth-child(odd)", &["li#a", "li#c", "li#e"])]
#[test_case("li:nth-child(even)", &["li#b", "li#d"])]
#[test_case("li:nth-child(-n+2)", &["li#a", "li#b"])]
#[test_case("li:nth-child(n+4)", &["li#d", "li#e"])]
#[test_case("li:nth-last-child(1)", &["li#e"])]
#[test_case("li:nth-last-child(2n)", &["li#b", "li#d"])]
#[test_case("li:not(.x)", &["li#b", "li#d", "li#e"])]
#[test_case("li:not(#a, :last-child)", &["li#b", "li#c", "li#d"])]
#[test_case("ul:only-child", &["ul#u"])]
#[test_case("li:only-child", &[])]
fn test_structural_pseudo_classes(selector: &str, expected: &[&str]) {
    assert_eq!(select_ids(LIST, selector), expected);
}

#[test]
fn test_of_type_counts_per_tag_name() {
    let html = "<div>\
        <h2 id=h1></h2>\
        <p id=p1></p>\
        <span id=s1></span>\
        <p id=p2></p>\
        <p id=p3></p>\
        </div>";
    assert_eq!(select_ids(html, "p:nth-of-type(2)"), ["p#p2"]);
    assert_eq!(select_ids(html, "p:last-of-type"), ["p#p3"]);
    assert_eq!(select_ids(html, "p:first-of-type"), ["p#p1"]);
    assert_eq!(select_ids(html, "p:nth-last-of-type(2)"), ["p#p2"]);
    assert_eq!(
        select_ids(html, "div > :only-of-type"),
        ["h2#h1", "span#s1"]
    );
}

#[test]
fn test_empty_counts_whitespace_and_comments() {
    let html = "<p id=a></p><p id=b> </p><p id=c><!--x--></p><link id=l hreflang=en-us>";
    assert_eq!(select_ids(html, ":empty:not(head)"), ["p#a", "link#l"]);
    assert_eq!(select_ids(html, "link:empty"), ["link#l"]);
}

#[test]
fn test_root_is_document_element() {
    assert_eq!(select_ids("<p>x", ":root"), ["html"]);
    assert!(select_ids("<p>x", "body:root").is_empty());
}

// =============================================================================
// Scope and entry points
// =============================================================================

#[test]
fn test_scope_excludes_itself_but_combinators_see_outside() {
    let tree = parse_html(LIST);
    let ul = by_id(&tree, "u");

    let all = parse("*").unwrap();
    assert_eq!(select(&tree, ul, &all).count(), 5);
    assert!(select(&tree, ul, &parse("ul").unwrap()).next().is_none());

    let outside = parse("body li:first-child").unwrap();
    assert_eq!(select_first(&tree, ul, &outside), Some(by_id(&tree, "a")));
}

#[test]
fn test_select_first_matches_first_of_select() {
    let tree = parse_html(LIST);
    let list = parse("li.x").unwrap();
    assert_eq!(select_first(&tree, tree.root(), &list), Some(by_id(&tree, "a")));
    assert_eq!(
        select(&tree, tree.root(), &list).collect::<Vec<_>>(),
        [by_id(&tree, "a"), by_id(&tree, "c")]
    );
}

#[test]
fn test_non_elements_never_match() {
    let tree = parse_html("<p>text</p>");
    let p = tree
        .descendants(tree.root())
        .find(|&id| tree.as_element(id).is_some_and(|e| e.is("p")))
        .unwrap();
    let text = tree.first_child(p).unwrap();
    assert!(!matches(&tree, text, &parse("*").unwrap()));
    assert!(!matches(&tree, tree.root(), &parse(":not(p)").unwrap()));
    assert!(parse("p").unwrap().matches(&tree, p));
}

#[test]
fn test_matches_is_lazy() {
    let tree = parse_html(LIST);
    let list = parse("li").unwrap();
    let mut hits = select(&tree, tree.root(), &list);
    assert_eq!(hits.next(), Some(by_id(&tree, "a")));
    assert_eq!(hits.next(), Some(by_id(&tree, "b")));
    assert_eq!(hits.count(), 3);
}
