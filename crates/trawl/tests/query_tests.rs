//! End-to-end tests: parse a document, then query it.

use test_case::test_case;
use trawl::{Document, Error, Issue, NodeId, ParseOptions, Selector, find, find_all, parse_html};
use trawl::select::SelectorErrorKind;

const PAGE: &str = "<!DOCTYPE html>\
<html>\
<head><title>Test</title><link rel=alternate hreflang=en-us href=/en></head>\
<body>\
<p>It will be used in tests.</p>\
<h1>Heading</h1><p id=info>Info</p>\
<div><p>Nested one</p><p>Nested two</p><p>Nested three</p></div>\
</body>\
</html>";

fn tag(doc: &Document, id: NodeId) -> String {
    doc.tree().as_element(id).unwrap().local_name().to_string()
}

#[test]
fn test_misnested_paragraphs() {
    let doc = parse_html("<html><p><b></p><p></p>");
    let paragraphs = find_all(&doc, doc.root(), "p").unwrap();
    assert_eq!(paragraphs.len(), 2);

    let tree = doc.tree();
    let first_child = tree.first_child(paragraphs[0]).unwrap();
    assert!(tree.as_element(first_child).unwrap().is("b"));
    assert!(tree.children(paragraphs[1]).is_empty());
}

#[test]
fn test_find_matches_case_insensitively() {
    let doc = parse_html(PAGE);
    let by_lower = find(&doc, doc.root(), "title").unwrap();
    let by_upper = find(&doc, doc.root(), "TITLE").unwrap();
    assert!(by_lower.is_some());
    assert_eq!(by_lower, by_upper);
}

#[test]
fn test_find_all_count_matches_manual_count() {
    let doc = parse_html(PAGE);
    let tree = doc.tree();
    let manual = tree
        .descendants(doc.root())
        .filter(|&id| tree.as_element(id).is_some_and(|e| e.is("p")))
        .count();
    assert_eq!(manual, 5);
    assert_eq!(find_all(&doc, doc.root(), "P").unwrap().len(), manual);
}

#[test]
fn test_child_combinator_from_body() {
    let doc = parse_html(PAGE);
    let p = find(&doc, doc.root(), "body > p").unwrap().unwrap();
    assert_eq!(doc.text(p).unwrap(), "It will be used in tests.");
    assert_eq!(find(&doc, doc.root(), "html > p").unwrap(), None);
}

#[test]
fn test_adjacent_sibling() {
    let doc = parse_html(PAGE);
    let p = find(&doc, doc.root(), "h1 + p").unwrap().unwrap();
    assert_eq!(doc.tree().as_element(p).unwrap().id(), Some("info"));
    assert_eq!(find(&doc, doc.root(), "body + h1").unwrap(), None);
}

#[test_case("link:empty", true)]
#[test_case("[hreflang|=en]", true)]
#[test_case("[hreflang|=fake]", false)]
#[test_case("link[rel=ALTERNATE]", true ; "attribute value ignores case")]
fn test_link_queries(selector: &str, found: bool) {
    let doc = parse_html(PAGE);
    let hit = find(&doc, doc.root(), selector).unwrap();
    assert_eq!(hit.is_some(), found);
    if let Some(id) = hit {
        assert_eq!(tag(&doc, id), "link");
    }
}

#[test]
fn test_of_type_is_scoped_per_parent_and_tag() {
    let doc = parse_html(PAGE);
    let second = find(&doc, doc.root(), "p:nth-of-type(2)").unwrap().unwrap();
    assert_eq!(doc.tree().as_element(second).unwrap().id(), Some("info"));

    let last = find_all(&doc, doc.root(), "p:last-of-type").unwrap();
    let texts: Vec<String> = last.iter().map(|&id| doc.text(id).unwrap()).collect();
    assert_eq!(texts, ["Info", "Nested three"]);

    let nested = find(&doc, doc.root(), "div p:nth-of-type(2)").unwrap().unwrap();
    assert_eq!(doc.text(nested).unwrap(), "Nested two");
}

#[test]
fn test_find_under_subtree() {
    let doc = parse_html(PAGE);
    let div = find(&doc, doc.root(), "div").unwrap().unwrap();
    let inside = find_all(&doc, div, "p").unwrap();
    assert_eq!(inside.len(), 3);
    assert_eq!(find(&doc, div, "div").unwrap(), None);
    assert_eq!(doc.xpath(inside[2]).unwrap(), "/html[1]/body[1]/div[1]/p[3]");
}

#[test]
fn test_invalid_selector_is_an_error() {
    let doc = parse_html(PAGE);
    let err = find(&doc, doc.root(), "p:nth-child(x)").unwrap_err();
    let Error::Selector(syntax) = err else {
        panic!("expected a selector error");
    };
    assert_eq!(
        syntax.kind,
        SelectorErrorKind::InvalidPseudoArgument("nth-child".to_string())
    );
    assert_eq!(syntax.position, 12);
}

#[test]
fn test_unknown_node_is_an_error() {
    let doc = parse_html("<p>");
    let missing = NodeId(10_000);
    assert_eq!(find(&doc, missing, "p"), Err(Error::UnknownNode(missing)));
    assert_eq!(doc.text(missing), Err(Error::UnknownNode(missing)));
    assert!(doc.outer_html(missing).is_err());
}

#[test]
fn test_preparsed_selector() {
    let doc = parse_html(PAGE);
    let selector: Selector = "div > p:not(:first-child)".parse().unwrap();
    let texts: Vec<String> = doc
        .select(doc.root(), &selector)
        .unwrap()
        .map(|id| doc.text(id).unwrap())
        .collect();
    assert_eq!(texts, ["Nested two", "Nested three"]);

    let info = find(&doc, doc.root(), "#info").unwrap().unwrap();
    assert!(doc.matches(info, &"p".parse().unwrap()).unwrap());
}

#[test]
fn test_issues_are_recorded_not_raised() {
    let doc = parse_html("<p>a &notanentity; <div></span>");
    assert!(!doc.issues().is_empty());
    assert!(
        doc.issues()
            .iter()
            .any(|issue| matches!(issue, Issue::TreeBuilder(_)))
    );
    let tokenizer_issue = doc
        .issues()
        .iter()
        .find(|issue| issue.position().is_some())
        .unwrap();
    assert_eq!(tokenizer_issue.position().unwrap().line, 1);
}

#[test]
fn test_well_formed_document_has_no_issues() {
    let doc = parse_html("<!DOCTYPE html><html><head></head><body><p>x</p></body></html>");
    assert_eq!(doc.issues(), &[] as &[Issue]);
}

#[test]
fn test_scripting_option_changes_noscript() {
    let html = "<body><noscript><p>off</p></noscript>";
    let off = parse_html(html);
    assert!(find(&off, off.root(), "noscript > p").unwrap().is_some());

    let on = Document::parse_with_options(html, &ParseOptions::default().with_scripting(true));
    assert_eq!(find(&on, on.root(), "noscript > p").unwrap(), None);
    let noscript = find(&on, on.root(), "noscript").unwrap().unwrap();
    assert_eq!(on.text(noscript).unwrap(), "<p>off</p>");
}

#[test]
fn test_document_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Document>();

    let doc = parse_html(PAGE);
    let counts: Vec<usize> = std::thread::scope(|scope| {
        let handles: Vec<_> = ["p", "div p", "head *"]
            .into_iter()
            .map(|selector| {
                let doc = &doc;
                scope.spawn(move || find_all(doc, doc.root(), selector).unwrap().len())
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert_eq!(counts, [5, 3, 2]);
}
