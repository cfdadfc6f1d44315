//! Generic tree conversion and serialize/re-parse round trips.

use test_case::test_case;
use trawl::{GenericTreeNode, parse_html, to_generic_tree};
use trawl::dom::GenericAttribute;

fn element<'a>(node: &'a GenericTreeNode, path: &[usize]) -> &'a GenericTreeNode {
    path.iter().fold(node, |node, &i| &node.children()[i])
}

fn attributes(node: &GenericTreeNode) -> Vec<(String, String)> {
    match node {
        GenericTreeNode::Element { attributes, .. } => attributes
            .iter()
            .map(|GenericAttribute { name, value }| (name.clone(), value.clone()))
            .collect(),
        _ => panic!("not an element: {node:?}"),
    }
}

#[test]
fn test_generic_tree_keeps_attribute_order_and_case() {
    let doc = parse_html("<div Zeta=1 alpha='two' data-x=\"&amp;\" Zeta=dup>x</div>");
    let tree = to_generic_tree(&doc);
    // document > html > body > div
    let div = element(&tree, &[0, 1, 0]);
    assert_eq!(div.name(), Some("div"));
    assert_eq!(
        attributes(div),
        [
            ("Zeta".to_string(), "1".to_string()),
            ("alpha".to_string(), "two".to_string()),
            ("data-x".to_string(), "&".to_string()),
        ]
    );
}

#[test]
fn test_generic_tree_child_order_and_leaves() {
    let doc = parse_html("<!DOCTYPE html><!--top--><p>a<!--c-->b<br>c</p>");
    let tree = to_generic_tree(&doc);

    let top: Vec<&str> = tree
        .children()
        .iter()
        .map(|node| match node {
            GenericTreeNode::Declaration { .. } => "declaration",
            GenericTreeNode::Comment { .. } => "comment",
            GenericTreeNode::Element { .. } => "element",
            _ => "other",
        })
        .collect();
    assert_eq!(top, ["declaration", "comment", "element"]);

    let p = element(&tree, &[2, 1, 0]);
    assert_eq!(
        p.children(),
        [
            GenericTreeNode::Text { content: "a".to_string() },
            GenericTreeNode::Comment { content: "c".to_string() },
            GenericTreeNode::Text { content: "b".to_string() },
            GenericTreeNode::Element {
                name: "br".to_string(),
                attributes: Vec::new(),
                children: Vec::new(),
            },
            GenericTreeNode::Text { content: "c".to_string() },
        ]
    );
}

#[test]
fn test_generic_tree_json() {
    let doc = parse_html("<!DOCTYPE html><title>T</title>");
    let json = serde_json::to_value(to_generic_tree(&doc)).unwrap();
    assert_eq!(json["kind"], "document");
    assert_eq!(json["children"][0]["kind"], "declaration");
    assert_eq!(json["children"][0]["name"], "html");
    let title = &json["children"][1]["children"][0]["children"][0];
    assert_eq!(title["name"], "title");
    assert_eq!(title["children"][0]["content"], "T");
}

#[test_case("<!DOCTYPE html><html><head><title>x &amp; y</title></head><body><p class=\"a b\">hi</p></body></html>" ; "simple page")]
#[test_case("<ul><li>one<li>two</ul><p>para<p>graph" ; "implied end tags")]
#[test_case("<table><tr><td>1<td>2</table>" ; "implied tbody")]
#[test_case("<script>if (a < b && c > d) {}</script><style>p > a {}</style>" ; "raw text")]
#[test_case("<pre>\n\nleading newline</pre><textarea>\nt</textarea>" ; "pre newline")]
#[test_case("<p title='say \"hi\"'>&lt;tag&gt; &nbsp;</p>" ; "escaping")]
#[test_case("<DIV CLASS=Upper><SPAN>x</SPAN></DIV>" ; "source case")]
#[test_case("<!--c1--><p>a<!--c2--></p><!--c3-->" ; "comments")]
#[test_case("<img src=a.png alt=''><br><input disabled>" ; "void elements")]
#[test_case("<!DOCTYPE html PUBLIC \"-//W3C//DTD XHTML 1.0 Strict//EN\" \"http://www.w3.org/TR/xhtml1/DTD/xhtml1-strict.dtd\"><p>x" ; "doctype public and system")]
#[test_case("<!DOCTYPE html SYSTEM \"about:legacy-compat\"><p>x" ; "doctype system only")]
#[test_case("<script>a</b>&amp;</script><style>a[href$='&'] {}</style>" ; "raw text holding end tag and ampersand")]
#[test_case("<textarea>&lt;/textarea&gt; &amp;</textarea><title>&lt;/x&gt;</title>" ; "escapable raw text")]
#[test_case("<p title='say \"hi\"' data-q=\"it's\" lang=\"a&quot;b'c\">q</p>" ; "attribute quotes")]
fn test_reparse_is_structurally_equivalent(html: &str) {
    let first = parse_html(html);
    let serialized = first.to_html();
    let second = parse_html(&serialized);
    assert_eq!(
        to_generic_tree(&first),
        to_generic_tree(&second),
        "{html} serialized as {serialized}"
    );
    assert_eq!(second.to_html(), serialized);
}

#[test]
fn test_doctype_identifiers_survive_serialization() {
    let html = "<!DOCTYPE html PUBLIC \"-//W3C//DTD HTML 4.01//EN\" \"http://www.w3.org/TR/html4/strict.dtd\">";
    let doc = parse_html(html);
    assert!(doc.to_html().starts_with(html), "{}", doc.to_html());
    assert_eq!(
        to_generic_tree(&doc).children()[0],
        GenericTreeNode::Declaration {
            name: "html".to_string(),
            public_id: "-//W3C//DTD HTML 4.01//EN".to_string(),
            system_id: "http://www.w3.org/TR/html4/strict.dtd".to_string(),
        }
    );

    let system_only = parse_html("<!DOCTYPE html SYSTEM 'about:legacy-compat'>");
    assert!(
        system_only
            .to_html()
            .starts_with("<!DOCTYPE html SYSTEM \"about:legacy-compat\">")
    );
}

#[test]
fn test_reparse_of_moderately_nested_markup() {
    let html = format!("{}<b>x</b>", "<div><span>".repeat(250));
    let first = parse_html(&html);
    let serialized = first.to_html();
    let second = parse_html(&serialized);
    assert!(to_generic_tree(&first) == to_generic_tree(&second));
    assert_eq!(second.to_html(), serialized);
}

/// Deep enough that recursing once per level would exhaust a test
/// thread's stack.
const DEEP: usize = 100_000;

#[test]
fn test_deeply_nested_document_converts_serializes_and_drops() {
    let html = format!("{}<p>x", "<div>".repeat(DEEP));
    let doc = parse_html(&html);

    let tree = to_generic_tree(&doc);
    let mut divs = 0;
    let mut node = &tree;
    while let Some(last) = node.children().last() {
        if last.name() == Some("div") {
            divs += 1;
        }
        node = last;
    }
    assert_eq!(divs, DEEP);
    assert_eq!(node, &GenericTreeNode::Text { content: "x".to_string() });

    let serialized = doc.to_html();
    assert_eq!(serialized.matches("</div>").count(), DEEP);
    assert!(serialized.ends_with("<p>x</p></div></div></body></html>"));

    let body = doc.find(doc.root(), "body").unwrap().unwrap();
    let outer = doc.outer_html(body).unwrap();
    assert_eq!(outer.matches("<div>").count(), DEEP);

    let reparsed = to_generic_tree(&parse_html(&serialized));
    assert!(reparsed == tree);
    drop(tree);
    drop(reparsed);
}

#[test]
fn test_to_html_of_fragment() {
    let doc = parse_html("<div id=d><b>bold</b> &amp; <i>it</i></div>");
    let div = doc.find(doc.root(), "#d").unwrap().unwrap();
    assert_eq!(
        doc.outer_html(div).unwrap(),
        "<div id=\"d\"><b>bold</b> &amp; <i>it</i></div>"
    );
    assert_eq!(doc.inner_html(div).unwrap(), "<b>bold</b> &amp; <i>it</i>");
    assert_eq!(doc.text(div).unwrap(), "bold & it");
}
