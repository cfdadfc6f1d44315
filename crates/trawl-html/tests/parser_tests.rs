//! Integration tests for the HTML parser.

use trawl_dom::{DomTree, NodeId, NodeType};
use trawl_html::tokenizer::{TokenizerOptions, tokenize};
use trawl_html::{HTMLParser, HTMLTokenizer, ParserOptions, Token, tree_dump};

/// Helper to parse HTML and return the DOM tree
fn parse(html: &str) -> DomTree {
    HTMLParser::new(ParserOptions::default()).run(tokenize(html))
}

/// Helper to parse HTML and render it in html5lib format
fn dump(html: &str) -> String {
    tree_dump(&parse(html))
}

/// Helper to get element by local name (first match, depth-first)
fn find_element(tree: &DomTree, tag: &str) -> Option<NodeId> {
    tree.descendants(NodeId::ROOT)
        .find(|&id| tree.as_element(id).is_some_and(|data| data.is(tag)))
}

#[test]
fn test_document_structure() {
    assert_eq!(
        dump("<!DOCTYPE html><p>Hi"),
        "\
| <!DOCTYPE html>
| <html>
|   <head>
|   <body>
|     <p>
|       \"Hi\"
"
    );
}

#[test]
fn test_empty_input_still_builds_skeleton() {
    assert_eq!(
        dump(""),
        "\
| <html>
|   <head>
|   <body>
"
    );
}

#[test]
fn test_head_content_goes_to_head() {
    assert_eq!(
        dump("<title>T</title><meta charset=utf-8><p>x"),
        "\
| <html>
|   <head>
|     <title>
|       \"T\"
|     <meta>
|       charset=\"utf-8\"
|   <body>
|     <p>
|       \"x\"
"
    );
}

#[test]
fn test_paragraphs_close_each_other() {
    assert_eq!(
        dump("<p>One<p>Two"),
        "\
| <html>
|   <head>
|   <body>
|     <p>
|       \"One\"
|     <p>
|       \"Two\"
"
    );
}

#[test]
fn test_block_start_tag_closes_paragraph() {
    let tree = parse("<p>a<div>b</div>");
    let body = tree.body().expect("body");
    let names: Vec<_> = tree
        .element_children(body)
        .filter_map(|id| tree.as_element(id).map(|data| data.local_name().to_string()))
        .collect();
    assert_eq!(names, ["p", "div"]);
}

#[test]
fn test_list_items_auto_close() {
    assert_eq!(
        dump("<ul><li>a<li>b</ul>"),
        "\
| <html>
|   <head>
|   <body>
|     <ul>
|       <li>
|         \"a\"
|       <li>
|         \"b\"
"
    );
}

#[test]
fn test_definition_list_items_auto_close() {
    assert_eq!(
        dump("<dl><dt>a<dd>b<dt>c</dl>"),
        "\
| <html>
|   <head>
|   <body>
|     <dl>
|       <dt>
|         \"a\"
|       <dd>
|         \"b\"
|       <dt>
|         \"c\"
"
    );
}

#[test]
fn test_ruby_annotations_auto_close() {
    assert_eq!(
        dump("<ruby>a<rb>b<rt>c</ruby>"),
        "\
| <html>
|   <head>
|   <body>
|     <ruby>
|       \"a\"
|       <rb>
|         \"b\"
|       <rt>
|         \"c\"
"
    );
}

#[test]
fn test_options_auto_close() {
    assert_eq!(
        dump("<select><option>a<optgroup><option>b</select>"),
        "\
| <html>
|   <head>
|   <body>
|     <select>
|       <option>
|         \"a\"
|       <optgroup>
|         <option>
|           \"b\"
"
    );
}

#[test]
fn test_end_tag_closes_intervening_elements() {
    assert_eq!(
        dump("<div><span>x</div>y"),
        "\
| <html>
|   <head>
|   <body>
|     <div>
|       <span>
|         \"x\"
|     \"y\"
"
    );
}

#[test]
fn test_stray_end_tag_cannot_cross_special_element() {
    assert_eq!(
        dump("<div>a</span>b</div>"),
        "\
| <html>
|   <head>
|   <body>
|     <div>
|       \"ab\"
"
    );
}

#[test]
fn test_misnested_formatting_end_tag_stops_at_block() {
    assert_eq!(
        dump("<b><p>x</b>y</p>"),
        "\
| <html>
|   <head>
|   <body>
|     <b>
|       <p>
|         \"xy\"
"
    );
}

#[test]
fn test_unmatched_paragraph_end_tag_inserts_empty_paragraph() {
    assert_eq!(
        dump("</p>"),
        "\
| <html>
|   <head>
|   <body>
|     <p>
"
    );
}

#[test]
fn test_br_end_tag_becomes_br() {
    assert_eq!(
        dump("a</br>b"),
        "\
| <html>
|   <head>
|   <body>
|     \"a\"
|     <br>
|     \"b\"
"
    );
}

#[test]
fn test_headings_do_not_nest() {
    assert_eq!(
        dump("<h1>a<h2>b"),
        "\
| <html>
|   <head>
|   <body>
|     <h1>
|       \"a\"
|     <h2>
|       \"b\"
"
    );
}

#[test]
fn test_nested_anchor_closes_outer_anchor() {
    assert_eq!(
        dump("<a href=1>x<a href=2>y"),
        "\
| <html>
|   <head>
|   <body>
|     <a>
|       href=\"1\"
|       \"x\"
|     <a>
|       href=\"2\"
|       \"y\"
"
    );
}

#[test]
fn test_void_elements_are_not_pushed() {
    assert_eq!(
        dump("<img src=a.png>text<input>"),
        "\
| <html>
|   <head>
|   <body>
|     <img>
|       src=\"a.png\"
|     \"text\"
|     <input>
"
    );
}

#[test]
fn test_self_closing_flag_ignored_on_html_elements() {
    assert_eq!(
        dump("<div/>x"),
        "\
| <html>
|   <head>
|   <body>
|     <div>
|       \"x\"
"
    );
}

#[test]
fn test_self_closing_honored_inside_svg() {
    assert_eq!(
        dump("<svg><path/><circle/></svg>"),
        "\
| <html>
|   <head>
|   <body>
|     <svg>
|       <path>
|       <circle>
"
    );
}

#[test]
fn test_leading_newline_dropped_after_pre() {
    assert_eq!(
        dump("<pre>\nfoo</pre><textarea>\nbar</textarea>"),
        "\
| <html>
|   <head>
|   <body>
|     <pre>
|       \"foo\"
|     <textarea>
|       \"bar\"
"
    );
}

#[test]
fn test_raw_text_elements_keep_markup_as_text() {
    assert_eq!(
        dump("<xmp><b></xmp><script>a<b</script>"),
        "\
| <html>
|   <head>
|   <body>
|     <xmp>
|       \"<b>\"
|     <script>
|       \"a<b\"
"
    );
}

#[test]
fn test_consecutive_characters_coalesce() {
    let tree = parse("a&amp;b");
    let body = tree.body().expect("body");
    assert_eq!(tree.children(body).len(), 1);
    assert_eq!(tree.text_content(body), "a&b");
}

#[test]
fn test_comments_are_placed_by_mode() {
    assert_eq!(
        dump("<!--a--><!DOCTYPE html><p>x</p></body><!--c--></html><!--end-->"),
        "\
| <!-- a -->
| <!DOCTYPE html>
| <html>
|   <head>
|   <body>
|     <p>
|       \"x\"
|   <!-- c -->
| <!-- end -->
"
    );
}

#[test]
fn test_doctype_outside_initial_is_ignored() {
    let tree = parse("<p><!DOCTYPE html>");
    assert!(tree.doctype().is_none());
}

#[test]
fn test_legacy_doctype_keeps_identifiers() {
    let dumped = dump(r#"<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.0 Strict//EN" "">"#);
    assert!(dumped.starts_with("| <!DOCTYPE html \"-//W3C//DTD XHTML 1.0 Strict//EN\" \"\">\n"));
}

#[test]
fn test_html_and_body_attributes_merge() {
    assert_eq!(
        dump("<html lang=en><body><html class=x lang=fr>"),
        "\
| <html>
|   class=\"x\"
|   lang=\"en\"
|   <head>
|   <body>
"
    );
}

#[test]
fn test_tag_names_keep_source_spelling() {
    let tree = parse("<DIV ID=a></div>");
    let div = find_element(&tree, "div").expect("div");
    let data = tree.as_element(div).expect("element");
    assert_eq!(data.tag_name, "DIV");
    assert_eq!(data.local_name(), "div");
}

#[test]
fn test_table_structure_is_implied() {
    assert_eq!(
        dump("<table><tr><td>1</td></tr></table>"),
        "\
| <html>
|   <head>
|   <body>
|     <table>
|       <tbody>
|         <tr>
|           <td>
|             \"1\"
"
    );
}

#[test]
fn test_table_caption_and_cells() {
    assert_eq!(
        dump("<table><caption>c<tr><td>1<td>2"),
        "\
| <html>
|   <head>
|   <body>
|     <table>
|       <caption>
|         \"c\"
|       <tbody>
|         <tr>
|           <td>
|             \"1\"
|           <td>
|             \"2\"
"
    );
}

#[test]
fn test_table_column_group_is_implied() {
    assert_eq!(
        dump("<table><col><tr>"),
        "\
| <html>
|   <head>
|   <body>
|     <table>
|       <colgroup>
|         <col>
|       <tbody>
|         <tr>
"
    );
}

#[test]
fn test_text_in_table_is_foster_parented() {
    assert_eq!(
        dump("<table>x<tr><td>y</table>"),
        "\
| <html>
|   <head>
|   <body>
|     \"x\"
|     <table>
|       <tbody>
|         <tr>
|           <td>
|             \"y\"
"
    );
}

#[test]
fn test_element_in_table_is_foster_parented() {
    assert_eq!(
        dump("<table><b>bold</b><tr><td>c</td></tr></table>"),
        "\
| <html>
|   <head>
|   <body>
|     <b>
|       \"bold\"
|     <table>
|       <tbody>
|         <tr>
|           <td>
|             \"c\"
"
    );
}

#[test]
fn test_whitespace_in_table_stays_in_table() {
    let tree = parse("<table> <tr><td>1</td></tr></table>");
    let table = find_element(&tree, "table").expect("table");
    let first = tree.first_child(table).expect("child");
    assert_eq!(tree.as_text(first), Some(" "));
}

#[test]
fn test_table_closes_paragraph_only_outside_quirks_mode() {
    let quirks = parse("<p><table>");
    let table = find_element(&quirks, "table").expect("table");
    let parent = quirks.parent(table).expect("parent");
    assert!(quirks.as_element(parent).is_some_and(|data| data.is("p")));

    let standards = parse("<!DOCTYPE html><p><table>");
    let table = find_element(&standards, "table").expect("table");
    let parent = standards.parent(table).expect("parent");
    assert!(standards.as_element(parent).is_some_and(|data| data.is("body")));
}

#[test]
fn test_frameset_document() {
    assert_eq!(
        dump("<frameset><frame></frameset>"),
        "\
| <html>
|   <head>
|   <frameset>
|     <frame>
"
    );
}

#[test]
fn test_noscript_in_head_without_scripting() {
    assert_eq!(
        dump("<head><noscript><link rel=x></noscript></head>"),
        "\
| <html>
|   <head>
|     <noscript>
|       <link>
|         rel=\"x\"
|   <body>
"
    );
}

#[test]
fn test_noscript_in_head_with_scripting() {
    let input = "<head><noscript><p>x</p></noscript></head>";
    let tokens = HTMLTokenizer::with_options(
        input,
        TokenizerOptions {
            scripting_enabled: true,
            ..TokenizerOptions::default()
        },
    );
    let tree = HTMLParser::new(ParserOptions {
        scripting_enabled: true,
    })
    .run(tokens);
    assert_eq!(
        tree_dump(&tree),
        "\
| <html>
|   <head>
|     <noscript>
|       \"<p>x</p>\"
|   <body>
"
    );
}

#[test]
fn test_synthetic_tokens_without_eof() {
    let tokens = vec![Token::start_tag("p", &[]), Token::new_character('x')];
    let tree = HTMLParser::new(ParserOptions::default()).run(tokens);
    assert_eq!(
        tree_dump(&tree),
        "\
| <html>
|   <head>
|   <body>
|     <p>
|       \"x\"
"
    );
}

#[test]
fn test_tokens_after_eof_are_ignored() {
    let tokens = vec![
        Token::start_tag("p", &[]),
        Token::EndOfFile,
        Token::start_tag("div", &[]),
    ];
    let tree = HTMLParser::new(ParserOptions::default()).run(tokens);
    assert!(find_element(&tree, "div").is_none());
}

#[test]
fn test_run_with_issues_reports_token_index() {
    let (tree, issues) = HTMLParser::new(ParserOptions::default()).run_with_issues(tokenize("<p></div>"));
    assert!(find_element(&tree, "p").is_some());
    assert!(issues.iter().any(|issue| issue.token_index == 0));
    assert!(issues.iter().any(|issue| issue.token_index == 1));
}

#[test]
fn test_well_formed_document_has_no_issues() {
    let (_, issues) = HTMLParser::new(ParserOptions::default())
        .run_with_issues(tokenize("<!DOCTYPE html><html><head></head><body><p>x</p></body></html>"));
    assert!(issues.is_empty(), "{issues:?}");
}

#[test]
fn test_root_is_document_node() {
    let tree = parse("<p>");
    let root = tree.get(NodeId::ROOT).expect("root");
    assert!(matches!(root.node_type, NodeType::Document));
}

#[test]
fn test_deep_nesting_keeps_every_level() {
    const DEPTH: usize = 100_000;
    // Each stray end tag and each `<div>` asks whether some element is in
    // scope; those answers must not walk the whole stack.
    let html = format!("{}<p>x</span></li></p>{}", "<div>".repeat(DEPTH), "</em>".repeat(1_000));
    let (tree, issues) = HTMLParser::new(ParserOptions::default()).run_with_issues(tokenize(&html));

    let p = find_element(&tree, "p").expect("p");
    let div_ancestors = tree
        .ancestors(p)
        .filter(|&id| tree.as_element(id).is_some_and(|data| data.is("div")))
        .count();
    assert_eq!(div_ancestors, DEPTH);
    assert_eq!(tree.children(p).len(), 1);
    assert!(
        issues
            .iter()
            .any(|issue| issue.message == "end tag </span> matches no open element")
    );
}

#[test]
fn test_tree_dump_of_deep_tree() {
    const DEPTH: usize = 3_000;
    let out = dump(&format!("{}x", "<div>".repeat(DEPTH)));
    assert_eq!(out.lines().filter(|line| line.ends_with("<div>")).count(), DEPTH);
    let text = out.lines().last().expect("text line");
    // html and body add two levels above the divs.
    assert_eq!(text, format!("| {}\"x\"", "  ".repeat(DEPTH + 2)));
}
