//! Integration tests for selector parsing.

use test_case::test_case;
use trawl_select::{
    AttributeSelector, Combinator, Nth, PseudoClass, SelectorErrorKind, SelectorList,
    SimpleSelector, parse,
};

fn subject(text: &str) -> Vec<SimpleSelector> {
    let list = parse(text).unwrap();
    assert_eq!(list.len(), 1);
    list.selectors[0].subject.simple_selectors.clone()
}

fn single(text: &str) -> SimpleSelector {
    let mut simple = subject(text);
    assert_eq!(simple.len(), 1, "{text} should be a single simple selector");
    simple.remove(0)
}

// =============================================================================
// Simple selectors
// =============================================================================

#[test]
fn test_parse_type_selector() {
    let list = parse("body").unwrap();
    assert!(list.selectors[0].is_simple());
    assert_eq!(single("body"), SimpleSelector::Type("body".to_string()));
}

#[test]
fn test_type_selector_keeps_case() {
    assert_eq!(single("DIV"), SimpleSelector::Type("DIV".to_string()));
}

#[test]
fn test_parse_class_id_universal() {
    assert_eq!(single(".highlight"), SimpleSelector::Class("highlight".to_string()));
    assert_eq!(single("#main-content"), SimpleSelector::Id("main-content".to_string()));
    assert_eq!(single("*"), SimpleSelector::Universal);
}

#[test]
fn test_id_may_start_with_digit() {
    assert_eq!(single("#1st"), SimpleSelector::Id("1st".to_string()));
}

#[test]
fn test_parse_compound_selector() {
    assert_eq!(
        subject("div.a.b#c"),
        vec![
            SimpleSelector::Type("div".to_string()),
            SimpleSelector::Class("a".to_string()),
            SimpleSelector::Class("b".to_string()),
            SimpleSelector::Id("c".to_string()),
        ]
    );
}

#[test]
fn test_escaped_identifiers() {
    assert_eq!(single(".a\\:b"), SimpleSelector::Class("a:b".to_string()));
    assert_eq!(single("#\\31 23"), SimpleSelector::Id("123".to_string()));
    assert_eq!(single(".\\E9t\\E9"), SimpleSelector::Class("été".to_string()));
}

// =============================================================================
// Attribute selectors
// =============================================================================

#[test_case("[href]", AttributeSelector::Exists("href".into()) ; "exists")]
#[test_case("[type=text]", AttributeSelector::Equals("type".into(), "text".into()) ; "equals")]
#[test_case("[type=\"a b\"]", AttributeSelector::Equals("type".into(), "a b".into()) ; "double quoted")]
#[test_case("[type='a]b']", AttributeSelector::Equals("type".into(), "a]b".into()) ; "single quoted")]
#[test_case("[class~=x]", AttributeSelector::Includes("class".into(), "x".into()) ; "includes")]
#[test_case("[lang|=en]", AttributeSelector::DashMatch("lang".into(), "en".into()) ; "dash match")]
#[test_case("[href^=http]", AttributeSelector::PrefixMatch("href".into(), "http".into()) ; "prefix")]
#[test_case("[src$='.png']", AttributeSelector::SuffixMatch("src".into(), ".png".into()) ; "suffix")]
#[test_case("[title*=ell]", AttributeSelector::SubstringMatch("title".into(), "ell".into()) ; "substring")]
#[test_case("[ DATA-X = 1 ]", AttributeSelector::Equals("data-x".into(), "1".into()) ; "spaces and case")]
#[test_case("[v=\"q\\\"x\"]", AttributeSelector::Equals("v".into(), "q\"x".into()) ; "escaped quote")]
fn test_parse_attribute(text: &str, expected: AttributeSelector) {
    assert_eq!(single(text), SimpleSelector::Attribute(expected));
}

// =============================================================================
// Pseudo-classes
// =============================================================================

#[test_case(":root", PseudoClass::Root)]
#[test_case(":empty", PseudoClass::Empty)]
#[test_case(":first-child", PseudoClass::FirstChild)]
#[test_case(":last-child", PseudoClass::LastChild)]
#[test_case(":only-child", PseudoClass::OnlyChild)]
#[test_case(":first-of-type", PseudoClass::FirstOfType)]
#[test_case(":last-of-type", PseudoClass::LastOfType)]
#[test_case(":only-of-type", PseudoClass::OnlyOfType)]
#[test_case(":FIRST-CHILD", PseudoClass::FirstChild ; "case insensitive name")]
#[test_case(":nth-child(odd)", PseudoClass::NthChild(Nth::ODD))]
#[test_case(":nth-child( 2n + 1 )", PseudoClass::NthChild(Nth::new(2, 1)) ; "spaced formula")]
#[test_case(":nth-last-child(-n+3)", PseudoClass::NthLastChild(Nth::new(-1, 3)))]
#[test_case(":nth-of-type(2)", PseudoClass::NthOfType(Nth::new(0, 2)))]
#[test_case(":nth-last-of-type(even)", PseudoClass::NthLastOfType(Nth::EVEN))]
fn test_parse_pseudo_class(text: &str, expected: PseudoClass) {
    assert_eq!(single(text), SimpleSelector::PseudoClass(expected));
}

#[test]
fn test_parse_not() {
    let SimpleSelector::PseudoClass(PseudoClass::Not(inner)) = single(":not(.a, p > b)") else {
        panic!("expected :not");
    };
    assert_eq!(inner.len(), 2);
    assert_eq!(inner.selectors[1].combinators[0].0, Combinator::Child);
}

#[test]
fn test_nested_not() {
    let SimpleSelector::PseudoClass(PseudoClass::Not(inner)) = single(":not(:not(p))") else {
        panic!("expected :not");
    };
    assert!(matches!(
        inner.selectors[0].subject.simple_selectors[0],
        SimpleSelector::PseudoClass(PseudoClass::Not(_))
    ));
}

// =============================================================================
// Combinators and lists
// =============================================================================

#[test]
fn test_combinator_chain_is_right_to_left() {
    let list = parse("a > b c + d ~ e").unwrap();
    let complex = &list.selectors[0];
    assert_eq!(complex.subject.simple_selectors, [SimpleSelector::Type("e".to_string())]);

    let chain: Vec<(Combinator, String)> = complex
        .combinators
        .iter()
        .map(|(c, compound)| (*c, compound.to_string()))
        .collect();
    assert_eq!(
        chain,
        [
            (Combinator::SubsequentSibling, "d".to_string()),
            (Combinator::NextSibling, "c".to_string()),
            (Combinator::Descendant, "b".to_string()),
            (Combinator::Child, "a".to_string()),
        ]
    );
}

#[test_case("ul>li" ; "no spaces")]
#[test_case("ul > li" ; "spaces")]
#[test_case("  ul\t>\nli  " ; "mixed whitespace")]
fn test_child_combinator_whitespace(text: &str) {
    let list = parse(text).unwrap();
    assert_eq!(list.selectors[0].combinators.len(), 1);
    assert_eq!(list.selectors[0].combinators[0].0, Combinator::Child);
}

#[test]
fn test_selector_list() {
    let list = parse("h1, h2 ,h3").unwrap();
    assert_eq!(list.len(), 3);
    assert_eq!(list.to_string(), "h1, h2, h3");
}

#[test]
fn test_from_str() {
    let list: SelectorList = "div p".parse().unwrap();
    assert_eq!(list.selectors[0].combinators[0].0, Combinator::Descendant);
}

#[test_case("div.a > p:nth-child(2n+1)")]
#[test_case("a[href^=\"http\"] ~ span:not(.x, #y)")]
#[test_case("*:first-child + [lang|=\"en\"]")]
#[test_case("h1, h2 p")]
fn test_display_reparses_to_same_tree(text: &str) {
    let list = parse(text).unwrap();
    let printed = list.to_string();
    assert_eq!(parse(&printed).unwrap(), list, "{printed}");
}

// =============================================================================
// Errors
// =============================================================================

#[test_case("", SelectorErrorKind::Empty, 0 ; "empty")]
#[test_case("   ", SelectorErrorKind::Empty, 0 ; "blank")]
#[test_case("> a", SelectorErrorKind::EmptyCompound, 0 ; "leading combinator")]
#[test_case("a >", SelectorErrorKind::EmptyCompound, 3 ; "dangling combinator")]
#[test_case("a > > b", SelectorErrorKind::EmptyCompound, 4 ; "double combinator")]
#[test_case("a,,b", SelectorErrorKind::EmptyCompound, 2 ; "double comma")]
#[test_case("a,", SelectorErrorKind::EmptyCompound, 2 ; "trailing comma")]
#[test_case("a!", SelectorErrorKind::UnexpectedChar('!'), 1 ; "bang")]
#[test_case("a !", SelectorErrorKind::UnexpectedChar('!'), 2 ; "bang after space")]
#[test_case("p.", SelectorErrorKind::ExpectedIdentifier, 2 ; "bare dot")]
#[test_case("#", SelectorErrorKind::ExpectedIdentifier, 1 ; "bare hash")]
#[test_case("[href", SelectorErrorKind::Unbalanced('['), 0 ; "unclosed bracket")]
#[test_case("a[x=1", SelectorErrorKind::Unbalanced('['), 1 ; "unclosed bracket with value")]
#[test_case("a]", SelectorErrorKind::Unbalanced(']'), 1 ; "stray bracket")]
#[test_case("a)", SelectorErrorKind::Unbalanced(')'), 1 ; "stray paren")]
#[test_case(":not(a", SelectorErrorKind::Unbalanced('('), 4 ; "unclosed not")]
#[test_case(":nth-child(2", SelectorErrorKind::Unbalanced('('), 10 ; "unclosed nth")]
#[test_case("[a='x]", SelectorErrorKind::UnterminatedString, 3 ; "unterminated string")]
#[test_case("[a!=x]", SelectorErrorKind::UnknownAttributeOperator("!=".into()), 2 ; "bang equals")]
#[test_case("[a~x]", SelectorErrorKind::UnknownAttributeOperator("~".into()), 2 ; "tilde alone")]
#[test_case("a:hover", SelectorErrorKind::UnknownPseudoClass("hover".into()), 1 ; "hover")]
#[test_case("p::before", SelectorErrorKind::UnknownPseudoClass(":before".into()), 1 ; "pseudo element")]
#[test_case(":nth-child(x)", SelectorErrorKind::InvalidPseudoArgument("nth-child".into()), 11 ; "bad nth")]
#[test_case(":nth-child()", SelectorErrorKind::InvalidPseudoArgument("nth-child".into()), 11 ; "empty nth")]
#[test_case(":nth-of-type", SelectorErrorKind::InvalidPseudoArgument("nth-of-type".into()), 12 ; "missing argument")]
#[test_case(":empty(1)", SelectorErrorKind::InvalidPseudoArgument("empty".into()), 6 ; "argument to plain")]
#[test_case(":not()", SelectorErrorKind::EmptyCompound, 5 ; "empty not")]
fn test_syntax_errors(text: &str, kind: SelectorErrorKind, position: usize) {
    let err = parse(text).unwrap_err();
    assert_eq!(err.kind, kind, "{text}");
    assert_eq!(err.position, position, "{text}");
}

#[test]
fn test_error_position_counts_characters() {
    let err = parse("é!").unwrap_err();
    assert_eq!(err.kind, SelectorErrorKind::UnexpectedChar('!'));
    assert_eq!(err.position, 1);
}

#[test]
fn test_error_display() {
    let err = parse("a:hover").unwrap_err();
    assert_eq!(
        err.to_string(),
        "invalid selector: unknown pseudo-class \"hover\" at position 1"
    );
}
