//! Integration tests for the HTML tokenizer.

use test_case::test_case;
use trawl_html::tokenizer::{
    Attribute, HTMLTokenizer, ParseErrorCode, Token, TokenizerOptions, TokenizerState, tokenize,
};

/// Tokenize and return the tokens along with the recorded error codes.
fn tokenize_with_errors(input: &str) -> (Vec<Token>, Vec<ParseErrorCode>) {
    let mut tokenizer = tokenize(input);
    let tokens: Vec<Token> = tokenizer.by_ref().collect();
    let codes = tokenizer.issues().into_iter().map(|issue| issue.code).collect();
    (tokens, codes)
}

/// Concatenate every character token.
fn text_of(tokens: &[Token]) -> String {
    tokens
        .iter()
        .filter_map(|token| match token {
            Token::Character { data } => Some(*data),
            _ => None,
        })
        .collect()
}

/// Tokens with runs of characters collapsed, for compact assertions.
fn non_character_tokens(tokens: &[Token]) -> Vec<&Token> {
    tokens
        .iter()
        .filter(|token| !matches!(token, Token::Character { .. }))
        .collect()
}

fn attr(name: &str, value: &str) -> Attribute {
    Attribute::new(name.to_string(), value.to_string())
}

#[test]
fn test_plain_text() {
    let tokens: Vec<Token> = tokenize("abc").collect();
    assert_eq!(
        tokens,
        vec![
            Token::new_character('a'),
            Token::new_character('b'),
            Token::new_character('c'),
            Token::EndOfFile,
        ]
    );
}

#[test]
fn test_empty_input_is_just_eof() {
    let tokens: Vec<Token> = tokenize("").collect();
    assert_eq!(tokens, vec![Token::EndOfFile]);
}

#[test]
fn test_eof_is_emitted_exactly_once() {
    let mut tokenizer = tokenize("<p>");
    assert_eq!(tokenizer.next(), Some(Token::start_tag("p", &[])));
    assert_eq!(tokenizer.next(), Some(Token::EndOfFile));
    assert_eq!(tokenizer.next(), None);
    assert_eq!(tokenizer.next(), None);
}

#[test]
fn test_start_tag_with_every_attribute_form() {
    let tokens: Vec<Token> =
        tokenize(r#"<div class="a b" id='main' data-x=c hidden>"#).collect();
    assert_eq!(
        tokens[0],
        Token::StartTag {
            name: "div".to_string(),
            self_closing: false,
            attributes: vec![
                attr("class", "a b"),
                attr("id", "main"),
                attr("data-x", "c"),
                attr("hidden", ""),
            ],
        }
    );
}

#[test]
fn test_tag_and_attribute_names_keep_source_case() {
    let tokens: Vec<Token> = tokenize("<DIV Class=x></Div>").collect();
    assert_eq!(tokens[0], Token::start_tag("DIV", &[("Class", "x")]));
    assert_eq!(tokens[1], Token::end_tag("Div"));
}

#[test]
fn test_duplicate_attribute_keeps_first() {
    let (tokens, errors) = tokenize_with_errors("<a href=1 HREF=2>");
    assert_eq!(tokens[0], Token::start_tag("a", &[("href", "1")]));
    assert!(errors.contains(&ParseErrorCode::DuplicateAttribute));
}

#[test]
fn test_self_closing_flag() {
    let tokens: Vec<Token> = tokenize("<br/><img src=x />").collect();
    assert!(matches!(
        &tokens[0],
        Token::StartTag { name, self_closing: true, .. } if name == "br"
    ));
    assert!(matches!(
        &tokens[1],
        Token::StartTag { name, self_closing: true, attributes } if name == "img" && attributes.len() == 1
    ));
}

#[test]
fn test_end_tag_attributes_are_dropped() {
    let (tokens, errors) = tokenize_with_errors("</p class=x>");
    assert_eq!(tokens[0], Token::end_tag("p"));
    assert!(errors.contains(&ParseErrorCode::EndTagWithAttributes));
}

#[test]
fn test_end_tag_trailing_solidus_is_reported() {
    let (tokens, errors) = tokenize_with_errors("</p/>");
    assert_eq!(tokens[0], Token::end_tag("p"));
    assert!(errors.contains(&ParseErrorCode::EndTagWithTrailingSolidus));
}

#[test]
fn test_comment() {
    let tokens: Vec<Token> = tokenize("<!-- hi -->").collect();
    assert_eq!(
        tokens,
        vec![
            Token::Comment {
                data: " hi ".to_string()
            },
            Token::EndOfFile
        ]
    );
}

#[test]
fn test_unterminated_comment_is_truncated_at_eof() {
    let (tokens, errors) = tokenize_with_errors("<!-- abc");
    assert_eq!(
        tokens,
        vec![
            Token::Comment {
                data: " abc".to_string()
            },
            Token::EndOfFile
        ]
    );
    assert_eq!(errors, vec![ParseErrorCode::EofInComment]);
}

#[test]
fn test_abrupt_empty_comment() {
    let (tokens, errors) = tokenize_with_errors("<!-->x");
    assert_eq!(
        tokens[0],
        Token::Comment {
            data: String::new()
        }
    );
    assert_eq!(text_of(&tokens), "x");
    assert!(errors.contains(&ParseErrorCode::AbruptClosingOfEmptyComment));
}

#[test]
fn test_cdata_becomes_bogus_comment() {
    let (tokens, errors) = tokenize_with_errors("<![CDATA[x]]>");
    assert_eq!(
        tokens[0],
        Token::Comment {
            data: "[CDATA[x]]".to_string()
        }
    );
    assert!(errors.contains(&ParseErrorCode::CdataInHtmlContent));
}

#[test]
fn test_processing_instruction_becomes_bogus_comment() {
    let (tokens, errors) = tokenize_with_errors("<?xml version='1.0'?>");
    assert_eq!(
        tokens[0],
        Token::Comment {
            data: "?xml version='1.0'?".to_string()
        }
    );
    assert!(errors.contains(&ParseErrorCode::UnexpectedQuestionMarkInsteadOfTagName));
}

#[test]
fn test_simple_doctype() {
    let tokens: Vec<Token> = tokenize("<!DOCTYPE html>").collect();
    assert_eq!(
        tokens[0],
        Token::Doctype {
            name: Some("html".to_string()),
            public_identifier: None,
            system_identifier: None,
            force_quirks: false,
        }
    );
}

#[test]
fn test_legacy_doctype_with_identifiers() {
    let tokens: Vec<Token> = tokenize(
        r#"<!DOCTYPE HTML PUBLIC "-//W3C//DTD HTML 4.01//EN" "http://www.w3.org/TR/html4/strict.dtd">"#,
    )
    .collect();
    assert_eq!(
        tokens[0],
        Token::Doctype {
            name: Some("html".to_string()),
            public_identifier: Some("-//W3C//DTD HTML 4.01//EN".to_string()),
            system_identifier: Some("http://www.w3.org/TR/html4/strict.dtd".to_string()),
            force_quirks: false,
        }
    );
}

#[test]
fn test_doctype_without_name_forces_quirks() {
    let (tokens, errors) = tokenize_with_errors("<!DOCTYPE>");
    assert_eq!(
        tokens[0],
        Token::Doctype {
            name: None,
            public_identifier: None,
            system_identifier: None,
            force_quirks: true,
        }
    );
    assert!(errors.contains(&ParseErrorCode::MissingDoctypeName));
}

#[test]
fn test_stray_less_than_is_text() {
    let (tokens, errors) = tokenize_with_errors("a < b");
    assert_eq!(text_of(&tokens), "a < b");
    assert_eq!(non_character_tokens(&tokens), vec![&Token::EndOfFile]);
    assert_eq!(errors, vec![ParseErrorCode::InvalidFirstCharacterOfTagName]);
}

#[test]
fn test_empty_end_tag_is_dropped() {
    let (tokens, errors) = tokenize_with_errors("a</>b");
    assert_eq!(text_of(&tokens), "ab");
    assert_eq!(errors, vec![ParseErrorCode::MissingEndTagName]);
}

#[test]
fn test_eof_in_tag_drops_the_tag() {
    let (tokens, errors) = tokenize_with_errors(r#"<div class="x"#);
    assert_eq!(tokens, vec![Token::EndOfFile]);
    assert_eq!(errors, vec![ParseErrorCode::EofInTag]);
}

#[test]
fn test_line_endings_are_normalized() {
    let tokens: Vec<Token> = tokenize("a\r\nb\rc").collect();
    assert_eq!(text_of(&tokens), "a\nb\nc");
}

#[test_case("&amp;&lt;&gt;", "&<>" ; "basic named")]
#[test_case("&amp", "&" ; "legacy without semicolon")]
#[test_case("&notit;", "\u{00AC}it;" ; "longest legacy prefix")]
#[test_case("&hellip;", "\u{2026}" ; "semicolon only entity")]
#[test_case("&#65;&#x41;&#X41", "AAA" ; "numeric forms")]
#[test_case("&#0;", "\u{FFFD}" ; "null reference")]
#[test_case("&#x110000;", "\u{FFFD}" ; "outside unicode range")]
#[test_case("&#xD800;", "\u{FFFD}" ; "surrogate")]
#[test_case("&#x80;", "\u{20AC}" ; "c1 remap")]
#[test_case("&bogus;", "&bogus;" ; "unknown named")]
#[test_case("& x", "& x" ; "bare ampersand")]
#[test_case("&#;", "&#;" ; "numeric without digits")]
fn test_character_references_in_data(input: &str, expected: &str) {
    let tokens: Vec<Token> = tokenize(input).collect();
    assert_eq!(text_of(&tokens), expected);
}

#[test_case("&#0;", ParseErrorCode::NullCharacterReference)]
#[test_case("&#xD800;", ParseErrorCode::SurrogateCharacterReference)]
#[test_case("&#x110000;", ParseErrorCode::CharacterReferenceOutsideUnicodeRange)]
#[test_case("&#x80;", ParseErrorCode::ControlCharacterReference)]
#[test_case("&amp", ParseErrorCode::MissingSemicolonAfterCharacterReference)]
#[test_case("&bogus;", ParseErrorCode::UnknownNamedCharacterReference)]
#[test_case("&#;", ParseErrorCode::AbsenceOfDigitsInNumericCharacterReference)]
fn test_character_reference_errors(input: &str, expected: ParseErrorCode) {
    let (_, errors) = tokenize_with_errors(input);
    assert!(errors.contains(&expected), "{errors:?}");
}

#[test]
fn test_character_reference_in_attribute() {
    let tokens: Vec<Token> = tokenize(r#"<a title="&copy; 2024" href="?a=1&copy=2">"#).collect();
    assert_eq!(
        tokens[0],
        Token::start_tag("a", &[("title", "\u{00A9} 2024"), ("href", "?a=1&copy=2")])
    );
}

#[test]
fn test_rawtext_style_ignores_markup() {
    let tokens: Vec<Token> = tokenize("<style>a<b>&amp;</style>").collect();
    assert_eq!(tokens[0], Token::start_tag("style", &[]));
    assert_eq!(text_of(&tokens), "a<b>&amp;");
    assert_eq!(tokens[tokens.len() - 2], Token::end_tag("style"));
}

#[test]
fn test_rcdata_title_decodes_references() {
    let tokens: Vec<Token> = tokenize("<title>&amp;<b></title>").collect();
    assert_eq!(text_of(&tokens), "&<b>");
    assert_eq!(tokens[tokens.len() - 2], Token::end_tag("title"));
}

#[test]
fn test_script_data_only_ends_at_matching_end_tag() {
    let tokens: Vec<Token> = tokenize("<script>if (a</b) {}</SCRIPT>").collect();
    assert_eq!(text_of(&tokens), "if (a</b) {}");
    assert_eq!(tokens[tokens.len() - 2], Token::end_tag("SCRIPT"));
}

#[test]
fn test_plaintext_never_ends() {
    let tokens: Vec<Token> = tokenize("<plaintext></plaintext>x").collect();
    assert_eq!(text_of(&tokens), "</plaintext>x");
    assert_eq!(
        non_character_tokens(&tokens),
        vec![&Token::start_tag("plaintext", &[]), &Token::EndOfFile]
    );
}

#[test]
fn test_noscript_depends_on_scripting_flag() {
    let disabled: Vec<Token> = tokenize("<noscript><p>x</p></noscript>").collect();
    assert!(disabled.contains(&Token::start_tag("p", &[])));

    let options = TokenizerOptions {
        scripting_enabled: true,
        ..TokenizerOptions::default()
    };
    let enabled: Vec<Token> =
        HTMLTokenizer::with_options("<noscript><p>x</p></noscript>", options).collect();
    assert_eq!(text_of(&enabled), "<p>x</p>");
}

#[test]
fn test_initial_state_option() {
    let options = TokenizerOptions {
        initial_state: TokenizerState::RCDATA,
        last_start_tag: Some("textarea".to_string()),
        scripting_enabled: false,
    };
    let tokens: Vec<Token> = HTMLTokenizer::with_options("a&lt;</textarea>", options).collect();
    assert_eq!(
        tokens,
        vec![
            Token::new_character('a'),
            Token::new_character('<'),
            Token::end_tag("textarea"),
            Token::EndOfFile,
        ]
    );
}

#[test]
fn test_issue_positions_are_line_and_column() {
    let mut tokenizer = tokenize("ok\n  </>");
    let _ = tokenizer.by_ref().count();
    let issues = tokenizer.issues();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].code, ParseErrorCode::MissingEndTagName);
    assert_eq!(issues[0].position.line, 2);
}

#[test]
fn test_parse_error_codes_render_kebab_case() {
    assert_eq!(ParseErrorCode::EofInTag.to_string(), "eof-in-tag");
    assert_eq!(
        ParseErrorCode::MissingSemicolonAfterCharacterReference.to_string(),
        "missing-semicolon-after-character-reference"
    );
}
