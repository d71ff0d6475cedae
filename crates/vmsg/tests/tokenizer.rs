//! Integration tests for the message descriptor tokenizer.

use vmsg::parser::{InterpolationMode, tokenize};
use vmsg::{FormatError, Token, TokenKind};

fn values(tokens: &[Token]) -> Vec<&str> {
    tokens.iter().map(|t| t.value().unwrap()).collect()
}

fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
    tokens.iter().map(Token::kind).collect()
}

// =========================================================================
// Parameter Mode
// =========================================================================

#[test]
fn empty_template_has_no_tokens() {
    let tokens = tokenize("", InterpolationMode::Parameter).unwrap();
    assert!(tokens.is_empty());
}

#[test]
fn plain_text_is_one_literal() {
    let tokens = tokenize("must not be null", InterpolationMode::Parameter).unwrap();
    assert_eq!(values(&tokens), vec!["must not be null"]);
    assert_eq!(kinds(&tokens), vec![TokenKind::Literal]);
}

#[test]
fn parameters_and_literals_alternate() {
    let tokens = tokenize(
        "size must be between {min} and {max}",
        InterpolationMode::Parameter,
    )
    .unwrap();
    assert_eq!(
        values(&tokens),
        vec!["size must be between ", "{min}", " and ", "{max}"]
    );
    assert_eq!(
        kinds(&tokens),
        vec![
            TokenKind::Literal,
            TokenKind::Parameter,
            TokenKind::Literal,
            TokenKind::Parameter
        ]
    );
}

#[test]
fn adjacent_parameters() {
    let tokens = tokenize("{a}{b}", InterpolationMode::Parameter).unwrap();
    assert_eq!(values(&tokens), vec!["{a}", "{b}"]);
    assert!(tokens.iter().all(Token::is_term));
}

#[test]
fn concatenated_values_reproduce_input() {
    let template = r"a \{b\} {c} \$ \\ e {d.e}!";
    let tokens = tokenize(template, InterpolationMode::Parameter).unwrap();
    assert_eq!(values(&tokens).concat(), template);
}

#[test]
fn escaped_braces_are_literal_text() {
    let tokens = tokenize(r"\{min\}", InterpolationMode::Parameter).unwrap();
    assert_eq!(values(&tokens), vec![r"\{min\}"]);
    assert_eq!(kinds(&tokens), vec![TokenKind::Literal]);
}

#[test]
fn escape_inside_parameter_is_kept() {
    let tokens = tokenize(r"{a\}b}", InterpolationMode::Parameter).unwrap();
    assert_eq!(values(&tokens), vec![r"{a\}b}"]);
    assert_eq!(kinds(&tokens), vec![TokenKind::Parameter]);
}

#[test]
fn trailing_escape_is_kept() {
    let tokens = tokenize(r"ends with \", InterpolationMode::Parameter).unwrap();
    assert_eq!(values(&tokens), vec![r"ends with \"]);
}

#[test]
fn expression_is_not_recognized_in_parameter_mode() {
    let tokens = tokenize("value ${1+1} here", InterpolationMode::Parameter).unwrap();
    assert!(
        tokens
            .iter()
            .all(|t| t.kind() != TokenKind::ExpressionLanguage)
    );
    assert_eq!(values(&tokens).concat(), "value ${1+1} here");
}

#[test]
fn dollar_is_plain_in_parameter_mode() {
    let tokens = tokenize("costs $5", InterpolationMode::Parameter).unwrap();
    assert_eq!(values(&tokens), vec!["costs $5"]);
}

// =========================================================================
// Expression Language Mode
// =========================================================================

#[test]
fn expression_is_one_token() {
    let tokens = tokenize("${1+1}", InterpolationMode::ExpressionLanguage).unwrap();
    assert_eq!(values(&tokens), vec!["${1+1}"]);
    assert_eq!(kinds(&tokens), vec![TokenKind::ExpressionLanguage]);
}

#[test]
fn expression_between_literals() {
    let tokens = tokenize(
        "got ${validatedValue} instead",
        InterpolationMode::ExpressionLanguage,
    )
    .unwrap();
    assert_eq!(
        values(&tokens),
        vec!["got ", "${validatedValue}", " instead"]
    );
    assert_eq!(
        kinds(&tokens),
        vec![
            TokenKind::Literal,
            TokenKind::ExpressionLanguage,
            TokenKind::Literal
        ]
    );
}

#[test]
fn parameters_still_recognized_in_expression_mode() {
    let tokens = tokenize("${a} and {b}", InterpolationMode::ExpressionLanguage).unwrap();
    assert_eq!(
        kinds(&tokens),
        vec![
            TokenKind::ExpressionLanguage,
            TokenKind::Literal,
            TokenKind::Parameter
        ]
    );
}

#[test]
fn lone_dollar_before_plain_character_is_literal() {
    let tokens = tokenize("price $5", InterpolationMode::ExpressionLanguage).unwrap();
    assert_eq!(values(&tokens), vec!["price $5"]);
    assert_eq!(kinds(&tokens), vec![TokenKind::Literal]);
}

#[test]
fn double_dollar_is_literal() {
    let tokens = tokenize("$$x", InterpolationMode::ExpressionLanguage).unwrap();
    assert_eq!(values(&tokens), vec!["$$x"]);
}

#[test]
fn trailing_dollar_is_flushed() {
    let tokens = tokenize("cost $", InterpolationMode::ExpressionLanguage).unwrap();
    assert_eq!(values(&tokens), vec!["cost $"]);
}

#[test]
fn escaped_dollar_does_not_start_expression() {
    let tokens = tokenize(r"\${a}", InterpolationMode::ExpressionLanguage).unwrap();
    assert_eq!(values(&tokens), vec![r"\$", "{a}"]);
    assert_eq!(kinds(&tokens), vec![TokenKind::Literal, TokenKind::Parameter]);
}

#[test]
fn escaped_braces_inside_expression_are_unescaped() {
    let tokens = tokenize(r"${a\}b}", InterpolationMode::ExpressionLanguage).unwrap();
    assert_eq!(values(&tokens), vec!["${a}b}"]);
    assert_eq!(kinds(&tokens), vec![TokenKind::ExpressionLanguage]);
}

// =========================================================================
// Format Errors
// =========================================================================

#[test]
fn unterminated_term_reports_its_start() {
    let err = tokenize("ab {cd", InterpolationMode::Parameter).unwrap_err();
    assert_eq!(
        err,
        FormatError::UnterminatedTerm {
            position: 3,
            template: "ab {cd".to_string(),
        }
    );
}

#[test]
fn unterminated_expression() {
    let err = tokenize("${a", InterpolationMode::ExpressionLanguage).unwrap_err();
    assert!(matches!(err, FormatError::UnterminatedTerm { .. }));
}

#[test]
fn end_term_outside_term() {
    let err = tokenize("a}b", InterpolationMode::Parameter).unwrap_err();
    assert_eq!(
        err,
        FormatError::UnbalancedEndTerm {
            character: '}',
            position: 1,
            template: "a}b".to_string(),
        }
    );
}

#[test]
fn end_term_at_start() {
    let err = tokenize("}", InterpolationMode::Parameter).unwrap_err();
    assert_eq!(err.position(), 0);
}

#[test]
fn end_term_after_dollar() {
    let err = tokenize("$}", InterpolationMode::ExpressionLanguage).unwrap_err();
    assert!(matches!(
        err,
        FormatError::UnbalancedEndTerm { position: 1, .. }
    ));
}

#[test]
fn nested_term() {
    let err = tokenize("{a{b}", InterpolationMode::Parameter).unwrap_err();
    assert_eq!(
        err,
        FormatError::NestedTerm {
            character: '{',
            position: 2,
            template: "{a{b}".to_string(),
        }
    );
}

#[test]
fn positions_count_characters_not_bytes() {
    let err = tokenize("größe}", InterpolationMode::Parameter).unwrap_err();
    assert_eq!(err.position(), 5);
}

#[test]
fn error_message_names_the_template() {
    let err = tokenize("{oops", InterpolationMode::Parameter).unwrap_err();
    assert_eq!(err.template(), "{oops");
    assert!(err.to_string().contains("'{oops'"));
}
