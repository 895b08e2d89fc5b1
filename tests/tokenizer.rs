use mathlang::{
    error::LexError,
    tokenize,
    tokenizer::{core::Tokenizer, token::Token},
};

fn expect_tokens(src: &str, expected: &[Token]) {
    let tokens: Vec<Token> = tokenize(src).unwrap_or_else(|e| panic!("Tokenizing {src:?} failed: {e}"))
                                          .into_iter()
                                          .map(|data| data.token)
                                          .collect();
    assert_eq!(tokens, expected, "Token mismatch for {src:?}");
}

fn expect_error(src: &str) -> LexError {
    match tokenize(src) {
        Ok(tokens) => panic!("Tokenizing {src:?} succeeded with {tokens:?} but was expected to fail"),
        Err(e) => e,
    }
}

fn ident(name: &str) -> Token {
    Token::Identifier(name.into())
}

#[test]
fn declaration_statement() {
    expect_tokens("let x = 3 + 4;",
                  &[Token::Let,
                    ident("x"),
                    Token::Equals,
                    Token::Number(3.0),
                    Token::Plus,
                    Token::Number(4.0),
                    Token::Semicolon]);
}

#[test]
fn keywords_are_reclassified() {
    expect_tokens("let mut const if else for while switch break return in",
                  &[Token::Let,
                    Token::Mut,
                    Token::Const,
                    Token::If,
                    Token::Else,
                    Token::For,
                    Token::While,
                    Token::Switch,
                    Token::Break,
                    Token::Return,
                    Token::In]);
    // A keyword embedded in a longer identifier stays an identifier.
    expect_tokens("letter inlet", &[ident("letter"), ident("inlet")]);
}

#[test]
fn identifiers_may_contain_digits_and_underscores() {
    expect_tokens("x1", &[ident("x1")]);
    expect_tokens("_private", &[ident("_private")]);
    expect_tokens("a_b_2", &[ident("a_b_2")]);
}

#[test]
fn digit_first_splits_number_from_identifier() {
    // A leading digit commits the token to being a number; the alphabetic
    // character that follows starts a fresh identifier via pushback.
    expect_tokens("1x", &[Token::Number(1.0), ident("x")]);
    expect_tokens("2pi", &[Token::Number(2.0), ident("pi")]);
}

#[test]
fn numbers_with_fractional_parts() {
    expect_tokens("3.14", &[Token::Number(3.14)]);
    expect_tokens("0.5 + 2.", &[Token::Number(0.5), Token::Plus, Token::Number(2.0)]);
}

#[test]
fn malformed_number_is_an_error() {
    assert!(matches!(expect_error("1.2.3"), LexError::InvalidNumber { .. }));
}

#[test]
fn string_literal_with_escapes() {
    expect_tokens("\"a\\nb\"", &[Token::Str("a\nb".into())]);
    expect_tokens("\"tab\\there\"", &[Token::Str("tab\there".into())]);
    expect_tokens("\"back\\\\slash\"", &[Token::Str("back\\slash".into())]);
    expect_tokens("\"\"", &[Token::Str(String::new())]);
}

#[test]
fn string_bodies_keep_operator_characters() {
    expect_tokens("\"a + b\"", &[Token::Str("a + b".into())]);
}

#[test]
fn invalid_escape_is_an_error() {
    let error = expect_error("\"bad \\q escape\"");
    match error {
        LexError::InvalidEscape { character, .. } => assert_eq!(character, 'q'),
        other => panic!("Expected an invalid escape error, got {other:?}"),
    }
}

#[test]
fn unicode_identifiers_are_accepted() {
    expect_tokens("площа = 5", &[ident("площа"), Token::Equals, Token::Number(5.0)]);
}

#[test]
fn math_symbols_become_one_character_tokens() {
    expect_tokens("x × y", &[ident("x"), Token::Symbol('×'), ident("y")]);
    expect_tokens("a → b", &[ident("a"), Token::Symbol('→'), ident("b")]);
    expect_tokens("½π", &[Token::Symbol('½'), ident("π")]);
}

#[test]
fn combining_marks_extend_identifiers() {
    // 'e' followed by a combining acute accent stays one identifier.
    expect_tokens("re\u{301}sultat", &[ident("re\u{301}sultat")]);
}

#[test]
fn format_characters_are_rejected() {
    // Soft hyphen, category Cf.
    assert!(matches!(expect_error("a\u{AD}b"),
                     LexError::UnexpectedCharacter { character: '\u{AD}', .. }));
}

#[test]
fn operator_characters_become_single_tokens() {
    expect_tokens("(a|b)&!c", &[Token::OpenParen,
                                ident("a"),
                                Token::Union,
                                ident("b"),
                                Token::CloseParen,
                                Token::Intersect,
                                Token::Not,
                                ident("c")]);
    expect_tokens("v[0].x", &[ident("v"),
                              Token::OpenBracket,
                              Token::Number(0.0),
                              Token::CloseBracket,
                              Token::Dot,
                              ident("x")]);
}

#[test]
fn unmapped_punctuation_falls_back_to_symbol() {
    expect_tokens("a ? b", &[ident("a"), Token::Symbol('?'), ident("b")]);
}

#[test]
fn operators_terminate_adjacent_tokens() {
    // No whitespace anywhere; every boundary is found by pushback.
    expect_tokens("x=3+4;", &[ident("x"),
                              Token::Equals,
                              Token::Number(3.0),
                              Token::Plus,
                              Token::Number(4.0),
                              Token::Semicolon]);
}

#[test]
fn line_and_column_positions_are_tracked() {
    let tokens = tokenize("let x\nlet yy = 1").unwrap();

    assert_eq!(tokens[0].line, 1); // let
    assert_eq!(tokens[1].line, 1); // x
    assert_eq!(tokens[1].col, 5);
    assert_eq!(tokens[2].line, 2); // let
    assert_eq!(tokens[2].col, 3);
    assert_eq!(tokens[3].line, 2); // yy
    assert_eq!(tokens[4].line, 2); // =
    assert_eq!(tokens[4].col, 8);
    assert_eq!(tokens[5].line, 2); // 1
}

#[test]
fn error_positions_point_at_the_offending_character() {
    match expect_error("ok\n@ @ \u{AD}") {
        LexError::UnexpectedCharacter { character, line, .. } => {
            assert_eq!(character, '\u{AD}');
            assert_eq!(line, 2);
        },
        other => panic!("Expected an unexpected character error, got {other:?}"),
    }
}

#[test]
fn nul_bytes_are_skipped() {
    expect_tokens("a\0b", &[ident("ab")]);
}

#[test]
fn eof_is_sticky() {
    let mut tokenizer = Tokenizer::new("x");
    assert_eq!(tokenizer.next_token().unwrap().token, ident("x"));
    assert_eq!(tokenizer.next_token().unwrap().token, Token::Eof);
    assert_eq!(tokenizer.next_token().unwrap().token, Token::Eof);
}

#[test]
fn iterator_stops_at_eof() {
    let tokens: Vec<Token> = Tokenizer::new("1 + 2").map(|r| r.unwrap().token)
                                                    .collect();
    assert_eq!(tokens, vec![Token::Number(1.0), Token::Plus, Token::Number(2.0)]);
}

#[test]
fn empty_and_whitespace_only_input() {
    expect_tokens("", &[]);
    expect_tokens("  \t \n  ", &[]);
}
