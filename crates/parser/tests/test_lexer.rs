//! Integration tests for the lexer.
//!
//! Lexing is total: every input produces a finite, `Eof`-terminated token
//! stream, with malformed input surfacing as `Unknown` tokens rather than
//! errors.

use javelin_parser::lexer::{Lexer, TokenKind};

/// Tokenize and return kinds with the trailing `Eof` stripped.
fn kinds(source: &str) -> Vec<TokenKind> {
    let tokens = Lexer::new(source).tokenize();
    assert_eq!(
        tokens.last().map(|t| t.kind),
        Some(TokenKind::Eof),
        "token stream must end with Eof"
    );
    tokens
        .iter()
        .map(|t| t.kind)
        .filter(|k| *k != TokenKind::Eof)
        .collect()
}

#[test]
fn empty_source_is_just_eof() {
    let tokens = Lexer::new("").tokenize();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::Eof);
}

#[test]
fn keywords_and_identifiers() {
    assert_eq!(
        kinds("class int boolean void if else while for return new this true false null"),
        vec![
            TokenKind::Class,
            TokenKind::Int,
            TokenKind::Boolean,
            TokenKind::Void,
            TokenKind::If,
            TokenKind::Else,
            TokenKind::While,
            TokenKind::For,
            TokenKind::Return,
            TokenKind::New,
            TokenKind::This,
            TokenKind::True,
            TokenKind::False,
            TokenKind::Null,
        ]
    );

    // Near-keywords stay identifiers.
    assert_eq!(
        kinds("classes iff Int integer"),
        vec![
            TokenKind::Ident,
            TokenKind::Ident,
            TokenKind::Ident,
            TokenKind::Ident
        ]
    );
}

#[test]
fn identifiers_allow_underscore_and_digits() {
    let tokens = Lexer::new("_x x1 foo_bar").tokenize();
    let texts: Vec<&str> = tokens
        .iter()
        .filter(|t| t.kind == TokenKind::Ident)
        .map(|t| t.text.as_str())
        .collect();
    assert_eq!(texts, vec!["_x", "x1", "foo_bar"]);
}

#[test]
fn numbers_keep_their_lexeme() {
    let tokens = Lexer::new("0 42 2147483648").tokenize();
    let numbers: Vec<&str> = tokens
        .iter()
        .filter(|t| t.kind == TokenKind::Number)
        .map(|t| t.text.as_str())
        .collect();
    // Range checking happens in the parser; the lexer keeps the raw text.
    assert_eq!(numbers, vec!["0", "42", "2147483648"]);
}

#[test]
fn operators_use_maximal_munch() {
    assert_eq!(
        kinds("<= < = == != ++ + = -- -"),
        vec![
            TokenKind::LtEq,
            TokenKind::Lt,
            TokenKind::Assign,
            TokenKind::EqEq,
            TokenKind::NotEq,
            TokenKind::PlusPlus,
            TokenKind::Plus,
            TokenKind::Assign,
            TokenKind::MinusMinus,
            TokenKind::Minus,
        ]
    );
    assert_eq!(kinds("&&"), vec![TokenKind::AndAnd]);
    assert_eq!(kinds("||"), vec![TokenKind::OrOr]);
    assert_eq!(kinds(">="), vec![TokenKind::GtEq]);
}

#[test]
fn lone_ampersand_and_pipe_are_unknown() {
    assert_eq!(kinds("&"), vec![TokenKind::Unknown]);
    assert_eq!(kinds("|"), vec![TokenKind::Unknown]);
    assert_eq!(
        kinds("a & b"),
        vec![TokenKind::Ident, TokenKind::Unknown, TokenKind::Ident]
    );
}

#[test]
fn unexpected_characters_become_unknown_tokens() {
    assert_eq!(
        kinds("x @ y # z"),
        vec![
            TokenKind::Ident,
            TokenKind::Unknown,
            TokenKind::Ident,
            TokenKind::Unknown,
            TokenKind::Ident,
        ]
    );
}

#[test]
fn string_literals_drop_quotes_and_process_escapes() {
    let tokens = Lexer::new(r#""hello" "a\nb" "tab\there" "q\"q" "back\\slash""#).tokenize();
    let strings: Vec<&str> = tokens
        .iter()
        .filter(|t| t.kind == TokenKind::String)
        .map(|t| t.text.as_str())
        .collect();
    assert_eq!(
        strings,
        vec!["hello", "a\nb", "tab\there", "q\"q", "back\\slash"]
    );
}

#[test]
fn unknown_escape_passes_through() {
    let tokens = Lexer::new(r#""a\qb""#).tokenize();
    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].text, "aqb");
}

#[test]
fn unterminated_string_runs_to_end_of_input() {
    let tokens = Lexer::new("\"never closed").tokenize();
    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].text, "never closed");
    assert_eq!(tokens[1].kind, TokenKind::Eof);
}

#[test]
fn line_comments_are_skipped() {
    assert_eq!(
        kinds("a // the rest vanishes + - *\nb"),
        vec![TokenKind::Ident, TokenKind::Ident]
    );
}

#[test]
fn block_comments_are_skipped_and_may_span_lines() {
    assert_eq!(
        kinds("a /* one\ntwo\nthree */ b"),
        vec![TokenKind::Ident, TokenKind::Ident]
    );
    // An unterminated block comment swallows the rest of the input.
    assert_eq!(kinds("a /* no end"), vec![TokenKind::Ident]);
}

#[test]
fn positions_are_one_based_and_track_newlines() {
    let tokens = Lexer::new("ab cd\n  ef").tokenize();
    assert_eq!((tokens[0].line, tokens[0].column), (1, 1));
    assert_eq!((tokens[1].line, tokens[1].column), (1, 4));
    assert_eq!((tokens[2].line, tokens[2].column), (2, 3));
}

#[test]
fn delimiters() {
    assert_eq!(
        kinds("( ) { } [ ] ; , ."),
        vec![
            TokenKind::LParen,
            TokenKind::RParen,
            TokenKind::LBrace,
            TokenKind::RBrace,
            TokenKind::LBracket,
            TokenKind::RBracket,
            TokenKind::Semicolon,
            TokenKind::Comma,
            TokenKind::Dot,
        ]
    );
}
