//! Javelin front end: lexer, parser and semantic analyzer for a small
//! statically-typed object-oriented language.
//!
//! The front end is three sequential stages:
//! - A hand-written lexer that turns source text into a finite,
//!   `Eof`-terminated token stream. Lexing is total: malformed input becomes
//!   `Unknown` tokens for the parser to reject.
//! - A recursive-descent parser with one token of lookahead (plus bounded
//!   lookahead for the field/method and declaration/expression ambiguities)
//!   that produces an immutable AST. Every expression node carries a unique
//!   [`ast::NodeId`].
//! - A two-pass semantic analyzer that enforces the scoping and typing rules
//!   and records each expression's resolved type in a [`semantic::TypeMap`]
//!   side table, leaving the AST untouched.
//!
//! Each stage fails fast on the first error.
//!
//! # Unified API
//!
//! ```no_run
//! use javelin_parser::{check, parse};
//!
//! let source = r#"
//! class Counter {
//!     int value;
//!     int next() { value = value + 1; return value; }
//! }
//! "#;
//!
//! let program = parse(source).unwrap();
//! assert_eq!(program.classes.len(), 1);
//!
//! let (program, types) = check(source).unwrap();
//! assert!(!types.is_empty());
//! # let _ = program;
//! ```

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod semantic;

pub use ast::{Expr, NodeId, Program, Stmt, Type};
pub use error::{ParseError, SemanticError};
pub use lexer::{Lexer, Token, TokenKind};
pub use parser::{ParseResult, Parser};
pub use semantic::{SemanticAnalyzer, SemanticResult, TypeMap};

use thiserror::Error;

/// Error from either front-end stage, for callers that run the stages as one
/// unit via [`check`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrontendError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Semantic(#[from] SemanticError),
}

/// Lex and parse `source` into a program.
pub fn parse(source: &str) -> Result<Program, ParseError> {
    let tokens = Lexer::new(source).tokenize();
    Parser::new(tokens).parse_program()
}

/// Lex, parse and analyze `source`, returning the program together with the
/// resolved type of every expression.
pub fn check(source: &str) -> Result<(Program, TypeMap), FrontendError> {
    let program = parse(source)?;
    let types = SemanticAnalyzer::new().analyze(&program)?;
    Ok((program, types))
}
