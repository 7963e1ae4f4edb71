//! Front-end error types.
//!
//! Each stage fails fast: the first error aborts the remaining pipeline for
//! the current compilation unit. Errors carry the source position of the
//! offending construct so the CLI can report one actionable message.

use crate::ast::Type;
use thiserror::Error;

/// Syntax errors raised by the parser. Carries the expectation and the
/// offending token's lexeme and position.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("expected {expected}, found {found:?} at line {line}, column {column}")]
    UnexpectedToken {
        expected: String,
        found: String,
        line: u32,
        column: u32,
    },

    #[error("expected '(' or '[' after 'new' at line {line}, column {column}")]
    MalformedNew { line: u32, column: u32 },

    #[error("integer literal {text:?} out of range at line {line}, column {column}")]
    IntegerOutOfRange { text: String, line: u32, column: u32 },
}

impl ParseError {
    pub fn position(&self) -> (u32, u32) {
        match self {
            ParseError::UnexpectedToken { line, column, .. }
            | ParseError::MalformedNew { line, column }
            | ParseError::IntegerOutOfRange { line, column, .. } => (*line, *column),
        }
    }
}

/// Scope and type errors raised by the semantic analyzer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SemanticError {
    #[error("duplicate class '{name}'")]
    DuplicateClass { name: String },

    #[error("duplicate field '{name}' at line {line}, column {column}")]
    DuplicateField { name: String, line: u32, column: u32 },

    #[error("duplicate parameter '{name}' at line {line}, column {column}")]
    DuplicateParameter { name: String, line: u32, column: u32 },

    #[error("duplicate variable '{name}' at line {line}, column {column}")]
    DuplicateVariable { name: String, line: u32, column: u32 },

    #[error("undefined variable '{name}' at line {line}, column {column}")]
    UndefinedVariable { name: String, line: u32, column: u32 },

    #[error("type mismatch in {context}: expected {expected}, found {found} (line {line}, column {column})")]
    TypeMismatch {
        context: &'static str,
        expected: Type,
        found: Type,
        line: u32,
        column: u32,
    },

    #[error("{op} requires {expected} operands, found {found} (line {line}, column {column})")]
    InvalidOperand {
        op: String,
        expected: Type,
        found: Type,
        line: u32,
        column: u32,
    },

    #[error("incomparable types {left} and {right} (line {line}, column {column})")]
    IncomparableTypes {
        left: Type,
        right: Type,
        line: u32,
        column: u32,
    },

    #[error("{construct} condition must be boolean, found {found} (line {line}, column {column})")]
    ConditionNotBoolean {
        construct: &'static str,
        found: Type,
        line: u32,
        column: u32,
    },

    #[error("missing return value in method returning {expected} (line {line}, column {column})")]
    MissingReturnValue {
        expected: Type,
        line: u32,
        column: u32,
    },

    #[error("array index must be int, found {found} (line {line}, column {column})")]
    IndexNotInt { found: Type, line: u32, column: u32 },

    #[error("cannot index non-array type {found} (line {line}, column {column})")]
    NotAnArray { found: Type, line: u32, column: u32 },

    #[error("array size must be int, found {found} (line {line}, column {column})")]
    ArraySizeNotInt { found: Type, line: u32, column: u32 },
}
