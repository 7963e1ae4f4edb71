//! Code generation error types.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodegenError {
    /// The analyzer recorded no type for an expression the generator needs
    /// one for. Indicates the program was not analyzed, or a pass bug.
    #[error("no resolved type for expression at line {line}, column {column}")]
    MissingType { line: u32, column: u32 },

    #[error("no local slot for variable '{name}' at line {line}, column {column}")]
    UnresolvedLocal {
        name: String,
        line: u32,
        column: u32,
    },

    #[error("cannot resolve method '{owner}.{name}' at line {line}, column {column}")]
    UnknownMethod {
        owner: String,
        name: String,
        line: u32,
        column: u32,
    },

    #[error("cannot assign to this expression (line {line}, column {column})")]
    InvalidAssignTarget { line: u32, column: u32 },
}

pub type CodegenResult<T> = Result<T, CodegenError>;
