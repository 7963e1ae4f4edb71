//! Expression AST nodes.
//!
//! Every expression carries a `NodeId` (the key into the analyzer's type
//! side table) and the line/column of its leading token.

use super::node_id::NodeId;
use super::ops::{BinaryOp, UnaryOp};
use super::types::Type;

/// Expression types.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Binary(BinaryExpr),
    Unary(UnaryExpr),
    Assign(AssignExpr),
    Call(CallExpr),
    FieldAccess(FieldAccessExpr),
    ArrayAccess(ArrayAccessExpr),
    New(NewExpr),
    IntLiteral(IntLiteral),
    BoolLiteral(BoolLiteral),
    StringLiteral(StringLiteral),
    NullLiteral(NullLiteral),
    Identifier(IdentifierExpr),
    This(ThisExpr),
}

impl Expr {
    pub fn id(&self) -> NodeId {
        match self {
            Expr::Binary(e) => e.id,
            Expr::Unary(e) => e.id,
            Expr::Assign(e) => e.id,
            Expr::Call(e) => e.id,
            Expr::FieldAccess(e) => e.id,
            Expr::ArrayAccess(e) => e.id,
            Expr::New(e) => e.id,
            Expr::IntLiteral(e) => e.id,
            Expr::BoolLiteral(e) => e.id,
            Expr::StringLiteral(e) => e.id,
            Expr::NullLiteral(e) => e.id,
            Expr::Identifier(e) => e.id,
            Expr::This(e) => e.id,
        }
    }

    pub fn position(&self) -> (u32, u32) {
        match self {
            Expr::Binary(e) => (e.line, e.column),
            Expr::Unary(e) => (e.line, e.column),
            Expr::Assign(e) => (e.line, e.column),
            Expr::Call(e) => (e.line, e.column),
            Expr::FieldAccess(e) => (e.line, e.column),
            Expr::ArrayAccess(e) => (e.line, e.column),
            Expr::New(e) => (e.line, e.column),
            Expr::IntLiteral(e) => (e.line, e.column),
            Expr::BoolLiteral(e) => (e.line, e.column),
            Expr::StringLiteral(e) => (e.line, e.column),
            Expr::NullLiteral(e) => (e.line, e.column),
            Expr::Identifier(e) => (e.line, e.column),
            Expr::This(e) => (e.line, e.column),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub id: NodeId,
    pub left: Box<Expr>,
    pub op: BinaryOp,
    pub right: Box<Expr>,
    pub line: u32,
    pub column: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpr {
    pub id: NodeId,
    pub op: UnaryOp,
    pub operand: Box<Expr>,
    pub line: u32,
    pub column: u32,
}

/// Assignment is an expression; its value is the assigned value.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignExpr {
    pub id: NodeId,
    pub target: Box<Expr>,
    pub value: Box<Expr>,
    pub line: u32,
    pub column: u32,
}

/// A method call. `receiver` is `None` for a bare call (`f(x)`), which is an
/// implicit call on the enclosing class.
#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    pub id: NodeId,
    pub receiver: Option<Box<Expr>>,
    pub method: String,
    pub args: Vec<Expr>,
    pub line: u32,
    pub column: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldAccessExpr {
    pub id: NodeId,
    pub object: Box<Expr>,
    pub field: String,
    pub line: u32,
    pub column: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrayAccessExpr {
    pub id: NodeId,
    pub array: Box<Expr>,
    pub index: Box<Expr>,
    pub line: u32,
    pub column: u32,
}

/// `new T(args...)` or `new T[size]`; the two forms are mutually exclusive.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpr {
    pub id: NodeId,
    pub ty: Type,
    pub init: NewInit,
    pub line: u32,
    pub column: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NewInit {
    Object(Vec<Expr>),
    Array(Box<Expr>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct IntLiteral {
    pub id: NodeId,
    pub value: i32,
    pub line: u32,
    pub column: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoolLiteral {
    pub id: NodeId,
    pub value: bool,
    pub line: u32,
    pub column: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StringLiteral {
    pub id: NodeId,
    pub value: String,
    pub line: u32,
    pub column: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NullLiteral {
    pub id: NodeId,
    pub line: u32,
    pub column: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IdentifierExpr {
    pub id: NodeId,
    pub name: String,
    pub line: u32,
    pub column: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ThisExpr {
    pub id: NodeId,
    pub line: u32,
    pub column: u32,
}
