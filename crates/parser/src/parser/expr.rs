//! Expression parsing.
//!
//! Precedence, low to high: assignment, logical-or, logical-and, equality,
//! relational, additive, multiplicative, unary prefix, postfix, primary.

use super::{ParseResult, Parser};
use crate::ast::*;
use crate::error::ParseError;
use crate::lexer::TokenKind;
use smallvec::SmallVec;

impl Parser {
    pub(super) fn parse_expression(&mut self) -> ParseResult<Expr> {
        self.parse_assignment()
    }

    /// Right-associative; the right operand recurses back into assignment.
    fn parse_assignment(&mut self) -> ParseResult<Expr> {
        let expr = self.parse_logical_or()?;

        if self.check(TokenKind::Assign) {
            let (line, column) = self.position();
            self.advance();
            let value = self.parse_assignment()?;
            return Ok(Expr::Assign(AssignExpr {
                id: self.next_id(),
                target: Box::new(expr),
                value: Box::new(value),
                line,
                column,
            }));
        }

        Ok(expr)
    }

    fn parse_logical_or(&mut self) -> ParseResult<Expr> {
        let mut expr = self.parse_logical_and()?;
        while self.check(TokenKind::OrOr) {
            let (line, column) = self.position();
            self.advance();
            let right = self.parse_logical_and()?;
            expr = self.binary(expr, BinaryOp::Or, right, line, column);
        }
        Ok(expr)
    }

    fn parse_logical_and(&mut self) -> ParseResult<Expr> {
        let mut expr = self.parse_equality()?;
        while self.check(TokenKind::AndAnd) {
            let (line, column) = self.position();
            self.advance();
            let right = self.parse_equality()?;
            expr = self.binary(expr, BinaryOp::And, right, line, column);
        }
        Ok(expr)
    }

    fn parse_equality(&mut self) -> ParseResult<Expr> {
        let mut expr = self.parse_relational()?;
        loop {
            let op = match self.peek().kind {
                TokenKind::EqEq => BinaryOp::Eq,
                TokenKind::NotEq => BinaryOp::Ne,
                _ => break,
            };
            let (line, column) = self.position();
            self.advance();
            let right = self.parse_relational()?;
            expr = self.binary(expr, op, right, line, column);
        }
        Ok(expr)
    }

    fn parse_relational(&mut self) -> ParseResult<Expr> {
        let mut expr = self.parse_additive()?;
        loop {
            let op = match self.peek().kind {
                TokenKind::Lt => BinaryOp::Lt,
                TokenKind::Gt => BinaryOp::Gt,
                TokenKind::LtEq => BinaryOp::Le,
                TokenKind::GtEq => BinaryOp::Ge,
                _ => break,
            };
            let (line, column) = self.position();
            self.advance();
            let right = self.parse_additive()?;
            expr = self.binary(expr, op, right, line, column);
        }
        Ok(expr)
    }

    fn parse_additive(&mut self) -> ParseResult<Expr> {
        let mut expr = self.parse_multiplicative()?;
        loop {
            let op = match self.peek().kind {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Minus => BinaryOp::Sub,
                _ => break,
            };
            let (line, column) = self.position();
            self.advance();
            let right = self.parse_multiplicative()?;
            expr = self.binary(expr, op, right, line, column);
        }
        Ok(expr)
    }

    fn parse_multiplicative(&mut self) -> ParseResult<Expr> {
        let mut expr = self.parse_unary()?;
        loop {
            let op = match self.peek().kind {
                TokenKind::Star => BinaryOp::Mul,
                TokenKind::Slash => BinaryOp::Div,
                TokenKind::Percent => BinaryOp::Mod,
                _ => break,
            };
            let (line, column) = self.position();
            self.advance();
            let right = self.parse_unary()?;
            expr = self.binary(expr, op, right, line, column);
        }
        Ok(expr)
    }

    fn parse_unary(&mut self) -> ParseResult<Expr> {
        let (line, column) = self.position();
        let op = match self.peek().kind {
            TokenKind::Minus => Some(UnaryOp::Neg),
            TokenKind::Not => Some(UnaryOp::Not),
            _ => None,
        };
        if let Some(op) = op {
            self.advance();
            let operand = self.parse_unary()?;
            return Ok(Expr::Unary(UnaryExpr {
                id: self.next_id(),
                op,
                operand: Box::new(operand),
                line,
                column,
            }));
        }
        self.parse_postfix()
    }

    /// Field access, method call and array index, chainable in any order.
    fn parse_postfix(&mut self) -> ParseResult<Expr> {
        let mut expr = self.parse_primary()?;

        loop {
            let (line, column) = self.position();
            if self.match_kind(TokenKind::Dot) {
                let name = self.expect(TokenKind::Ident, "member name")?.text;
                if self.match_kind(TokenKind::LParen) {
                    let args = self.parse_arguments()?;
                    self.expect(TokenKind::RParen, "')'")?;
                    expr = Expr::Call(CallExpr {
                        id: self.next_id(),
                        receiver: Some(Box::new(expr)),
                        method: name,
                        args,
                        line,
                        column,
                    });
                } else {
                    expr = Expr::FieldAccess(FieldAccessExpr {
                        id: self.next_id(),
                        object: Box::new(expr),
                        field: name,
                        line,
                        column,
                    });
                }
            } else if self.match_kind(TokenKind::LBracket) {
                let index = self.parse_expression()?;
                self.expect(TokenKind::RBracket, "']'")?;
                expr = Expr::ArrayAccess(ArrayAccessExpr {
                    id: self.next_id(),
                    array: Box::new(expr),
                    index: Box::new(index),
                    line,
                    column,
                });
            } else {
                break;
            }
        }

        Ok(expr)
    }

    fn parse_primary(&mut self) -> ParseResult<Expr> {
        let (line, column) = self.position();

        match self.peek().kind {
            TokenKind::Number => {
                let token = self.advance();
                let value = token.text.parse::<i32>().map_err(|_| {
                    ParseError::IntegerOutOfRange {
                        text: token.text.clone(),
                        line,
                        column,
                    }
                })?;
                Ok(Expr::IntLiteral(IntLiteral {
                    id: self.next_id(),
                    value,
                    line,
                    column,
                }))
            }
            TokenKind::True | TokenKind::False => {
                let value = self.advance().kind == TokenKind::True;
                Ok(Expr::BoolLiteral(BoolLiteral {
                    id: self.next_id(),
                    value,
                    line,
                    column,
                }))
            }
            TokenKind::Null => {
                self.advance();
                Ok(Expr::NullLiteral(NullLiteral {
                    id: self.next_id(),
                    line,
                    column,
                }))
            }
            TokenKind::String => {
                let value = self.advance().text;
                Ok(Expr::StringLiteral(StringLiteral {
                    id: self.next_id(),
                    value,
                    line,
                    column,
                }))
            }
            TokenKind::This => {
                self.advance();
                Ok(Expr::This(ThisExpr {
                    id: self.next_id(),
                    line,
                    column,
                }))
            }
            TokenKind::New => self.parse_new(),
            TokenKind::Ident => {
                let name = self.advance().text;
                if self.match_kind(TokenKind::LParen) {
                    let args = self.parse_arguments()?;
                    self.expect(TokenKind::RParen, "')'")?;
                    return Ok(Expr::Call(CallExpr {
                        id: self.next_id(),
                        receiver: None,
                        method: name,
                        args,
                        line,
                        column,
                    }));
                }
                Ok(Expr::Identifier(IdentifierExpr {
                    id: self.next_id(),
                    name,
                    line,
                    column,
                }))
            }
            TokenKind::LParen => {
                self.advance();
                let expr = self.parse_expression()?;
                self.expect(TokenKind::RParen, "')'")?;
                Ok(expr)
            }
            _ => Err(self.unexpected("expression")),
        }
    }

    /// `new T[size]` (array creation) or `new T(args...)` (object creation);
    /// exactly one of the two forms.
    fn parse_new(&mut self) -> ParseResult<Expr> {
        let (line, column) = self.position();
        self.expect(TokenKind::New, "'new'")?;
        let ty = self.parse_type()?;

        if self.match_kind(TokenKind::LBracket) {
            let size = self.parse_expression()?;
            self.expect(TokenKind::RBracket, "']'")?;
            return Ok(Expr::New(NewExpr {
                id: self.next_id(),
                ty: Type::new(ty.name, true),
                init: NewInit::Array(Box::new(size)),
                line,
                column,
            }));
        }

        if self.match_kind(TokenKind::LParen) {
            let args = self.parse_arguments()?;
            self.expect(TokenKind::RParen, "')'")?;
            return Ok(Expr::New(NewExpr {
                id: self.next_id(),
                ty,
                init: NewInit::Object(args),
                line,
                column,
            }));
        }

        Err(ParseError::MalformedNew { line, column })
    }

    fn parse_arguments(&mut self) -> ParseResult<Vec<Expr>> {
        let mut args: SmallVec<[Expr; 4]> = SmallVec::new();
        if !self.check(TokenKind::RParen) {
            loop {
                args.push(self.parse_expression()?);
                if !self.match_kind(TokenKind::Comma) {
                    break;
                }
            }
        }
        Ok(args.into_vec())
    }

    fn binary(&mut self, left: Expr, op: BinaryOp, right: Expr, line: u32, column: u32) -> Expr {
        Expr::Binary(BinaryExpr {
            id: self.next_id(),
            left: Box::new(left),
            op,
            right: Box::new(right),
            line,
            column,
        })
    }
}
