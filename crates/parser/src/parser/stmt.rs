//! Statement parsing.

use super::{ParseResult, Parser};
use crate::ast::*;
use crate::lexer::TokenKind;

impl Parser {
    pub(super) fn parse_block(&mut self) -> ParseResult<Block> {
        let (line, column) = self.position();
        self.expect(TokenKind::LBrace, "'{'")?;

        let mut statements = Vec::new();
        while !self.check(TokenKind::RBrace) && !self.is_at_end() {
            statements.push(self.parse_statement()?);
        }

        self.expect(TokenKind::RBrace, "'}'")?;
        Ok(Block {
            statements,
            line,
            column,
        })
    }

    pub(super) fn parse_statement(&mut self) -> ParseResult<Stmt> {
        match self.peek().kind {
            TokenKind::If => self.parse_if(),
            TokenKind::While => self.parse_while(),
            TokenKind::For => self.parse_for(),
            TokenKind::Return => self.parse_return(),
            TokenKind::LBrace => Ok(Stmt::Block(self.parse_block()?)),
            kind if kind.starts_type() && self.peek_ahead(1).kind == TokenKind::Ident => {
                self.parse_var_decl()
            }
            _ => self.parse_expr_stmt(),
        }
    }

    fn parse_if(&mut self) -> ParseResult<Stmt> {
        let (line, column) = self.position();
        self.expect(TokenKind::If, "'if'")?;
        self.expect(TokenKind::LParen, "'('")?;
        let condition = self.parse_expression()?;
        self.expect(TokenKind::RParen, "')'")?;

        // Parsing the then-branch before looking for `else` binds a dangling
        // else to the nearest unmatched if.
        let then_stmt = Box::new(self.parse_statement()?);
        let else_stmt = if self.match_kind(TokenKind::Else) {
            Some(Box::new(self.parse_statement()?))
        } else {
            None
        };

        Ok(Stmt::If(IfStmt {
            condition,
            then_stmt,
            else_stmt,
            line,
            column,
        }))
    }

    fn parse_while(&mut self) -> ParseResult<Stmt> {
        let (line, column) = self.position();
        self.expect(TokenKind::While, "'while'")?;
        self.expect(TokenKind::LParen, "'('")?;
        let condition = self.parse_expression()?;
        self.expect(TokenKind::RParen, "')'")?;
        let body = Box::new(self.parse_statement()?);

        Ok(Stmt::While(WhileStmt {
            condition,
            body,
            line,
            column,
        }))
    }

    fn parse_for(&mut self) -> ParseResult<Stmt> {
        let (line, column) = self.position();
        self.expect(TokenKind::For, "'for'")?;
        self.expect(TokenKind::LParen, "'('")?;

        let init = if self.match_kind(TokenKind::Semicolon) {
            None
        } else if self.peek().kind.starts_type() && self.peek_ahead(1).kind == TokenKind::Ident {
            Some(Box::new(self.parse_var_decl()?))
        } else {
            let (e_line, e_column) = self.position();
            let expr = self.parse_expression()?;
            self.expect(TokenKind::Semicolon, "';'")?;
            Some(Box::new(Stmt::Expr(ExprStmt {
                expr,
                line: e_line,
                column: e_column,
            })))
        };

        let condition = if self.check(TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.expect(TokenKind::Semicolon, "';'")?;

        let update = if self.check(TokenKind::RParen) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.expect(TokenKind::RParen, "')'")?;

        let body = Box::new(self.parse_statement()?);
        Ok(Stmt::For(ForStmt {
            init,
            condition,
            update,
            body,
            line,
            column,
        }))
    }

    fn parse_return(&mut self) -> ParseResult<Stmt> {
        let (line, column) = self.position();
        self.expect(TokenKind::Return, "'return'")?;

        let value = if self.check(TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expression()?)
        };

        self.expect(TokenKind::Semicolon, "';'")?;
        Ok(Stmt::Return(ReturnStmt {
            value,
            line,
            column,
        }))
    }

    fn parse_var_decl(&mut self) -> ParseResult<Stmt> {
        let (line, column) = self.position();
        let ty = self.parse_type()?;
        let name = self.expect(TokenKind::Ident, "variable name")?.text;

        let initializer = if self.match_kind(TokenKind::Assign) {
            Some(self.parse_expression()?)
        } else {
            None
        };

        self.expect(TokenKind::Semicolon, "';'")?;
        Ok(Stmt::VarDecl(VarDeclStmt {
            name,
            ty,
            initializer,
            line,
            column,
        }))
    }

    fn parse_expr_stmt(&mut self) -> ParseResult<Stmt> {
        let (line, column) = self.position();
        let expr = self.parse_expression()?;
        self.expect(TokenKind::Semicolon, "';'")?;
        Ok(Stmt::Expr(ExprStmt { expr, line, column }))
    }
}
