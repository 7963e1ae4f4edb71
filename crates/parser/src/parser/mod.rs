//! Recursive-descent parser.
//!
//! One token of lookahead, plus bounded lookahead for the two ambiguities in
//! the grammar: field vs. method at class level (`TYPE IDENT LPAREN` means
//! method) and declaration vs. expression statement (type-ish token followed
//! by an identifier means declaration). The first syntax error aborts the
//! whole parse; there is no recovery.

mod expr;
mod stmt;

use crate::ast::*;
use crate::error::ParseError;
use crate::lexer::{Token, TokenKind};
use smallvec::SmallVec;

pub type ParseResult<T> = Result<T, ParseError>;

pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
    ids: NodeIdGenerator,
}

impl Parser {
    /// The token stream must be lexer output: finite and `Eof`-terminated.
    pub fn new(tokens: Vec<Token>) -> Self {
        debug_assert!(matches!(
            tokens.last(),
            Some(Token {
                kind: TokenKind::Eof,
                ..
            })
        ));
        Parser {
            tokens,
            current: 0,
            ids: NodeIdGenerator::new(),
        }
    }

    pub fn parse_program(&mut self) -> ParseResult<Program> {
        let mut classes = Vec::new();
        while !self.is_at_end() {
            classes.push(self.parse_class()?);
        }
        Ok(Program { classes })
    }

    fn parse_class(&mut self) -> ParseResult<ClassDecl> {
        let (line, column) = self.position();
        self.expect(TokenKind::Class, "'class'")?;
        let name = self.expect(TokenKind::Ident, "class name")?.text;
        self.expect(TokenKind::LBrace, "'{'")?;

        let mut fields = Vec::new();
        let mut methods = Vec::new();
        while !self.check(TokenKind::RBrace) && !self.is_at_end() {
            if self.at_type()
                && self.peek_ahead(1).kind == TokenKind::Ident
                && self.peek_ahead(2).kind == TokenKind::LParen
            {
                methods.push(self.parse_method()?);
            } else if self.at_type() {
                fields.push(self.parse_field()?);
            } else {
                return Err(self.unexpected("field or method declaration"));
            }
        }

        self.expect(TokenKind::RBrace, "'}'")?;
        Ok(ClassDecl {
            name,
            fields,
            methods,
            line,
            column,
        })
    }

    fn parse_field(&mut self) -> ParseResult<FieldDecl> {
        let (line, column) = self.position();
        let ty = self.parse_type()?;
        let name = self.expect(TokenKind::Ident, "field name")?.text;

        let initializer = if self.match_kind(TokenKind::Assign) {
            Some(self.parse_expression()?)
        } else {
            None
        };

        self.expect(TokenKind::Semicolon, "';'")?;
        Ok(FieldDecl {
            name,
            ty,
            initializer,
            line,
            column,
        })
    }

    fn parse_method(&mut self) -> ParseResult<MethodDecl> {
        let (line, column) = self.position();
        let return_type = self.parse_type()?;
        let name = self.expect(TokenKind::Ident, "method name")?.text;

        self.expect(TokenKind::LParen, "'('")?;
        let mut params: SmallVec<[Param; 4]> = SmallVec::new();
        if !self.check(TokenKind::RParen) {
            loop {
                let (p_line, p_column) = self.position();
                let ty = self.parse_type()?;
                let p_name = self.expect(TokenKind::Ident, "parameter name")?.text;
                params.push(Param {
                    name: p_name,
                    ty,
                    line: p_line,
                    column: p_column,
                });
                if !self.match_kind(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(TokenKind::RParen, "')'")?;

        let body = self.parse_block()?;
        Ok(MethodDecl {
            name,
            return_type,
            params: params.into_vec(),
            body,
            line,
            column,
        })
    }

    fn parse_type(&mut self) -> ParseResult<Type> {
        let name = if self.match_kind(TokenKind::Int) {
            "int".to_string()
        } else if self.match_kind(TokenKind::Boolean) {
            "boolean".to_string()
        } else if self.match_kind(TokenKind::Void) {
            "void".to_string()
        } else if self.check(TokenKind::Ident) {
            self.advance().text
        } else {
            return Err(self.unexpected("type"));
        };

        // Only an empty bracket pair is part of the type; `new int[3]`
        // leaves its `[` for the size expression.
        let is_array = self.check(TokenKind::LBracket)
            && self.peek_ahead(1).kind == TokenKind::RBracket;
        if is_array {
            self.advance();
            self.advance();
        }
        Ok(Type::new(name, is_array))
    }

    // Token-stream helpers.

    fn at_type(&self) -> bool {
        self.peek().kind.starts_type()
    }

    pub(super) fn next_id(&mut self) -> NodeId {
        self.ids.next()
    }

    pub(super) fn peek(&self) -> &Token {
        &self.tokens[self.current.min(self.tokens.len() - 1)]
    }

    pub(super) fn peek_ahead(&self, offset: usize) -> &Token {
        let pos = self.current + offset;
        &self.tokens[pos.min(self.tokens.len() - 1)]
    }

    pub(super) fn position(&self) -> (u32, u32) {
        let token = self.peek();
        (token.line, token.column)
    }

    pub(super) fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    pub(super) fn match_kind(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.current += 1;
            true
        } else {
            false
        }
    }

    pub(super) fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if !self.is_at_end() {
            self.current += 1;
        }
        token
    }

    pub(super) fn expect(&mut self, kind: TokenKind, expected: &str) -> ParseResult<Token> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(expected))
        }
    }

    pub(super) fn unexpected(&self, expected: &str) -> ParseError {
        let token = self.peek();
        ParseError::UnexpectedToken {
            expected: expected.to_string(),
            found: token.text.clone(),
            line: token.line,
            column: token.column,
        }
    }

    pub(super) fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }
}
