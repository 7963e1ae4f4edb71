//! Lexical analysis.
//!
//! The lexer is total: every input turns into a finite token sequence ending
//! in exactly one `Eof` token. Malformed input degrades (an unrecognized
//! character becomes an `Unknown` token, an unterminated string runs to
//! end-of-input) instead of failing.

mod token;

pub use token::{Token, TokenKind};

/// Hand-written cursor lexer over the full source text.
pub struct Lexer {
    chars: Vec<char>,
    pos: usize,
    line: u32,
    column: u32,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        Lexer {
            chars: source.chars().collect(),
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    /// Consume the whole input and return the token sequence, terminated by
    /// a single `Eof` token.
    pub fn tokenize(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done {
                return tokens;
            }
        }
    }

    fn next_token(&mut self) -> Token {
        while let Some(c) = self.current() {
            if c.is_whitespace() {
                self.skip_whitespace();
                continue;
            }
            if c == '/' && self.peek() == Some('/') {
                self.skip_line_comment();
                continue;
            }
            if c == '/' && self.peek() == Some('*') {
                self.skip_block_comment();
                continue;
            }
            if c.is_alphabetic() || c == '_' {
                return self.identifier();
            }
            if c.is_ascii_digit() {
                return self.number();
            }
            if c == '"' {
                return self.string();
            }
            return self.operator();
        }
        Token::new(TokenKind::Eof, "", self.line, self.column)
    }

    fn current(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos + 1).copied()
    }

    fn advance(&mut self) {
        if self.current() == Some('\n') {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        self.pos += 1;
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.current(), Some(c) if c.is_whitespace()) {
            self.advance();
        }
    }

    fn skip_line_comment(&mut self) {
        while matches!(self.current(), Some(c) if c != '\n') {
            self.advance();
        }
    }

    fn skip_block_comment(&mut self) {
        self.advance(); // '/'
        self.advance(); // '*'
        while let Some(c) = self.current() {
            if c == '*' && self.peek() == Some('/') {
                self.advance();
                self.advance();
                break;
            }
            self.advance();
        }
    }

    fn identifier(&mut self) -> Token {
        let (line, column) = (self.line, self.column);
        let mut text = String::new();
        while let Some(c) = self.current() {
            if c.is_alphanumeric() || c == '_' {
                text.push(c);
                self.advance();
            } else {
                break;
            }
        }
        let kind = TokenKind::keyword(&text).unwrap_or(TokenKind::Ident);
        Token::new(kind, text, line, column)
    }

    fn number(&mut self) -> Token {
        let (line, column) = (self.line, self.column);
        let mut text = String::new();
        while let Some(c) = self.current() {
            if c.is_ascii_digit() {
                text.push(c);
                self.advance();
            } else {
                break;
            }
        }
        Token::new(TokenKind::Number, text, line, column)
    }

    fn string(&mut self) -> Token {
        let (line, column) = (self.line, self.column);
        let mut text = String::new();
        self.advance(); // opening quote
        while let Some(c) = self.current() {
            if c == '"' {
                break;
            }
            if c == '\\' {
                self.advance();
                if let Some(escaped) = self.current() {
                    text.push(match escaped {
                        'n' => '\n',
                        't' => '\t',
                        'r' => '\r',
                        '\\' => '\\',
                        '"' => '"',
                        other => other,
                    });
                    self.advance();
                }
            } else {
                text.push(c);
                self.advance();
            }
        }
        if self.current() == Some('"') {
            self.advance(); // closing quote
        }
        Token::new(TokenKind::String, text, line, column)
    }

    /// Operators and delimiters, longest match first for the two-character
    /// forms.
    fn operator(&mut self) -> Token {
        let (line, column) = (self.line, self.column);
        let c = self.current().unwrap_or('\0');
        self.advance();

        macro_rules! two {
            ($next:literal, $double:expr, $single:expr, $dtext:literal, $stext:literal) => {
                if self.current() == Some($next) {
                    self.advance();
                    Token::new($double, $dtext, line, column)
                } else {
                    Token::new($single, $stext, line, column)
                }
            };
        }

        match c {
            '+' => two!('+', TokenKind::PlusPlus, TokenKind::Plus, "++", "+"),
            '-' => two!('-', TokenKind::MinusMinus, TokenKind::Minus, "--", "-"),
            '*' => Token::new(TokenKind::Star, "*", line, column),
            '/' => Token::new(TokenKind::Slash, "/", line, column),
            '%' => Token::new(TokenKind::Percent, "%", line, column),
            '=' => two!('=', TokenKind::EqEq, TokenKind::Assign, "==", "="),
            '!' => two!('=', TokenKind::NotEq, TokenKind::Not, "!=", "!"),
            '<' => two!('=', TokenKind::LtEq, TokenKind::Lt, "<=", "<"),
            '>' => two!('=', TokenKind::GtEq, TokenKind::Gt, ">=", ">"),
            '&' if self.current() == Some('&') => {
                self.advance();
                Token::new(TokenKind::AndAnd, "&&", line, column)
            }
            '|' if self.current() == Some('|') => {
                self.advance();
                Token::new(TokenKind::OrOr, "||", line, column)
            }
            '(' => Token::new(TokenKind::LParen, "(", line, column),
            ')' => Token::new(TokenKind::RParen, ")", line, column),
            '{' => Token::new(TokenKind::LBrace, "{", line, column),
            '}' => Token::new(TokenKind::RBrace, "}", line, column),
            '[' => Token::new(TokenKind::LBracket, "[", line, column),
            ']' => Token::new(TokenKind::RBracket, "]", line, column),
            ';' => Token::new(TokenKind::Semicolon, ";", line, column),
            ',' => Token::new(TokenKind::Comma, ",", line, column),
            '.' => Token::new(TokenKind::Dot, ".", line, column),
            other => Token::new(TokenKind::Unknown, other.to_string(), line, column),
        }
    }
}
