//! Token definition and types.

/// A positioned token with its original lexeme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub line: u32,
    pub column: u32,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, line: u32, column: u32) -> Self {
        Token {
            kind,
            text: text.into(),
            line,
            column,
        }
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:?} {:?} at {}:{}",
            self.kind, self.text, self.line, self.column
        )
    }
}

/// Lexical token kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Keywords
    Class,
    Public,
    Private,
    Static,
    Void,
    Int,
    Boolean,
    If,
    Else,
    While,
    For,
    Return,
    New,
    This,
    True,
    False,
    Null,

    // Literals and identifiers
    Number,
    String,
    Ident,

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Assign,
    EqEq,
    NotEq,
    Lt,
    Gt,
    LtEq,
    GtEq,
    AndAnd,
    OrOr,
    Not,
    PlusPlus,
    MinusMinus,

    // Delimiters
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Semicolon,
    Comma,
    Dot,

    // Special
    Eof,
    Unknown,
}

impl TokenKind {
    /// Keyword lookup; identifiers that match a keyword exactly are
    /// reclassified by the lexer.
    pub fn keyword(text: &str) -> Option<TokenKind> {
        let kind = match text {
            "class" => TokenKind::Class,
            "public" => TokenKind::Public,
            "private" => TokenKind::Private,
            "static" => TokenKind::Static,
            "void" => TokenKind::Void,
            "int" => TokenKind::Int,
            "boolean" => TokenKind::Boolean,
            "if" => TokenKind::If,
            "else" => TokenKind::Else,
            "while" => TokenKind::While,
            "for" => TokenKind::For,
            "return" => TokenKind::Return,
            "new" => TokenKind::New,
            "this" => TokenKind::This,
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            "null" => TokenKind::Null,
            _ => return None,
        };
        Some(kind)
    }

    /// Tokens that may begin a type: the primitive keywords, `void`, or a
    /// class name.
    pub fn starts_type(self) -> bool {
        matches!(
            self,
            TokenKind::Int | TokenKind::Boolean | TokenKind::Void | TokenKind::Ident
        )
    }
}
