use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;

/// Token kinds produced by the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Single-character tokens.
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    Comma,
    Dot,
    Minus,
    Plus,
    Semicolon,
    Slash,
    Star,

    // One or two character tokens.
    Bang,
    BangEqual,
    Equal,
    EqualEqual,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,

    // Literals.
    Identifier,
    String,
    Number,

    // Keywords.
    And,
    Class,
    Else,
    False,
    Fun,
    For,
    If,
    Nil,
    Or,
    Print,
    Return,
    Super,
    This,
    True,
    Var,
    While,

    Eof,
}

static KEYWORDS: Lazy<HashMap<&'static str, TokenKind>> = Lazy::new(|| {
    HashMap::from([
        ("and", TokenKind::And),
        ("class", TokenKind::Class),
        ("else", TokenKind::Else),
        ("false", TokenKind::False),
        ("for", TokenKind::For),
        ("fun", TokenKind::Fun),
        ("if", TokenKind::If),
        ("nil", TokenKind::Nil),
        ("or", TokenKind::Or),
        ("print", TokenKind::Print),
        ("return", TokenKind::Return),
        ("super", TokenKind::Super),
        ("this", TokenKind::This),
        ("true", TokenKind::True),
        ("var", TokenKind::Var),
        ("while", TokenKind::While),
    ])
});

/// Look up a reserved word. Matching is exact and case-sensitive.
#[must_use]
pub fn keyword(text: &str) -> Option<TokenKind> {
    KEYWORDS.get(text).copied()
}

impl TokenKind {
    /// Fixed source text of punctuation, operator, and keyword kinds.
    ///
    /// Returns `None` for kinds whose lexeme varies (literals,
    /// identifiers) and for end of input.
    #[must_use]
    pub const fn lexeme(self) -> Option<&'static str> {
        let text = match self {
            Self::LeftParen => "(",
            Self::RightParen => ")",
            Self::LeftBrace => "{",
            Self::RightBrace => "}",
            Self::Comma => ",",
            Self::Dot => ".",
            Self::Minus => "-",
            Self::Plus => "+",
            Self::Semicolon => ";",
            Self::Slash => "/",
            Self::Star => "*",
            Self::Bang => "!",
            Self::BangEqual => "!=",
            Self::Equal => "=",
            Self::EqualEqual => "==",
            Self::Greater => ">",
            Self::GreaterEqual => ">=",
            Self::Less => "<",
            Self::LessEqual => "<=",
            Self::And => "and",
            Self::Class => "class",
            Self::Else => "else",
            Self::False => "false",
            Self::Fun => "fun",
            Self::For => "for",
            Self::If => "if",
            Self::Nil => "nil",
            Self::Or => "or",
            Self::Print => "print",
            Self::Return => "return",
            Self::Super => "super",
            Self::This => "this",
            Self::True => "true",
            Self::Var => "var",
            Self::While => "while",
            Self::Identifier | Self::String | Self::Number | Self::Eof => return None,
        };
        Some(text)
    }

    /// Keywords that begin a statement; the parser resynchronizes on them.
    #[must_use]
    pub const fn starts_statement(self) -> bool {
        matches!(
            self,
            Self::Class
                | Self::Fun
                | Self::Var
                | Self::For
                | Self::If
                | Self::While
                | Self::Print
                | Self::Return
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.lexeme() {
            Some(text) => f.write_str(text),
            None => write!(f, "{self:?}"),
        }
    }
}

/// Decoded value of a number or string token.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Number(f64),
    Str(String),
}

/// A single token with its kind, source text, decoded literal, and line.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub literal: Option<Literal>,
    pub line: usize,
}

impl Token {
    /// Create a token without a literal payload.
    #[must_use]
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: usize) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            literal: None,
            line,
        }
    }

    /// End-of-input marker: empty lexeme on the final line.
    #[must_use]
    pub const fn eof(line: usize) -> Self {
        Self {
            kind: TokenKind::Eof,
            lexeme: String::new(),
            literal: None,
            line,
        }
    }

    /// Operator or keyword token carrying its canonical lexeme.
    #[must_use]
    pub fn symbol(kind: TokenKind, line: usize) -> Self {
        Self::new(kind, kind.lexeme().unwrap_or_default(), line)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.literal {
            Some(Literal::Number(n)) => write!(f, "{:?} {} {n}", self.kind, self.lexeme),
            Some(Literal::Str(s)) => write!(f, "{:?} {} {s}", self.kind, self.lexeme),
            None => write!(f, "{:?} {}", self.kind, self.lexeme),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_lookup() {
        assert_eq!(keyword("nil"), Some(TokenKind::Nil));
        assert_eq!(keyword("while"), Some(TokenKind::While));
        assert_eq!(keyword("Nil"), None);
        assert_eq!(keyword("nils"), None);
    }

    #[test]
    fn keyword_lexemes_round_trip() {
        for (text, kind) in KEYWORDS.iter() {
            assert_eq!(kind.lexeme(), Some(*text));
        }
    }

    #[test]
    fn symbol_token() {
        let token = Token::symbol(TokenKind::GreaterEqual, 3);
        assert_eq!(token.lexeme, ">=");
        assert_eq!(token.line, 3);
        assert!(token.literal.is_none());
    }

    #[test]
    fn statement_keywords() {
        assert!(TokenKind::Var.starts_statement());
        assert!(TokenKind::Return.starts_statement());
        assert!(!TokenKind::Nil.starts_statement());
        assert!(!TokenKind::Semicolon.starts_statement());
    }
}
