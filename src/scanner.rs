use std::fmt;

use crate::diagnostics::Diagnostics;
use crate::token::{self, Literal, Token, TokenKind};

/// Classifies a scanner error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanErrorKind {
    /// Character that cannot start any token.
    UnexpectedCharacter(char),
    /// String literal still open at end of input.
    UnterminatedString,
}

impl fmt::Display for ScanErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedCharacter(ch) => {
                write!(f, "Unexpected character '{ch}'.")
            }
            Self::UnterminatedString => {
                write!(f, "Unterminated string.")
            }
        }
    }
}

/// Error produced during scanning.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("[line {line}] Error: {kind}")]
pub struct ScanError {
    pub kind: ScanErrorKind,
    pub line: usize,
}

/// Scan Lox source text into a sequence of tokens.
///
/// Scanning never stops early: unexpected characters and unterminated
/// strings are reported to `diagnostics` and skipped. The result always
/// ends with exactly one [`TokenKind::Eof`] token.
pub fn scan(source: &str, diagnostics: &mut Diagnostics) -> Vec<Token> {
    let tokens = Scanner::new(source, diagnostics).scan();
    tracing::debug!("Scanned {} tokens", tokens.len());
    tokens
}

struct Scanner<'a> {
    source: &'a str,
    input: &'a [u8],
    diagnostics: &'a mut Diagnostics,
    tokens: Vec<Token>,
    start: usize,
    current: usize,
    line: usize,
}

impl<'a> Scanner<'a> {
    fn new(source: &'a str, diagnostics: &'a mut Diagnostics) -> Self {
        Self {
            source,
            input: source.as_bytes(),
            diagnostics,
            tokens: Vec::new(),
            start: 0,
            current: 0,
            line: 1,
        }
    }

    fn scan(mut self) -> Vec<Token> {
        while !self.is_at_end() {
            // beginning of the next lexeme
            self.start = self.current;
            self.scan_token();
        }

        self.tokens.push(Token::eof(self.line));
        self.tokens
    }

    fn scan_token(&mut self) {
        let ch = self.input[self.current];
        self.current += 1;

        match ch {
            b'(' => self.add_token(TokenKind::LeftParen),
            b')' => self.add_token(TokenKind::RightParen),
            b'{' => self.add_token(TokenKind::LeftBrace),
            b'}' => self.add_token(TokenKind::RightBrace),
            b',' => self.add_token(TokenKind::Comma),
            b'.' => self.add_token(TokenKind::Dot),
            b'-' => self.add_token(TokenKind::Minus),
            b'+' => self.add_token(TokenKind::Plus),
            b';' => self.add_token(TokenKind::Semicolon),
            b'*' => self.add_token(TokenKind::Star),
            b'!' => self.add_either(b'=', TokenKind::BangEqual, TokenKind::Bang),
            b'=' => self.add_either(b'=', TokenKind::EqualEqual, TokenKind::Equal),
            b'<' => self.add_either(b'=', TokenKind::LessEqual, TokenKind::Less),
            b'>' => self.add_either(b'=', TokenKind::GreaterEqual, TokenKind::Greater),
            b'/' => {
                if self.match_next(b'/') {
                    // comment runs to end of line
                    while self.peek().is_some_and(|c| c != b'\n') {
                        self.current += 1;
                    }
                } else {
                    self.add_token(TokenKind::Slash);
                }
            }
            b' ' | b'\r' | b'\t' => {}
            b'\n' => self.line += 1,
            b'"' => self.read_string(),
            b'0'..=b'9' => self.read_number(),
            c if is_alpha(c) => self.read_identifier(),
            _ => self.unexpected_character(),
        }
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.input.len()
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.current).copied()
    }

    fn peek_next(&self) -> Option<u8> {
        self.input.get(self.current + 1).copied()
    }

    fn match_next(&mut self, expected: u8) -> bool {
        if self.peek() == Some(expected) {
            self.current += 1;
            true
        } else {
            false
        }
    }

    fn lexeme(&self) -> &'a str {
        &self.source[self.start..self.current]
    }

    fn add_token(&mut self, kind: TokenKind) {
        self.push(kind, None);
    }

    fn add_either(&mut self, next: u8, matched: TokenKind, single: TokenKind) {
        let kind = if self.match_next(next) { matched } else { single };
        self.add_token(kind);
    }

    fn push(&mut self, kind: TokenKind, literal: Option<Literal>) {
        self.tokens.push(Token {
            kind,
            lexeme: self.lexeme().to_string(),
            literal,
            line: self.line,
        });
    }

    fn error(&mut self, kind: ScanErrorKind) {
        self.diagnostics.report(ScanError {
            kind,
            line: self.line,
        });
    }

    fn unexpected_character(&mut self) {
        // step over the whole character, not just its first byte
        let ch = self.source[self.start..].chars().next().unwrap_or('\u{FFFD}');
        self.current = self.start + ch.len_utf8();
        self.error(ScanErrorKind::UnexpectedCharacter(ch));
    }

    fn read_string(&mut self) {
        while let Some(c) = self.peek() {
            if c == b'"' {
                break;
            }
            if c == b'\n' {
                self.line += 1;
            }
            self.current += 1;
        }

        if self.is_at_end() {
            self.error(ScanErrorKind::UnterminatedString);
            return;
        }

        self.current += 1; // closing quote

        let value = &self.source[self.start + 1..self.current - 1];
        self.push(TokenKind::String, Some(Literal::Str(value.to_string())));
    }

    fn read_number(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.current += 1;
        }

        // fractional part needs a digit after the dot
        if self.peek() == Some(b'.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            self.current += 1;
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.current += 1;
            }
        }

        // digits with an optional fraction always decode
        let value = self.lexeme().parse::<f64>().unwrap_or_default();
        self.push(TokenKind::Number, Some(Literal::Number(value)));
    }

    fn read_identifier(&mut self) {
        while self.peek().is_some_and(is_alphanumeric) {
            self.current += 1;
        }

        let kind = token::keyword(self.lexeme()).unwrap_or(TokenKind::Identifier);
        self.add_token(kind);
    }
}

const fn is_alpha(c: u8) -> bool {
    c.is_ascii_alphabetic() || c == b'_'
}

const fn is_alphanumeric(c: u8) -> bool {
    is_alpha(c) || c.is_ascii_digit()
}
