use std::fmt;

use crate::ast::Expr;
use crate::diagnostics::Diagnostics;
use crate::token::{Token, TokenKind};
use crate::value::Value;

/// Classifies a parser error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// No grammar alternative starts with the current token.
    ExpectExpression,
    /// A group was opened but not closed with `)`.
    ExpectRightParen,
    /// Tokens remain after a complete expression.
    ExpectEndOfExpression,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExpectExpression => write!(f, "Expect expression."),
            Self::ExpectRightParen => write!(f, "Expect ')' after expression."),
            Self::ExpectEndOfExpression => write!(f, "Expect end of expression."),
        }
    }
}

/// Error produced during parsing, carrying the offending token.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("[line {}] Error{}: {kind}", token.line, location(token))]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub token: Token,
}

impl ParseError {
    /// ` at end` for the end-of-input token, ` at '<lexeme>'` otherwise.
    #[must_use]
    pub fn location(&self) -> String {
        location(&self.token)
    }
}

fn location(token: &Token) -> String {
    if token.kind == TokenKind::Eof {
        " at end".to_string()
    } else {
        format!(" at '{}'", token.lexeme)
    }
}

/// Parse a token sequence into a single expression.
///
/// Returns `None` when the tokens do not form an expression. The
/// syntax error has already been reported to `diagnostics` by then.
pub fn parse(tokens: &[Token], diagnostics: &mut Diagnostics) -> Option<Expr> {
    match Parser::new(tokens, diagnostics).parse() {
        Ok(expr) => {
            tracing::debug!(nodes = expr.node_count(), "parsed expression");
            Some(expr)
        }
        Err(e) => {
            tracing::debug!(error = %e, "parse failed");
            None
        }
    }
}

/// Recursive-descent parser over a scanned token sequence.
///
/// Each grammar rule is one method; binary levels loop so that operators
/// associate to the left. Errors are reported to the diagnostics sink at
/// the point they are raised and then propagated as `Err`.
pub struct Parser<'a> {
    tokens: &'a [Token],
    diagnostics: &'a mut Diagnostics,
    eof: Token,
    current: usize,
}

impl<'a> Parser<'a> {
    /// The token slice need not end with an end-of-input token; one is
    /// synthesized after the last token if missing.
    pub fn new(tokens: &'a [Token], diagnostics: &'a mut Diagnostics) -> Self {
        let eof = match tokens.last() {
            Some(last) if last.kind == TokenKind::Eof => last.clone(),
            Some(last) => Token::eof(last.line),
            None => Token::eof(1),
        };
        Self {
            tokens,
            diagnostics,
            eof,
            current: 0,
        }
    }

    /// Parse the whole token sequence as one expression.
    ///
    /// # Errors
    ///
    /// Returns the first `ParseError`, which is also reported.
    pub fn parse(&mut self) -> Result<Expr, ParseError> {
        let expr = self.expression()?;
        if !self.is_at_end() {
            return Err(self.error(ParseErrorKind::ExpectEndOfExpression));
        }
        Ok(expr)
    }

    /// `expression := equality`
    ///
    /// # Errors
    ///
    /// Returns the first `ParseError`, which is also reported.
    pub fn expression(&mut self) -> Result<Expr, ParseError> {
        self.equality()
    }

    fn equality(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.comparison()?;

        while let Some(operator) = self.match_any(&[TokenKind::BangEqual, TokenKind::EqualEqual]) {
            let right = self.comparison()?;
            expr = binary(expr, operator, right);
        }

        Ok(expr)
    }

    fn comparison(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.term()?;

        while let Some(operator) = self.match_any(&[
            TokenKind::Greater,
            TokenKind::GreaterEqual,
            TokenKind::Less,
            TokenKind::LessEqual,
        ]) {
            let right = self.term()?;
            expr = binary(expr, operator, right);
        }

        Ok(expr)
    }

    fn term(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.factor()?;

        while let Some(operator) = self.match_any(&[TokenKind::Minus, TokenKind::Plus]) {
            let right = self.factor()?;
            expr = binary(expr, operator, right);
        }

        Ok(expr)
    }

    fn factor(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.unary()?;

        while let Some(operator) = self.match_any(&[TokenKind::Slash, TokenKind::Star]) {
            let right = self.unary()?;
            expr = binary(expr, operator, right);
        }

        Ok(expr)
    }

    fn unary(&mut self) -> Result<Expr, ParseError> {
        if let Some(operator) = self.match_any(&[TokenKind::Bang, TokenKind::Minus]) {
            let operand = self.unary()?;
            return Ok(Expr::Unary {
                operator,
                operand: Box::new(operand),
            });
        }

        self.primary()
    }

    fn primary(&mut self) -> Result<Expr, ParseError> {
        let literal = match self.peek().kind {
            TokenKind::False => Value::Bool(false),
            TokenKind::True => Value::Bool(true),
            TokenKind::Nil => Value::Nil,
            TokenKind::Number | TokenKind::String => {
                self.peek().literal.clone().map_or(Value::Nil, Value::from)
            }
            TokenKind::LeftParen => {
                self.advance();
                let inner = self.expression()?;
                self.consume(TokenKind::RightParen, ParseErrorKind::ExpectRightParen)?;
                return Ok(Expr::Grouping(Box::new(inner)));
            }
            _ => return Err(self.error(ParseErrorKind::ExpectExpression)),
        };

        self.advance();
        Ok(Expr::Literal(literal))
    }

    /// Skip tokens until just past a `;` or just before a keyword that
    /// starts a statement, so parsing can resume after an error.
    pub fn synchronize(&mut self) {
        self.advance();

        while !self.is_at_end() {
            if self.previous().kind == TokenKind::Semicolon {
                return;
            }
            if self.peek().kind.starts_statement() {
                return;
            }
            self.advance();
        }
    }

    /// The token the parser is looking at.
    #[must_use]
    pub fn peek(&self) -> &Token {
        self.tokens.get(self.current).unwrap_or(&self.eof)
    }

    fn previous(&self) -> &Token {
        self.current
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .unwrap_or(&self.eof)
    }

    fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    fn check(&self, kind: TokenKind) -> bool {
        !self.is_at_end() && self.peek().kind == kind
    }

    fn advance(&mut self) -> Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.previous().clone()
    }

    fn match_any(&mut self, kinds: &[TokenKind]) -> Option<Token> {
        kinds
            .iter()
            .any(|&kind| self.check(kind))
            .then(|| self.advance())
    }

    fn consume(&mut self, kind: TokenKind, error: ParseErrorKind) -> Result<Token, ParseError> {
        if self.check(kind) {
            return Ok(self.advance());
        }
        Err(self.error(error))
    }

    fn error(&mut self, kind: ParseErrorKind) -> ParseError {
        let error = ParseError {
            kind,
            token: self.peek().clone(),
        };
        self.diagnostics.report(error.clone());
        error
    }
}

fn binary(left: Expr, operator: Token, right: Expr) -> Expr {
    Expr::Binary {
        left: Box::new(left),
        operator,
        right: Box::new(right),
    }
}
