//! Fluent constructors for building expression trees by hand.
//!
//! Operator tokens are synthesized with their canonical lexeme on line 1.
//!
//! ```
//! use lox_expr::{Expr, render};
//!
//! let expr = Expr::number(123.0)
//!     .negate()
//!     .times(Expr::number(45.67).group());
//! assert_eq!(render(&expr), "(* (- 123) (group 45.67))");
//! ```

use crate::ast::Expr;
use crate::token::{Token, TokenKind};
use crate::value::Value;

impl Expr {
    /// Number literal.
    #[must_use]
    pub const fn number(n: f64) -> Self {
        Self::Literal(Value::Number(n))
    }

    /// String literal.
    #[must_use]
    pub fn string(s: &str) -> Self {
        Self::Literal(Value::Str(s.to_string()))
    }

    /// Boolean literal.
    #[must_use]
    pub const fn boolean(b: bool) -> Self {
        Self::Literal(Value::Bool(b))
    }

    /// `nil` literal.
    #[must_use]
    pub const fn nil() -> Self {
        Self::Literal(Value::Nil)
    }

    /// Wrap in parentheses.
    #[must_use]
    pub fn group(self) -> Self {
        Self::Grouping(Box::new(self))
    }

    /// Prefix operator application.
    #[must_use]
    pub fn unary(operator: TokenKind, operand: Self) -> Self {
        Self::Unary {
            operator: Token::symbol(operator, 1),
            operand: Box::new(operand),
        }
    }

    /// Infix operator application with `self` on the left.
    #[must_use]
    pub fn binary(self, operator: TokenKind, right: Self) -> Self {
        Self::Binary {
            left: Box::new(self),
            operator: Token::symbol(operator, 1),
            right: Box::new(right),
        }
    }

    /// `-self`
    #[must_use]
    pub fn negate(self) -> Self {
        Self::unary(TokenKind::Minus, self)
    }

    /// `!self`
    #[must_use]
    pub fn logical_not(self) -> Self {
        Self::unary(TokenKind::Bang, self)
    }

    #[must_use]
    pub fn plus(self, right: Self) -> Self {
        self.binary(TokenKind::Plus, right)
    }

    #[must_use]
    pub fn minus(self, right: Self) -> Self {
        self.binary(TokenKind::Minus, right)
    }

    #[must_use]
    pub fn times(self, right: Self) -> Self {
        self.binary(TokenKind::Star, right)
    }

    #[must_use]
    pub fn divide(self, right: Self) -> Self {
        self.binary(TokenKind::Slash, right)
    }

    #[must_use]
    pub fn equals(self, right: Self) -> Self {
        self.binary(TokenKind::EqualEqual, right)
    }

    #[must_use]
    pub fn not_equals(self, right: Self) -> Self {
        self.binary(TokenKind::BangEqual, right)
    }

    #[must_use]
    pub fn greater(self, right: Self) -> Self {
        self.binary(TokenKind::Greater, right)
    }

    #[must_use]
    pub fn greater_equal(self, right: Self) -> Self {
        self.binary(TokenKind::GreaterEqual, right)
    }

    #[must_use]
    pub fn less(self, right: Self) -> Self {
        self.binary(TokenKind::Less, right)
    }

    #[must_use]
    pub fn less_equal(self, right: Self) -> Self {
        self.binary(TokenKind::LessEqual, right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_binary_with_operator_token() {
        let expr = Expr::number(1.0).plus(Expr::number(2.0));
        let Expr::Binary { operator, .. } = &expr else {
            panic!("expected binary, got {expr:?}");
        };
        assert_eq!(operator.kind, TokenKind::Plus);
        assert_eq!(operator.lexeme, "+");
        assert_eq!(operator.line, 1);
    }

    #[test]
    fn builds_nested_unary() {
        let expr = Expr::boolean(true).logical_not().logical_not();
        assert_eq!(expr.node_count(), 3);
    }

    #[test]
    fn literal_constructors() {
        assert_eq!(Expr::nil(), Expr::Literal(Value::Nil));
        assert_eq!(Expr::string("a"), Expr::Literal(Value::Str("a".into())));
        assert_eq!(Expr::number(2.5), Expr::Literal(Value::Number(2.5)));
    }
}
