use crate::token::Token;
use crate::value::Value;

/// Expression tree.
///
/// Each node owns its children; there is no sharing between subtrees.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Number, string, boolean, or `nil` literal.
    Literal(Value),
    /// Parenthesized expression `( inner )`.
    Grouping(Box<Self>),
    /// Prefix operator application: `-x` or `!x`.
    Unary { operator: Token, operand: Box<Self> },
    /// Infix operator application.
    Binary {
        left: Box<Self>,
        operator: Token,
        right: Box<Self>,
    },
}

impl Expr {
    /// Number of nodes in the tree.
    #[must_use]
    pub fn node_count(&self) -> usize {
        match self {
            Self::Literal(_) => 1,
            Self::Grouping(inner) => 1 + inner.node_count(),
            Self::Unary { operand, .. } => 1 + operand.node_count(),
            Self::Binary { left, right, .. } => 1 + left.node_count() + right.node_count(),
        }
    }
}
