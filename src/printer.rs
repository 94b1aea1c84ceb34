//! Printers that serialize an expression tree back into text.
//!
//! [`render`] produces fully parenthesized prefix notation and serves as
//! the structural fingerprint of a tree. [`render_source`] produces infix
//! Lox source; a tree that came out of the parser scans and parses back
//! to the same structure.

use std::fmt::Write as _;

use crate::ast::Expr;
use crate::value::{self, Value};

/// Render an expression in parenthesized prefix notation.
///
/// ```
/// use lox_expr::{Expr, render};
///
/// let expr = Expr::number(1.0).plus(Expr::nil().group());
/// assert_eq!(render(&expr), "(+ 1 (group nil))");
/// ```
#[must_use]
pub fn render(expr: &Expr) -> String {
    let mut out = String::new();
    render_prefix(&mut out, expr);
    out
}

fn render_prefix(out: &mut String, expr: &Expr) {
    match expr {
        Expr::Literal(literal) => render_literal(out, literal),
        Expr::Grouping(inner) => parenthesize(out, "group", &[inner.as_ref()]),
        Expr::Unary { operator, operand } => {
            parenthesize(out, &operator.lexeme, &[operand.as_ref()]);
        }
        Expr::Binary {
            left,
            operator,
            right,
        } => parenthesize(out, &operator.lexeme, &[left.as_ref(), right.as_ref()]),
    }
}

fn parenthesize(out: &mut String, name: &str, exprs: &[&Expr]) {
    out.push('(');
    out.push_str(name);
    for expr in exprs {
        out.push(' ');
        render_prefix(out, expr);
    }
    out.push(')');
}

fn render_literal(out: &mut String, literal: &Value) {
    let _ = write!(out, "{literal}");
}

/// Render an expression as Lox source text.
///
/// String literals are quoted and binary operators are surrounded by
/// single spaces. Groupings keep their parentheses; no others are added,
/// so a parsed tree read back by the parser keeps its shape.
///
/// Hand-built trees can hold literals the grammar cannot spell: a string
/// containing `"`, a negative or non-finite number. Those are written
/// as-is and do not read back to the same tree.
///
/// ```
/// use lox_expr::{Expr, render_source};
///
/// let expr = Expr::string("a").plus(Expr::number(2.5).negate().group());
/// assert_eq!(render_source(&expr), "\"a\" + (-2.5)");
/// ```
#[must_use]
pub fn render_source(expr: &Expr) -> String {
    let mut out = String::new();
    render_infix(&mut out, expr);
    out
}

fn render_infix(out: &mut String, expr: &Expr) {
    match expr {
        Expr::Literal(Value::Str(s)) => {
            out.push('"');
            out.push_str(s);
            out.push('"');
        }
        Expr::Literal(Value::Number(n)) => {
            let _ = value::write_number(out, *n);
        }
        Expr::Literal(literal) => render_literal(out, literal),
        Expr::Grouping(inner) => {
            out.push('(');
            render_infix(out, inner);
            out.push(')');
        }
        Expr::Unary { operator, operand } => {
            out.push_str(&operator.lexeme);
            render_infix(out, operand);
        }
        Expr::Binary {
            left,
            operator,
            right,
        } => {
            render_infix(out, left);
            out.push(' ');
            out.push_str(&operator.lexeme);
            out.push(' ');
            render_infix(out, right);
        }
    }
}
