//! AST printer tests: prefix rendering and source rendering.

mod common;

use common::expr;
use lox_expr::{Expr, Token, TokenKind, Value, render, render_source};

// -----------------------------------------------------------
// Prefix notation.
// -----------------------------------------------------------

#[test]
fn render_hand_built_tree() {
    let tree = Expr::Binary {
        left: Box::new(Expr::Unary {
            operator: Token::new(TokenKind::Minus, "-", 1),
            operand: Box::new(Expr::Literal(Value::Number(123.0))),
        }),
        operator: Token::new(TokenKind::Star, "*", 1),
        right: Box::new(Expr::Grouping(Box::new(Expr::Literal(Value::Number(
            45.67,
        ))))),
    };
    assert_eq!(render(&tree), "(* (- 123) (group 45.67))");
}

#[test]
fn render_builder_tree() {
    let tree = Expr::number(1.0)
        .plus(Expr::number(2.0))
        .group()
        .less_equal(Expr::nil().logical_not());
    assert_eq!(render(&tree), "(<= (group (+ 1 2)) (! nil))");
}

#[test]
fn render_integral_number_without_fraction() {
    assert_eq!(render(&expr("100.0")), "100");
    assert_eq!(render(&expr("2.50")), "2.5");
}

#[test]
fn render_string_without_quotes() {
    assert_eq!(render(&expr("\"a\" + \"b c\"")), "(+ a b c)");
}

#[test]
fn render_uses_operator_lexeme() {
    assert_eq!(render(&expr("1 != 2")), "(!= 1 2)");
}

// -----------------------------------------------------------
// Source notation.
// -----------------------------------------------------------

#[test]
fn render_source_spacing() {
    assert_eq!(render_source(&expr("1+2*3")), "1 + 2 * 3");
    assert_eq!(render_source(&expr("!( -1 )")), "!(-1)");
}

#[test]
fn render_source_quotes_strings() {
    assert_eq!(render_source(&expr("\"x\" == nil")), "\"x\" == nil");
}

#[test]
fn render_source_keeps_multiline_string() {
    assert_eq!(render_source(&expr("\"a\nb\"")), "\"a\nb\"");
}

#[test]
fn render_source_non_finite_numbers() {
    assert_eq!(render_source(&Expr::number(f64::INFINITY)), "Infinity");
    assert_eq!(render_source(&Expr::number(f64::NAN)), "NaN");
}
