use std::fmt;

use crate::ast::Expr;
use crate::diagnostics::Diagnostics;
use crate::token::{Token, TokenKind};
use crate::value::Value;

/// Classifies a runtime error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeErrorKind {
    /// Unary `-` applied to a non-number.
    OperandMustBeNumber,
    /// Arithmetic or comparison on a non-number.
    OperandsMustBeNumbers,
    /// `+` on anything but two numbers or two strings.
    OperandsMustBeNumbersOrStrings,
    /// Operator token with no meaning in the given position.
    UnsupportedOperator(TokenKind),
}

impl fmt::Display for RuntimeErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OperandMustBeNumber => write!(f, "Operand must be a number"),
            Self::OperandsMustBeNumbers => write!(f, "Operands must be numbers."),
            Self::OperandsMustBeNumbersOrStrings => {
                write!(f, "Operands must be two numbers or two strings.")
            }
            Self::UnsupportedOperator(kind) => write!(f, "Unsupported operator '{kind}'."),
        }
    }
}

/// Error produced during evaluation, carrying the operator that failed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{kind}\n[line {}]", operator.line)]
pub struct RuntimeError {
    pub kind: RuntimeErrorKind,
    pub operator: Token,
}

/// Evaluate an expression tree to a value.
///
/// Operands are evaluated left to right and evaluation stops at the
/// first failure.
///
/// # Errors
///
/// Returns `RuntimeError` at the first operator whose operands have the
/// wrong type.
pub fn evaluate(expr: &Expr) -> Result<Value, RuntimeError> {
    match expr {
        Expr::Literal(value) => Ok(value.clone()),
        Expr::Grouping(inner) => evaluate(inner),
        Expr::Unary { operator, operand } => {
            let operand = evaluate(operand)?;
            unary(operator, operand)
        }
        Expr::Binary {
            left,
            operator,
            right,
        } => {
            let left = evaluate(left)?;
            let right = evaluate(right)?;
            binary(operator, left, right)
        }
    }
}

/// Evaluate an expression and format the result for display.
///
/// A runtime error is reported to `diagnostics` instead of being
/// returned; the result is then `None`.
pub fn interpret(expr: &Expr, diagnostics: &mut Diagnostics) -> Option<String> {
    match evaluate(expr) {
        Ok(value) => {
            tracing::debug!(kind = value.type_name(), "evaluated expression");
            Some(value.to_string())
        }
        Err(e) => {
            diagnostics.report(e);
            None
        }
    }
}

fn unary(operator: &Token, operand: Value) -> Result<Value, RuntimeError> {
    match operator.kind {
        TokenKind::Bang => Ok(Value::Bool(!operand.is_truthy())),
        TokenKind::Minus => match operand {
            Value::Number(n) => Ok(Value::Number(-n)),
            _ => Err(error(operator, RuntimeErrorKind::OperandMustBeNumber)),
        },
        kind => Err(error(operator, RuntimeErrorKind::UnsupportedOperator(kind))),
    }
}

fn binary(operator: &Token, left: Value, right: Value) -> Result<Value, RuntimeError> {
    match operator.kind {
        TokenKind::EqualEqual => Ok(Value::Bool(left == right)),
        TokenKind::BangEqual => Ok(Value::Bool(left != right)),
        TokenKind::Plus => match (left, right) {
            (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
            (Value::Str(a), Value::Str(b)) => Ok(Value::Str(a + &b)),
            _ => Err(error(
                operator,
                RuntimeErrorKind::OperandsMustBeNumbersOrStrings,
            )),
        },
        TokenKind::Minus => arithmetic(operator, &left, &right, |a, b| a - b),
        TokenKind::Star => arithmetic(operator, &left, &right, |a, b| a * b),
        TokenKind::Slash => arithmetic(operator, &left, &right, |a, b| a / b),
        TokenKind::Greater => comparison(operator, &left, &right, |a, b| a > b),
        TokenKind::GreaterEqual => comparison(operator, &left, &right, |a, b| a >= b),
        TokenKind::Less => comparison(operator, &left, &right, |a, b| a < b),
        TokenKind::LessEqual => comparison(operator, &left, &right, |a, b| a <= b),
        kind => Err(error(operator, RuntimeErrorKind::UnsupportedOperator(kind))),
    }
}

fn number_operands(
    operator: &Token,
    left: &Value,
    right: &Value,
) -> Result<(f64, f64), RuntimeError> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok((*a, *b)),
        _ => Err(error(operator, RuntimeErrorKind::OperandsMustBeNumbers)),
    }
}

fn arithmetic(
    operator: &Token,
    left: &Value,
    right: &Value,
    op: impl Fn(f64, f64) -> f64,
) -> Result<Value, RuntimeError> {
    let (a, b) = number_operands(operator, left, right)?;
    Ok(Value::Number(op(a, b)))
}

fn comparison(
    operator: &Token,
    left: &Value,
    right: &Value,
    op: impl Fn(f64, f64) -> bool,
) -> Result<Value, RuntimeError> {
    let (a, b) = number_operands(operator, left, right)?;
    Ok(Value::Bool(op(a, b)))
}

fn error(operator: &Token, kind: RuntimeErrorKind) -> RuntimeError {
    RuntimeError {
        kind,
        operator: operator.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(expr: &Expr) -> Value {
        evaluate(expr).expect("evaluation failed")
    }

    #[test]
    fn literal_and_grouping() {
        assert_eq!(eval(&Expr::number(4.0).group().group()), Value::Number(4.0));
        assert_eq!(eval(&Expr::nil()), Value::Nil);
    }

    #[test]
    fn arithmetic_operators() {
        let expr = Expr::number(7.0)
            .minus(Expr::number(1.0))
            .times(Expr::number(2.0))
            .divide(Expr::number(4.0));
        assert_eq!(eval(&expr), Value::Number(3.0));
    }

    #[test]
    fn division_by_zero_is_not_an_error() {
        let inf = eval(&Expr::number(1.0).divide(Expr::number(0.0)));
        assert_eq!(inf, Value::Number(f64::INFINITY));
        let nan = eval(&Expr::number(0.0).divide(Expr::number(0.0)));
        assert!(matches!(nan, Value::Number(n) if n.is_nan()));
    }

    #[test]
    fn string_concatenation() {
        let expr = Expr::string("a").plus(Expr::string("b"));
        assert_eq!(eval(&expr), Value::from("ab"));
    }

    #[test]
    fn mixed_plus_fails() {
        let err = evaluate(&Expr::number(1.0).plus(Expr::string("a"))).unwrap_err();
        assert_eq!(err.kind, RuntimeErrorKind::OperandsMustBeNumbersOrStrings);
        assert_eq!(err.operator.kind, TokenKind::Plus);
    }

    #[test]
    fn negate_requires_number() {
        let err = evaluate(&Expr::string("x").negate()).unwrap_err();
        assert_eq!(err.kind, RuntimeErrorKind::OperandMustBeNumber);
        assert_eq!(err.to_string(), "Operand must be a number\n[line 1]");
    }

    #[test]
    fn comparison_requires_numbers() {
        let err = evaluate(&Expr::string("a").less(Expr::string("b"))).unwrap_err();
        assert_eq!(err.kind, RuntimeErrorKind::OperandsMustBeNumbers);
        assert_eq!(
            eval(&Expr::number(2.0).greater_equal(Expr::number(2.0))),
            Value::Bool(true)
        );
    }

    #[test]
    fn bang_uses_truthiness() {
        assert_eq!(eval(&Expr::number(0.0).logical_not()), Value::Bool(false));
        assert_eq!(eval(&Expr::nil().logical_not()), Value::Bool(true));
        assert_eq!(eval(&Expr::string("").logical_not()), Value::Bool(false));
    }

    #[test]
    fn equality_rules() {
        assert_eq!(eval(&Expr::nil().equals(Expr::nil())), Value::Bool(true));
        assert_eq!(
            eval(&Expr::number(0.0).equals(Expr::string("0"))),
            Value::Bool(false)
        );
        assert_eq!(
            eval(&Expr::nil().not_equals(Expr::boolean(false))),
            Value::Bool(true)
        );
    }

    #[test]
    fn left_operand_error_wins() {
        let expr = Expr::string("a")
            .negate()
            .minus(Expr::boolean(true).negate());
        let err = evaluate(&expr).unwrap_err();
        assert_eq!(err.kind, RuntimeErrorKind::OperandMustBeNumber);
    }

    #[test]
    fn unsupported_operator() {
        let expr = Expr::number(1.0).binary(TokenKind::Comma, Expr::number(2.0));
        let err = evaluate(&expr).unwrap_err();
        assert_eq!(
            err.kind,
            RuntimeErrorKind::UnsupportedOperator(TokenKind::Comma)
        );
    }

    #[test]
    fn interpret_reports_runtime_error() {
        let mut diagnostics = Diagnostics::new();
        let shown = interpret(&Expr::boolean(true).minus(Expr::nil()), &mut diagnostics);
        assert!(shown.is_none());
        assert!(diagnostics.had_runtime_error());
        assert!(!diagnostics.had_error());
    }

    #[test]
    fn interpret_formats_value() {
        let mut diagnostics = Diagnostics::new();
        let shown = interpret(&Expr::number(1.0).plus(Expr::number(2.0)), &mut diagnostics);
        assert_eq!(shown.as_deref(), Some("3"));
        assert_eq!(interpret(&Expr::nil(), &mut diagnostics).as_deref(), Some("nil"));
    }
}
