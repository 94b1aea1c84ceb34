//! Scanner, parser, AST printer, and tree-walking evaluator for Lox
//! expressions.
//!
//! Source text flows through [`scan`] into tokens, through [`parse`] into
//! an [`Expr`] tree, and through [`evaluate`] into a [`Value`]. Problems
//! found along the way are collected in a [`Diagnostics`] sink that the
//! caller owns.
//!
//! # Quick start
//!
//! ## Evaluate an expression
//!
//! ```
//! use lox_expr::{Value, evaluate_str};
//!
//! let value = evaluate_str("(1 + 2) * 3 == 9").unwrap();
//! assert_eq!(value, Value::Bool(true));
//! ```
//!
//! ## Drive each stage yourself
//!
//! ```
//! use lox_expr::{Diagnostics, parse, render, scan};
//!
//! let mut diagnostics = Diagnostics::new();
//! let tokens = scan("-123 * (45.67)", &mut diagnostics);
//! let expr = parse(&tokens, &mut diagnostics).unwrap();
//! assert_eq!(render(&expr), "(* (- 123) (group 45.67))");
//! assert!(!diagnostics.had_error());
//! ```

// Allow noisy pedantic lints that don't add value for
// a library crate.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod ast;
pub mod builder;
pub mod diagnostics;
pub mod interpreter;
pub mod parser;
pub mod printer;
pub mod scanner;
pub mod token;
pub mod value;

pub use ast::Expr;
pub use diagnostics::{Diagnostic, Diagnostics};
pub use interpreter::{RuntimeError, RuntimeErrorKind, evaluate, interpret};
pub use parser::{ParseError, ParseErrorKind, Parser, parse};
pub use printer::{render, render_source};
pub use scanner::{ScanError, ScanErrorKind, scan};
pub use token::{Literal, Token, TokenKind};
pub use value::Value;

/// Unified error type covering every stage of the pipeline.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// Scan or parse errors, in the order they were found.
    #[error("{}", join_lines(.0))]
    Syntax(Vec<Diagnostic>),
    /// Evaluation failed.
    #[error("{0}")]
    Runtime(#[from] RuntimeError),
}

fn join_lines(diagnostics: &[Diagnostic]) -> String {
    diagnostics
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Scan and parse a source string in one step.
pub fn parse_str(source: &str) -> Result<Expr, Error> {
    let mut diagnostics = Diagnostics::new();
    let tokens = scan(source, &mut diagnostics);
    let expr = parse(&tokens, &mut diagnostics);
    match expr {
        Some(expr) if !diagnostics.had_error() => Ok(expr),
        _ => Err(Error::Syntax(diagnostics.into_reports())),
    }
}

/// Scan, parse, and evaluate a source string in one step.
pub fn evaluate_str(source: &str) -> Result<Value, Error> {
    let expr = parse_str(source)?;
    Ok(evaluate(&expr)?)
}

/// Run the whole pipeline, reporting every problem to `diagnostics`.
///
/// Returns the display text of the resulting value. Evaluation is
/// skipped when scanning or parsing reported an error.
pub fn run(source: &str, diagnostics: &mut Diagnostics) -> Option<String> {
    let tokens = scan(source, diagnostics);
    let expr = parse(&tokens, diagnostics)?;
    if diagnostics.had_error() {
        return None;
    }
    interpret(&expr, diagnostics)
}
