#![allow(dead_code)]

use lox_expr::{
    Diagnostics, Expr, Token, Value, evaluate, parse, parse_str, render, render_source, scan,
};

/// Scan source that is expected to be lexically clean.
pub fn tokens(source: &str) -> Vec<Token> {
    let mut diagnostics = Diagnostics::new();
    let tokens = scan(source, &mut diagnostics);
    assert!(
        diagnostics.is_empty(),
        "unexpected scan diagnostics for {source:?}: {:?}",
        diagnostics.reports()
    );
    tokens
}

/// Parse source that is expected to be valid.
pub fn expr(source: &str) -> Expr {
    parse_str(source).unwrap_or_else(|e| panic!("failed to parse {source:?}:\n{e}"))
}

/// Parse and render in prefix notation.
pub fn rendered(source: &str) -> String {
    render(&expr(source))
}

/// Evaluate source that is expected to succeed.
pub fn value(source: &str) -> Value {
    evaluate(&expr(source)).unwrap_or_else(|e| panic!("failed to evaluate {source:?}:\n{e}"))
}

/// Run scan and parse, returning the tree (if any) and the sink.
pub fn parse_with_diagnostics(source: &str) -> (Option<Expr>, Diagnostics) {
    let mut diagnostics = Diagnostics::new();
    let tokens = scan(source, &mut diagnostics);
    let expr = parse(&tokens, &mut diagnostics);
    (expr, diagnostics)
}

/// Helper: print a tree as source, parse it back, assert the same shape.
pub fn assert_source_roundtrip(original: &Expr) {
    let source = render_source(original);
    let reparsed = parse_str(&source).unwrap_or_else(|e| {
        panic!(
            "failed to re-parse printed source: {e}\n\
             --- source ---\n{source}"
        )
    });
    assert_eq!(
        render(original),
        render(&reparsed),
        "shape mismatch\n--- source ---\n{source}"
    );
}
