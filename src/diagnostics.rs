//! Error sink shared by the scanner, parser, and interpreter.
//!
//! A `Diagnostics` value is threaded through each pipeline stage by
//! mutable reference. The driver inspects the flags afterwards to pick an
//! exit code, and clears them between interactive entries.

use crate::interpreter::RuntimeError;
use crate::parser::ParseError;
use crate::scanner::ScanError;

/// One reported problem.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Diagnostic {
    /// A lexical error.
    #[error(transparent)]
    Scan(#[from] ScanError),
    /// A syntax error.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// A type error raised during evaluation.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

impl Diagnostic {
    /// Source line the problem was found on.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::Scan(e) => e.line,
            Self::Parse(e) => e.token.line,
            Self::Runtime(e) => e.operator.line,
        }
    }

    /// Location context: empty, ` at end`, or ` at '<lexeme>'`.
    #[must_use]
    pub fn location(&self) -> String {
        match self {
            Self::Scan(_) => String::new(),
            Self::Parse(e) => e.location(),
            Self::Runtime(e) => format!(" at '{}'", e.operator.lexeme),
        }
    }

    /// The fixed message, without location.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Scan(e) => e.kind.to_string(),
            Self::Parse(e) => e.kind.to_string(),
            Self::Runtime(e) => e.kind.to_string(),
        }
    }

    /// Whether this was found before evaluation started.
    #[must_use]
    pub const fn is_static(&self) -> bool {
        matches!(self, Self::Scan(_) | Self::Parse(_))
    }
}

/// Collected diagnostics for one run of the pipeline.
#[derive(Debug, Default, Clone)]
pub struct Diagnostics {
    reports: Vec<Diagnostic>,
}

impl Diagnostics {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            reports: Vec::new(),
        }
    }

    /// Record a problem.
    pub fn report(&mut self, diagnostic: impl Into<Diagnostic>) {
        let diagnostic = diagnostic.into();
        tracing::debug!(
            line = diagnostic.line(),
            location = %diagnostic.location(),
            message = %diagnostic.message(),
            "diagnostic reported"
        );
        self.reports.push(diagnostic);
    }

    /// A scan or parse error was reported.
    #[must_use]
    pub fn had_error(&self) -> bool {
        self.reports.iter().any(Diagnostic::is_static)
    }

    /// A runtime error was reported.
    #[must_use]
    pub fn had_runtime_error(&self) -> bool {
        self.reports.iter().any(|d| !d.is_static())
    }

    /// Forget everything reported so far.
    pub fn reset(&mut self) {
        self.reports.clear();
    }

    #[must_use]
    pub fn reports(&self) -> &[Diagnostic] {
        &self.reports
    }

    #[must_use]
    pub fn into_reports(self) -> Vec<Diagnostic> {
        self.reports
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.reports.len()
    }
}
