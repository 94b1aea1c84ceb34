//! CLI driver: run a Lox expression file or start an interactive prompt.

use std::fs;
use std::process::ExitCode;

use lox_expr::Diagnostics;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing_subscriber::EnvFilter;

const EX_USAGE: u8 = 64;
const EX_DATAERR: u8 = 65;
const EX_NOINPUT: u8 = 66;
const EX_SOFTWARE: u8 = 70;

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();

    match args.len() {
        1 => run_prompt(),
        2 if args[1] == "--help" || args[1] == "-h" => {
            print_usage();
            ExitCode::SUCCESS
        }
        2 => run_file(&args[1]),
        _ => {
            print_usage();
            ExitCode::from(EX_USAGE)
        }
    }
}

fn print_usage() {
    eprintln!("Usage: lox [script]");
    eprintln!();
    eprintln!("Without a script, starts an interactive prompt.");
    eprintln!("Set RUST_LOG=debug to trace each pipeline stage.");
}

fn run_file(path: &str) -> ExitCode {
    let source = match fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{path}: {e}");
            return ExitCode::from(EX_NOINPUT);
        }
    };

    tracing::debug!(path, bytes = source.len(), "running script");

    let mut diagnostics = Diagnostics::new();
    if let Some(output) = lox_expr::run(&source, &mut diagnostics) {
        println!("{output}");
    }
    print_diagnostics(&diagnostics);

    if diagnostics.had_error() {
        ExitCode::from(EX_DATAERR)
    } else if diagnostics.had_runtime_error() {
        ExitCode::from(EX_SOFTWARE)
    } else {
        ExitCode::SUCCESS
    }
}

fn run_prompt() -> ExitCode {
    let mut editor = match DefaultEditor::new() {
        Ok(editor) => editor,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut diagnostics = Diagnostics::new();
    loop {
        match editor.readline("> ") {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                if let Err(e) = editor.add_history_entry(line.as_str()) {
                    tracing::debug!(error = %e, "history entry not recorded");
                }
                if let Some(output) = lox_expr::run(&line, &mut diagnostics) {
                    println!("{output}");
                }
                print_diagnostics(&diagnostics);
                // one bad entry must not poison the next
                diagnostics.reset();
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("Error: {e}");
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}

fn print_diagnostics(diagnostics: &Diagnostics) {
    for diagnostic in diagnostics.reports() {
        eprintln!("{diagnostic}");
    }
}
