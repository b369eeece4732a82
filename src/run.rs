//! Per-source execution pipeline: scan → parse → interpret.
//!
//! The pipeline's result is an explicit [`RunOutcome`] value rather than a
//! process-wide had-error flag. Any lexical or parse error keeps the run
//! from reaching evaluation; a runtime error halts evaluation after the
//! first fault. The driver translates the outcome into diagnostics and an
//! exit code.

use std::io::Write;

use log::{debug, info};

use crate::error::LoxError;
use crate::interpreter::Interpreter;
use crate::parser::Parser;
use crate::scanner::Scanner;
use crate::token::Token;

/// What a single run of a source buffer produced.
#[derive(Debug)]
pub enum RunOutcome {
    /// The program parsed and executed to completion.
    Success,

    /// Lexical and/or parse errors; evaluation was skipped entirely.
    StaticError(Vec<LoxError>),

    /// Static phases were clean but evaluation halted on this error.
    /// `print` output emitted before the fault stays emitted.
    RuntimeError(LoxError),
}

impl RunOutcome {
    /// Write each diagnostic as one line to `sink` (the driver hands it
    /// stderr).
    pub fn report<W: Write>(&self, sink: &mut W) -> std::io::Result<()> {
        match self {
            RunOutcome::Success => Ok(()),

            RunOutcome::StaticError(errors) => {
                for e in errors {
                    writeln!(sink, "{}", e)?;
                }
                Ok(())
            }

            RunOutcome::RuntimeError(e) => writeln!(sink, "{}", e),
        }
    }

    /// Conventional sysexits code: 65 for static errors, 70 for runtime
    /// errors.
    pub fn exit_code(&self) -> i32 {
        match self {
            RunOutcome::Success => 0,
            RunOutcome::StaticError(_) => 65,
            RunOutcome::RuntimeError(_) => 70,
        }
    }
}

/// Run one source buffer through the full pipeline against `interpreter`.
///
/// The scanner never aborts, so the parser always sees a complete token
/// stream; it is run even when lexing reported errors so that one run
/// surfaces diagnostics from both static phases.
pub fn run<W: Write>(source: &[u8], interpreter: &mut Interpreter<W>) -> RunOutcome {
    let mut tokens: Vec<Token<'_>> = Vec::new();
    let mut errors: Vec<LoxError> = Vec::new();

    for item in Scanner::new(source) {
        match item {
            Ok(token) => tokens.push(token),
            Err(e) => errors.push(e),
        }
    }

    debug!(
        "Scanned {} token(s), {} lex error(s)",
        tokens.len(),
        errors.len()
    );

    let mut parser: Parser<'_> = Parser::new(&tokens);

    match parser.parse() {
        Ok(statements) if errors.is_empty() => {
            info!("Static phases clean; executing {} statement(s)", statements.len());

            match interpreter.interpret(&statements) {
                Ok(()) => RunOutcome::Success,
                Err(e) => RunOutcome::RuntimeError(e),
            }
        }

        Ok(_) => RunOutcome::StaticError(errors),

        Err(parse_errors) => {
            errors.extend(parse_errors);

            RunOutcome::StaticError(errors)
        }
    }
}
