//! Centralised error hierarchy for the interpreter.
//!
//! All subsystems (scanner, parser, runtime, CLI) convert their failure
//! modes into one of the variants defined here, enabling a uniform
//! `Result<T>` alias throughout the crate and ergonomic inter-operation
//! with `anyhow` in the binary driver.
//!
//! Every diagnostic renders as one line:
//! `[line <N>] Error<location>: <message>`
//! where `<location>` is empty for scanner errors, ` at '<lexeme>'` for a
//! parse or runtime error tied to a token, and ` at end of file` when the
//! offending token is the EOF sentinel.
//!
//! The module does not print diagnostics itself.

use std::io;
use thiserror::Error;

use log::debug;

use crate::token::Token;

/// Canonical error type used throughout the interpreter.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoxError {
    /// Lexical (scanner) error with source line information.
    #[error("[line {line}] Error: {message}")]
    Lex {
        /// Human-readable description.
        message: String,

        /// 1-based line where the error occurred.
        line: usize,
    },

    /// Syntactic (parser) error, anchored on the offending token.
    #[error("[line {line}] Error{location}: {message}")]
    Parse {
        message: String,
        line: usize,

        /// Pre-rendered ` at '<lexeme>'` / ` at end of file` suffix.
        location: String,
    },

    /// Runtime evaluation error, anchored on the operator or name token.
    #[error("[line {line}] Error{location}: {message}")]
    Runtime {
        message: String,
        line: usize,
        location: String,
    },

    /// Wrapper around `std::io::Error` (transparent). Enables `?` on the
    /// interpreter's output sink and on driver I/O.
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl LoxError {
    /// Helper constructor for the **scanner**.
    pub fn lex<S: Into<String>>(line: usize, msg: S) -> Self {
        let message: String = msg.into();

        debug!("Lex error: line={}, msg={}", line, message);

        LoxError::Lex { message, line }
    }

    /// Helper constructor for the **parser**.
    pub fn parse<S: Into<String>>(token: &Token<'_>, msg: S) -> Self {
        let message: String = msg.into();

        debug!(
            "Parse error: line={}, at={:?}, msg={}",
            token.line, token.lexeme, message
        );

        LoxError::Parse {
            message,
            line: token.line,
            location: locate(token),
        }
    }

    /// Helper constructor for the **interpreter**.
    pub fn runtime<S: Into<String>>(token: &Token<'_>, msg: S) -> Self {
        let message: String = msg.into();

        debug!(
            "Runtime error: line={}, at={:?}, msg={}",
            token.line, token.lexeme, message
        );

        LoxError::Runtime {
            message,
            line: token.line,
            location: locate(token),
        }
    }
}

/// Render the diagnostic location suffix for a token.
fn locate(token: &Token<'_>) -> String {
    if token.is_eof() {
        " at end of file".to_string()
    } else {
        format!(" at '{}'", token.lexeme)
    }
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, LoxError>;
