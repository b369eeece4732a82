//! AST node definitions for expressions and statements.
//!
//! Both categories are closed tagged enums; every traversal (evaluation in
//! [`crate::interpreter`], printing in [`crate::ast_printer`]) matches
//! exhaustively, so adding a node kind forces every match site to handle
//! it. Nodes are inert data: they own their children (`Box`/`Vec`, a strict
//! tree with no sharing) and perform no computation themselves.
//!
//! The lifetime `'a` ties operator and name tokens back to the token slice
//! held by the caller; literal payloads are copied out of their tokens at
//! parse time so leaves carry no token reference.

use crate::token::Token;

/// A literal constant that appears directly in the source code.
///
/// These variants are the terminal leaves of the expression tree.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// Numeric literal, stored as IEEE-754 `f64`. Integral lexemes such as
    /// `"3"` are still parsed as `3.0`.
    Number(f64),

    /// String literal without surrounding quotes.
    Str(String),

    /// The boolean constant `true`.
    True,

    /// The boolean constant `false`.
    False,

    /// The `nil` literal.
    Nil,
}

/// Expression node.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr<'a> {
    /// A literal constant: number, string, `true`, `false`, or `nil`.
    Literal(LiteralValue),

    /// Parenthesised sub-expression: `"(" expression ")"`.
    Grouping(Box<Expr<'a>>),

    /// Prefix unary operator expression, e.g. `!ready` or `-42`.
    Unary {
        /// The operator token (`!` or `-`).
        operator: &'a Token<'a>,
        /// Operand to which the operator is applied.
        right: Box<Expr<'a>>,
    },

    /// Infix binary operator expression, e.g. `a + b`, `x <= y`.
    Binary {
        left: Box<Expr<'a>>,
        /// Operator token such as `+`, `*`, `==`, …
        operator: &'a Token<'a>,
        right: Box<Expr<'a>>,
    },

    /// Short-circuiting logical operators `and` / `or`.
    Logical {
        left: Box<Expr<'a>>,
        operator: &'a Token<'a>, // `AND` or `OR`
        right: Box<Expr<'a>>,
    },

    /// Variable access; resolves to the identifier's current value at
    /// runtime by walking the environment chain.
    Variable(&'a Token<'a>),

    /// Assignment expression: `identifier "=" expression`.
    Assign {
        name: &'a Token<'a>,
        value: Box<Expr<'a>>,
    },
}

/// Statement node. A program is a sequence of these returned by
/// [`crate::parser::Parser::parse`].
///
/// `for` loops have no node of their own: the parser desugars them into an
/// initializer, a `While`, and wrapping `Block`s.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt<'a> {
    /// Stand-alone expression terminated by a semicolon.
    Expression(Expr<'a>),

    /// `print` statement: evaluates and writes one line of output.
    Print(Expr<'a>),

    /// Variable declaration: `"var" IDENT ("=" initializer)? ";"`.
    Var {
        name: &'a Token<'a>,
        initializer: Option<Expr<'a>>,
    },

    /// Braced scope containing zero or more declarations/statements.
    Block(Vec<Stmt<'a>>),

    /// `if` / `else` conditional. `else` binds to the nearest unmatched
    /// `if`.
    If {
        condition: Expr<'a>,
        then_branch: Box<Stmt<'a>>,
        else_branch: Option<Box<Stmt<'a>>>,
    },

    /// `while` loop.
    While {
        condition: Expr<'a>,
        body: Box<Stmt<'a>>,
    },
}
