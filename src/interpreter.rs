//! Tree-walking evaluator.
//!
//! Executes statement nodes against the current [`Environment`] and
//! evaluates expression nodes to [`Value`]s, enforcing the dynamic-typing
//! rules:
//!
//! - truthiness: `nil` and `false` are falsy, everything else (including
//!   `0` and `""`) is truthy;
//! - equality is structural, `nil` equals only `nil`, mixed kinds are
//!   never equal;
//! - arithmetic/comparison requires number operands; `+` also accepts two
//!   strings (concatenation); division by zero follows IEEE-754 and never
//!   errors;
//! - `and`/`or` short-circuit and yield the operand value itself.
//!
//! The interpreter is generic over its output sink so tests capture
//! `print` output in memory while the driver hands it stdout. A runtime
//! error propagates straight out of [`Interpreter::interpret`], halting
//! the remaining statements; block scopes are restored on that path too.

use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

use log::{debug, info};

use crate::ast::{Expr, LiteralValue, Stmt};
use crate::environment::Environment;
use crate::error::{LoxError, Result};
use crate::token::{Token, TokenType};
use crate::value::Value;

pub struct Interpreter<W: Write> {
    environment: Rc<RefCell<Environment>>,
    out: W,
}

impl<W: Write> Interpreter<W> {
    /// Create an interpreter with a fresh global environment, writing
    /// `print` output to `out`.
    pub fn new(out: W) -> Self {
        info!("Initializing interpreter");

        Self {
            environment: Rc::new(RefCell::new(Environment::new())),
            out,
        }
    }

    /// Execute a program: statements strictly in order, stopping at the
    /// first runtime error.
    pub fn interpret(&mut self, statements: &[Stmt<'_>]) -> Result<()> {
        debug!("Interpreting {} statement(s)", statements.len());

        for stmt in statements {
            self.execute(stmt)?;
        }

        info!("Interpretation completed");

        Ok(())
    }

    // ───────────────────────── statements ─────────────────────────

    fn execute(&mut self, stmt: &Stmt<'_>) -> Result<()> {
        match stmt {
            Stmt::Expression(expr) => {
                self.evaluate(expr)?;

                Ok(())
            }

            Stmt::Print(expr) => {
                let value: Value = self.evaluate(expr)?;

                writeln!(self.out, "{}", value)?;

                Ok(())
            }

            Stmt::Var { name, initializer } => {
                let value: Value = match initializer {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::Nil,
                };

                debug!("var '{}' = {}", name.lexeme, value);

                self.environment.borrow_mut().define(name.lexeme, value);

                Ok(())
            }

            Stmt::Block(statements) => self.execute_block(statements),

            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                if is_truthy(&self.evaluate(condition)?) {
                    self.execute(then_branch)
                } else if let Some(else_stmt) = else_branch {
                    self.execute(else_stmt)
                } else {
                    Ok(())
                }
            }

            Stmt::While { condition, body } => {
                while is_truthy(&self.evaluate(condition)?) {
                    self.execute(body)?;
                }

                Ok(())
            }
        }
    }

    /// Run a block's statements in a fresh child scope. The previous scope
    /// is restored on every exit path, including the runtime-error one, so
    /// a fault inside a block cannot leak its frame.
    fn execute_block(&mut self, statements: &[Stmt<'_>]) -> Result<()> {
        let previous: Rc<RefCell<Environment>> = Rc::clone(&self.environment);

        self.environment = Rc::new(RefCell::new(Environment::with_enclosing(Rc::clone(
            &previous,
        ))));

        let result: Result<()> = statements.iter().try_for_each(|stmt| self.execute(stmt));

        self.environment = previous;

        result
    }

    // ───────────────────────── expressions ────────────────────────

    pub fn evaluate(&mut self, expr: &Expr<'_>) -> Result<Value> {
        match expr {
            Expr::Literal(lit) => Ok(literal_value(lit)),

            Expr::Grouping(inner) => self.evaluate(inner),

            Expr::Unary { operator, right } => self.evaluate_unary(operator, right),

            Expr::Binary {
                left,
                operator,
                right,
            } => self.evaluate_binary(left, operator, right),

            Expr::Logical {
                left,
                operator,
                right,
            } => self.evaluate_logical(left, operator, right),

            Expr::Variable(name) => self.environment.borrow().get(name),

            Expr::Assign { name, value } => {
                let value: Value = self.evaluate(value)?;

                self.environment.borrow_mut().assign(name, value.clone())?;

                // The assigned value is the expression's result, enabling
                // chained assignment.
                Ok(value)
            }
        }
    }

    fn evaluate_unary(&mut self, operator: &Token<'_>, right: &Expr<'_>) -> Result<Value> {
        let right: Value = self.evaluate(right)?;

        match operator.token_type {
            TokenType::MINUS => match right {
                Value::Number(n) => Ok(Value::Number(-n)),
                _ => Err(LoxError::runtime(operator, "Operand must be a number.")),
            },

            // `!` applies truthiness negation to any value; never errors.
            TokenType::BANG => Ok(Value::Bool(!is_truthy(&right))),

            _ => Err(LoxError::runtime(operator, "Invalid unary operator.")),
        }
    }

    fn evaluate_binary(
        &mut self,
        left: &Expr<'_>,
        operator: &Token<'_>,
        right: &Expr<'_>,
    ) -> Result<Value> {
        let lhs: Value = self.evaluate(left)?;
        let rhs: Value = self.evaluate(right)?;

        debug!("binary '{}': {} , {}", operator.lexeme, lhs, rhs);

        match operator.token_type {
            TokenType::PLUS => match (lhs, rhs) {
                (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
                (Value::String(a), Value::String(b)) => Ok(Value::String(a + &b)),
                _ => Err(LoxError::runtime(
                    operator,
                    "Operands must be two numbers or two strings.",
                )),
            },

            TokenType::MINUS => match (lhs, rhs) {
                (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a - b)),
                _ => Err(numbers_expected(operator)),
            },

            TokenType::STAR => match (lhs, rhs) {
                (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a * b)),
                _ => Err(numbers_expected(operator)),
            },

            // Division by zero follows IEEE-754: inf / NaN, not an error.
            TokenType::SLASH => match (lhs, rhs) {
                (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a / b)),
                _ => Err(numbers_expected(operator)),
            },

            TokenType::GREATER => match (lhs, rhs) {
                (Value::Number(a), Value::Number(b)) => Ok(Value::Bool(a > b)),
                _ => Err(numbers_expected(operator)),
            },

            TokenType::GREATER_EQUAL => match (lhs, rhs) {
                (Value::Number(a), Value::Number(b)) => Ok(Value::Bool(a >= b)),
                _ => Err(numbers_expected(operator)),
            },

            TokenType::LESS => match (lhs, rhs) {
                (Value::Number(a), Value::Number(b)) => Ok(Value::Bool(a < b)),
                _ => Err(numbers_expected(operator)),
            },

            TokenType::LESS_EQUAL => match (lhs, rhs) {
                (Value::Number(a), Value::Number(b)) => Ok(Value::Bool(a <= b)),
                _ => Err(numbers_expected(operator)),
            },

            TokenType::EQUAL_EQUAL => Ok(Value::Bool(is_equal(&lhs, &rhs))),

            TokenType::BANG_EQUAL => Ok(Value::Bool(!is_equal(&lhs, &rhs))),

            _ => Err(LoxError::runtime(operator, "Invalid binary operator.")),
        }
    }

    /// Short-circuit `and`/`or`: the left operand's value itself is
    /// returned when it decides the outcome; no boolean coercion.
    fn evaluate_logical(
        &mut self,
        left: &Expr<'_>,
        operator: &Token<'_>,
        right: &Expr<'_>,
    ) -> Result<Value> {
        let lhs: Value = self.evaluate(left)?;

        match operator.token_type {
            TokenType::OR if is_truthy(&lhs) => Ok(lhs),
            TokenType::AND if !is_truthy(&lhs) => Ok(lhs),
            _ => self.evaluate(right),
        }
    }
}

fn literal_value(lit: &LiteralValue) -> Value {
    match lit {
        LiteralValue::Number(n) => Value::Number(*n),
        LiteralValue::Str(s) => Value::String(s.clone()),
        LiteralValue::True => Value::Bool(true),
        LiteralValue::False => Value::Bool(false),
        LiteralValue::Nil => Value::Nil,
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Nil => false,
        Value::Bool(b) => *b,
        _ => true,
    }
}

fn is_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Nil, Value::Nil) => true,
        (Value::Number(a), Value::Number(b)) => a == b,
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        _ => false,
    }
}

fn numbers_expected(operator: &Token<'_>) -> LoxError {
    LoxError::runtime(operator, "Operands must be numbers.")
}
