//! Lexical scope chain.
//!
//! Each [`Environment`] is one binding frame; `enclosing` links it to its
//! parent (absent only for the global frame). The interpreter holds a
//! single `Rc<RefCell<Environment>>` handle for the current scope and
//! swaps it on block entry/exit; dropping the child handle on exit
//! releases that frame's bindings.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use log::debug;

use crate::error::{LoxError, Result};
use crate::token::Token;
use crate::value::Value;

#[derive(Debug, Clone, Default)]
pub struct Environment {
    values: HashMap<String, Value>,
    enclosing: Option<Rc<RefCell<Environment>>>,
}

impl Environment {
    /// Create the outermost (global) frame.
    pub fn new() -> Self {
        Environment {
            values: HashMap::new(),
            enclosing: None,
        }
    }

    /// Create a frame nested inside `enclosing`.
    pub fn with_enclosing(enclosing: Rc<RefCell<Environment>>) -> Self {
        Environment {
            values: HashMap::new(),
            enclosing: Some(enclosing),
        }
    }

    /// Create or overwrite a binding in this frame only. Re-declaring an
    /// existing name is allowed and simply replaces the value.
    pub fn define(&mut self, name: &str, value: Value) {
        debug!("define '{}' = {}", name, value);

        self.values.insert(name.to_string(), value);
    }

    /// Look up `name` in the nearest frame that defines it, walking from
    /// this frame toward the root.
    pub fn get(&self, name: &Token<'_>) -> Result<Value> {
        if let Some(value) = self.values.get(name.lexeme) {
            Ok(value.clone())
        } else if let Some(enclosing) = &self.enclosing {
            enclosing.borrow().get(name)
        } else {
            Err(undefined(name))
        }
    }

    /// Overwrite `name` in the nearest frame that already defines it.
    /// Never creates a new binding: assigning to an undeclared name is an
    /// error no matter how deep the chain is.
    pub fn assign(&mut self, name: &Token<'_>, value: Value) -> Result<()> {
        if self.values.contains_key(name.lexeme) {
            debug!("assign '{}' = {}", name.lexeme, value);

            self.values.insert(name.lexeme.to_string(), value);
            Ok(())
        } else if let Some(enclosing) = &self.enclosing {
            enclosing.borrow_mut().assign(name, value)
        } else {
            Err(undefined(name))
        }
    }
}

fn undefined(name: &Token<'_>) -> LoxError {
    LoxError::runtime(name, format!("Undefined variable '{}'.", name.lexeme))
}
