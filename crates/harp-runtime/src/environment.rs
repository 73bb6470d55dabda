//! Lexical scopes
//!
//! An environment maps names to values and links to the scope it is nested
//! in. Lookups and assignments walk outward; definitions never do.

use crate::span::Span;
use crate::value::{RuntimeError, Value};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Shared handle to a scope; closures keep their defining scope alive through it
pub type Scope = Rc<RefCell<Environment>>;

#[derive(Debug, Default)]
pub struct Environment {
    values: HashMap<String, Value>,
    parent: Option<Scope>,
}

impl Environment {
    /// A root scope with no parent
    pub fn new() -> Self {
        Self::default()
    }

    /// A child scope of `parent`
    pub fn with_parent(parent: Scope) -> Self {
        Self {
            values: HashMap::new(),
            parent: Some(parent),
        }
    }

    /// Wrap into a shared handle
    pub fn into_scope(self) -> Scope {
        Rc::new(RefCell::new(self))
    }

    /// Bind `name` in this scope, replacing any existing binding here
    pub fn define(&mut self, name: impl Into<String>, value: Value) {
        self.values.insert(name.into(), value);
    }

    /// Look `name` up here, then in each enclosing scope
    pub fn get(&self, name: &str, span: Span) -> Result<Value, RuntimeError> {
        if let Some(value) = self.values.get(name) {
            return Ok(value.clone());
        }
        match &self.parent {
            Some(parent) => parent.borrow().get(name, span),
            None => Err(RuntimeError::UndefinedVariable {
                name: name.to_string(),
                span,
            }),
        }
    }

    /// Overwrite the binding in the nearest scope that has `name`
    pub fn assign(&mut self, name: &str, value: Value, span: Span) -> Result<(), RuntimeError> {
        if let Some(slot) = self.values.get_mut(name) {
            *slot = value;
            return Ok(());
        }
        match &self.parent {
            Some(parent) => parent.borrow_mut().assign(name, value, span),
            None => Err(RuntimeError::UndefinedVariable {
                name: name.to_string(),
                span,
            }),
        }
    }

    /// Whether `name` is bound in this scope itself
    pub fn contains_local(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }
}
