use crate::error::RuntimeError;
use crate::token::Token;
use crate::value::Value;
use std::collections::HashMap;

/// Variable bindings for one run.
///
/// Only the outermost scope is used today. `enclosing` lets a block scope
/// be pushed later; lookups and assignments already walk the chain.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Environment {
    values: HashMap<String, Value>,
    enclosing: Option<Box<Environment>>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_enclosing(enclosing: Environment) -> Self {
        Self {
            values: HashMap::new(),
            enclosing: Some(Box::new(enclosing)),
        }
    }

    /// Give back the enclosing scope, dropping this one.
    pub fn into_enclosing(self) -> Option<Environment> {
        self.enclosing.map(|enclosing| *enclosing)
    }

    /// Bind a new name in the current scope. Names are declared once per
    /// scope; callers check `contains_local` first.
    pub fn define(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        debug_assert!(
            !self.values.contains_key(&name),
            "variable '{}' defined twice in the same scope",
            name
        );
        self.values.insert(name, value);
    }

    pub fn contains_local(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn lookup(&self, name: &str) -> Option<&Value> {
        match self.values.get(name) {
            Some(value) => Some(value),
            None => self.enclosing.as_ref().and_then(|enclosing| enclosing.lookup(name)),
        }
    }

    pub fn get(&self, name: &Token) -> Result<Value, RuntimeError> {
        self.lookup(&name.lexeme)
            .cloned()
            .ok_or_else(|| RuntimeError::UndefinedVariable {
                token: name.clone(),
            })
    }

    /// Overwrite an existing binding. Assignment never declares.
    pub fn assign(&mut self, name: &Token, value: Value) -> Result<(), RuntimeError> {
        if let Some(slot) = self.values.get_mut(&name.lexeme) {
            *slot = value;
            Ok(())
        } else if let Some(ref mut enclosing) = self.enclosing {
            enclosing.assign(name, value)
        } else {
            Err(RuntimeError::UndefinedVariable {
                token: name.clone(),
            })
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
