use std::fmt;

/// A runtime value. Values are copied around, never shared.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// No value at all: the payload of tokens without a literal, and the
    /// placeholder the parser substitutes for a missing sub-expression.
    #[default]
    Unset,
    String(String),
    Number(f64),
    Boolean(bool),
    Null,
}

impl Value {
    /// Strings are truthy when non-empty, numbers only when strictly
    /// positive. `0` and negative numbers are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::String(s) => !s.is_empty(),
            Value::Number(n) => *n > 0.0,
            Value::Boolean(b) => *b,
            Value::Null | Value::Unset => false,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Unset => "unset",
            Value::String(_) => "string",
            Value::Number(_) => "number",
            Value::Boolean(_) => "boolean",
            Value::Null => "nil",
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Unset => write!(f, "unset"),
            Value::String(s) => write!(f, "{}", s),
            // Shortest representation that round-trips; whole numbers have no
            // fractional part.
            Value::Number(n) => write!(f, "{}", n),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Null => write!(f, "nil"),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}
