//! Constructor argument values.
//!
//! Parameters and their defaults are described with [`ValueKind`] and
//! [`Value`]. A constructor body reads its bound arguments through [`Args`].

use std::fmt;

use crate::{ConstructionError, TypeHash};

/// The kind of a constructor parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Bool,
    Int,
    Float,
    String,
}

impl ValueKind {
    /// Name used in signatures and diagnostics.
    pub const fn name(self) -> &'static str {
        match self {
            ValueKind::Bool => "bool",
            ValueKind::Int => "int",
            ValueKind::Float => "double",
            ValueKind::String => "string",
        }
    }

    /// Hash used when computing constructor identities.
    pub fn type_hash(self) -> TypeHash {
        TypeHash::from_name(self.name())
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A constructor argument or default value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl Value {
    /// The kind of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Bool(_) => ValueKind::Bool,
            Value::Int(_) => ValueKind::Int,
            Value::Float(_) => ValueKind::Float,
            Value::String(_) => ValueKind::String,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{:?}", x),
            Value::String(s) => write!(f, "{:?}", s),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

/// Arguments bound to a constructor call.
///
/// Accessors check both position and kind, so a constructor body can use `?`
/// and let a mismatch surface as a [`ConstructionError`].
#[derive(Debug, Clone, Copy)]
pub struct Args<'a> {
    values: &'a [Value],
}

impl<'a> Args<'a> {
    pub fn new(values: &'a [Value]) -> Self {
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Get the raw value at `index`.
    pub fn get(&self, index: usize) -> Result<&'a Value, ConstructionError> {
        self.values
            .get(index)
            .ok_or(ConstructionError::ArgumentCount {
                expected: index + 1,
                found: self.values.len(),
            })
    }

    pub fn bool(&self, index: usize) -> Result<bool, ConstructionError> {
        let value = self.get(index)?;
        value
            .as_bool()
            .ok_or_else(|| mismatch(index, ValueKind::Bool, value))
    }

    pub fn int(&self, index: usize) -> Result<i64, ConstructionError> {
        let value = self.get(index)?;
        value
            .as_int()
            .ok_or_else(|| mismatch(index, ValueKind::Int, value))
    }

    pub fn float(&self, index: usize) -> Result<f64, ConstructionError> {
        let value = self.get(index)?;
        value
            .as_float()
            .ok_or_else(|| mismatch(index, ValueKind::Float, value))
    }

    pub fn string(&self, index: usize) -> Result<&'a str, ConstructionError> {
        let value = self.get(index)?;
        value
            .as_str()
            .ok_or_else(|| mismatch(index, ValueKind::String, value))
    }
}

fn mismatch(index: usize, expected: ValueKind, found: &Value) -> ConstructionError {
    ConstructionError::ArgumentType {
        index,
        expected,
        found: found.kind(),
    }
}
