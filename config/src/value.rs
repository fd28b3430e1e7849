//! # Configuration Values
//!
//! The scalar/sequence value space shared by every variable, plus the
//! literal coercion used by the literal-style (INI) format.
//!
//! `Value` is `#[serde(untagged)]` so both persisted formats deserialize a
//! native scalar straight into the matching variant. Variant order matters:
//! booleans before integers before floats, so `true` never lands in a
//! string and `42` never lands in a float.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The value kind of a variable, fixed at declaration time.
///
/// The clap bridge types each generated flag from this, so flag typing does
/// not depend on whatever value the variable happens to hold when the
/// bridge runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Bool,
    Int,
    Float,
    Str,
    List,
}

impl ValueKind {
    /// Placeholder label for generated CLI flags.
    pub fn label(self) -> &'static str {
        match self {
            ValueKind::Bool => "BOOL",
            ValueKind::Int => "INT",
            ValueKind::Float => "FLOAT",
            ValueKind::Str => "STRING",
            ValueKind::List => "LIST",
        }
    }
}

/// A configuration value: boolean, integer, float, string, or a flat list
/// of values. Nested mappings are out of scope for the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Bool(_) => ValueKind::Bool,
            Value::Int(_) => ValueKind::Int,
            Value::Float(_) => ValueKind::Float,
            Value::Str(_) => ValueKind::Str,
            Value::List(_) => ValueKind::List,
        }
    }

    /// Coerce a raw textual value into a typed `Value`.
    ///
    /// Attempts a literal parse (booleans, integers, floats, quoted strings,
    /// bracketed lists, via the JSON literal grammar) and falls back to the
    /// raw string when the parse fails. `42` becomes an integer, `[1, 2]` a
    /// list, and `hello world` stays a string.
    pub fn from_literal(raw: &str) -> Value {
        let trimmed = raw.trim();
        serde_json::from_str(trimmed).unwrap_or_else(|_| Value::Str(trimmed.to_string()))
    }
}

/// Literal rendering, the inverse of [`Value::from_literal`].
///
/// Strings are written raw (unquoted), everything else in literal form.
/// Feeding the output back through `from_literal` reproduces an equal value
/// for every kind except strings whose raw text itself reads as another
/// literal (a string `"42"` reloads as the integer 42).
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            // Integral floats keep their decimal point so they reload as
            // floats, not integers.
            Value::Float(x) if x.is_finite() && x.fract() == 0.0 => write!(f, "{x:.1}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Str(s) => f.write_str(s),
            Value::List(_) => {
                let rendered = serde_json::to_string(self).map_err(|_| fmt::Error)?;
                f.write_str(&rendered)
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}
