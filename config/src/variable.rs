//! A single named, typed, defaulted configuration slot.

use crate::value::{Value, ValueKind};

/// One configuration variable inside a [`Group`](crate::Group).
///
/// A variable is created either by declaration, which fixes its default,
/// its kind, and marks it `declared`, or by an update, which marks it
/// imported (`declared == false`). The current value lives in a separate
/// slot from the default: the slot stays empty until something explicitly
/// assigns to it, and [`Variable::was_set`] reports whether the slot is
/// occupied. Assigning a value equal to the default still occupies the
/// slot, so it still counts as set.
#[derive(Debug, Clone)]
pub struct Variable {
    name: String,
    kind: ValueKind,
    default: Option<Value>,
    value: Option<Value>,
    description: Option<String>,
    declared: bool,
}

impl Variable {
    /// A declared variable: default fixed, value slot empty.
    pub(crate) fn new_declared(name: &str, default: Value, description: Option<&str>) -> Variable {
        Variable {
            name: name.to_string(),
            kind: default.kind(),
            default: Some(default),
            value: None,
            description: description.map(str::to_string),
            declared: true,
        }
    }

    /// An imported variable: value assigned directly, not authored by a
    /// declaration.
    pub(crate) fn imported(
        name: &str,
        kind: ValueKind,
        value: Value,
        default: Option<Value>,
        description: Option<String>,
    ) -> Variable {
        Variable {
            name: name.to_string(),
            kind,
            default,
            value: Some(value),
            description,
            declared: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    /// The original declared default, if the variable has one. Variables
    /// created purely by update carry no default.
    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// True only for variables introduced by an explicit declaration and
    /// not since replaced by an update.
    pub fn declared(&self) -> bool {
        self.declared
    }

    /// Whether the value slot has been explicitly assigned since the
    /// variable was declared. Equality with the default is irrelevant.
    pub fn was_set(&self) -> bool {
        self.value.is_some()
    }

    /// The effective value: the assigned one if set, else the default.
    pub fn effective(&self) -> Option<&Value> {
        self.value.as_ref().or(self.default.as_ref())
    }

    pub(crate) fn assign(&mut self, value: Value) {
        self.value = Some(value);
    }

    /// Replace this record with a declared one, keeping any value already
    /// imported for it (a settings file may arrive before the owning
    /// subsystem declares the variable).
    pub(crate) fn redeclare(&self, default: Value, description: Option<&str>) -> Variable {
        Variable {
            name: self.name.clone(),
            kind: default.kind(),
            default: Some(default),
            value: self.value.clone(),
            description: description.map(str::to_string),
            declared: true,
        }
    }
}
