//! # Variable Groups
//!
//! A group is a namespace of related configuration variables, usually one
//! per subsystem. The group owns the declaration and mutation rules:
//! declaring a name twice is a fatal configuration error, updating never
//! fails, and plain reads and writes require the name to already exist.

use indexmap::IndexMap;

use errors::ConfigError;

use crate::value::Value;
use crate::variable::Variable;

/// A named group of configuration variables.
///
/// Variables keep their insertion order, so introspection and serialization
/// output is deterministic.
#[derive(Debug, Clone)]
pub struct Group {
    name: String,
    vars: IndexMap<String, Variable>,
}

impl Group {
    pub(crate) fn new(name: &str) -> Group {
        Group {
            name: name.to_string(),
            vars: IndexMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declare a variable with a default value and an optional description.
    ///
    /// Variables must be declared before they can be read or written
    /// through [`Group::get`] / [`Group::set`]. Declaring a name that was
    /// already declared in this group fails with
    /// [`ConfigError::DuplicateDeclaration`]; declaring over a record that
    /// only an update created is allowed and keeps the imported value.
    pub fn declare(
        &mut self,
        name: &str,
        default: impl Into<Value>,
        description: Option<&str>,
    ) -> Result<(), ConfigError> {
        let default = default.into();
        let var = match self.vars.get(name) {
            Some(existing) if existing.declared() => {
                return Err(ConfigError::DuplicateDeclaration {
                    group: self.name.clone(),
                    name: name.to_string(),
                });
            }
            Some(imported) => imported.redeclare(default, description),
            None => Variable::new_declared(name, default, description),
        };
        self.vars.insert(name.to_string(), var);
        Ok(())
    }

    /// Like declare, but tolerates existing records and assigns the value
    /// directly. Used for values imported from settings files and modified
    /// CLI flags.
    ///
    /// The replacement record inherits the previous description and default
    /// unless new non-empty ones are supplied, and is marked not-declared so
    /// that `describe_options` lists authored variables only, even when the
    /// previous record was an explicit declaration.
    pub fn update(
        &mut self,
        name: &str,
        value: impl Into<Value>,
        default: Option<Value>,
        description: Option<&str>,
    ) {
        let value = value.into();
        let description = description.filter(|d| !d.is_empty()).map(str::to_string);
        let (kind, default, description) = match self.vars.get(name) {
            Some(prev) => (
                prev.kind(),
                default.or_else(|| prev.default().cloned()),
                description.or_else(|| prev.description().map(str::to_string)),
            ),
            None => (value.kind(), default, description),
        };
        let var = Variable::imported(name, kind, value, default, description);
        self.vars.insert(name.to_string(), var);
    }

    /// The effective value of `name`: what was assigned, else the default.
    pub fn get(&self, name: &str) -> Result<&Value, ConfigError> {
        self.vars
            .get(name)
            .and_then(Variable::effective)
            .ok_or_else(|| self.unknown(name))
    }

    /// Assign a value to an existing variable. Writing to a name that was
    /// never declared or updated is rejected; that asymmetry with `update`
    /// is what makes "declare before use" a real contract.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<(), ConfigError> {
        match self.vars.get_mut(name) {
            Some(var) => {
                var.assign(value.into());
                Ok(())
            }
            None => Err(self.unknown(name)),
        }
    }

    /// The description of `name`, if one was ever supplied.
    pub fn get_description(&self, name: &str) -> Result<Option<&str>, ConfigError> {
        match self.vars.get(name) {
            Some(var) => Ok(var.description()),
            None => Err(self.unknown(name)),
        }
    }

    /// Variables whose value slot was explicitly assigned, in insertion
    /// order.
    pub fn updated_vars(&self) -> impl Iterator<Item = &Variable> {
        self.vars.values().filter(|v| v.was_set())
    }

    /// The full record for `name`, if present.
    pub fn var(&self, name: &str) -> Option<&Variable> {
        self.vars.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    /// Variable names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.vars.keys().map(String::as_str)
    }

    /// Variable records in insertion order.
    pub fn vars(&self) -> impl Iterator<Item = &Variable> {
        self.vars.values()
    }

    fn unknown(&self, name: &str) -> ConfigError {
        ConfigError::UnknownVariable {
            group: self.name.clone(),
            name: name.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group() -> Group {
        Group::new("exec")
    }

    #[test]
    fn declared_variable_reads_its_default() {
        let mut g = group();
        g.declare("timeout", 30i64, Some("solver timeout in seconds"))
            .unwrap();
        assert_eq!(g.get("timeout").unwrap(), &Value::Int(30));
        assert!(!g.var("timeout").unwrap().was_set());
    }

    #[test]
    fn duplicate_declaration_fails() {
        let mut g = group();
        g.declare("timeout", 30i64, None).unwrap();
        let err = g.declare("timeout", 60i64, None).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::DuplicateDeclaration { ref group, ref name }
                if group == "exec" && name == "timeout"
        ));
    }

    #[test]
    fn unknown_reads_and_writes_are_rejected() {
        let mut g = group();
        g.declare("timeout", 30i64, None).unwrap();
        assert!(matches!(
            g.get("missing"),
            Err(ConfigError::UnknownVariable { .. })
        ));
        assert!(matches!(
            g.set("missing", 1i64),
            Err(ConfigError::UnknownVariable { .. })
        ));
        assert!(matches!(
            g.get_description("missing"),
            Err(ConfigError::UnknownVariable { .. })
        ));
    }

    #[test]
    fn set_marks_was_set_even_when_equal_to_default() {
        let mut g = group();
        g.declare("timeout", 30i64, None).unwrap();
        // A freshly constructed value equal to the default still counts as
        // set: occupancy of the slot is what matters, not equality.
        g.set("timeout", 30i64).unwrap();
        assert!(g.var("timeout").unwrap().was_set());
        assert_eq!(g.get("timeout").unwrap(), &Value::Int(30));
    }

    #[test]
    fn update_creates_missing_variables_as_imported() {
        let mut g = group();
        g.update("procs", 4i64, None, None);
        assert_eq!(g.get("procs").unwrap(), &Value::Int(4));
        let var = g.var("procs").unwrap();
        assert!(!var.declared());
        assert!(var.was_set());
        assert!(var.default().is_none());
    }

    #[test]
    fn update_inherits_description_and_default() {
        let mut g = group();
        g.declare("timeout", 30i64, Some("solver timeout")).unwrap();
        g.update("timeout", 60i64, None, None);
        let var = g.var("timeout").unwrap();
        assert_eq!(var.description(), Some("solver timeout"));
        assert_eq!(var.default(), Some(&Value::Int(30)));
        // Anything touched by update is treated as imported, not authored.
        assert!(!var.declared());
    }

    #[test]
    fn update_takes_new_nonempty_description() {
        let mut g = group();
        g.declare("timeout", 30i64, Some("old")).unwrap();
        g.update("timeout", 60i64, None, Some("new"));
        assert_eq!(g.get_description("timeout").unwrap(), Some("new"));
        g.update("timeout", 90i64, None, Some(""));
        assert_eq!(g.get_description("timeout").unwrap(), Some("new"));
    }

    #[test]
    fn update_keeps_declared_kind() {
        let mut g = group();
        g.declare("timeout", 30i64, None).unwrap();
        g.update("timeout", "fast", None, None);
        assert_eq!(g.var("timeout").unwrap().kind(), crate::ValueKind::Int);
    }

    #[test]
    fn declare_over_imported_record_keeps_its_value() {
        let mut g = group();
        // Settings file loaded before the owning subsystem initialized.
        g.update("procs", 8i64, None, None);
        g.declare("procs", 4i64, Some("worker count")).unwrap();
        let var = g.var("procs").unwrap();
        assert!(var.declared());
        assert!(var.was_set());
        assert_eq!(g.get("procs").unwrap(), &Value::Int(8));
        assert_eq!(var.default(), Some(&Value::Int(4)));
    }

    #[test]
    fn updated_vars_preserve_insertion_order() {
        let mut g = group();
        g.declare("a", 1i64, None).unwrap();
        g.declare("b", 2i64, None).unwrap();
        g.declare("c", 3i64, None).unwrap();
        g.set("c", 30i64).unwrap();
        g.set("a", 10i64).unwrap();
        let names: Vec<&str> = g.updated_vars().map(Variable::name).collect();
        assert_eq!(names, ["a", "c"]);
    }

    #[test]
    fn contains_and_iteration() {
        let mut g = group();
        g.declare("a", 1i64, None).unwrap();
        g.update("b", 2i64, None, None);
        assert!(g.contains("a"));
        assert!(g.contains("b"));
        assert!(!g.contains("z"));
        assert_eq!(g.names().collect::<Vec<_>>(), ["a", "b"]);
    }
}
