//! # Structured-Style Adapter (YAML)
//!
//! A nested mapping-of-mappings document: top-level keys are group names,
//! each mapping variable name → native scalar or sequence value.
//!
//! Error policy for this format: the adapter itself returns `Result`, and
//! the loader downgrades any parse or structural failure to a logged
//! warning, leaving the registry untouched. The document is parsed in full
//! before anything is applied, so there is no partial application either
//! way.

use std::path::Path;

use indexmap::IndexMap;

use errors::ConfigError;

use crate::registry::Registry;
use crate::value::Value;

/// Group name → (variable name → value), both levels in document order.
pub(crate) type Document = IndexMap<String, IndexMap<String, Value>>;

pub(crate) fn parse(text: &str, origin: &Path) -> Result<Document, ConfigError> {
    serde_yaml::from_str(text).map_err(|e| ConfigError::MalformedResource {
        path: origin.display().to_string(),
        reason: e.to_string(),
    })
}

/// Serialize every explicitly-set variable as a nested mapping. Groups with
/// no set variables are omitted entirely.
pub(crate) fn render(registry: &Registry) -> Result<String, ConfigError> {
    let mut doc: IndexMap<&str, IndexMap<&str, &Value>> = IndexMap::new();
    for group in registry.groups() {
        let entries: IndexMap<&str, &Value> = group
            .updated_vars()
            .filter_map(|var| var.effective().map(|value| (var.name(), value)))
            .collect();
        if !entries.is_empty() {
            doc.insert(group.name(), entries);
        }
    }
    serde_yaml::to_string(&doc).map_err(|e| ConfigError::Io(std::io::Error::other(e)))
}
