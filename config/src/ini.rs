//! # Literal-Style Adapter (INI)
//!
//! Section-delimited `key = value` text. Values are coerced through the
//! literal evaluator ([`Value::from_literal`]), so `timeout = 30` loads as
//! an integer while `backend = portfolio` stays a string.
//!
//! Error policy for this format: any malformed line is fatal to the load
//! call. The document is parsed in full before the loader applies anything,
//! so a failure never leaves the registry partially updated.

use std::fmt::Write as _;
use std::path::Path;

use errors::ConfigError;

use crate::registry::Registry;
use crate::value::Value;

/// Parsed sections, in file order: `(group name, [(key, value)])`.
pub(crate) type Document = Vec<(String, Vec<(String, Value)>)>;

pub(crate) fn parse(text: &str, origin: &Path) -> Result<Document, ConfigError> {
    let mut doc: Document = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }
        if let Some(rest) = line.strip_prefix('[') {
            let name = rest
                .strip_suffix(']')
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .ok_or_else(|| malformed(origin, idx, "invalid section header"))?;
            doc.push((name.to_string(), Vec::new()));
        } else if let Some((key, value)) = line.split_once('=') {
            let key = key.trim();
            if key.is_empty() {
                return Err(malformed(origin, idx, "empty key"));
            }
            let Some((_, entries)) = doc.last_mut() else {
                return Err(malformed(origin, idx, "key outside of any section"));
            };
            entries.push((key.to_string(), Value::from_literal(value)));
        } else {
            return Err(malformed(origin, idx, "expected `[section]` or `key = value`"));
        }
    }
    Ok(doc)
}

/// Serialize every explicitly-set variable, grouped by section. Groups with
/// no set variables are omitted entirely.
pub(crate) fn render(registry: &Registry) -> String {
    let mut out = String::new();
    for group in registry.groups() {
        let mut header_written = false;
        for var in group.updated_vars() {
            if let Some(value) = var.effective() {
                if !header_written {
                    let _ = writeln!(out, "[{}]", group.name());
                    header_written = true;
                }
                let _ = writeln!(out, "{} = {value}", var.name());
            }
        }
        if header_written {
            let _ = writeln!(out);
        }
    }
    out
}

fn malformed(origin: &Path, idx: usize, reason: &str) -> ConfigError {
    ConfigError::MalformedResource {
        path: origin.display().to_string(),
        reason: format!("line {}: {reason}", idx + 1),
    }
}
