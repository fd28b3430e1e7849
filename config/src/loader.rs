//! # Override Loading & Persistence
//!
//! Locates a persisted settings resource, merges it into the registry, and
//! writes explicitly-set values back out.
//!
//! The format is an explicit policy flag chosen by the caller, because the
//! two adapters deliberately diverge on failure handling: a malformed
//! literal-style (INI) resource is fatal to the load call, while a
//! malformed structured-style (YAML) resource is logged as a warning and
//! ignored. Which policy applies must never depend on which adapter
//! happens to be linked.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use errors::ConfigError;

use crate::registry::Registry;
use crate::{ini, yaml};

/// Short stem tried first during the default candidate search.
pub const SHORT_STEM: &str = "ltc";
/// Full stem tried after the short one.
pub const FULL_STEM: &str = "lattice";

/// The persisted settings format, selected explicitly by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Literal-style `[section]` / `key = value` text. Parse failures are
    /// fatal to the load call.
    Ini,
    /// Structured mapping-of-mappings document. Parse failures are logged
    /// and ignored.
    Yaml,
}

impl Format {
    pub fn extension(self) -> &'static str {
        match self {
            Format::Ini => "ini",
            Format::Yaml => "yml",
        }
    }

    /// Detect the format from a file extension (`.ini`, `.yml`, `.yaml`).
    pub fn from_path(path: &Path) -> Result<Format, ConfigError> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("ini") => Ok(Format::Ini),
            Some("yml" | "yaml") => Ok(Format::Yaml),
            other => Err(ConfigError::MalformedResource {
                path: path.display().to_string(),
                reason: match other {
                    Some(ext) => format!("unsupported settings format: {ext}"),
                    None => "settings file has no extension".to_string(),
                },
            }),
        }
    }

    /// Candidate file names for the default search, in lookup order:
    /// short stem before full stem, plain before hidden within each.
    fn candidates(self) -> [String; 4] {
        let ext = self.extension();
        [
            format!("{SHORT_STEM}.{ext}"),
            format!(".{SHORT_STEM}.{ext}"),
            format!("{FULL_STEM}.{ext}"),
            format!(".{FULL_STEM}.{ext}"),
        ]
    }
}

/// First existing candidate resource in `dir`, if any.
pub(crate) fn find_candidate(dir: &Path, format: Format) -> Option<PathBuf> {
    format
        .candidates()
        .into_iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

impl Registry {
    /// Merge a persisted settings resource into the registry.
    ///
    /// With an explicit `path`, a resource that cannot be opened is a hard
    /// [`ConfigError::ResourceNotFound`]. With no path, the candidate names
    /// are searched in the current working directory and a miss is a silent
    /// no-op and the registry keeps its defaults.
    pub fn load_overrides(
        &mut self,
        path: Option<&Path>,
        format: Format,
    ) -> Result<(), ConfigError> {
        let resource = match path {
            Some(p) => p.to_path_buf(),
            None => match find_candidate(Path::new("."), format) {
                Some(found) => found,
                None => return Ok(()),
            },
        };
        let text = match fs::read_to_string(&resource) {
            Ok(text) => text,
            // Only an explicit, user-specified path elevates a miss to an
            // error; a candidate that vanished is treated as not found.
            Err(_) if path.is_some() => {
                return Err(ConfigError::ResourceNotFound {
                    path: resource.display().to_string(),
                });
            }
            Err(_) => return Ok(()),
        };
        info!("reading configuration from {}", resource.display());
        self.apply_overrides(&text, &resource, format)
    }

    fn apply_overrides(
        &mut self,
        text: &str,
        origin: &Path,
        format: Format,
    ) -> Result<(), ConfigError> {
        match format {
            Format::Ini => {
                let doc = ini::parse(text, origin)?;
                for (group_name, entries) in doc {
                    let group = self.group(&group_name);
                    for (key, value) in entries {
                        group.update(&key, value, None, None);
                    }
                }
                Ok(())
            }
            Format::Yaml => match yaml::parse(text, origin) {
                Ok(doc) => {
                    for (group_name, entries) in doc {
                        let group = self.group(&group_name);
                        for (key, value) in entries {
                            group.update(&key, value, None, None);
                        }
                    }
                    Ok(())
                }
                Err(e) => {
                    warn!("ignoring override resource: {e}");
                    Ok(())
                }
            },
        }
    }

    /// Serialize every explicitly-set variable to `writer` in the chosen
    /// format. Output is deterministic: saving twice without intervening
    /// mutation produces identical bytes.
    pub fn save_to<W: Write>(&self, writer: &mut W, format: Format) -> Result<(), ConfigError> {
        let text = match format {
            Format::Ini => ini::render(self),
            Format::Yaml => yaml::render(self)?,
        };
        writer.write_all(text.as_bytes())?;
        Ok(())
    }

    /// Serialize explicitly-set variables to the file at `path`.
    pub fn save(&self, path: &Path, format: Format) -> Result<(), ConfigError> {
        let mut file = fs::File::create(path)?;
        self.save_to(&mut file, format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;
    use serial_test::serial;
    use std::env;

    #[test]
    fn explicit_path_miss_is_a_hard_error() {
        let mut registry = Registry::new();
        let err = registry
            .load_overrides(Some(Path::new("/nonexistent/ltc.ini")), Format::Ini)
            .unwrap_err();
        assert!(matches!(err, ConfigError::ResourceNotFound { .. }));
    }

    #[test]
    fn short_plain_candidate_wins() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("lattice.ini"), "[a]\nx = 1\n").unwrap();
        fs::write(dir.path().join(".ltc.ini"), "[a]\nx = 2\n").unwrap();
        fs::write(dir.path().join("ltc.ini"), "[a]\nx = 3\n").unwrap();
        let found = find_candidate(dir.path(), Format::Ini).unwrap();
        assert_eq!(found, dir.path().join("ltc.ini"));
    }

    #[test]
    fn hidden_short_beats_plain_full() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("lattice.ini"), "[a]\nx = 1\n").unwrap();
        fs::write(dir.path().join(".ltc.ini"), "[a]\nx = 2\n").unwrap();
        let found = find_candidate(dir.path(), Format::Ini).unwrap();
        assert_eq!(found, dir.path().join(".ltc.ini"));
    }

    #[test]
    fn candidate_extension_follows_format() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("ltc.ini"), "[a]\nx = 1\n").unwrap();
        assert!(find_candidate(dir.path(), Format::Yaml).is_none());
        fs::write(dir.path().join("lattice.yml"), "a:\n  x: 1\n").unwrap();
        assert_eq!(
            find_candidate(dir.path(), Format::Yaml).unwrap(),
            dir.path().join("lattice.yml")
        );
    }

    #[test]
    #[serial]
    fn default_search_miss_is_a_silent_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let prev = env::current_dir().unwrap();
        env::set_current_dir(dir.path()).unwrap();

        let mut registry = Registry::new();
        registry.group("exec").declare("timeout", 30i64, None).unwrap();
        registry.load_overrides(None, Format::Ini).unwrap();

        env::set_current_dir(prev).unwrap();
        assert_eq!(
            registry.get_group("exec").unwrap().get("timeout").unwrap(),
            &Value::Int(30)
        );
        assert!(!registry.get_group("exec").unwrap().var("timeout").unwrap().was_set());
    }

    #[test]
    #[serial]
    fn default_search_applies_the_first_candidate() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("ltc.ini"), "[exec]\ntimeout = 90\n").unwrap();
        let prev = env::current_dir().unwrap();
        env::set_current_dir(dir.path()).unwrap();

        let mut registry = Registry::new();
        registry.group("exec").declare("timeout", 30i64, None).unwrap();
        let result = registry.load_overrides(None, Format::Ini);

        env::set_current_dir(prev).unwrap();
        result.unwrap();
        assert_eq!(
            registry.get_group("exec").unwrap().get("timeout").unwrap(),
            &Value::Int(90)
        );
    }

    #[test]
    fn ini_load_updates_existing_and_creates_imported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("overrides.ini");
        fs::write(&path, "[exec]\ntimeout = 90\nextra = hello\n").unwrap();

        let mut registry = Registry::new();
        registry
            .group("exec")
            .declare("timeout", 30i64, Some("solver timeout"))
            .unwrap();
        registry.load_overrides(Some(&path), Format::Ini).unwrap();

        let exec = registry.get_group("exec").unwrap();
        assert_eq!(exec.get("timeout").unwrap(), &Value::Int(90));
        // Description survives the update path.
        assert_eq!(exec.get_description("timeout").unwrap(), Some("solver timeout"));
        assert_eq!(exec.get("extra").unwrap(), &Value::Str("hello".into()));
        assert!(!exec.var("extra").unwrap().declared());
    }

    #[test]
    fn malformed_ini_propagates_and_applies_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("overrides.ini");
        fs::write(&path, "[exec]\ntimeout = 90\nbroken line\n").unwrap();

        let mut registry = Registry::new();
        registry.group("exec").declare("timeout", 30i64, None).unwrap();
        let err = registry.load_overrides(Some(&path), Format::Ini).unwrap_err();
        assert!(matches!(err, ConfigError::MalformedResource { .. }));
        // Parsed in full before applying: the valid first line must not
        // have leaked into the registry.
        assert_eq!(
            registry.get_group("exec").unwrap().get("timeout").unwrap(),
            &Value::Int(30)
        );
    }

    #[test]
    fn malformed_yaml_warns_and_leaves_registry_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("overrides.yml");
        fs::write(&path, "exec: [unmatched\n").unwrap();

        let mut registry = Registry::new();
        registry.group("exec").declare("timeout", 30i64, None).unwrap();
        registry.load_overrides(Some(&path), Format::Yaml).unwrap();

        let exec = registry.get_group("exec").unwrap();
        assert_eq!(exec.get("timeout").unwrap(), &Value::Int(30));
        assert!(!exec.var("timeout").unwrap().was_set());
    }

    #[test]
    fn yaml_load_applies_native_types() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("overrides.yml");
        fs::write(&path, "exec:\n  timeout: 90\n  tags: [a, b]\n").unwrap();

        let mut registry = Registry::new();
        registry.load_overrides(Some(&path), Format::Yaml).unwrap();

        let exec = registry.get_group("exec").unwrap();
        assert_eq!(exec.get("timeout").unwrap(), &Value::Int(90));
        assert_eq!(
            exec.get("tags").unwrap(),
            &Value::List(vec![Value::Str("a".into()), Value::Str("b".into())])
        );
    }

    #[test]
    fn format_detection_from_extension() {
        assert_eq!(Format::from_path(Path::new("x.ini")).unwrap(), Format::Ini);
        assert_eq!(Format::from_path(Path::new("x.yml")).unwrap(), Format::Yaml);
        assert_eq!(Format::from_path(Path::new("x.yaml")).unwrap(), Format::Yaml);
        assert!(Format::from_path(Path::new("x.toml")).is_err());
        assert!(Format::from_path(Path::new("x")).is_err());
    }
}
