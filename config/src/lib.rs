//! # Configuration Registry
//!
//! Hierarchical configuration for the Lattice system.
//!
//! Values are merged from three sources, in order of priority:
//!
//! 1. default values fixed when a subsystem declares its variables
//! 2. a persisted settings file (`ltc.ini` / `lattice.yml` and friends)
//! 3. command-line flags
//!
//! Subsystems declare variables into named groups during startup; the
//! override loader then merges a settings file into the registry, and the
//! clap bridge applies command-line flags last. Precedence is a property of
//! that initialization order, not of the registry itself.
//!
//! This crate provides:
//! - The group/variable model with declaration and mutation rules
//! - Override loading for two persisted formats (literal-style INI and
//!   structured-style YAML) with explicit, per-format error policies
//! - Persistence of explicitly-set values back to either format
//! - Introspection over declared variables and known keys
//! - A clap bridge exposing one typed flag per variable

pub mod cli;
pub mod group;
pub mod loader;
pub mod registry;
pub mod value;
pub mod variable;

mod ini;
mod yaml;

pub use errors::ConfigError;
pub use group::Group;
pub use loader::Format;
pub use registry::Registry;
pub use value::{Value, ValueKind};
pub use variable::Variable;
