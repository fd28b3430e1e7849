//! # Lattice Errors
//!
//! Error taxonomy shared across the Lattice configuration registry.
//!
//! Declaration and identity errors (`DuplicateDeclaration`,
//! `UnknownVariable`) are programmer errors in the calling subsystem and are
//! never caught inside the registry; they propagate to the top of the call.
//! Resource errors are raised only for an explicit, user-specified override
//! path; a miss during the default candidate search is not an error.

use thiserror::Error;

/// Configuration registry errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A `(group, name)` pair was declared twice. Declaration is a one-shot
    /// contract; colliding subsystems must fail loudly.
    #[error("{group}.{name} already declared")]
    DuplicateDeclaration { group: String, name: String },

    /// A read, write, or description lookup named a variable that was never
    /// declared or updated in that group.
    #[error("{group}.{name} not declared")]
    UnknownVariable { group: String, name: String },

    /// An explicitly given override path could not be opened.
    #[error("override resource not found: {path}")]
    ResourceNotFound { path: String },

    /// The resource content could not be parsed as the selected format.
    /// The literal-style loader propagates this; the structured-style loader
    /// downgrades it to a logged warning.
    #[error("malformed override resource {path}: {reason}")]
    MalformedResource { path: String, reason: String },

    /// I/O failure on a resource that was already opened.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
