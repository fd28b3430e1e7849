//! # The Registry
//!
//! Mapping from group name to [`Group`], created lazily on first reference.
//!
//! The registry is an explicit context object: create it at process entry,
//! let subsystems declare into it during the single-threaded startup phase,
//! then treat it as read-only (the clap bridge is the last writer). It has
//! no interior locking; concurrent mutation needs external synchronization
//! that this design deliberately does not provide. Tests build a fresh
//! `Registry` per case.

use std::fmt::Write as _;

use indexmap::IndexMap;

use crate::group::Group;

/// The configuration registry: every group, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    groups: IndexMap<String, Group>,
}

impl Registry {
    pub fn new() -> Registry {
        Registry::default()
    }

    /// Get the group named `name`, creating an empty one on first
    /// reference. Safe to call at any point during startup; groups are
    /// never removed.
    pub fn group(&mut self, name: &str) -> &mut Group {
        self.groups
            .entry(name.to_string())
            .or_insert_with(|| Group::new(name))
    }

    /// Read-only lookup that does not create the group.
    pub fn get_group(&self, name: &str) -> Option<&Group> {
        self.groups.get(name)
    }

    /// All groups, in creation order.
    pub fn groups(&self) -> impl Iterator<Item = &Group> {
        self.groups.values()
    }

    /// A human-readable catalog of every *declared* variable: qualified
    /// name, default, and description. Variables that only an update
    /// created (imported settings) are excluded: this lists what modules
    /// authored, not what a file happened to contain.
    pub fn describe_options(&self) -> String {
        let mut out = String::new();
        for group in self.groups.values() {
            for var in group.vars() {
                if !var.declared() {
                    continue;
                }
                let _ = writeln!(out, "{}.{}", group.name(), var.name());
                if let Some(default) = var.default() {
                    let _ = writeln!(out, "  default: {default}");
                }
                if let Some(desc) = var.description() {
                    let _ = writeln!(out, "  {desc}");
                }
            }
        }
        out
    }

    /// Every qualified `group.name` key currently known, declared or not,
    /// lazily recomputed on each call.
    pub fn config_keys(&self) -> impl Iterator<Item = String> + '_ {
        self.groups.values().flat_map(|group| {
            group
                .names()
                .map(move |name| format!("{}.{name}", group.name()))
        })
    }
}
