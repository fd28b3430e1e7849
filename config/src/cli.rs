//! # Command-Line Bridge
//!
//! Projects every known variable onto a clap command as one typed flag,
//! `--group.name`. The bridge must run after all subsystem declarations
//! (and normally after file loading): variables declared later are not
//! exposed.
//!
//! Flags are typed from the variable's declared kind, not from whatever
//! value it currently holds, and only values the user actually passed on
//! the command line are written back; flag defaults never mark a variable
//! as set. That makes the CLI the highest-precedence layer purely by
//! initialization order.

use clap::parser::ValueSource;
use clap::{Arg, ArgMatches, Command};

use errors::ConfigError;

use crate::registry::Registry;
use crate::value::{Value, ValueKind};

impl Registry {
    /// Add one `--group.name` flag per known variable to `cmd`.
    ///
    /// The flag's value type follows the variable's kind, its default is
    /// the variable's declared default, and its help text is the
    /// variable's description.
    pub fn attach_to_command(&self, mut cmd: Command) -> Command {
        for group in self.groups() {
            for var in group.vars() {
                let id = format!("{}.{}", group.name(), var.name());
                let mut arg = Arg::new(id.clone())
                    .long(id)
                    .value_name(var.kind().label())
                    .num_args(1);
                if let Some(desc) = var.description() {
                    arg = arg.help(desc.to_string());
                }
                arg = match var.kind() {
                    ValueKind::Bool => arg.value_parser(clap::value_parser!(bool)),
                    ValueKind::Int => arg.value_parser(clap::value_parser!(i64)),
                    ValueKind::Float => arg.value_parser(clap::value_parser!(f64)),
                    ValueKind::Str | ValueKind::List => {
                        arg.value_parser(clap::value_parser!(String))
                    }
                };
                if let Some(default) = var.default() {
                    arg = arg.default_value(default.to_string());
                }
                cmd = cmd.arg(arg);
            }
        }
        cmd
    }

    /// Write back every flag the user actually passed on the command line.
    ///
    /// Flags resolved from their default value are skipped, so only real
    /// overrides occupy the value slot. Flags for variables this registry
    /// does not know (or that `matches` does not carry) are ignored.
    pub fn apply_matches(&mut self, matches: &ArgMatches) -> Result<(), ConfigError> {
        let known: Vec<(String, String, ValueKind)> = self
            .groups()
            .flat_map(|group| {
                group.vars().map(move |var| {
                    (group.name().to_string(), var.name().to_string(), var.kind())
                })
            })
            .collect();

        for (group_name, name, kind) in known {
            let id = format!("{group_name}.{name}");
            if !matches.try_contains_id(&id).unwrap_or(false) {
                continue;
            }
            if matches.value_source(&id) != Some(ValueSource::CommandLine) {
                continue;
            }
            let value = match kind {
                ValueKind::Bool => matches.get_one::<bool>(&id).copied().map(Value::Bool),
                ValueKind::Int => matches.get_one::<i64>(&id).copied().map(Value::Int),
                ValueKind::Float => matches.get_one::<f64>(&id).copied().map(Value::Float),
                ValueKind::Str => matches.get_one::<String>(&id).cloned().map(Value::Str),
                ValueKind::List => matches.get_one::<String>(&id).map(|s| Value::from_literal(s)),
            };
            if let Some(value) = value {
                self.group(&group_name).set(&name, value)?;
            }
        }
        Ok(())
    }
}
