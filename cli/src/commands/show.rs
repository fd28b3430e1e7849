use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, ValueEnum};

use config::{Format, Registry};

#[derive(Args)]
pub struct ShowArgs {
    #[arg(long, help = "Explicit settings resource; defaults to the candidate search")]
    pub config: Option<PathBuf>,

    #[arg(
        long,
        value_enum,
        help = "Settings format; inferred from the path extension when omitted"
    )]
    pub format: Option<FormatChoice>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum FormatChoice {
    Ini,
    Yaml,
}

impl From<FormatChoice> for Format {
    fn from(choice: FormatChoice) -> Format {
        match choice {
            FormatChoice::Ini => Format::Ini,
            FormatChoice::Yaml => Format::Yaml,
        }
    }
}

pub fn run(args: ShowArgs) -> Result<()> {
    let format = match (args.format, &args.config) {
        (Some(choice), _) => choice.into(),
        (None, Some(path)) => Format::from_path(path)?,
        (None, None) => Format::Ini,
    };

    let mut registry = Registry::new();
    registry.load_overrides(args.config.as_deref(), format)?;

    for group in registry.groups() {
        for var in group.vars() {
            if let Some(value) = var.effective() {
                println!("{}.{} = {}", group.name(), var.name(), value);
            }
        }
    }

    Ok(())
}
