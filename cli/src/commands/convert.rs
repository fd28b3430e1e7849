use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use config::{Format, Registry};

#[derive(Args)]
pub struct ConvertArgs {
    #[arg(long, help = "Source settings resource")]
    pub from: PathBuf,

    #[arg(long, help = "Destination settings resource")]
    pub to: PathBuf,
}

pub fn run(args: ConvertArgs) -> Result<()> {
    let from_format = Format::from_path(&args.from)?;
    let to_format = Format::from_path(&args.to)?;

    let mut registry = Registry::new();
    registry.load_overrides(Some(&args.from), from_format)?;
    registry.save(&args.to, to_format)?;

    println!("wrote {}", args.to.display());
    Ok(())
}
