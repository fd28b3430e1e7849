pub mod convert;
pub mod show;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "lattice",
    author,
    version,
    about = "Lattice configuration registry inspector",
    long_about = "Inspect and convert Lattice settings resources.\n\nWith no explicit path, \
                  commands search the working directory for the usual candidates \
                  (ltc.*, .ltc.*, lattice.*, .lattice.*)."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Load a settings resource and print every known key")]
    Show(show::ShowArgs),

    #[command(about = "Convert a settings resource between formats")]
    Convert(convert::ConvertArgs),
}
