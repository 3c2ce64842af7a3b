use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "apimap")]
#[command(about = "API surface classifier for decompiled codebases", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify the API surface from a class index
    Classify {
        /// Path to class-index.json
        index: PathBuf,

        /// Root of the decompiled sources used for import hints
        /// (defaults to `decompiled` next to the index)
        #[arg(long)]
        sources: Option<PathBuf>,

        /// Output directory for the three reports
        /// (defaults to the index's directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Configuration file (defaults to .apimap.toml if present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Increase verbosity level (can be repeated: -v, -vv)
        #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
        verbosity: u8,
    },

    /// Initialize configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}
