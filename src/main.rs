use anyhow::Result;
use apimap::cli::{Cli, Commands};
use apimap::commands::{handle_classify, init_config, ClassifyConfig};
use clap::Parser;

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Classify {
            index,
            sources,
            output,
            config,
            verbosity,
        } => {
            init_logging(verbosity);
            handle_classify(ClassifyConfig {
                index_path: index,
                sources,
                output,
                config,
            })
        }
        Commands::Init { force } => {
            init_logging(0);
            init_config(force)
        }
    }
}

fn init_logging(verbosity: u8) {
    let default_level = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}
