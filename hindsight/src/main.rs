use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
use cli::{Cli, Commands};

fn main() -> Result<()> {
    // Parse CLI arguments first to get verbosity level
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();

    let config = cli.learning_config()?;

    match cli.command {
        Commands::Replay(args) => cli::commands::replay::execute(args, config),
        Commands::Retrieve(args) => cli::commands::retrieve::execute(args, config),
        Commands::Stats(args) => cli::commands::stats::execute(args, config),
        Commands::Consolidate => cli::commands::consolidate::execute(config),
    }
}
