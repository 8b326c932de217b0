use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use hindsight_core::LearningConfig;

use super::commands;

#[derive(Parser, Debug)]
#[command(
    name = "hindsight",
    version,
    about = "Hindsight - learn from your assistant's interaction feedback",
    long_about = "Hindsight accumulates interaction feedback from a conversational assistant and distills it into a queryable knowledge base of success patterns, identified weaknesses, and performance metrics."
)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the knowledge document location
    #[arg(long, global = true)]
    pub knowledge_path: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Resolve the effective configuration from file and flags.
    pub fn learning_config(&self) -> Result<LearningConfig> {
        let mut config = match &self.config {
            Some(path) => LearningConfig::from_file(path)?,
            None => LearningConfig::default(),
        };
        if let Some(path) = &self.knowledge_path {
            config.knowledge_path = path.clone();
        }
        Ok(config)
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replay an interaction log through the learner
    #[command(about = "Feed a JSON-lines interaction log through the learning cycle")]
    Replay(commands::replay::ReplayArgs),

    /// Look up learned knowledge for a query
    #[command(about = "Print best practices relevant to a query")]
    Retrieve(commands::retrieve::RetrieveArgs),

    /// Show knowledge base statistics
    #[command(about = "Show knowledge base counts and document health")]
    Stats(commands::stats::StatsArgs),

    /// Deduplicate the knowledge base
    #[command(about = "Remove duplicate best practices and persist the result")]
    Consolidate,
}
