//! Retrieve command: read-only knowledge lookup.

use anyhow::Result;
use clap::Args;
use hindsight_core::LearningConfig;
use hindsight_core::learning::{KnowledgeRetriever, KnowledgeStore};

#[derive(Debug, Args)]
pub struct RetrieveArgs {
    /// Query to look up
    #[arg(help = "Query text to match against learned patterns")]
    pub query: String,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn execute(args: RetrieveArgs, config: LearningConfig) -> Result<()> {
    let store = KnowledgeStore::new(config.knowledge_path);
    let knowledge = store.load();
    let relevant = KnowledgeRetriever::new().retrieve(&knowledge, &args.query);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&relevant)?);
        return Ok(());
    }

    if relevant.best_practices.is_empty() {
        println!("No learned knowledge matches '{}'", args.query);
        return Ok(());
    }

    println!("Best practices for '{}'", args.query);
    for practice in &relevant.best_practices {
        println!(
            "  - {} (seen {} times, discovered {})",
            practice.pattern,
            practice.success_count,
            practice.discovered.format("%Y-%m-%d")
        );
    }

    Ok(())
}
