//! Stats command: knowledge document health at a glance.

use anyhow::Result;
use clap::Args;
use hindsight_core::LearningConfig;
use hindsight_core::learning::KnowledgeStore;

#[derive(Debug, Args)]
pub struct StatsArgs {
    /// Print the stats as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn execute(args: StatsArgs, config: LearningConfig) -> Result<()> {
    let store = KnowledgeStore::new(config.knowledge_path);
    let knowledge = store.load();

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "document": store.path(),
                "version": knowledge.version,
                "best_practices": knowledge.best_practices.len(),
                "improvements": knowledge.improvements.len(),
            }))?
        );
        return Ok(());
    }

    println!("Knowledge document: {}", store.path().display());
    println!("Schema version:     {}", knowledge.version);
    println!("Best practices:     {}", knowledge.best_practices.len());
    println!("Improvements:       {}", knowledge.improvements.len());

    if let Some(latest) = knowledge.best_practices.iter().map(|p| p.discovered).max() {
        println!("Last discovery:     {}", latest.format("%Y-%m-%d %H:%M"));
    }

    Ok(())
}
