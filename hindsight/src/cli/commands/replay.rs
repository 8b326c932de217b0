//! Replay command: feed a logged interaction stream through the learner.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use hindsight_core::LearningConfig;
use hindsight_core::learning::{Feedback, SelfLearner};
use serde::Deserialize;
use tracing::{info, warn};

#[derive(Debug, Args)]
pub struct ReplayArgs {
    /// JSON-lines file with one interaction per line
    #[arg(help = "Path to the interaction log to replay")]
    pub file: PathBuf,

    /// Override the learning interval for this replay
    #[arg(long)]
    pub interval: Option<u32>,
}

/// One line of a replay log.
#[derive(Debug, Deserialize)]
struct LoggedInteraction {
    query: String,
    response: String,
    #[serde(default)]
    rating: Option<u8>,
    #[serde(default)]
    comment: Option<String>,
    #[serde(default)]
    confidence: Option<f64>,
}

pub fn execute(args: ReplayArgs, mut config: LearningConfig) -> Result<()> {
    if let Some(interval) = args.interval {
        config.learning_interval = interval;
    }

    let file =
        File::open(&args.file).with_context(|| format!("cannot open {}", args.file.display()))?;
    let mut learner = SelfLearner::new(config);

    let mut replayed = 0usize;
    let mut skipped = 0usize;

    for (number, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let logged: LoggedInteraction = match serde_json::from_str(&line) {
            Ok(logged) => logged,
            Err(e) => {
                warn!("line {}: unparseable, skipping: {e}", number + 1);
                skipped += 1;
                continue;
            }
        };

        let feedback =
            logged.rating.map(|rating| Feedback { rating, comment: logged.comment.clone() });
        match learner.record(
            &logged.query,
            &logged.response,
            feedback,
            logged.confidence.unwrap_or(0.0),
        ) {
            Ok(()) => replayed += 1,
            Err(e) => {
                warn!("line {}: rejected: {e}", number + 1);
                skipped += 1;
            }
        }
    }

    info!(replayed, skipped, "replay finished");

    let summary = learner.summary();
    println!("Replayed {} interactions ({} skipped)", replayed, skipped);
    println!();
    println!("Performance summary");
    println!("-------------------");
    println!("Total interactions: {}", summary.total_interactions);
    println!("Positive feedback:  {}", summary.positive_feedback_count);
    println!("Negative feedback:  {}", summary.negative_feedback_count);
    println!("Success rate:       {:.2}%", summary.success_rate);
    println!("Average confidence: {:.2}", summary.avg_confidence);
    println!("Best practices:     {}", summary.best_practices_learned);
    println!("Improvements:       {}", summary.improvements_identified);

    Ok(())
}
