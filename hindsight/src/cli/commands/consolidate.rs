//! Consolidate command: deduplicate the knowledge base in place.

use anyhow::Result;
use hindsight_core::LearningConfig;
use hindsight_core::learning::SelfLearner;

pub fn execute(config: LearningConfig) -> Result<()> {
    let mut learner = SelfLearner::new(config);
    let report = learner.consolidate()?;

    println!("Removed {} duplicate best practices", report.duplicates_removed);
    if report.retraining_advised {
        println!("Success rate is below target; consider fine-tuning the model");
    }

    Ok(())
}
