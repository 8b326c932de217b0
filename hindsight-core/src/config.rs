use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::learning::{LearnError, Result};

/// Where the knowledge document lives unless configured otherwise.
pub const DEFAULT_KNOWLEDGE_PATH: &str = ".hindsight/knowledge_base.json";

/// How many interactions accumulate before a learning cycle fires.
pub const DEFAULT_LEARNING_INTERVAL: u32 = 7;

/// Runtime configuration for the learner.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LearningConfig {
    /// Master switch; when off, `record` validates input and drops it.
    pub enabled: bool,
    /// Interactions per learning cycle.
    pub learning_interval: u32,
    /// Path of the persisted knowledge document.
    pub knowledge_path: PathBuf,
}

impl Default for LearningConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            learning_interval: DEFAULT_LEARNING_INTERVAL,
            knowledge_path: PathBuf::from(DEFAULT_KNOWLEDGE_PATH),
        }
    }
}

impl LearningConfig {
    /// Read a TOML configuration file. Missing keys fall back to defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|e| LearnError::Config {
            message: format!("cannot read {}: {e}", path.display()),
        })?;
        toml::from_str(&raw).map_err(|e| LearnError::Config {
            message: format!("cannot parse {}: {e}", path.display()),
        })
    }
}
