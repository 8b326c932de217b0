use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::Result;

/// Schema version of the persisted document.
pub const SCHEMA_VERSION: u32 = 1;

/// The persisted knowledge aggregate. One document per learner; callers
/// hold the only reference while mutating, so a save always writes a
/// stable snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeBase {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub best_practices: Vec<BestPractice>,
    /// Reserved for future structured pattern storage. Extraction does not
    /// write here; the field is kept so existing documents round-trip.
    #[serde(default)]
    pub patterns: BTreeMap<String, Vec<serde_json::Value>>,
    #[serde(default)]
    pub improvements: Vec<Improvement>,
}

fn default_version() -> u32 {
    SCHEMA_VERSION
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self {
            version: SCHEMA_VERSION,
            best_practices: Vec::new(),
            patterns: BTreeMap::new(),
            improvements: Vec::new(),
        }
    }
}

/// A mined pattern judged to correlate with successful interactions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestPractice {
    pub pattern: String,
    pub discovered: DateTime<Utc>,
    pub success_count: u64,
}

/// A weakness derived from negative feedback or low-confidence responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Improvement {
    pub issue: String,
    pub identified: DateTime<Utc>,
}

/// Owns the on-disk location of the knowledge document.
#[derive(Debug, Clone)]
pub struct KnowledgeStore {
    path: PathBuf,
}

impl KnowledgeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted document. A missing, unreadable, corrupt, or
    /// newer-versioned file falls back to the empty schema; load never
    /// fails the caller.
    pub fn load(&self) -> KnowledgeBase {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("no knowledge document at {}, starting empty", self.path.display());
                return KnowledgeBase::default();
            }
            Err(e) => {
                warn!("cannot read {}: {}, starting empty", self.path.display(), e);
                return KnowledgeBase::default();
            }
        };

        match serde_json::from_str::<KnowledgeBase>(&raw) {
            Ok(kb) if kb.version <= SCHEMA_VERSION => kb,
            Ok(kb) => {
                warn!(
                    "knowledge document at {} has unsupported version {}, starting empty",
                    self.path.display(),
                    kb.version
                );
                KnowledgeBase::default()
            }
            Err(e) => {
                warn!("corrupt knowledge document at {}: {}, starting empty", self.path.display(), e);
                KnowledgeBase::default()
            }
        }
    }

    /// Persist the full document, replacing whatever is on disk. Creates
    /// missing parent directories on first use.
    pub fn save(&self, knowledge: &KnowledgeBase) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(knowledge)?;
        fs::write(&self.path, json)?;
        debug!("knowledge saved to {}", self.path.display());
        Ok(())
    }
}
