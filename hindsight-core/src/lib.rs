//! Core learning loop for hindsight
//!
//! This crate turns a stream of assistant interactions and their user
//! feedback into a small, persisted body of learned knowledge: recurring
//! success patterns, identified weaknesses, and aggregate performance
//! metrics. The hosting system supplies interaction records and consumes
//! knowledge snapshots; everything else stays outside this crate.

pub mod config;
pub mod learning;

pub use config::LearningConfig;
pub use learning::{LearnError, Result, SelfLearner, SharedLearner};
