//! Exercise configuration
//!
//! Built once from the command line (and environment) and handed read-only
//! to every exercise.

use std::path::PathBuf;

/// Default number of animation steps shown by the Flyweight exercise
pub const DEFAULT_FLYWEIGHT_FRAMES: usize = 10;

/// Default target of the Bridge file logger
pub const DEFAULT_LOG_FILE: &str = "Bridge.log";

/// Settings shared by all exercises
#[derive(Debug, Clone)]
pub struct ExerciseConfig {
    /// Seed for the Flyweight random number generator (entropy when absent)
    pub seed: Option<u64>,

    /// Number of animation steps the Flyweight exercise renders
    pub flyweight_frames: usize,

    /// File written by the Bridge file logger
    pub log_file: PathBuf,

    /// Real directory shown by the Composite exercise, in addition to the
    /// built-in tree
    pub composite_root: Option<PathBuf>,
}

impl Default for ExerciseConfig {
    fn default() -> Self {
        Self {
            seed: None,
            flyweight_frames: DEFAULT_FLYWEIGHT_FRAMES,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            composite_root: None,
        }
    }
}

#[cfg(test)]
impl ExerciseConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_log_file(mut self, log_file: impl Into<PathBuf>) -> Self {
        self.log_file = log_file.into();
        self
    }
}
