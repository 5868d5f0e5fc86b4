// src/config/options.rs
use std::path::PathBuf;
use std::time::Duration;

use super::consts::*;
use crate::error::PullError;

/// Knobs for one pull. Positions are 1-based and inclusive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PullOptions {
    /// Last position to pull. With `start == 1` this is the number of ids.
    pub limit: usize,
    pub batch_size: usize,
    pub start: usize,
    /// Blocking pause between two requests.
    pub pause: Duration,
}

impl Default for PullOptions {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            batch_size: DEFAULT_BATCH_SIZE,
            start: DEFAULT_START,
            pause: MIN_PAUSE,
        }
    }
}

impl PullOptions {
    pub fn validate(&self) -> Result<(), PullError> {
        if self.batch_size == 0 || self.batch_size >= MAX_BATCH_SIZE {
            return Err(PullError::Options(format!(
                "batch size must be between 1 and {}, got {}",
                MAX_BATCH_SIZE - 1,
                self.batch_size
            )));
        }
        if self.start == 0 {
            return Err(PullError::Options(s!("start index is 1-based")));
        }
        if self.pause < MIN_PAUSE {
            return Err(PullError::Options(format!(
                "pause must be at least {}s, got {:?}",
                MIN_PAUSE.as_secs(),
                self.pause
            )));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    pub out_dir: PathBuf,
    /// Appended to every file stem, e.g. "_test" → all_games_test.csv
    pub suffix: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self { out_dir: PathBuf::from(DEFAULT_OUT_DIR), suffix: s!() }
    }
}

impl ExportOptions {
    pub fn games_path(&self, ext: &str) -> PathBuf {
        self.out_dir.join(join!(GAMES_STEM, &self.suffix, ".", ext))
    }

    /// `types` → out/types_counts.csv
    pub fn counts_path(&self, dimension: &str) -> PathBuf {
        self.out_dir.join(join!(dimension, COUNTS_STEM, &self.suffix, ".csv"))
    }
}
