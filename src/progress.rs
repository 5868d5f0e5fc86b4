// src/progress.rs
use std::time::Duration;

use crate::pull::BatchWindow;

/// Lightweight progress reporting for a pull.
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the number of planned batches and ids.
    fn begin(&mut self, _batches: usize, _ids: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    fn batch_started(&mut self, _window: &BatchWindow) {}

    /// `added` counts new records; inbound and repeated ids are not included.
    fn batch_done(&mut self, _window: &BatchWindow, _added: usize) {}

    /// Called before the mandatory pause between two requests.
    fn pausing(&mut self, _pause: Duration) {}

    /// Called once after the last batch.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
