//! One full pass: initialize, write batch, flush.
//!
//! The batch phase cannot fail as a whole, so the flush that follows it runs
//! on every path that got past initialization.

use std::path::PathBuf;

use tracing::{debug, info};

use crate::batch::{BatchReport, run_batch};
use crate::config::FanoutConfig;
use crate::dirs::{flush, initialize};
use crate::error::FanoutError;

/// Lifecycle of a single run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    DirectoryReady,
    BatchInFlight,
    BatchDone,
    Flushed,
}

impl Phase {
    /// The only phase allowed to follow `self`.
    pub fn next(self) -> Phase {
        match self {
            Phase::Idle => Phase::DirectoryReady,
            Phase::DirectoryReady => Phase::BatchInFlight,
            Phase::BatchInFlight => Phase::BatchDone,
            Phase::BatchDone => Phase::Flushed,
            Phase::Flushed => Phase::Idle,
        }
    }
}

#[derive(Debug)]
struct Lifecycle {
    phase: Phase,
}

impl Lifecycle {
    fn new() -> Self {
        Self { phase: Phase::Idle }
    }

    fn advance(&mut self) {
        let next = self.phase.next();
        debug!(from = ?self.phase, to = ?next, "phase");
        self.phase = next;
    }
}

/// What a completed run did.
#[derive(Debug)]
pub struct RunSummary {
    pub directory: PathBuf,
    pub batch: BatchReport,
    pub removed: usize,
}

/// Run the pipeline once.
///
/// Write failures are logged and carried in the summary; only directory
/// creation and flush errors are returned.
pub async fn run(config: &FanoutConfig) -> Result<RunSummary, FanoutError> {
    let mut lifecycle = Lifecycle::new();

    let directory = initialize(config.base_dir.as_deref(), &config.subdir).await?;
    lifecycle.advance();

    info!(count = config.count, "starting file operations");
    lifecycle.advance();
    let batch = run_batch(&directory, &config.batch_options()).await;
    lifecycle.advance();

    let removed = flush(&directory).await?;
    lifecycle.advance();
    debug!(removed, dir = %directory.display(), "directory flushed");

    info!(
        attempted = batch.attempted,
        failed = batch.failures.len(),
        "file operations completed"
    );
    lifecycle.advance();
    debug_assert_eq!(lifecycle.phase, Phase::Idle);

    Ok(RunSummary {
        directory,
        batch,
        removed,
    })
}
