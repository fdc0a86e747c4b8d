//! Fan-out/fan-in write batch.
//!
//! Every task in a batch runs to completion exactly once. Failures are
//! collected per task index and reported together after the last task
//! finishes; a failing task never cancels its siblings.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::fs;
use tokio::task::JoinSet;
use tracing::{debug, error, info};

use crate::error::WriteError;
use crate::fault::FaultInjector;

/// Literal written to every file.
pub const DEFAULT_CONTENTS: &str = "Hello, World!";

/// Tasks per batch when nothing else is configured.
pub const DEFAULT_COUNT: usize = 10;

/// File name for task `index`.
pub fn file_name(index: usize) -> String {
    format!("file_{index}.txt")
}

/// Inputs for [`run_batch`].
#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub count: usize,
    pub contents: Arc<str>,
    pub faults: FaultInjector,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            count: DEFAULT_COUNT,
            contents: Arc::from(DEFAULT_CONTENTS),
            faults: FaultInjector::default(),
        }
    }
}

/// Outcome of a batch: how many tasks ran and which of them failed.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub attempted: usize,
    pub failures: BTreeMap<usize, WriteError>,
}

impl BatchReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn succeeded(&self) -> usize {
        self.attempted - self.failures.len()
    }

    /// One line per failed task, ordered by index.
    pub fn summary(&self) -> String {
        self.failures
            .iter()
            .map(|(index, err)| format!("task {index}: {err}"))
            .collect::<Vec<_>>()
            .join("\n- ")
    }
}

/// Write `contents` to `path`, then maybe raise an injected failure.
///
/// The injected failure is only drawn once the write has returned, so a
/// simulated error always leaves a complete file behind.
pub async fn write_one(
    path: &Path,
    contents: &str,
    faults: &FaultInjector,
) -> Result<(), WriteError> {
    fs::write(path, contents)
        .await
        .map_err(|source| WriteError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    if faults.should_fail() {
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        return Err(WriteError::Simulated { filename });
    }
    Ok(())
}

/// Write `options.count` files into `dir` concurrently and wait for all.
///
/// Never fails as a whole: every error lands in the returned report, and a
/// non-empty report is logged once.
pub async fn run_batch(dir: &Path, options: &BatchOptions) -> BatchReport {
    let mut tasks = JoinSet::new();
    let mut task_index = HashMap::with_capacity(options.count);

    for index in 0..options.count {
        let path: PathBuf = dir.join(file_name(index));
        let contents = Arc::clone(&options.contents);
        let faults = options.faults;
        let handle = tasks.spawn(async move {
            let result = write_one(&path, &contents, &faults).await;
            (index, result)
        });
        task_index.insert(handle.id(), index);
    }
    debug!(count = options.count, dir = %dir.display(), "write tasks spawned");

    let mut report = BatchReport {
        attempted: options.count,
        failures: BTreeMap::new(),
    };
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((index, Ok(()))) => {
                debug!(index, "write task finished");
            }
            Ok((index, Err(err))) => {
                debug!(index, error = %err, "write task failed");
                report.failures.insert(index, err);
            }
            Err(join_err) => {
                let index = task_index
                    .get(&join_err.id())
                    .copied()
                    .unwrap_or(usize::MAX);
                report.failures.insert(
                    index,
                    WriteError::Join {
                        index,
                        message: join_err.to_string(),
                    },
                );
            }
        }
    }

    if report.is_clean() {
        info!(attempted = report.attempted, "all writes succeeded");
    } else {
        error!(
            failed = report.failures.len(),
            attempted = report.attempted,
            "an error occurred during file operations:\n- {}",
            report.summary()
        );
    }
    report
}
