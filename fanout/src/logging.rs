//! Tracing setup for the `fanout` binary.
//!
//! - **stderr**: compact format, filtered by `RUST_LOG` (defaults to
//!   `fanout=info`).
//! - **log file** (optional): one file per run under `--log-dir`, named by
//!   UTC start time, always at debug level, no ANSI colors. Only the newest
//!   [`LOG_RETENTION`] files are kept.

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use chrono::Utc;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Log files kept in the log directory, including the current one.
pub const LOG_RETENTION: usize = 3;

const LOG_EXTENSION: &str = "log";

/// Initialize the global subscriber. Returns the log file path, if any.
///
/// # Example
/// ```bash
/// RUST_LOG=fanout=debug fanout --log-dir logs
/// ```
pub fn init(log_dir: Option<&Path>) -> Result<Option<PathBuf>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("fanout=info"));
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .compact()
        .with_filter(filter);

    let (file_layer, log_path) = match log_dir {
        Some(dir) => {
            let (file, path) = open_log_file(dir)?;
            let layer = fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .with_filter(EnvFilter::new("fanout=debug"));
            (Some(layer), Some(path))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .init();

    if let Some(dir) = log_dir {
        prune_logs(dir, LOG_RETENTION)?;
    }
    Ok(log_path)
}

/// Create `dir` if needed and open a fresh `<timestamp>.log` inside it.
pub fn open_log_file(dir: &Path) -> Result<(File, PathBuf)> {
    fs::create_dir_all(dir).with_context(|| format!("create log dir {}", dir.display()))?;
    let name = format!(
        "{}.{LOG_EXTENSION}",
        Utc::now().format("%Y%m%d_%H%M%S_%6f")
    );
    let path = dir.join(name);
    let file = File::create(&path).with_context(|| format!("create {}", path.display()))?;
    Ok((file, path))
}

/// Delete all but the `keep` newest `.log` files in `dir`.
///
/// File names are timestamps, so lexical order is age order. Returns the
/// removed paths.
pub fn prune_logs(dir: &Path, keep: usize) -> Result<Vec<PathBuf>> {
    let mut logs = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("read {}", dir.display()))? {
        let path = entry.context("read entry")?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == LOG_EXTENSION) {
            logs.push(path);
        }
    }
    logs.sort();

    let excess = logs.len().saturating_sub(keep);
    let stale: Vec<PathBuf> = logs.into_iter().take(excess).collect();
    for path in &stale {
        fs::remove_file(path).with_context(|| format!("remove {}", path.display()))?;
    }
    Ok(stale)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_log_file_creates_dir_and_file() {
        let temp = tempfile::tempdir().expect("tempdir");
        let dir = temp.path().join("logs");
        let (_file, path) = open_log_file(&dir).expect("open");
        assert!(path.is_file());
        assert_eq!(path.parent(), Some(dir.as_path()));
        assert_eq!(path.extension().and_then(|ext| ext.to_str()), Some("log"));
    }

    #[test]
    fn prune_keeps_newest_logs_only() {
        let temp = tempfile::tempdir().expect("tempdir");
        for name in [
            "20260101_000000_000000.log",
            "20260102_000000_000000.log",
            "20260103_000000_000000.log",
            "20260104_000000_000000.log",
            "20260105_000000_000000.log",
            "notes.txt",
        ] {
            fs::write(temp.path().join(name), "x").expect("write");
        }

        let removed = prune_logs(temp.path(), 3).expect("prune");
        let removed: Vec<_> = removed
            .iter()
            .filter_map(|path| path.file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            removed,
            vec!["20260101_000000_000000.log", "20260102_000000_000000.log"]
        );
        assert!(temp.path().join("20260105_000000_000000.log").exists());
        assert!(temp.path().join("notes.txt").exists());
    }

    #[test]
    fn prune_under_limit_removes_nothing() {
        let temp = tempfile::tempdir().expect("tempdir");
        fs::write(temp.path().join("20260101_000000_000000.log"), "x").expect("write");
        assert!(prune_logs(temp.path(), 3).expect("prune").is_empty());
    }
}
