//! Output directory lifecycle: create before the batch, empty after it.

use std::io;
use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::debug;

use crate::error::FanoutError;

/// Subfolder created under the base directory.
pub const OUTPUT_SUBDIR: &str = "out";

/// Resolve `<base>/<subdir>` and create it if missing.
///
/// `base` defaults to the process working directory. The parent must already
/// exist. An existing directory is reused; an existing non-directory entry is
/// an error.
pub async fn initialize(base: Option<&Path>, subdir: &str) -> Result<PathBuf, FanoutError> {
    let base = match base {
        Some(base) => base.to_path_buf(),
        None => std::env::current_dir().map_err(|source| FanoutError::DirectoryInit {
            path: PathBuf::from(subdir),
            source,
        })?,
    };
    let dest = base.join(subdir);

    if let Err(source) = fs::create_dir(&dest).await {
        let reusable = source.kind() == io::ErrorKind::AlreadyExists && is_dir(&dest).await;
        if !reusable {
            return Err(FanoutError::DirectoryInit { path: dest, source });
        }
    }

    debug!(base = %base.display(), "current working directory");
    debug!(dest = %dest.display(), "destination path");
    Ok(dest)
}

/// Delete every entry directly inside `dir`. Returns the number removed.
///
/// Entries are deleted as files; a subdirectory fails the flush.
pub async fn flush(dir: &Path) -> Result<usize, FanoutError> {
    let read_dir_err = |source: io::Error| FanoutError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut entries = fs::read_dir(dir).await.map_err(read_dir_err)?;
    let mut paths = Vec::new();
    while let Some(entry) = entries.next_entry().await.map_err(read_dir_err)? {
        paths.push(entry.path());
    }

    for path in &paths {
        fs::remove_file(path)
            .await
            .map_err(|source| FanoutError::Delete {
                path: path.clone(),
                source,
            })?;
        debug!(path = %path.display(), "deleted");
    }

    Ok(paths.len())
}

async fn is_dir(path: &Path) -> bool {
    fs::metadata(path)
        .await
        .map(|meta| meta.is_dir())
        .unwrap_or(false)
}
