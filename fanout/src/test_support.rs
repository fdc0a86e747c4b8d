//! Test-only helpers for seeding and inspecting output directories.

use std::path::Path;

use tempfile::TempDir;
use tokio::fs;

/// Fresh temporary base directory.
pub fn temp_base() -> TempDir {
    tempfile::tempdir().expect("tempdir")
}

/// Write `count` files named `file_{i}.txt` with `contents` into `dir`.
pub async fn populate(dir: &Path, count: usize, contents: &str) {
    for index in 0..count {
        let path = dir.join(format!("file_{index}.txt"));
        fs::write(&path, contents)
            .await
            .unwrap_or_else(|err| panic!("write {}: {err}", path.display()));
    }
}

/// Sorted names of the entries directly inside `dir`.
pub async fn entry_names(dir: &Path) -> Vec<String> {
    let mut entries = fs::read_dir(dir).await.expect("read dir");
    let mut names = Vec::new();
    while let Some(entry) = entries.next_entry().await.expect("next entry") {
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    names.sort();
    names
}
