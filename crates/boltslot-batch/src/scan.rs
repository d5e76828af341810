//! Input discovery

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{BatchError, BatchResult};

/// List the regular files directly inside `dir`, sorted by path.
///
/// Sub-directories are ignored. A missing or unreadable directory halts the
/// run, as does a directory without files.
pub fn scan_input_dir(dir: &Path) -> BatchResult<Vec<PathBuf>> {
    let unavailable = |source: std::io::Error| BatchError::InputUnavailable {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(unavailable)? {
        let entry = entry.map_err(unavailable)?;
        let path = entry.path();
        if path.is_file() {
            files.push(path);
        } else {
            tracing::debug!("Skipping non-file entry {}", path.display());
        }
    }

    if files.is_empty() {
        return Err(BatchError::NoInputFiles {
            path: dir.to_path_buf(),
        });
    }

    files.sort();
    tracing::info!("Found {} input files in {}", files.len(), dir.display());
    Ok(files)
}
