//! Input file discovery
//!
//! Lists the files of a single directory (no recursion) whose extension
//! matches, in file-name order so runs are reproducible.

use crate::error::{Result, SwimError};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

/// Files directly inside `dir` with one of `extensions` (case-insensitive)
pub fn discover_files(dir: &Path, extensions: &[&str]) -> Result<Vec<PathBuf>> {
    ensure_directory(dir)?;

    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            SwimError::Io(
                e.into_io_error()
                    .unwrap_or_else(|| std::io::Error::other("directory walk failed")),
            )
        })?;

        if entry.file_type().is_file() && has_extension(entry.path(), extensions) {
            files.push(entry.into_path());
        }
    }

    debug!("Found {} matching files in {}", files.len(), dir.display());
    Ok(files)
}

/// Fail unless `dir` exists and is a directory
pub fn ensure_directory(dir: &Path) -> Result<()> {
    if !dir.exists() {
        return Err(SwimError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }
    if !dir.is_dir() {
        return Err(SwimError::NotADirectory {
            path: dir.to_path_buf(),
        });
    }
    Ok(())
}

/// Create `dir` and its parents if missing; an existing file at the path is an error
pub fn prepare_output_dir(dir: &Path) -> Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(SwimError::NotADirectory {
            path: dir.to_path_buf(),
        });
    }
    if !dir.exists() {
        info!("Creating output directory: {}", dir.display());
        std::fs::create_dir_all(dir)?;
    }
    Ok(())
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|want| ext.eq_ignore_ascii_case(want)))
}
