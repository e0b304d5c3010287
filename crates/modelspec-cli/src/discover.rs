//! # File Discovery
//!
//! Turns the command-line path arguments into the ordered list of files to
//! validate. Directories are searched recursively with one glob pass per
//! document extension (`*.yaml`, then `*.yml`, then `*.json`); anything
//! else is taken to be a file and passed through untouched, even if it does
//! not exist. A missing file then surfaces as a parse issue rather than
//! being silently dropped.

use std::path::{Path, PathBuf};

/// File patterns searched for inside directory arguments, in pass order.
pub const DOCUMENT_PATTERNS: [&str; 3] = ["*.yaml", "*.yml", "*.json"];

/// Expand `inputs` into files, preserving argument order.
///
/// Files found in a directory are grouped by pass, and sorted within a pass.
/// No deduplication is performed across passes or arguments.
pub fn discover_files(inputs: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_dir() {
            let found = expand_directory(input);
            tracing::debug!(dir = %input.display(), count = found.len(), "expanded directory");
            files.extend(found);
        } else {
            files.push(input.clone());
        }
    }
    files
}

/// Recursively collect document files under `dir`.
pub fn expand_directory(dir: &Path) -> Vec<PathBuf> {
    let escaped = glob::Pattern::escape(&dir.to_string_lossy());
    let base = escaped.trim_end_matches('/');

    let mut files = Vec::new();
    for pattern in DOCUMENT_PATTERNS {
        let mut pass = Vec::new();
        let full_pattern = format!("{base}/**/{pattern}");
        let entries = match glob::glob(&full_pattern) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(pattern = %full_pattern, error = %e, "invalid glob pattern");
                continue;
            }
        };

        for entry in entries {
            match entry {
                Ok(path) if path.is_file() => pass.push(path),
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(path = %e.path().display(), error = %e.error(), "skipping unreadable entry");
                }
            }
        }

        pass.sort();
        files.extend(pass);
    }
    files
}
