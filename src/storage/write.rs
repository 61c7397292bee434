// src/storage/write.rs
// =============================================================================
// This module writes crawl output to disk.
//
// Pages are written as text, assets as raw bytes. Parent directories are
// created on demand so a deeply nested URL path just works. Errors are
// returned to the caller, who logs and skips - one unwritable file never
// stops the rest of the mirror from landing on disk.
//
// Rust concepts:
// - anyhow::Context: Attaches a human-readable message to an error
// - &[u8] vs &str: Bytes for assets, text for pages, one shared writer
// =============================================================================

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

use super::paths::output_path;

// Writes a crawled page under the output root
//
// Returns the path the page landed at, mainly so callers can log it.
pub fn write_page(root: &Path, url: &Url, text: &str) -> Result<PathBuf> {
    write_file(output_path(url, root), text.as_bytes())
}

// Writes a downloaded asset under the output root
pub fn write_asset(root: &Path, url: &Url, bytes: &[u8]) -> Result<PathBuf> {
    write_file(output_path(url, root), bytes)
}

fn write_file(path: PathBuf, content: &[u8]) -> Result<PathBuf> {
    // Create parent directories as needed before writing
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(path)
}
