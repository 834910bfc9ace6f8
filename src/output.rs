//! Output file naming and persistence.
//!
//! Every run overwrites the previous run's files; nothing is appended.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info};

pub const FEED_EXTENSION: &str = "atom";
pub const PAGE_EXTENSION: &str = "html";

pub fn feed_file_name(slug: &str) -> String {
    format!("{slug}.{FEED_EXTENSION}")
}

pub fn page_file_name(slug: &str) -> String {
    format!("{slug}.{PAGE_EXTENSION}")
}

/// Writes `contents` to `dir/file_name`, replacing any existing file.
pub fn write_document(dir: &Path, file_name: &str, contents: &str) -> Result<PathBuf> {
    let path = dir.join(file_name);
    debug!(path = %path.display(), bytes = contents.len(), "Writing document");

    fs::write(&path, contents).with_context(|| format!("failed to write '{}'", path.display()))?;

    Ok(path)
}

/// Writes the feed and viewer page for `slug`.
pub fn write_outputs(dir: &Path, slug: &str, feed: &str, page: &str) -> Result<()> {
    let feed_path = write_document(dir, &feed_file_name(slug), feed)?;
    let page_path = write_document(dir, &page_file_name(slug), page)?;

    info!(
        feed = %feed_path.display(),
        page = %page_path.display(),
        "Outputs written"
    );
    Ok(())
}
