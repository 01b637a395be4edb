//! Scan, read and splice the entry document.

use std::fs;

use thiserror::Error;

use crate::config::ServerConfig;
use crate::html::splice::{splice, SpliceError, BODY_ANCHOR, HEAD_ANCHOR};
use crate::scan::{scan, Fragments, ScanError};

/// Failure while building the entry document.
#[derive(Debug, Error)]
pub enum EntryError {
    #[error("failed scan for files: {0}")]
    Scan(#[from] ScanError),

    #[error("failed to read index.html: {0}")]
    ReadIndex(#[source] std::io::Error),

    #[error(transparent)]
    Splice(#[from] SpliceError),
}

/// Build the entry document response body.
///
/// Blocking: walks the whole project tree and reads `index.html` from disk.
pub fn build_entry_document(config: &ServerConfig) -> Result<Vec<u8>, EntryError> {
    let fragments = Fragments::collect(scan(&config.root_dir, &config.excluded_paths))?;

    tracing::debug!(
        stylesheets = fragments.stylesheets.len(),
        scripts = fragments.scripts.len(),
        "Discovered dependencies"
    );

    let document = fs::read(config.index_path()).map_err(EntryError::ReadIndex)?;

    let body = splice(
        &document,
        HEAD_ANCHOR,
        BODY_ANCHOR,
        &fragments.stylesheets,
        &fragments.scripts,
    )?;
    Ok(body)
}
