//! Tree scanner.

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;
use walkdir::{DirEntry, FilterEntry, WalkDir};

/// A forward-slash separated path relative to the scan root.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RelativePath(String);

impl RelativePath {
    /// Relative form of `path` below `root`, or `None` when a component is not UTF-8.
    fn below(root: &Path, path: &Path) -> Option<Self> {
        let rel = path.strip_prefix(root).ok()?;
        let mut parts = Vec::new();
        for component in rel.components() {
            parts.push(component.as_os_str().to_str()?);
        }
        Some(Self(parts.join("/")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// URL form of the path, as referenced from the entry document.
    pub fn to_url_path(&self) -> String {
        format!("/{}", self.0)
    }
}

impl From<&str> for RelativePath {
    fn from(value: &str) -> Self {
        Self(value.replace('\\', "/").trim_start_matches('/').to_string())
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Failure to enumerate a directory during a scan.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("failed to walk {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ScanError {
    fn from_walk(root: &Path, err: walkdir::Error) -> Self {
        let path = err.path().unwrap_or(root).to_path_buf();
        Self::Walk {
            path,
            source: err.into(),
        }
    }
}

type Prune<'a> = Box<dyn FnMut(&DirEntry) -> bool + Send + 'a>;

/// Lazy walk over every non-directory entry below a root.
///
/// Produced by [`scan`]. Entries are visited depth-first in file name
/// order. Names that are not valid UTF-8 are skipped. The first error ends
/// the iteration.
pub struct Scan<'a> {
    root: PathBuf,
    entries: FilterEntry<walkdir::IntoIter, Prune<'a>>,
    failed: bool,
}

/// Start a scan of `root`, pruning any entry whose relative path is in `excluded`.
pub fn scan<'a>(root: &Path, excluded: &'a HashSet<String>) -> Scan<'a> {
    let prune_root = root.to_path_buf();
    let prune: Prune<'a> = Box::new(move |entry| {
        match RelativePath::below(&prune_root, entry.path()) {
            Some(rel) if excluded.contains(rel.as_str()) => {
                tracing::trace!(path = %rel, "Excluded from scan");
                false
            }
            Some(_) => true,
            None => {
                tracing::warn!(path = %entry.path().display(), "Skipping non UTF-8 path");
                false
            }
        }
    });

    Scan {
        root: root.to_path_buf(),
        entries: WalkDir::new(root)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(prune),
        failed: false,
    }
}

impl Iterator for Scan<'_> {
    type Item = Result<RelativePath, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        for entry in self.entries.by_ref() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    self.failed = true;
                    return Some(Err(ScanError::from_walk(&self.root, e)));
                }
            };
            if entry.file_type().is_dir() {
                continue;
            }
            if let Some(rel) = RelativePath::below(&self.root, entry.path()) {
                return Some(Ok(rel));
            }
        }
        None
    }
}
