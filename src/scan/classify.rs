//! Asset classification and tag rendering.

use crate::scan::walker::{RelativePath, ScanError};

/// Injection bucket for a discovered file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Stylesheet,
    Script,
}

impl AssetKind {
    /// Classify by exact, case-sensitive suffix. `None` means "not injected".
    pub fn classify(path: &str) -> Option<Self> {
        if path.ends_with(".css") {
            Some(Self::Stylesheet)
        } else if path.ends_with(".js") {
            Some(Self::Script)
        } else {
            None
        }
    }

    /// Render the tag for `path`, followed by the separator that keeps the
    /// anchor indented on its own line.
    pub fn fragment(self, path: &RelativePath) -> String {
        match self {
            Self::Stylesheet => format!(
                "  <link href=\"{}\" rel=\"stylesheet\" type=\"text/css\">\n  ",
                path.to_url_path()
            ),
            Self::Script => format!("  <script src=\"{}\"></script>\n  ", path.to_url_path()),
        }
    }
}

/// Tags to inject, in discovery order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Fragments {
    pub stylesheets: Vec<String>,
    pub scripts: Vec<String>,
}

impl Fragments {
    pub fn push(&mut self, path: &RelativePath) {
        match AssetKind::classify(path.as_str()) {
            Some(kind @ AssetKind::Stylesheet) => self.stylesheets.push(kind.fragment(path)),
            Some(kind @ AssetKind::Script) => self.scripts.push(kind.fragment(path)),
            None => {}
        }
    }

    /// Drain a scan into fragment buckets. The first scan error discards
    /// everything gathered so far.
    pub fn collect<I>(paths: I) -> Result<Self, ScanError>
    where
        I: IntoIterator<Item = Result<RelativePath, ScanError>>,
    {
        let mut fragments = Self::default();
        for path in paths {
            fragments.push(&path?);
        }
        Ok(fragments)
    }
}
