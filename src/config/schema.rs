//! Configuration schema definitions.
//!
//! `RawConfig` mirrors the JSON config file, where every key is optional.
//! `ServerConfig` is what the rest of the crate consumes.

use std::collections::HashSet;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use url::Url;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_EXCLUDED_PATHS: &[&str] = &["node_modules"];
pub const DEFAULT_STATIC_FILE_EXTENSIONS: &[&str] = &[".css", ".js", ".map", ".png", ".ico", ".jpg"];
pub const DEFAULT_REVERSE_PROXY_ROUTE: &str = "/api";
pub const DEFAULT_REVERSE_PROXY_URL: &str = "http://localhost:3000";

/// Config file contents as written by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawConfig {
    /// Listening port. `0` means "use the default".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,

    /// Paths relative to the root that are left out of tag injection.
    /// A present list replaces the default, even when empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excluded_paths: Option<Vec<String>>,

    /// Request path suffixes served straight from disk.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub static_file_extensions: Option<Vec<String>>,

    /// Backend base URL for proxied requests.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reverse_proxy_url: Option<String>,

    /// Request path prefix that selects the reverse proxy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reverse_proxy_route: Option<String>,
}

/// Resolved server configuration.
///
/// Built once at startup by [`resolve_config`](crate::config::resolve_config)
/// and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Project root; always an existing directory.
    pub root_dir: PathBuf,

    /// Listening port.
    pub port: u16,

    /// Relative paths pruned from the dependency scan.
    pub excluded_paths: HashSet<String>,

    /// Suffixes that short-circuit to direct file serving, in configured order.
    pub static_file_extensions: Vec<String>,

    /// Prefix of request paths forwarded to the backend.
    pub reverse_proxy_route: String,

    /// Backend base URL.
    pub reverse_proxy_url: Url,
}

impl ServerConfig {
    /// Path of the entry document.
    pub fn index_path(&self) -> PathBuf {
        self.root_dir.join("index.html")
    }
}
