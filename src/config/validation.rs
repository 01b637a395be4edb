//! Configuration resolution and validation.
//!
//! # Responsibilities
//! - Apply defaults to absent or zero fields
//! - Check that the root directory exists and is a directory
//! - Parse the reverse-proxy URL
//!
//! # Design Decisions
//! - Resolution is a single function run once at startup
//! - Any failure here is fatal: the server does not start

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

use crate::config::schema::{
    RawConfig, ServerConfig, DEFAULT_EXCLUDED_PATHS, DEFAULT_PORT, DEFAULT_REVERSE_PROXY_ROUTE,
    DEFAULT_REVERSE_PROXY_URL, DEFAULT_STATIC_FILE_EXTENSIONS,
};

/// Startup configuration failure.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("root directory {0} does not exist")]
    RootNotFound(PathBuf),

    #[error("root directory {0} is not a directory")]
    RootNotDirectory(PathBuf),

    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to deserialize config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not parse reverse proxy URL {url:?}: {reason}")]
    InvalidProxyUrl { url: String, reason: String },
}

/// Turn the raw file values into a [`ServerConfig`].
pub fn resolve_config(root_dir: impl Into<PathBuf>, raw: RawConfig) -> Result<ServerConfig, ConfigError> {
    let root_dir = root_dir.into();

    let metadata = std::fs::metadata(&root_dir).map_err(|_| ConfigError::RootNotFound(root_dir.clone()))?;
    if !metadata.is_dir() {
        return Err(ConfigError::RootNotDirectory(root_dir));
    }

    let port = match raw.port {
        Some(port) if port != 0 => port,
        _ => DEFAULT_PORT,
    };

    let excluded_paths = match raw.excluded_paths {
        Some(paths) => paths.into_iter().collect(),
        None => DEFAULT_EXCLUDED_PATHS.iter().map(|p| p.to_string()).collect(),
    };

    let static_file_extensions = raw
        .static_file_extensions
        .unwrap_or_else(|| DEFAULT_STATIC_FILE_EXTENSIONS.iter().map(|e| e.to_string()).collect());

    let reverse_proxy_route = non_empty_or(raw.reverse_proxy_route, DEFAULT_REVERSE_PROXY_ROUTE);
    let proxy_url = non_empty_or(raw.reverse_proxy_url, DEFAULT_REVERSE_PROXY_URL);
    let reverse_proxy_url = parse_proxy_url(&proxy_url)?;

    Ok(ServerConfig {
        root_dir,
        port,
        excluded_paths,
        static_file_extensions,
        reverse_proxy_route,
        reverse_proxy_url,
    })
}

fn non_empty_or(value: Option<String>, default: &str) -> String {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => default.to_string(),
    }
}

fn parse_proxy_url(raw: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidProxyUrl {
        url: raw.to_string(),
        reason,
    };

    let url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme {:?}", url.scheme())));
    }
    if url.host_str().is_none() {
        return Err(invalid("missing host".to_string()));
    }
    Ok(url)
}
