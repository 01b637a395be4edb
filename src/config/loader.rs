//! Configuration loading from disk.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::config::schema::RawConfig;
use crate::config::validation::ConfigError;

/// Name of the config file looked up in the project root.
pub const CONFIG_FILE_NAME: &str = "spago.json";

/// Read the raw config file at `path`.
///
/// A missing file yields an empty `RawConfig` so that every default applies.
pub fn load_raw_config(path: &Path) -> Result<RawConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(RawConfig::default());
        }
        Err(e) => {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })
        }
    };

    serde_json::from_str(&content).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}
