//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! <root>/spago.json (optional)
//!     → loader.rs (read & deserialize into RawConfig)
//!     → CLI overrides applied to RawConfig
//!     → validation.rs (defaults, root check, proxy URL parse)
//!     → ServerConfig (resolved, immutable)
//!     → shared via Arc with every request handler
//! ```
//!
//! # Design Decisions
//! - The raw file shape and the resolved config are separate types
//! - Absent or zero fields fall back to defaults during resolution
//! - Request handling never re-reads raw configuration

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_raw_config, CONFIG_FILE_NAME};
pub use schema::{RawConfig, ServerConfig};
pub use validation::{resolve_config, ConfigError};
