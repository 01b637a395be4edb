//! Development server for front-end projects.
//!
//! Serves static assets, injects discovered stylesheets and scripts into
//! `index.html`, and forwards API requests to a backend process.

pub mod config;
pub mod html;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod scan;

pub use config::ServerConfig;
pub use http::DevServer;
pub use lifecycle::Shutdown;
