//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, tracing)
//!     → routing::RouteTable (proxy / not found / static / entry)
//!     → proxy.rs | static_files.rs | html::build_entry_document
//!     → error.rs (failures become stable plain-text responses)
//!     → Send to client
//! ```

pub mod error;
pub mod proxy;
pub mod request;
pub mod server;
pub mod static_files;

pub use error::ServeError;
pub use proxy::ReverseProxy;
pub use request::X_REQUEST_ID;
pub use server::DevServer;
