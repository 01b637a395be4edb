//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, path)
//!     → router.rs (ordered route table)
//!     → matcher.rs (evaluate match conditions)
//!     → Return: Route (proxy / not found / static file / entry document)
//!
//! Route Compilation (at startup):
//!     ServerConfig
//!     → proxy prefix, GET-only guard, static suffixes
//!     → Freeze as immutable RouteTable
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - No regex in hot path (prefix and suffix matching only)
//! - First match wins; the entry document is the fallback
//! - Static suffix matching ignores excluded paths

pub mod matcher;
pub mod router;

pub use router::{Route, RouteTable};
