//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Request handlers produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (request counters, latency histograms)
//!
//! Consumers:
//!     → stdout (fmt layer, filtered by RUST_LOG)
//!     → Prometheus scrape endpoint (only when an address is given)
//! ```
//!
//! # Design Decisions
//! - Request ID flows through logs, proxied requests and responses
//! - Metrics are cheap (atomic increments) and recorded once per request

pub mod logging;
pub mod metrics;
