//! Dependency discovery subsystem.
//!
//! # Data Flow
//! ```text
//! root directory + excluded paths
//!     → walker.rs (worklist traversal, yields relative file paths)
//!     → classify.rs (suffix → stylesheet / script / ignored)
//!     → Fragments (rendered <link> and <script> tags, discovery order)
//! ```
//!
//! # Design Decisions
//! - Exclusions are checked on the root-relative path before descending
//! - An explicit stack bounds recursion depth for deep trees
//! - Nothing is cached: every entry-document request scans again

pub mod classify;
pub mod walker;

pub use classify::{AssetKind, Fragments};
pub use walker::{scan, RelativePath, Scan, ScanError};
