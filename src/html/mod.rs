//! Entry document construction.
//!
//! # Data Flow
//! ```text
//! ServerConfig
//!     → scan (discover .css / .js outside excluded paths)
//!     → read <root>/index.html (fresh on every request)
//!     → splice.rs (stylesheets before </head>, scripts before </body>)
//!     → response body bytes
//! ```

pub mod entry;
pub mod splice;

pub use entry::{build_entry_document, EntryError};
pub use splice::{splice, SpliceError, BODY_ANCHOR, HEAD_ANCHOR};
