//! Core type system and error handling for ferrosync
//!
//! This crate provides the foundational types shared by every ferrosync crate:
//!
//! - **Error handling**: one error enum with kinds and severity levels
//! - **Core types**: which side of a comparison an entry belongs to, entry kinds,
//!   the sync policy flags and the statistics a sync run reports
//!
//! # Features
//!
//! - `std` (default): Enable standard library features
//! - `serde`: Enable serialization support for the value types
//!
//! # Examples
//!
//! ```rust
//! use ferrosync_types::{Error, Result, Side, SyncStats};
//!
//! fn example_operation() -> Result<SyncStats> {
//!     let mut stats = SyncStats::new();
//!     stats.files_copied = 10;
//!     stats.bytes_copied = 1024 * 1024;
//!     Ok(stats)
//! }
//!
//! let err = Error::invalid_root(Side::Left, "/missing");
//! assert!(err.to_string().starts_with("Left path"));
//! ```

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod result;
pub mod types;

// Re-export commonly used types
pub use error::{Error, ErrorKind, ErrorSeverity};
pub use result::Result;
pub use types::*;
