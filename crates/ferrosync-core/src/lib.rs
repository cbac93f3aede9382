//! # ferrosync-core
//!
//! Directory tree comparison and synchronization engine.
//!
//! Two trees are walked in lockstep. Every entry ends up in one of three
//! buckets: present only on the left, present only on the right, or a file
//! present on both sides whose contents differ. A [`SyncExecutor`] then applies
//! a [`SyncPolicy`] to copy, remove or overwrite entries until the destination
//! matches the source.
//!
//! ## Architecture
//!
//! - [`diff`]: the recursive merge-join over sorted directory listings
//! - [`oracle`]: content equality of two files (size, text probe, BLAKE3)
//! - [`executor`]: applying a sync policy to a comparison result
//! - [`report`]: the plain text comparison report
//! - [`progress`]: observer seam for progress feedback
//!
//! # Examples
//!
//! ```rust,no_run
//! use ferrosync_core::{ops, Report, SyncPolicy};
//!
//! let result = ops::diff("left", "right")?;
//! print!("{}", Report::new(&result).render()?);
//!
//! let stats = ops::sync(&result, &SyncPolicy::mirror())?;
//! println!("{} files copied", stats.files_copied);
//! # Ok::<(), ferrosync_core::Error>(())
//! ```

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod diff;
pub mod entry;
pub mod executor;
pub mod oracle;
pub mod progress;
pub mod report;
pub mod result;

// Re-export commonly used types
pub use diff::DiffEngine;
pub use entry::Entry;
pub use executor::SyncExecutor;
pub use oracle::{CompareOptions, ContentOracle, EqualityOracle};
pub use progress::{NoopObserver, Phase, ProgressObserver, ProgressTally};
pub use report::Report;
pub use result::{ComparisonResult, PairedDifference, SideDiff};

pub use ferrosync_types::{EntryKind, Error, Result, Side, SyncPolicy, SyncStats};

/// High-level convenience functions using default options
pub mod ops {
    use super::*;
    use std::path::Path;

    /// Compare two directory trees with the default oracle
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// let result = ferrosync_core::ops::diff("left", "right")?;
    /// println!("{} differences", result.total_differences());
    /// # Ok::<(), ferrosync_core::Error>(())
    /// ```
    pub fn diff<P: AsRef<Path>, Q: AsRef<Path>>(left: P, right: Q) -> Result<ComparisonResult> {
        DiffEngine::new(CompareOptions::default()).diff(left, right)
    }

    /// Apply `policy` to the trees of a previous comparison
    pub fn sync(result: &ComparisonResult, policy: &SyncPolicy) -> Result<SyncStats> {
        SyncExecutor::new().sync(result, policy)
    }

    /// Bring `right` in line with `left`: add, remove and overwrite
    pub fn mirror<P: AsRef<Path>, Q: AsRef<Path>>(left: P, right: Q) -> Result<SyncStats> {
        let result = diff(left, right)?;
        sync(&result, &SyncPolicy::mirror())
    }
}
