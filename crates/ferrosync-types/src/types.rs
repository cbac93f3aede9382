//! Core data types for ferrosync
//!
//! Small value types shared between the comparison engine, the sync executor
//! and the front ends.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// One of the two directory trees being compared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Side {
    /// The left tree, the source unless the sync direction is reversed
    Left,
    /// The right tree, the destination unless the sync direction is reversed
    Right,
}

impl Side {
    /// The other side
    pub fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => f.write_str("Left"),
            Self::Right => f.write_str("Right"),
        }
    }
}

/// Kind of a classified filesystem entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum EntryKind {
    /// Regular file (or a symlink resolving to one)
    File,
    /// Directory (or a symlink resolving to one)
    Directory,
}

impl EntryKind {
    /// Whether this is a directory
    pub fn is_dir(self) -> bool {
        matches!(self, Self::Directory)
    }
}

/// Which reconciliation steps a sync run performs, and in which direction.
///
/// With `reverse_direction` unset the left tree is the source and the right
/// tree the destination; setting it swaps the roles for every step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SyncPolicy {
    /// Replace destination files whose content differs from the source
    pub overwrite: bool,
    /// Copy entries that exist only in the source
    pub add_missing: bool,
    /// Delete entries that exist only in the destination
    pub remove_extra: bool,
    /// Use the right tree as the source
    pub reverse_direction: bool,
}

impl SyncPolicy {
    /// Make the destination an exact copy of the source (add + remove + overwrite)
    pub fn mirror() -> Self {
        Self {
            overwrite: true,
            add_missing: true,
            remove_extra: true,
            reverse_direction: false,
        }
    }

    /// Only copy what the destination is missing
    pub fn add_only() -> Self {
        Self {
            add_missing: true,
            ..Self::default()
        }
    }

    /// Swap source and destination
    pub fn reversed(mut self) -> Self {
        self.reverse_direction = !self.reverse_direction;
        self
    }

    /// Whether no step is enabled, so a sync would not touch the filesystem
    pub fn is_noop(&self) -> bool {
        !(self.overwrite || self.add_missing || self.remove_extra)
    }

    /// Enable every step `other` enables.
    ///
    /// The direction is not combined: `self` keeps its own, so a caller that
    /// layers defaults under explicit settings decides the direction alone.
    pub fn merge(self, other: Self) -> Self {
        Self {
            overwrite: self.overwrite || other.overwrite,
            add_missing: self.add_missing || other.add_missing,
            remove_extra: self.remove_extra || other.remove_extra,
            reverse_direction: self.reverse_direction,
        }
    }

    /// The side entries are copied from
    pub fn source(&self) -> Side {
        if self.reverse_direction {
            Side::Right
        } else {
            Side::Left
        }
    }

    /// The side that gets modified
    pub fn destination(&self) -> Side {
        self.source().opposite()
    }
}

/// Counters collected while applying a sync policy
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SyncStats {
    /// Files copied into the destination because they were missing
    pub files_copied: u64,
    /// Directory trees copied into the destination because they were missing
    pub directories_copied: u64,
    /// Files whose destination content was replaced
    pub files_overwritten: u64,
    /// Entries deleted from the destination
    pub entries_removed: u64,
    /// Operations skipped because the destination already existed or the source vanished
    pub entries_skipped: u64,
    /// Total file bytes written to the destination
    pub bytes_copied: u64,
    /// Wall-clock time spent applying the policy
    pub duration: Duration,
}

impl SyncStats {
    /// Create a new empty statistics instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of filesystem mutations performed
    pub fn operations(&self) -> u64 {
        self.files_copied + self.directories_copied + self.files_overwritten + self.entries_removed
    }
}
