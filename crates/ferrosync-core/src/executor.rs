//! Applying a sync policy to the compared trees
//!
//! Steps run in a fixed order: add missing entries, remove extra entries, then
//! overwrite differing files. Every mutation is immediate and there is no
//! rollback; the first failure stops the run and is returned.

use crate::progress::{NoopObserver, Phase, ProgressObserver};
use crate::result::ComparisonResult;
use ferrosync_types::{Error, Result, SyncPolicy, SyncStats};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};
use walkdir::WalkDir;

/// What happened to a single source entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Transfer {
    /// Copied; `replaced` is set when an existing destination was removed first
    Copied {
        bytes: u64,
        directory: bool,
        replaced: bool,
    },
    Skipped,
}

/// Reconciles two trees from a [`ComparisonResult`]
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncExecutor;

impl SyncExecutor {
    /// Create a sync executor
    pub fn new() -> Self {
        Self
    }

    /// Number of operations `policy` would perform on `result`
    pub fn planned_operations(result: &ComparisonResult, policy: &SyncPolicy) -> u64 {
        let mut total = 0;
        if policy.add_missing {
            total += result.side(policy.source()).entries().len();
        }
        if policy.remove_extra {
            total += result.side(policy.destination()).entries().len();
        }
        if policy.overwrite {
            total += result.paired().len();
        }
        total as u64
    }

    /// Apply `policy` to the trees described by `result`
    pub fn sync(&self, result: &ComparisonResult, policy: &SyncPolicy) -> Result<SyncStats> {
        self.sync_with_progress(result, policy, &NoopObserver)
    }

    /// Apply `policy`, reporting one progress unit per operation
    pub fn sync_with_progress(
        &self,
        result: &ComparisonResult,
        policy: &SyncPolicy,
        observer: &dyn ProgressObserver,
    ) -> Result<SyncStats> {
        let started = Instant::now();
        let planned = Self::planned_operations(result, policy);
        info!(
            "Syncing {} -> {} ({} operations planned)",
            result.side(policy.source()).root().display(),
            result.side(policy.destination()).root().display(),
            planned
        );

        observer.phase_started(Phase::Syncing, Some(planned));
        let mut stats = SyncStats::new();
        let outcome = self.apply(result, policy, observer, &mut stats);
        observer.phase_finished(Phase::Syncing);
        outcome?;

        stats.duration = started.elapsed();
        info!(
            "Sync finished: {} copied, {} overwritten, {} removed, {} skipped",
            stats.files_copied + stats.directories_copied,
            stats.files_overwritten,
            stats.entries_removed,
            stats.entries_skipped
        );
        Ok(stats)
    }

    fn apply(
        &self,
        result: &ComparisonResult,
        policy: &SyncPolicy,
        observer: &dyn ProgressObserver,
        stats: &mut SyncStats,
    ) -> Result<()> {
        let source = result.side(policy.source());
        let destination = result.side(policy.destination());
        // Destination paths add-missing replaced; they are no longer extra
        let mut replaced: HashSet<PathBuf> = HashSet::new();

        if policy.add_missing {
            for entry in source.entries() {
                let target = destination.root().join(entry.relative_to(source.root())?);
                match transfer(entry.path(), &target, policy.overwrite)? {
                    Transfer::Copied {
                        bytes,
                        directory,
                        replaced: was_replaced,
                    } => {
                        if directory {
                            stats.directories_copied += 1;
                        } else {
                            stats.files_copied += 1;
                        }
                        stats.bytes_copied += bytes;
                        if was_replaced {
                            replaced.insert(target);
                        }
                    }
                    Transfer::Skipped => stats.entries_skipped += 1,
                }
                observer.advance(Phase::Syncing, 1);
            }
        }

        if policy.remove_extra {
            for entry in destination.entries() {
                if replaced.contains(entry.path()) {
                    debug!("Keeping replaced entry: {}", entry.path().display());
                    stats.entries_skipped += 1;
                } else if remove_entry(entry.path())? {
                    stats.entries_removed += 1;
                } else {
                    stats.entries_skipped += 1;
                }
                observer.advance(Phase::Syncing, 1);
            }
        }

        if policy.overwrite {
            for pair in result.paired() {
                let from = pair.get(policy.source()).path();
                let to = pair.get(policy.destination()).path();
                match transfer(from, to, true)? {
                    Transfer::Copied { bytes, .. } => {
                        stats.files_overwritten += 1;
                        stats.bytes_copied += bytes;
                    }
                    Transfer::Skipped => stats.entries_skipped += 1,
                }
                observer.advance(Phase::Syncing, 1);
            }
        }

        Ok(())
    }
}

/// Copy `from` onto `to`.
///
/// An existing `to` is left alone unless `overwrite` is set, in which case it
/// is replaced whatever its kind. A vanished `from` is skipped.
fn transfer(from: &Path, to: &Path, overwrite: bool) -> Result<Transfer> {
    let source_meta = match fs::metadata(from) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("Source vanished, skipping: {}", from.display());
            return Ok(Transfer::Skipped);
        }
        Err(e) => return Err(Error::io("reading metadata of", from, e)),
    };

    let exists = to
        .try_exists()
        .map_err(|e| Error::io("checking", to, e))?;
    if exists && !overwrite {
        debug!("Destination exists, skipping: {}", to.display());
        return Ok(Transfer::Skipped);
    }

    if exists {
        if to.is_dir() {
            fs::remove_dir_all(to).map_err(|e| Error::io("removing directory", to, e))?;
        } else if source_meta.is_dir() {
            fs::remove_file(to).map_err(|e| Error::io("removing file", to, e))?;
        }
    }

    let bytes = if source_meta.is_dir() {
        copy_tree(from, to)?
    } else {
        copy_file(from, to)?
    };
    debug!("Copied: {} -> {}", from.display(), to.display());

    Ok(Transfer::Copied {
        bytes,
        directory: source_meta.is_dir(),
        replaced: exists,
    })
}

/// Copy file bytes, creating missing parent directories
fn copy_file(from: &Path, to: &Path) -> Result<u64> {
    if let Some(parent) = to.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::io("creating directory", parent, e))?;
    }
    fs::copy(from, to).map_err(|e| Error::io(format!("copying '{}' to", from.display()), to, e))
}

/// Recursively copy a directory, following symlinks
fn copy_tree(from: &Path, to: &Path) -> Result<u64> {
    let mut bytes = 0;
    for entry in WalkDir::new(from).follow_links(true) {
        let entry = entry.map_err(|e| {
            let path = e.path().map(Path::to_path_buf);
            Error::Io {
                operation: "walking directory".to_string(),
                path,
                source: e.into(),
            }
        })?;
        let relative = entry
            .path()
            .strip_prefix(from)
            .map_err(|_| Error::other(format!("'{}' escaped '{}'", entry.path().display(), from.display())))?;
        let target = to.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(|e| Error::io("creating directory", &target, e))?;
        } else if entry.file_type().is_file() {
            bytes += copy_file(entry.path(), &target)?;
        } else {
            debug!("Not copying special file: {}", entry.path().display());
        }
    }
    Ok(bytes)
}

/// Delete a file or a whole directory tree; `false` if it was already gone
fn remove_entry(path: &Path) -> Result<bool> {
    let metadata = match fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(Error::io("reading metadata of", path, e)),
    };

    if metadata.is_dir() {
        fs::remove_dir_all(path).map_err(|e| Error::io("removing directory", path, e))?;
    } else {
        fs::remove_file(path).map_err(|e| Error::io("removing file", path, e))?;
    }
    debug!("Removed: {}", path.display());
    Ok(true)
}
