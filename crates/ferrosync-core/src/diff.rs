//! Recursive merge-join comparison of two directory trees
//!
//! Each directory level is listed, sorted by name and split into files and
//! subdirectories. Both halves are walked with two cursors: equal names are
//! matched, the smaller name is one-sided. Matched files go through the
//! [`EqualityOracle`]; matched subdirectories are descended into once the whole
//! level is classified. An unmatched subdirectory is recorded as a single entry
//! and its contents are never visited.

use crate::entry::Entry;
use crate::oracle::{CompareOptions, ContentOracle, EqualityOracle};
use crate::progress::{NoopObserver, Phase, ProgressObserver};
use crate::result::{ComparisonResult, PairedDifference};
use ferrosync_types::{EntryKind, Error, Result, Side};
use std::cmp::Ordering;
use std::fs;
use std::iter::Peekable;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

/// One step of a merge-join over two name-sorted sequences
#[derive(Debug, PartialEq, Eq)]
enum Step {
    Both(Entry, Entry),
    LeftOnly(Entry),
    RightOnly(Entry),
}

/// Two-cursor merge of sorted entry sequences
struct MergeJoin<L: Iterator<Item = Entry>, R: Iterator<Item = Entry>> {
    left: Peekable<L>,
    right: Peekable<R>,
}

impl<L, R> MergeJoin<L, R>
where
    L: Iterator<Item = Entry>,
    R: Iterator<Item = Entry>,
{
    fn new(left: L, right: R) -> Self {
        Self {
            left: left.peekable(),
            right: right.peekable(),
        }
    }
}

impl<L, R> Iterator for MergeJoin<L, R>
where
    L: Iterator<Item = Entry>,
    R: Iterator<Item = Entry>,
{
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        let order = match (self.left.peek(), self.right.peek()) {
            (Some(l), Some(r)) => l.name().cmp(r.name()),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => return None,
        };

        match order {
            Ordering::Equal => {
                let left = self.left.next()?;
                let right = self.right.next()?;
                Some(Step::Both(left, right))
            }
            Ordering::Less => self.left.next().map(Step::LeftOnly),
            Ordering::Greater => self.right.next().map(Step::RightOnly),
        }
    }
}

/// A directory's children, sorted by name and split by kind
#[derive(Debug, Default)]
struct Listing {
    files: Vec<Entry>,
    dirs: Vec<Entry>,
}

impl Listing {
    fn read(dir: &Path) -> Result<Self> {
        let mut entries = Vec::new();
        let read_dir = fs::read_dir(dir).map_err(|e| Error::io("reading directory", dir, e))?;

        for dir_entry in read_dir {
            let dir_entry = dir_entry.map_err(|e| Error::io("reading directory", dir, e))?;
            let path = dir_entry.path();

            // Follows symlinks: a link to a file is a file
            let kind = match fs::metadata(&path) {
                Ok(metadata) if metadata.is_dir() => EntryKind::Directory,
                Ok(metadata) if metadata.is_file() => EntryKind::File,
                Ok(_) => {
                    debug!("Skipping special file: {}", path.display());
                    continue;
                }
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    debug!("Skipping dangling link: {}", path.display());
                    continue;
                }
                Err(e) => return Err(Error::io("reading metadata of", &path, e)),
            };
            entries.push(Entry::new(path, kind));
        }

        entries.sort_by(|a, b| a.name().cmp(b.name()));
        let (dirs, files) = entries.into_iter().partition(Entry::is_dir);
        Ok(Self { files, dirs })
    }
}

/// Engine for comparing two directory trees
#[derive(Debug, Clone, Default)]
pub struct DiffEngine<O = ContentOracle> {
    oracle: O,
}

impl DiffEngine<ContentOracle> {
    /// Create a diff engine using the content oracle with `options`
    pub fn new(options: CompareOptions) -> Self {
        Self::with_oracle(ContentOracle::new(options))
    }
}

impl<O: EqualityOracle> DiffEngine<O> {
    /// Create a diff engine with a custom equality oracle
    pub fn with_oracle(oracle: O) -> Self {
        Self { oracle }
    }

    /// The oracle used for same-named files
    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    /// Compare two directory trees
    pub fn diff<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        left: P,
        right: Q,
    ) -> Result<ComparisonResult> {
        self.diff_with_progress(left, right, &NoopObserver)
    }

    /// Compare two directory trees, reporting progress to `observer`
    pub fn diff_with_progress<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        left: P,
        right: Q,
        observer: &dyn ProgressObserver,
    ) -> Result<ComparisonResult> {
        let left_root = resolve_root(Side::Left, left.as_ref())?;
        let right_root = resolve_root(Side::Right, right.as_ref())?;

        info!(
            "Comparing '{}' with '{}'",
            left_root.display(),
            right_root.display()
        );

        let total = if observer.wants_totals() {
            Some(count_entries(&left_root) + count_entries(&right_root))
        } else {
            None
        };
        observer.phase_started(Phase::Comparing, total);

        let outcome = self.compare_dirs(&left_root, &right_root, observer);
        observer.phase_finished(Phase::Comparing);
        let result = outcome?;

        info!(
            "Comparison finished: {} only in left, {} only in right, {} with different contents",
            result.left().entries().len(),
            result.right().entries().len(),
            result.paired().len()
        );
        Ok(result)
    }

    /// Compare one level, then descend into matched subdirectories in name order
    fn compare_dirs(
        &self,
        left_dir: &Path,
        right_dir: &Path,
        observer: &dyn ProgressObserver,
    ) -> Result<ComparisonResult> {
        let left = Listing::read(left_dir)?;
        let right = Listing::read(right_dir)?;
        let mut result = ComparisonResult::new(left_dir.to_path_buf(), right_dir.to_path_buf());

        for step in MergeJoin::new(left.files.into_iter(), right.files.into_iter()) {
            match step {
                Step::Both(l, r) => {
                    observer.advance(Phase::Comparing, 2);
                    if !self.oracle.are_equal(l.path(), r.path())? {
                        debug!("Contents differ: {}", l.path().display());
                        result.push_paired(PairedDifference::new(l, r));
                    }
                }
                Step::LeftOnly(entry) => record_one_sided(&mut result, Side::Left, entry, observer),
                Step::RightOnly(entry) => record_one_sided(&mut result, Side::Right, entry, observer),
            }
        }

        let mut matched = Vec::new();
        for step in MergeJoin::new(left.dirs.into_iter(), right.dirs.into_iter()) {
            match step {
                Step::Both(l, r) => {
                    observer.advance(Phase::Comparing, 2);
                    matched.push((l, r));
                }
                Step::LeftOnly(entry) => record_one_sided(&mut result, Side::Left, entry, observer),
                Step::RightOnly(entry) => record_one_sided(&mut result, Side::Right, entry, observer),
            }
        }

        for (l, r) in matched {
            let child = self.compare_dirs(l.path(), r.path(), observer)?;
            result.absorb(child);
        }

        Ok(result)
    }
}

fn record_one_sided(
    result: &mut ComparisonResult,
    side: Side,
    entry: Entry,
    observer: &dyn ProgressObserver,
) {
    observer.advance(Phase::Comparing, 1);
    debug!("Only in {}: {}", side, entry.path().display());
    result.push_only(side, entry);
}

/// Canonicalize a root and make sure it is a directory
fn resolve_root(side: Side, path: &Path) -> Result<PathBuf> {
    let resolved = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    if resolved.is_dir() {
        Ok(resolved)
    } else {
        Err(Error::invalid_root(side, resolved))
    }
}

/// Number of entries below `root`, used only to size progress displays
fn count_entries(root: &Path) -> u64 {
    WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .count() as u64
}
