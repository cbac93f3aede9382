//! The outcome of comparing two directory trees

use crate::entry::Entry;
use ferrosync_types::{Result, Side};
use std::path::{Path, PathBuf};

/// Entries that exist on one side only
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SideDiff {
    side: Side,
    root: PathBuf,
    entries: Vec<Entry>,
}

impl SideDiff {
    pub(crate) fn new(side: Side, root: PathBuf) -> Self {
        Self {
            side,
            root,
            entries: Vec::new(),
        }
    }

    /// Which tree this is
    pub fn side(&self) -> Side {
        self.side
    }

    /// Canonical root of the tree
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Entries with no same-named counterpart on the other side.
    ///
    /// Within a directory they follow sorted name order, files before
    /// subdirectories; a directory's entries precede those of its descendants.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Entry paths relative to the root
    pub fn relative_paths(&self) -> Result<Vec<PathBuf>> {
        self.entries
            .iter()
            .map(|entry| entry.relative_to(&self.root).map(Path::to_path_buf))
            .collect()
    }

    pub(crate) fn push(&mut self, entry: Entry) {
        self.entries.push(entry);
    }
}

/// A same-named file present on both sides with differing contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairedDifference {
    left: Entry,
    right: Entry,
}

impl PairedDifference {
    /// Pair two entries that share a name
    pub fn new(left: Entry, right: Entry) -> Self {
        Self { left, right }
    }

    /// The left member
    pub fn left(&self) -> &Entry {
        &self.left
    }

    /// The right member
    pub fn right(&self) -> &Entry {
        &self.right
    }

    /// The member that lives on `side`
    pub fn get(&self, side: Side) -> &Entry {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    /// The same pair with sides swapped
    pub fn swapped(&self) -> Self {
        Self {
            left: self.right.clone(),
            right: self.left.clone(),
        }
    }
}

/// Classification of two trees: left-only, right-only and content-differing
/// entries. Identical entries are not recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonResult {
    left: SideDiff,
    right: SideDiff,
    paired: Vec<PairedDifference>,
}

impl ComparisonResult {
    pub(crate) fn new(left_root: PathBuf, right_root: PathBuf) -> Self {
        Self {
            left: SideDiff::new(Side::Left, left_root),
            right: SideDiff::new(Side::Right, right_root),
            paired: Vec::new(),
        }
    }

    /// Entries only in the left tree
    pub fn left(&self) -> &SideDiff {
        &self.left
    }

    /// Entries only in the right tree
    pub fn right(&self) -> &SideDiff {
        &self.right
    }

    /// The one-sided entries of `side`
    pub fn side(&self, side: Side) -> &SideDiff {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    /// Files present on both sides whose contents differ
    pub fn paired(&self) -> &[PairedDifference] {
        &self.paired
    }

    /// Whether both trees hold the same names with the same contents
    pub fn is_in_sync(&self) -> bool {
        self.total_differences() == 0
    }

    /// Number of recorded differences across all three collections
    pub fn total_differences(&self) -> usize {
        self.left.entries.len() + self.right.entries.len() + self.paired.len()
    }

    /// Left-only entries relative to the left root
    pub fn left_only_relative(&self) -> Result<Vec<PathBuf>> {
        self.left.relative_paths()
    }

    /// Right-only entries relative to the right root
    pub fn right_only_relative(&self) -> Result<Vec<PathBuf>> {
        self.right.relative_paths()
    }

    /// Content-differing files relative to the roots (identical on both sides)
    pub fn paired_relative(&self) -> Result<Vec<PathBuf>> {
        self.paired
            .iter()
            .map(|pair| pair.left.relative_to(&self.left.root).map(Path::to_path_buf))
            .collect()
    }

    /// The result the comparison would have produced with the roots swapped
    pub fn mirrored(&self) -> Self {
        Self {
            left: SideDiff {
                side: Side::Left,
                root: self.right.root.clone(),
                entries: self.right.entries.clone(),
            },
            right: SideDiff {
                side: Side::Right,
                root: self.left.root.clone(),
                entries: self.left.entries.clone(),
            },
            paired: self.paired.iter().map(PairedDifference::swapped).collect(),
        }
    }

    pub(crate) fn push_only(&mut self, side: Side, entry: Entry) {
        match side {
            Side::Left => self.left.push(entry),
            Side::Right => self.right.push(entry),
        }
    }

    pub(crate) fn push_paired(&mut self, pair: PairedDifference) {
        self.paired.push(pair);
    }

    /// Append the findings of a nested comparison after this one's.
    ///
    /// Roots are kept; the child's entries must lie below them.
    pub(crate) fn absorb(&mut self, child: ComparisonResult) {
        self.left.entries.extend(child.left.entries);
        self.right.entries.extend(child.right.entries);
        self.paired.extend(child.paired);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ferrosync_types::EntryKind;

    fn sample() -> ComparisonResult {
        let mut result = ComparisonResult::new("/l".into(), "/r".into());
        result.push_only(Side::Left, Entry::new("/l/a.txt", EntryKind::File));
        result.push_only(Side::Right, Entry::new("/r/c", EntryKind::Directory));
        result.push_paired(PairedDifference::new(
            Entry::new("/l/b.txt", EntryKind::File),
            Entry::new("/r/b.txt", EntryKind::File),
        ));
        result
    }

    #[test]
    fn test_relative_views() {
        let result = sample();
        assert_eq!(result.left_only_relative().unwrap(), vec![PathBuf::from("a.txt")]);
        assert_eq!(result.right_only_relative().unwrap(), vec![PathBuf::from("c")]);
        assert_eq!(result.paired_relative().unwrap(), vec![PathBuf::from("b.txt")]);
        assert_eq!(result.total_differences(), 3);
        assert!(!result.is_in_sync());
    }

    #[test]
    fn test_mirrored_swaps_everything() {
        let result = sample();
        let mirrored = result.mirrored();

        assert_eq!(mirrored.left().root(), Path::new("/r"));
        assert_eq!(mirrored.left().side(), Side::Left);
        assert_eq!(mirrored.left().entries(), result.right().entries());
        assert_eq!(mirrored.right().entries(), result.left().entries());
        assert_eq!(mirrored.paired()[0].left().path(), Path::new("/r/b.txt"));
        assert_eq!(mirrored.mirrored(), result);
    }

    #[test]
    fn test_absorb_appends_after_parent() {
        let mut parent = sample();
        let mut child = ComparisonResult::new("/l/sub".into(), "/r/sub".into());
        child.push_only(Side::Left, Entry::new("/l/sub/z.txt", EntryKind::File));
        parent.absorb(child);

        assert_eq!(
            parent.left_only_relative().unwrap(),
            vec![PathBuf::from("a.txt"), PathBuf::from("sub/z.txt")]
        );
        assert_eq!(parent.left().root(), Path::new("/l"));
    }

    #[test]
    fn test_empty_result_is_in_sync() {
        let result = ComparisonResult::new("/l".into(), "/r".into());
        assert!(result.is_in_sync());
        assert_eq!(result.side(Side::Right).root(), Path::new("/r"));
    }
}
