//! Filesystem entries as seen by the comparison engine

use ferrosync_types::{EntryKind, Error, Result};
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

/// A file or directory found under one of the compared roots
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Entry {
    path: PathBuf,
    name: OsString,
    kind: EntryKind,
}

impl Entry {
    /// Create an entry; the name is the last component of `path`
    pub fn new<P: Into<PathBuf>>(path: P, kind: EntryKind) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(OsStr::to_os_string)
            .unwrap_or_default();
        Self { path, name, kind }
    }

    /// Absolute path of the entry
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Last path component, the key entries are ordered and matched by
    pub fn name(&self) -> &OsStr {
        &self.name
    }

    /// File or directory
    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    /// Whether the entry is a directory
    pub fn is_dir(&self) -> bool {
        self.kind.is_dir()
    }

    /// Path of the entry relative to `root`
    pub fn relative_to(&self, root: &Path) -> Result<&Path> {
        self.path.strip_prefix(root).map_err(|_| {
            Error::other(format!(
                "'{}' is not located under '{}'",
                self.path.display(),
                root.display()
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_name_is_last_component() {
        let entry = Entry::new("/data/left/sub/file.txt", EntryKind::File);
        assert_eq!(entry.name(), OsStr::new("file.txt"));
        assert!(!entry.is_dir());
    }

    #[test]
    fn test_relative_to() {
        let entry = Entry::new("/data/left/sub", EntryKind::Directory);
        assert_eq!(
            entry.relative_to(Path::new("/data/left")).unwrap(),
            Path::new("sub")
        );
        assert!(entry.relative_to(Path::new("/data/right")).is_err());
    }
}
