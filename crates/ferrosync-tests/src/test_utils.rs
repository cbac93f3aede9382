//! Fixture builders for directory trees

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Test data generation patterns
#[derive(Debug, Clone, Copy)]
pub enum TestDataPattern {
    /// Printable ASCII, classified as text by the content oracle
    Text,
    /// Starts with bytes that are not valid UTF-8, classified as binary
    Binary,
    /// All zeros
    Zeros,
}

/// Generate `size` bytes following `pattern`; `seed` varies the contents
pub fn generate_test_data(size: usize, pattern: TestDataPattern, seed: u8) -> Vec<u8> {
    match pattern {
        TestDataPattern::Text => (0..size)
            .map(|i| b'a' + ((i + seed as usize) % 26) as u8)
            .collect(),
        TestDataPattern::Binary => {
            let mut data: Vec<u8> = (0..size)
                .map(|i| ((i * 7 + 13 + seed as usize) % 256) as u8)
                .collect();
            for byte in data.iter_mut().take(3) {
                *byte = 0xFF;
            }
            data
        }
        TestDataPattern::Zeros => vec![0u8; size],
    }
}

/// What a path in a fixture should be
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A regular file with these contents
    File(Vec<u8>),
    /// An empty directory
    Dir,
}

impl Node {
    /// File node from text
    pub fn text(contents: &str) -> Self {
        Self::File(contents.as_bytes().to_vec())
    }
}

/// Declarative builder for a directory tree under an existing root
#[derive(Debug, Default)]
pub struct TreeBuilder {
    nodes: Vec<(PathBuf, Node)>,
}

impl TreeBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a text file
    pub fn file(mut self, relative: &str, contents: &str) -> Self {
        self.nodes.push((relative.into(), Node::text(contents)));
        self
    }

    /// Add a file with raw bytes
    pub fn bytes(mut self, relative: &str, contents: Vec<u8>) -> Self {
        self.nodes.push((relative.into(), Node::File(contents)));
        self
    }

    /// Add an empty directory
    pub fn dir(mut self, relative: &str) -> Self {
        self.nodes.push((relative.into(), Node::Dir));
        self
    }

    /// Write every node below `root`, creating parent directories.
    ///
    /// Nodes that clash with one written earlier (a file where a directory
    /// is needed or the reverse) are skipped. Returns how many were written.
    pub fn build(&self, root: &Path) -> std::io::Result<usize> {
        let mut written = 0;
        for (relative, node) in &self.nodes {
            let path = root.join(relative);
            if path.exists() || has_file_ancestor(root, relative) {
                continue;
            }
            match node {
                Node::Dir => fs::create_dir_all(&path)?,
                Node::File(contents) => {
                    if let Some(parent) = path.parent() {
                        fs::create_dir_all(parent)?;
                    }
                    fs::write(&path, contents)?;
                }
            }
            written += 1;
        }
        Ok(written)
    }
}

fn has_file_ancestor(root: &Path, relative: &Path) -> bool {
    relative
        .ancestors()
        .skip(1)
        .filter(|ancestor| !ancestor.as_os_str().is_empty())
        .any(|ancestor| root.join(ancestor).is_file())
}

/// Every entry below `root` keyed by relative path
pub fn snapshot(root: &Path) -> BTreeMap<PathBuf, Node> {
    WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .filter_map(Result::ok)
        .map(|entry| {
            let relative = entry
                .path()
                .strip_prefix(root)
                .map(Path::to_path_buf)
                .unwrap_or_else(|_| entry.path().to_path_buf());
            let node = if entry.file_type().is_dir() {
                Node::Dir
            } else {
                Node::File(fs::read(entry.path()).unwrap_or_default())
            };
            (relative, node)
        })
        .collect()
}

/// Relative paths as forward-slash strings, for readable assertions
pub fn as_strings(paths: &[PathBuf]) -> Vec<String> {
    paths
        .iter()
        .map(|path| {
            path.components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/")
        })
        .collect()
}
