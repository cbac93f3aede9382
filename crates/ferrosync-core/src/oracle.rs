//! Content equality of two regular files
//!
//! The default oracle rejects on size first, then compares BLAKE3 digests of the
//! full contents. Same-sized binary files above a size threshold are treated as
//! equal without being read, which trades exactness for speed on large media.
//! Turn [`CompareOptions::large_binary_shortcut`] off when that is not acceptable.

use ferrosync_config::CompareConfig;
use ferrosync_types::{Error, Result};
use std::fs::{self, File};
use std::io::Read;
use std::path::Path;
use tracing::trace;

/// Decides whether two regular files count as equal
pub trait EqualityOracle {
    /// Compare two files that are both known to exist
    fn are_equal(&self, left: &Path, right: &Path) -> Result<bool>;
}

impl<T: EqualityOracle + ?Sized> EqualityOracle for &T {
    fn are_equal(&self, left: &Path, right: &Path) -> Result<bool> {
        (**self).are_equal(left, right)
    }
}

/// Tuning for [`ContentOracle`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompareOptions {
    /// Size in bytes above which binary files may skip hashing
    pub large_file_threshold: u64,
    /// Whether the size-only shortcut for large binaries is taken at all
    pub large_binary_shortcut: bool,
    /// How many leading bytes are decoded to classify a file as text
    pub text_probe_len: usize,
}

impl CompareOptions {
    /// Always hash, never assume equality from size alone
    pub fn exact() -> Self {
        Self {
            large_binary_shortcut: false,
            ..Self::default()
        }
    }
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self::from(&CompareConfig::default())
    }
}

impl From<&CompareConfig> for CompareOptions {
    fn from(config: &CompareConfig) -> Self {
        Self {
            large_file_threshold: config.large_file_threshold,
            large_binary_shortcut: config.large_binary_shortcut,
            text_probe_len: config.text_probe_len,
        }
    }
}

/// Size, text probe and digest based oracle
#[derive(Debug, Clone, Default)]
pub struct ContentOracle {
    options: CompareOptions,
}

impl ContentOracle {
    /// Create an oracle with the given options
    pub fn new(options: CompareOptions) -> Self {
        Self { options }
    }

    /// Options in effect
    pub fn options(&self) -> &CompareOptions {
        &self.options
    }

    /// Whether the first bytes of the file decode as UTF-8.
    ///
    /// A multi-byte character cut off by the probe window still counts as text.
    pub fn is_text(&self, path: &Path) -> Result<bool> {
        let file = File::open(path).map_err(|e| Error::io("opening", path, e))?;
        let mut probe = Vec::with_capacity(self.options.text_probe_len);
        file.take(self.options.text_probe_len as u64)
            .read_to_end(&mut probe)
            .map_err(|e| Error::io("reading", path, e))?;

        Ok(match std::str::from_utf8(&probe) {
            Ok(_) => true,
            Err(e) => e.error_len().is_none(),
        })
    }

    fn digest(path: &Path) -> Result<blake3::Hash> {
        let contents = fs::read(path).map_err(|e| Error::io("reading", path, e))?;
        Ok(blake3::hash(&contents))
    }

    fn size(path: &Path) -> Result<u64> {
        fs::metadata(path)
            .map(|m| m.len())
            .map_err(|e| Error::io("reading metadata of", path, e))
    }
}

impl EqualityOracle for ContentOracle {
    fn are_equal(&self, left: &Path, right: &Path) -> Result<bool> {
        let left_size = Self::size(left)?;
        let right_size = Self::size(right)?;
        if left_size != right_size {
            trace!(
                "Size mismatch: {} ({}) vs {} ({})",
                left.display(),
                left_size,
                right.display(),
                right_size
            );
            return Ok(false);
        }

        if self.options.large_binary_shortcut
            && left_size > self.options.large_file_threshold
            && !self.is_text(left)?
        {
            trace!(
                "Assuming equal large binaries of {} bytes: {}",
                left_size,
                left.display()
            );
            return Ok(true);
        }

        let equal = Self::digest(left)? == Self::digest(right)?;
        trace!("Digest comparison of {}: equal={}", left.display(), equal);
        Ok(equal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::TempDir;

    fn write_pair(dir: &TempDir, left: &[u8], right: &[u8]) -> (std::path::PathBuf, std::path::PathBuf) {
        let left_path = dir.path().join("left.bin");
        let right_path = dir.path().join("right.bin");
        fs::write(&left_path, left).unwrap();
        fs::write(&right_path, right).unwrap();
        (left_path, right_path)
    }

    #[rstest]
    #[case(b"hello".as_slice(), b"hello".as_slice(), true)]
    #[case(b"hello".as_slice(), b"hellp".as_slice(), false)]
    #[case(b"short".as_slice(), b"longer".as_slice(), false)]
    #[case(b"".as_slice(), b"".as_slice(), true)]
    fn test_small_files(#[case] left: &[u8], #[case] right: &[u8], #[case] expected: bool) {
        let dir = TempDir::new().unwrap();
        let (l, r) = write_pair(&dir, left, right);
        assert_eq!(ContentOracle::default().are_equal(&l, &r).unwrap(), expected);
    }

    #[test]
    fn test_text_probe() {
        let dir = TempDir::new().unwrap();
        let text = dir.path().join("a.txt");
        let binary = dir.path().join("a.bin");
        let split_char = dir.path().join("split.txt");
        fs::write(&text, "plain text").unwrap();
        fs::write(&binary, [0xFFu8, 0xFE, 0x00, 0x01]).unwrap();
        // 'a' followed by a three byte character: the probe ends mid-character
        fs::write(&split_char, "a\u{20AC}").unwrap();

        let oracle = ContentOracle::default();
        assert!(oracle.is_text(&text).unwrap());
        assert!(!oracle.is_text(&binary).unwrap());
        assert!(oracle.is_text(&split_char).unwrap());
    }

    #[test]
    fn test_large_binary_shortcut() {
        let dir = TempDir::new().unwrap();
        let mut left = vec![0xFFu8; 64];
        let mut right = left.clone();
        left[63] = 1;
        right[63] = 2;
        let (l, r) = write_pair(&dir, &left, &right);

        let shortcut = ContentOracle::new(CompareOptions {
            large_file_threshold: 16,
            ..CompareOptions::default()
        });
        assert!(shortcut.are_equal(&l, &r).unwrap());

        let exact = ContentOracle::new(CompareOptions {
            large_file_threshold: 16,
            ..CompareOptions::exact()
        });
        assert!(!exact.are_equal(&l, &r).unwrap());
    }

    #[test]
    fn test_large_text_is_always_hashed() {
        let dir = TempDir::new().unwrap();
        let (l, r) = write_pair(&dir, b"aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa", b"aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaab");

        let oracle = ContentOracle::new(CompareOptions {
            large_file_threshold: 16,
            ..CompareOptions::default()
        });
        assert!(!oracle.are_equal(&l, &r).unwrap());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let present = dir.path().join("present");
        fs::write(&present, b"x").unwrap();

        let err = ContentOracle::default()
            .are_equal(&present, &dir.path().join("absent"))
            .unwrap_err();
        assert_eq!(err.io_kind(), Some(std::io::ErrorKind::NotFound));
    }

    #[test]
    fn test_options_from_config() {
        let config = CompareConfig {
            large_file_threshold: 10,
            large_binary_shortcut: false,
            text_probe_len: 8,
        };
        let options = CompareOptions::from(&config);
        assert_eq!(options.large_file_threshold, 10);
        assert!(!options.large_binary_shortcut);
        assert_eq!(options.text_probe_len, 8);
    }
}
