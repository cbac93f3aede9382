//! JSON output structures for the ferrosync CLI

use ferrosync_core::ComparisonResult;
use ferrosync_types::{Result, SyncPolicy, SyncStats};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Complete JSON document for one run
#[derive(Debug, Serialize, Deserialize)]
pub struct ComparisonJson {
    /// Run metadata
    pub metadata: OperationMetadata,
    /// Files on both sides whose contents differ, relative to the roots
    pub hashes_different: Vec<String>,
    /// Entries only in the left tree
    pub extra_in_left: Vec<String>,
    /// Entries only in the right tree
    pub extra_in_right: Vec<String>,
    /// Whether no difference was found
    pub in_sync: bool,
    /// Present when a sync ran
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sync: Option<SyncJson>,
}

/// Run metadata
#[derive(Debug, Serialize, Deserialize)]
pub struct OperationMetadata {
    /// ferrosync version
    pub version: String,
    /// When the document was produced (RFC 3339)
    pub timestamp: String,
    /// Canonical left root
    pub left_path: String,
    /// Canonical right root
    pub right_path: String,
}

/// Sync policy and statistics
#[derive(Debug, Serialize, Deserialize)]
pub struct SyncJson {
    /// Tree entries were copied from: "left" or "right"
    pub source: String,
    /// Copy source-only entries
    pub add_missing: bool,
    /// Delete destination-only entries
    pub remove_extra: bool,
    /// Replace differing files
    pub overwrite: bool,
    /// Number of files copied
    pub files_copied: u64,
    /// Number of directory trees copied
    pub directories_copied: u64,
    /// Number of files overwritten
    pub files_overwritten: u64,
    /// Number of entries removed
    pub entries_removed: u64,
    /// Number of entries skipped
    pub entries_skipped: u64,
    /// Total bytes copied
    pub bytes_copied: u64,
    /// Duration in seconds
    pub duration_seconds: f64,
}

fn display_paths(paths: Vec<PathBuf>) -> Vec<String> {
    paths
        .iter()
        .map(|path| path.display().to_string())
        .collect()
}

impl ComparisonJson {
    /// Build the document from a comparison
    pub fn new(result: &ComparisonResult) -> Result<Self> {
        Ok(Self {
            metadata: OperationMetadata {
                version: env!("CARGO_PKG_VERSION").to_string(),
                timestamp: chrono::Utc::now().to_rfc3339(),
                left_path: result.left().root().display().to_string(),
                right_path: result.right().root().display().to_string(),
            },
            hashes_different: display_paths(result.paired_relative()?),
            extra_in_left: display_paths(result.left_only_relative()?),
            extra_in_right: display_paths(result.right_only_relative()?),
            in_sync: result.is_in_sync(),
            sync: None,
        })
    }

    /// Attach the outcome of a sync run
    pub fn with_sync(mut self, policy: &SyncPolicy, stats: &SyncStats) -> Self {
        self.sync = Some(SyncJson::new(policy, stats));
        self
    }
}

impl SyncJson {
    /// Create SyncJson from a policy and its statistics
    pub fn new(policy: &SyncPolicy, stats: &SyncStats) -> Self {
        Self {
            source: policy.source().to_string().to_lowercase(),
            add_missing: policy.add_missing,
            remove_extra: policy.remove_extra,
            overwrite: policy.overwrite,
            files_copied: stats.files_copied,
            directories_copied: stats.directories_copied,
            files_overwritten: stats.files_overwritten,
            entries_removed: stats.entries_removed,
            entries_skipped: stats.entries_skipped,
            bytes_copied: stats.bytes_copied,
            duration_seconds: stats.duration.as_secs_f64(),
        }
    }
}
