//! Error types and handling for ferrosync
//!
//! Every failure a comparison or a sync can hit is one of a small set of
//! categories. Nothing is retried internally: an error aborts the running
//! phase and is handed to the caller as-is.

use crate::Side;
use std::path::{Path, PathBuf};

/// Error severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Low severity - the run finished but something was off
    Low,
    /// Medium severity - the phase was aborted, trees may be partially synced
    Medium,
    /// High severity - nothing was attempted
    High,
}

/// Main error type for ferrosync operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A root path is not an existing directory
    #[error("{side} path \"{}\" is not a valid directory!", .path.display())]
    InvalidInput {
        /// Which root was rejected
        side: Side,
        /// The offending path, as given by the caller
        path: PathBuf,
    },

    /// A filesystem operation failed
    #[error("I/O error while {operation}{}: {source}", describe_path(.path.as_deref()))]
    Io {
        /// What was being attempted, e.g. "reading directory"
        operation: String,
        /// Path the operation was applied to, when known
        path: Option<PathBuf>,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// Error message describing the configuration issue
        message: String,
    },

    /// Generic error with custom message
    #[error("{message}")]
    Other {
        /// Custom error message
        message: String,
    },
}

fn describe_path(path: Option<&Path>) -> String {
    path.map(|p| format!(" '{}'", p.display()))
        .unwrap_or_default()
}

/// Error kind for categorizing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A root was not a directory
    InvalidInput,
    /// I/O related errors
    Io,
    /// Configuration errors
    Config,
    /// Other errors
    Other,
}

impl Error {
    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput { .. } => ErrorKind::InvalidInput,
            Self::Io { .. } => ErrorKind::Io,
            Self::Config { .. } => ErrorKind::Config,
            Self::Other { .. } => ErrorKind::Other,
        }
    }

    /// Get the error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InvalidInput { .. } | Self::Config { .. } => ErrorSeverity::High,
            Self::Io { .. } => ErrorSeverity::Medium,
            Self::Other { .. } => ErrorSeverity::Low,
        }
    }

    /// Check if the same call could succeed when issued again.
    ///
    /// ferrosync never retries on its own; this only classifies the error for callers.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Io { source, .. } => matches!(
                source.kind(),
                std::io::ErrorKind::Interrupted
                    | std::io::ErrorKind::WouldBlock
                    | std::io::ErrorKind::TimedOut
            ),
            Self::InvalidInput { .. } | Self::Config { .. } | Self::Other { .. } => false,
        }
    }

    /// The underlying I/O error kind, if this is an I/O failure
    pub fn io_kind(&self) -> Option<std::io::ErrorKind> {
        match self {
            Self::Io { source, .. } => Some(source.kind()),
            _ => None,
        }
    }

    /// Create an invalid-input error for a root that is not a directory
    pub fn invalid_root<P: Into<PathBuf>>(side: Side, path: P) -> Self {
        Self::InvalidInput {
            side,
            path: path.into(),
        }
    }

    /// Create an I/O error with the operation and path it happened on
    pub fn io<S: Into<String>, P: AsRef<Path>>(
        operation: S,
        path: P,
        source: std::io::Error,
    ) -> Self {
        Self::Io {
            operation: operation.into(),
            path: Some(path.as_ref().to_path_buf()),
            source,
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new generic error
    pub fn other<S: Into<String>>(message: S) -> Self {
        Self::Other {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            operation: "performing I/O".to_string(),
            path: None,
            source: error,
        }
    }
}
