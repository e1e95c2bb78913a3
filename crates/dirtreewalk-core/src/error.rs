//! Error types for walking operations.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fatal errors that abort a walk.
///
/// Recoverable listing failures (permission denied, invalid path) are not
/// errors; they surface as [`WalkWarning`]s and the walk continues.
#[derive(Debug, Error)]
pub enum WalkError {
    /// Generic I/O error.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing a record to the output sink failed.
    #[error("Failed to write output: {source}")]
    Output {
        #[source]
        source: std::io::Error,
    },

    /// The process working directory could not be determined.
    #[error("Cannot determine the current working directory: {source}")]
    WorkingDirectory {
        #[source]
        source: std::io::Error,
    },
}

impl WalkError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create an output error.
    pub fn output(source: std::io::Error) -> Self {
        Self::Output { source }
    }
}

/// Kind of walk warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// The directory could not be listed for lack of permission.
    PermissionDenied,
    /// The path does not exist or is not a usable path.
    InvalidPath,
    /// A directory resolves to one of its own ancestors.
    CycleDetected,
    /// A directory was not listed because of the configured depth limit.
    DepthLimit,
}

impl WarningKind {
    /// Whether this warning is reported to the user alongside the listing.
    ///
    /// Cycle and depth-limit warnings are only logged.
    pub fn is_reported(&self) -> bool {
        matches!(self, WarningKind::PermissionDenied | WarningKind::InvalidPath)
    }
}

/// Non-fatal condition encountered during a walk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalkWarning {
    /// Path where the warning occurred.
    pub path: PathBuf,
    /// Human-readable message.
    pub message: String,
    /// Kind of warning.
    pub kind: WarningKind,
}

impl WalkWarning {
    /// Create a new walk warning.
    pub fn new(path: impl Into<PathBuf>, message: impl Into<String>, kind: WarningKind) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            kind,
        }
    }

    /// Create a permission denied warning.
    pub fn permission_denied(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            message: format!(
                "You do not have permissions to read from this directory: {}.",
                path.display()
            ),
            path,
            kind: WarningKind::PermissionDenied,
        }
    }

    /// Create an invalid path warning.
    ///
    /// The message deliberately does not name the path.
    pub fn invalid_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            message: "You did not enter a valid path.".to_string(),
            kind: WarningKind::InvalidPath,
        }
    }

    /// Create a cycle warning for a directory that resolves to an ancestor.
    pub fn cycle(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            message: format!("Directory cycle detected, not descending: {}", path.display()),
            path,
            kind: WarningKind::CycleDetected,
        }
    }

    /// Create a depth limit warning.
    pub fn depth_limit(path: impl Into<PathBuf>, max_depth: u32) -> Self {
        let path = path.into();
        Self {
            message: format!(
                "Depth limit {max_depth} reached, not descending: {}",
                path.display()
            ),
            path,
            kind: WarningKind::DepthLimit,
        }
    }

    /// Classify a failed directory listing.
    ///
    /// Returns `None` when the failure is not one of the recoverable kinds and
    /// must abort the walk.
    pub fn from_listing_error(path: impl Into<PathBuf>, error: &std::io::Error) -> Option<Self> {
        match error.kind() {
            std::io::ErrorKind::PermissionDenied => Some(Self::permission_denied(path)),
            std::io::ErrorKind::NotFound | std::io::ErrorKind::InvalidInput => {
                Some(Self::invalid_path(path))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walk_error_io_keeps_path() {
        let err = WalkError::io(
            "/test/path",
            std::io::Error::new(std::io::ErrorKind::Other, "boom"),
        );
        assert!(matches!(err, WalkError::Io { .. }));
        assert!(err.to_string().contains("/test/path"));
    }

    #[test]
    fn test_permission_denied_message() {
        let warning = WalkWarning::permission_denied("/test/path");
        assert_eq!(warning.kind, WarningKind::PermissionDenied);
        assert_eq!(
            warning.message,
            "You do not have permissions to read from this directory: /test/path."
        );
    }

    #[test]
    fn test_invalid_path_message() {
        let warning = WalkWarning::invalid_path("/does/not/exist");
        assert_eq!(warning.kind, WarningKind::InvalidPath);
        assert_eq!(warning.message, "You did not enter a valid path.");
    }

    #[test]
    fn test_from_listing_error() {
        let denied = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let missing = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let other = std::io::Error::new(std::io::ErrorKind::Other, "other");

        assert_eq!(
            WalkWarning::from_listing_error("/a", &denied).map(|w| w.kind),
            Some(WarningKind::PermissionDenied)
        );
        assert_eq!(
            WalkWarning::from_listing_error("/a", &missing).map(|w| w.kind),
            Some(WarningKind::InvalidPath)
        );
        assert!(WalkWarning::from_listing_error("/a", &other).is_none());
    }

    #[test]
    fn test_reported_kinds() {
        assert!(WarningKind::PermissionDenied.is_reported());
        assert!(WarningKind::InvalidPath.is_reported());
        assert!(!WarningKind::CycleDetected.is_reported());
        assert!(!WarningKind::DepthLimit.is_reported());
    }
}
