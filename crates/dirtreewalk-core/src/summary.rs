//! Walk summary statistics.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::entry::EntryKind;
use crate::error::WalkWarning;

/// Counters accumulated over one walk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalkStats {
    /// Directory lines emitted.
    pub directories: u64,
    /// File lines emitted.
    pub files: u64,
    /// Link lines emitted.
    pub symlinks: u64,
    /// Entries of kind `Other`, silently skipped.
    pub skipped: u64,
    /// Directories actually listed, including the root.
    pub listed: u64,
    /// Deepest emitted entry.
    pub max_depth: u32,
}

impl WalkStats {
    /// Create new empty stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a classified entry at `depth`.
    pub fn record(&mut self, kind: EntryKind, depth: u32) {
        match kind {
            EntryKind::Directory => self.directories += 1,
            EntryKind::RegularFile => self.files += 1,
            EntryKind::SymbolicLink => self.symlinks += 1,
            EntryKind::Other => {
                self.skipped += 1;
                return;
            }
        }
        self.max_depth = self.max_depth.max(depth);
    }

    /// Record a successful directory listing.
    pub fn record_listing(&mut self) {
        self.listed += 1;
    }

    /// Total lines emitted for entries.
    pub fn total_emitted(&self) -> u64 {
        self.directories + self.files + self.symlinks
    }
}

/// Result of a completed walk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalkSummary {
    /// Root path that was walked, as given.
    pub root: PathBuf,

    /// Duration of the walk.
    pub duration: Duration,

    /// Summary statistics.
    pub stats: WalkStats,

    /// Warnings encountered during the walk, in order.
    pub warnings: Vec<WalkWarning>,
}

impl WalkSummary {
    /// Create a new walk summary.
    pub fn new(
        root: PathBuf,
        stats: WalkStats,
        duration: Duration,
        warnings: Vec<WalkWarning>,
    ) -> Self {
        Self {
            root,
            duration,
            stats,
            warnings,
        }
    }

    /// Number of warnings that were reported alongside the listing.
    pub fn diagnostics(&self) -> usize {
        self.warnings.iter().filter(|w| w.kind.is_reported()).count()
    }

    /// Check if there were any warnings during the walk.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
