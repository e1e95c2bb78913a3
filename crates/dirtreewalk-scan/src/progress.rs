//! Walk progress reporting.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use dirtreewalk_core::{EntryKind, WalkStats};

/// Progress information during a walk.
#[derive(Debug, Clone)]
pub struct WalkProgress {
    /// Number of files emitted so far.
    pub files_seen: u64,
    /// Number of directories emitted so far.
    pub dirs_seen: u64,
    /// Number of links emitted so far.
    pub links_seen: u64,
    /// Directory currently being listed.
    pub current_path: PathBuf,
    /// Number of warnings encountered.
    pub warnings_count: u64,
    /// Time elapsed since the walk started.
    pub elapsed: Duration,
    /// Set on the last update of a walk.
    pub finished: bool,
}

impl WalkProgress {
    /// Create initial progress state.
    pub fn new() -> Self {
        Self {
            files_seen: 0,
            dirs_seen: 0,
            links_seen: 0,
            current_path: PathBuf::new(),
            warnings_count: 0,
            elapsed: Duration::ZERO,
            finished: false,
        }
    }

    /// Calculate walk rate in entries per second.
    pub fn entries_per_second(&self) -> f64 {
        if self.elapsed.as_secs_f64() > 0.0 {
            self.total_items() as f64 / self.elapsed.as_secs_f64()
        } else {
            0.0
        }
    }

    /// Get total entries emitted.
    pub fn total_items(&self) -> u64 {
        self.files_seen + self.dirs_seen + self.links_seen
    }
}

impl Default for WalkProgress {
    fn default() -> Self {
        Self::new()
    }
}

/// Internal progress tracker with timing.
#[derive(Debug)]
pub(crate) struct ProgressTracker {
    start_time: Instant,
    interval: u64,
    since_update: u64,
    warnings_count: u64,
    current_path: PathBuf,
}

impl ProgressTracker {
    pub fn new(interval: u64) -> Self {
        Self {
            start_time: Instant::now(),
            interval: interval.max(1),
            since_update: 0,
            warnings_count: 0,
            current_path: PathBuf::new(),
        }
    }

    /// Count an emitted entry. Returns `true` when an update is due.
    pub fn record_entry(&mut self, kind: EntryKind) -> bool {
        if !kind.is_emitted() {
            return false;
        }
        self.since_update += 1;
        if self.since_update >= self.interval {
            self.since_update = 0;
            true
        } else {
            false
        }
    }

    pub fn record_warning(&mut self) {
        self.warnings_count += 1;
    }

    pub fn set_current_path(&mut self, path: PathBuf) {
        self.current_path = path;
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn snapshot(&self, stats: &WalkStats, finished: bool) -> WalkProgress {
        WalkProgress {
            files_seen: stats.files,
            dirs_seen: stats.directories,
            links_seen: stats.symlinks,
            current_path: self.current_path.clone(),
            warnings_count: self.warnings_count,
            elapsed: self.elapsed(),
            finished,
        }
    }
}
