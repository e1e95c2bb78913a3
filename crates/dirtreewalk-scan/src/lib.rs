//! Directory traversal engine for dirtreewalk.
//!
//! # Overview
//!
//! `dirtreewalk-scan` walks a directory tree depth-first and emits one record
//! per entry to an [`EntrySink`]. Key features:
//!
//! - **Pre-order output** in the order the OS lists each directory
//! - **Explicit work-list** instead of recursion, with a depth limit
//! - **Cycle detection** against the directories currently being walked
//! - **Recoverable listing failures** reported inline, everything else fatal
//! - **Progress updates** via broadcast channels
//!
//! # Example
//!
//! ```rust,no_run
//! use dirtreewalk_scan::{TextSink, TreeWalker, WalkConfig};
//!
//! let config = WalkConfig::new("/path/to/walk");
//! let walker = TreeWalker::new();
//! let summary = walker.walk(&config, &mut TextSink::stdout()).unwrap();
//!
//! eprintln!("{} entries", summary.stats.total_emitted());
//! ```

mod ancestors;
mod classify;
mod progress;
mod sink;
mod walker;

pub use ancestors::AncestorSet;
pub use classify::{Classified, classify};
pub use progress::WalkProgress;
pub use sink::{
    CollectingSink, EntrySink, JsonLinesSink, KIND_WIDTH, NAME_WIDTH, PATH_WIDTH, SinkEvent,
    TextSink, format_record,
};
pub use walker::{TreeWalker, traverse};

// Re-export core types for convenience
pub use dirtreewalk_core::{
    DirectoryEntry, EntryKind, EntryRecord, Fingerprint, SymlinkPolicy, WalkConfig, WalkError,
    WalkStats, WalkSummary, WalkWarning, WarningKind, fingerprint,
};
