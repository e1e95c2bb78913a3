//! Core types for dirtreewalk.
//!
//! This crate provides the data model shared by the walker and the CLI:
//! entry kinds and records, the name fingerprint, the display-relative path
//! normalizer, configuration and errors.

mod config;
mod entry;
mod error;
pub mod fingerprint;
pub mod relpath;
mod summary;

pub use config::{SymlinkPolicy, WalkConfig, WalkConfigBuilder};
pub use entry::{DirectoryEntry, EntryKind, EntryRecord, InodeInfo};
pub use error::{WalkError, WalkWarning, WarningKind};
pub use fingerprint::{Fingerprint, fingerprint};
pub use relpath::{normalize_relative_path, normalize_relative_path_from};
pub use summary::{WalkStats, WalkSummary};
