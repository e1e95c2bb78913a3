//! Directory entry and output record types.

use std::path::PathBuf;

use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::fingerprint::Fingerprint;

/// Inode information used to recognise a directory reached twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InodeInfo {
    /// Inode number.
    pub inode: u64,
    /// Device ID.
    pub device: u64,
}

impl InodeInfo {
    /// Create new inode info.
    pub fn new(inode: u64, device: u64) -> Self {
        Self { inode, device }
    }

    /// Read inode information from metadata.
    ///
    /// Returns `None` on platforms without inode numbers.
    #[cfg(unix)]
    pub fn from_metadata(metadata: &std::fs::Metadata) -> Option<Self> {
        use std::os::unix::fs::MetadataExt;
        Some(Self::new(metadata.ino(), metadata.dev()))
    }

    #[cfg(not(unix))]
    pub fn from_metadata(_metadata: &std::fs::Metadata) -> Option<Self> {
        None
    }
}

/// Classification of a file system entry.
///
/// The `Display` form is the tag printed in the first output column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    #[strum(to_string = "<directory>")]
    Directory,
    #[strum(to_string = "<file>")]
    #[serde(rename = "file")]
    RegularFile,
    #[strum(to_string = "<link>")]
    #[serde(rename = "symlink")]
    SymbolicLink,
    /// Sockets, devices, fifos. Never emitted.
    #[strum(to_string = "<other>")]
    Other,
}

impl EntryKind {
    /// Check if this is a directory.
    pub fn is_dir(&self) -> bool {
        matches!(self, EntryKind::Directory)
    }

    /// Check if this is a regular file.
    pub fn is_file(&self) -> bool {
        matches!(self, EntryKind::RegularFile)
    }

    /// Check if this is a symlink.
    pub fn is_symlink(&self) -> bool {
        matches!(self, EntryKind::SymbolicLink)
    }

    /// Whether entries of this kind produce an output line.
    pub fn is_emitted(&self) -> bool {
        !matches!(self, EntryKind::Other)
    }
}

/// A single listing item, alive for one iteration of the walk.
#[derive(Debug, Clone)]
pub struct DirectoryEntry {
    /// Base name as returned by the directory listing.
    pub name: CompactString,
    /// Traversal path joined with `name`.
    pub full_path: PathBuf,
    /// Classification of the entry.
    pub kind: EntryKind,
    /// Display-relative path from the path normalizer.
    pub relative_path: CompactString,
    /// Depth below the walk root (root children are at depth 1).
    pub depth: u32,
}

impl DirectoryEntry {
    /// Build the output record for this entry.
    ///
    /// Regular files get the fingerprint of their name.
    pub fn to_record(&self) -> EntryRecord {
        let fingerprint = self
            .kind
            .is_file()
            .then(|| crate::fingerprint::fingerprint(&self.name));

        EntryRecord {
            kind: self.kind,
            name: self.name.clone(),
            relative_path: self.relative_path.clone(),
            fingerprint,
            depth: self.depth,
        }
    }
}

/// One emitted line of the listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryRecord {
    pub kind: EntryKind,
    pub name: CompactString,
    pub relative_path: CompactString,
    /// Present for regular files only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<Fingerprint>,
    pub depth: u32,
}
