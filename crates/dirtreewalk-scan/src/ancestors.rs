//! Ancestor tracking for cycle detection.

use dashmap::DashSet;
use dirtreewalk_core::InodeInfo;

/// The set of directories currently open on the walk's work-list.
///
/// A directory whose `(inode, device)` is already in the set is one of its
/// own ancestors: descending into it again would never terminate. Only open
/// directories are tracked, so a link to a sibling that was already fully
/// walked is still descended into.
#[derive(Debug, Default)]
pub struct AncestorSet {
    open: DashSet<InodeInfo>,
}

impl AncestorSet {
    /// Create an empty ancestor set.
    pub fn new() -> Self {
        Self {
            open: DashSet::new(),
        }
    }

    /// Mark a directory as open. Returns `false` if it already was, which
    /// means a cycle.
    pub fn enter(&self, info: InodeInfo) -> bool {
        self.open.insert(info)
    }

    /// Mark a directory as fully walked.
    pub fn leave(&self, info: &InodeInfo) {
        self.open.remove(info);
    }

    /// Check if a directory is currently open.
    pub fn contains(&self, info: &InodeInfo) -> bool {
        self.open.contains(info)
    }

    /// Get the number of open directories.
    pub fn len(&self) -> usize {
        self.open.len()
    }

    /// Check if no directories are open.
    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }
}
