//! Walk configuration types.

use std::path::PathBuf;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use strum::Display;

/// How symbolic links are classified.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SymlinkPolicy {
    /// Follow links while checking for directory, then file, and only then
    /// ask whether the entry is itself a link.
    ///
    /// A link to a directory is listed and descended into as a directory.
    /// Only links to other targets, or broken links, show up as links.
    #[default]
    #[strum(to_string = "follow-first")]
    FollowFirst,
    /// Check whether the entry is a link before anything else. Links are
    /// never descended into.
    #[strum(to_string = "link-first")]
    LinkFirst,
}

/// Configuration for walking operations.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct WalkConfig {
    /// Root path to walk.
    pub root: PathBuf,

    /// Anchor for relative paths (None = working directory at walk start).
    #[builder(default)]
    #[serde(default)]
    pub anchor: Option<PathBuf>,

    /// Symbolic link classification order.
    #[builder(default)]
    #[serde(default)]
    pub symlink_policy: SymlinkPolicy,

    /// Maximum depth to descend (None = unlimited). Root children are at depth 1.
    #[builder(default)]
    #[serde(default)]
    pub max_depth: Option<u32>,

    /// Refuse to descend into a directory that is one of its own ancestors.
    #[builder(default = "true")]
    #[serde(default = "default_true")]
    pub detect_cycles: bool,

    /// Number of emitted entries between progress updates.
    #[builder(default = "1000")]
    #[serde(default = "default_progress_interval")]
    pub progress_interval: u64,
}

fn default_true() -> bool {
    true
}

fn default_progress_interval() -> u64 {
    1000
}

impl WalkConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(ref root) = self.root {
            if root.as_os_str().is_empty() {
                return Err("Root path cannot be empty".to_string());
            }
        } else {
            return Err("Root path is required".to_string());
        }
        if self.progress_interval == Some(0) {
            return Err("Progress interval must be greater than zero".to_string());
        }
        Ok(())
    }
}

impl WalkConfig {
    /// Create a new walk config builder.
    pub fn builder() -> WalkConfigBuilder {
        WalkConfigBuilder::default()
    }

    /// Create a config with the default listing behavior.
    ///
    /// Unlike the builder this accepts any root, including an empty one; the
    /// walk then reports it as an invalid path.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            anchor: None,
            symlink_policy: SymlinkPolicy::FollowFirst,
            max_depth: None,
            detect_cycles: true,
            progress_interval: 1000,
        }
    }

    /// Check if a directory at `depth` may be listed.
    pub fn may_descend(&self, depth: u32) -> bool {
        self.max_depth.is_none_or(|max| depth < max)
    }
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self::new(".")
    }
}
