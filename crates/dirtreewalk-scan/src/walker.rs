//! Work-list based directory walker.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use compact_str::CompactString;
use tokio::sync::broadcast;
use tracing::{debug, trace, warn};

use dirtreewalk_core::{
    DirectoryEntry, InodeInfo, WalkConfig, WalkError, WalkStats, WalkSummary, WalkWarning,
    normalize_relative_path_from,
};

use crate::ancestors::AncestorSet;
use crate::classify::classify;
use crate::progress::{ProgressTracker, WalkProgress};
use crate::sink::{EntrySink, TextSink};

/// Depth-first, pre-order directory walker.
///
/// Each directory is listed once, its children are handled in the order the
/// OS returns them, and a directory's own line is emitted before anything
/// below it. Pending directories live on an explicit stack, so deep trees do
/// not grow the native call stack.
pub struct TreeWalker {
    progress_tx: broadcast::Sender<WalkProgress>,
}

/// A listed directory whose children are being emitted.
struct Frame {
    path: PathBuf,
    depth: u32,
    inode: Option<InodeInfo>,
    children: std::vec::IntoIter<OsString>,
}

/// Mutable bookkeeping for one walk.
struct WalkState {
    stats: WalkStats,
    warnings: Vec<WalkWarning>,
    ancestors: AncestorSet,
    progress: ProgressTracker,
}

impl WalkState {
    fn warn(&mut self, warning: WalkWarning) {
        self.progress.record_warning();
        self.warnings.push(warning);
    }
}

impl TreeWalker {
    /// Create a new walker.
    pub fn new() -> Self {
        let (progress_tx, _) = broadcast::channel(100);
        Self { progress_tx }
    }

    /// Subscribe to walk progress updates.
    pub fn subscribe(&self) -> broadcast::Receiver<WalkProgress> {
        self.progress_tx.subscribe()
    }

    /// Walk `config.root`, emitting every entry to `sink`.
    ///
    /// Permission and invalid-path failures while listing a directory are
    /// reported to the sink and end that subtree only. Any other I/O failure
    /// aborts the walk; lines already emitted stay emitted.
    pub fn walk<S>(&self, config: &WalkConfig, sink: &mut S) -> Result<WalkSummary, WalkError>
    where
        S: EntrySink + ?Sized,
    {
        let anchor = resolve_anchor(config.anchor.as_deref())?;
        let mut state = WalkState {
            stats: WalkStats::new(),
            warnings: Vec::new(),
            ancestors: AncestorSet::new(),
            progress: ProgressTracker::new(config.progress_interval),
        };

        debug!(root = %config.root.display(), policy = %config.symlink_policy, "starting walk");

        let root_inode = if config.detect_cycles {
            fs::metadata(&config.root)
                .ok()
                .and_then(|m| InodeInfo::from_metadata(&m))
        } else {
            None
        };

        let mut stack: Vec<Frame> = Vec::new();
        if let Some(frame) = self.open(&config.root, 0, root_inode, sink, &mut state)? {
            stack.push(frame);
        }

        while let Some(frame) = stack.last_mut() {
            let Some(child) = frame.children.next() else {
                if let Some(inode) = stack.pop().and_then(|done| done.inode) {
                    state.ancestors.leave(&inode);
                }
                continue;
            };

            let depth = frame.depth + 1;
            let full_path = frame.path.join(&child);
            let name = CompactString::new(child.to_string_lossy());
            let relative_path = normalize_relative_path_from(&anchor, &frame.path, &name);

            let classified = classify(&full_path, config.symlink_policy)?;
            state.stats.record(classified.kind, depth);

            if !classified.kind.is_emitted() {
                trace!(path = %full_path.display(), "skipping entry of other kind");
                continue;
            }

            let entry = DirectoryEntry {
                name,
                full_path,
                kind: classified.kind,
                relative_path: relative_path.into(),
                depth,
            };
            trace!(path = %entry.full_path.display(), kind = %entry.kind, "entry");
            sink.entry(&entry.to_record()).map_err(WalkError::output)?;

            if state.progress.record_entry(entry.kind) {
                let _ = self.progress_tx.send(state.progress.snapshot(&state.stats, false));
            }

            if !entry.kind.is_dir() {
                continue;
            }

            if !config.may_descend(depth) {
                let max = config.max_depth.unwrap_or(depth);
                debug!(path = %entry.full_path.display(), max, "depth limit reached");
                state.warn(WalkWarning::depth_limit(&entry.full_path, max));
                continue;
            }

            let inode = if config.detect_cycles {
                classified.inode
            } else {
                None
            };
            if inode.is_some_and(|inode| state.ancestors.contains(&inode)) {
                let warning = WalkWarning::cycle(&entry.full_path);
                warn!("{}", warning.message);
                state.warn(warning);
                continue;
            }

            if let Some(frame) = self.open(&entry.full_path, depth, inode, sink, &mut state)? {
                stack.push(frame);
            }
        }

        sink.finish().map_err(WalkError::output)?;
        let _ = self.progress_tx.send(state.progress.snapshot(&state.stats, true));

        let duration = state.progress.elapsed();
        debug!(
            entries = state.stats.total_emitted(),
            warnings = state.warnings.len(),
            ?duration,
            "walk finished"
        );

        Ok(WalkSummary::new(
            config.root.clone(),
            state.stats,
            duration,
            state.warnings,
        ))
    }

    /// List `path` and turn it into a frame.
    ///
    /// Returns `Ok(None)` when the listing failed in a recoverable way; the
    /// failure has then already been reported.
    fn open<S>(
        &self,
        path: &Path,
        depth: u32,
        inode: Option<InodeInfo>,
        sink: &mut S,
        state: &mut WalkState,
    ) -> Result<Option<Frame>, WalkError>
    where
        S: EntrySink + ?Sized,
    {
        let children = match list_dir(path) {
            Ok(children) => children,
            Err(err) => {
                let Some(warning) = WalkWarning::from_listing_error(path, &err) else {
                    return Err(WalkError::io(path, err));
                };
                debug!(path = %path.display(), error = %err, "cannot list directory");
                sink.diagnostic(&warning).map_err(WalkError::output)?;
                state.warn(warning);
                return Ok(None);
            }
        };

        debug!(path = %path.display(), depth, children = children.len(), "listed directory");
        state.stats.record_listing();
        state.progress.set_current_path(path.to_path_buf());
        if let Some(inode) = inode {
            state.ancestors.enter(inode);
        }

        Ok(Some(Frame {
            path: path.to_path_buf(),
            depth,
            inode,
            children: children.into_iter(),
        }))
    }
}

impl Default for TreeWalker {
    fn default() -> Self {
        Self::new()
    }
}

/// Walk `path` with the default configuration, printing to standard output.
pub fn traverse(path: impl Into<PathBuf>) -> Result<WalkSummary, WalkError> {
    let config = WalkConfig::new(path);
    TreeWalker::new().walk(&config, &mut TextSink::stdout())
}

/// Names of the immediate children of `path`, in OS order.
fn list_dir(path: &Path) -> std::io::Result<Vec<OsString>> {
    fs::read_dir(path)?
        .map(|entry| entry.map(|e| e.file_name()))
        .collect()
}

/// The anchor for relative paths, made absolute.
fn resolve_anchor(anchor: Option<&Path>) -> Result<PathBuf, WalkError> {
    match anchor {
        Some(anchor) if anchor.is_absolute() => Ok(anchor.to_path_buf()),
        Some(anchor) => Ok(current_dir()?.join(anchor)),
        None => current_dir(),
    }
}

fn current_dir() -> Result<PathBuf, WalkError> {
    std::env::current_dir().map_err(|source| WalkError::WorkingDirectory { source })
}
