//! Display-relative path computation.
//!
//! The relative path shown for an entry is derived from the traversal path
//! relative to a fixed anchor (the working directory at walk start):
//!
//! 1. relativize the traversal path against the anchor, lexically
//! 2. split it into `/` segments and append the entry name
//! 3. drop every `..` segment, wherever it occurs
//! 4. drop the first remaining segment, whatever it is
//!
//! Step 4 strips a real path component when the traversal path lies below
//! the anchor (`proj/sub` + `b.txt` gives `sub/b.txt`). Existing listings
//! rely on that shape, so it is not corrected here.

use std::path::{Component, Path};

const PARENT: &str = "..";

/// Normalize against the process working directory.
pub fn normalize_relative_path(path: &Path, name: &str) -> std::io::Result<String> {
    let anchor = std::env::current_dir()?;
    Ok(normalize_relative_path_from(&anchor, path, name))
}

/// Normalize against an explicit anchor directory.
///
/// `anchor` is expected to be absolute. Relative `path`s are resolved
/// against it.
pub fn normalize_relative_path_from(anchor: &Path, path: &Path, name: &str) -> String {
    let mut segments = relative_segments(anchor, path);
    segments.push(name.to_string());
    segments.retain(|segment| segment != PARENT);
    if !segments.is_empty() {
        segments.remove(0);
    }
    segments.join("/")
}

/// Segments of `path` relative to `anchor`, `["."]` when they coincide.
pub fn relative_segments(anchor: &Path, path: &Path) -> Vec<String> {
    let start = lexical_components(anchor);
    let target = if path.is_absolute() {
        lexical_components(path)
    } else {
        lexical_components(&anchor.join(path))
    };

    let common = start
        .iter()
        .zip(target.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut segments: Vec<String> = std::iter::repeat_n(PARENT.to_string(), start.len() - common)
        .chain(target[common..].iter().cloned())
        .collect();

    if segments.is_empty() {
        segments.push(".".to_string());
    }
    segments
}

/// Absolute path components with `.` removed and `..` applied.
///
/// Purely lexical: symlinks are not resolved. `..` at the root stays at the
/// root.
fn lexical_components(path: &Path) -> Vec<String> {
    let mut parts: Vec<String> = Vec::new();
    for component in path.components() {
        match component {
            Component::Prefix(prefix) => {
                parts.clear();
                parts.push(prefix.as_os_str().to_string_lossy().into_owned());
            }
            Component::RootDir | Component::CurDir => {}
            Component::ParentDir => {
                if parts.last().is_some_and(|last| !is_prefix(last)) {
                    parts.pop();
                }
            }
            Component::Normal(part) => parts.push(part.to_string_lossy().into_owned()),
        }
    }
    parts
}

#[cfg(windows)]
fn is_prefix(part: &str) -> bool {
    part.ends_with(':') || part.starts_with(r"\\")
}

#[cfg(not(windows))]
fn is_prefix(_part: &str) -> bool {
    false
}
