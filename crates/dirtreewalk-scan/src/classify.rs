//! Entry classification.

use std::fs;
use std::path::Path;

use dirtreewalk_core::{EntryKind, InodeInfo, SymlinkPolicy, WalkError};

/// Kind of an entry, plus the identity of the directory it resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classified {
    pub kind: EntryKind,
    /// Set for directories on platforms with inode numbers.
    pub inode: Option<InodeInfo>,
}

impl Classified {
    fn of(kind: EntryKind) -> Self {
        Self { kind, inode: None }
    }
}

/// Classify `path` under the given policy.
///
/// A metadata failure on an entry that is not itself a symlink means the
/// entry changed under us after the listing. That is not recoverable.
pub fn classify(path: &Path, policy: SymlinkPolicy) -> Result<Classified, WalkError> {
    match policy {
        SymlinkPolicy::FollowFirst => classify_follow_first(path),
        SymlinkPolicy::LinkFirst => classify_link_first(path),
    }
}

fn classify_follow_first(path: &Path) -> Result<Classified, WalkError> {
    match fs::metadata(path) {
        Ok(metadata) if metadata.is_dir() => Ok(Classified {
            kind: EntryKind::Directory,
            inode: InodeInfo::from_metadata(&metadata),
        }),
        Ok(metadata) if metadata.is_file() => Ok(Classified::of(EntryKind::RegularFile)),
        Ok(_) => link_or_other(path, None),
        // Broken links and link loops fail to stat but are still links.
        Err(err) => link_or_other(path, Some(err)),
    }
}

fn link_or_other(path: &Path, followed: Option<std::io::Error>) -> Result<Classified, WalkError> {
    let metadata = fs::symlink_metadata(path).map_err(|e| WalkError::io(path, e))?;
    if metadata.file_type().is_symlink() {
        return Ok(Classified::of(EntryKind::SymbolicLink));
    }
    match followed {
        Some(err) => Err(WalkError::io(path, err)),
        None => Ok(Classified::of(EntryKind::Other)),
    }
}

fn classify_link_first(path: &Path) -> Result<Classified, WalkError> {
    let metadata = fs::symlink_metadata(path).map_err(|e| WalkError::io(path, e))?;
    let file_type = metadata.file_type();

    let classified = if file_type.is_symlink() {
        Classified::of(EntryKind::SymbolicLink)
    } else if file_type.is_dir() {
        Classified {
            kind: EntryKind::Directory,
            inode: InodeInfo::from_metadata(&metadata),
        }
    } else if file_type.is_file() {
        Classified::of(EntryKind::RegularFile)
    } else {
        Classified::of(EntryKind::Other)
    };
    Ok(classified)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_plain_entries() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("dir")).unwrap();
        fs::write(temp.path().join("file"), "x").unwrap();

        for policy in [SymlinkPolicy::FollowFirst, SymlinkPolicy::LinkFirst] {
            let dir = classify(&temp.path().join("dir"), policy).unwrap();
            assert_eq!(dir.kind, EntryKind::Directory);
            #[cfg(unix)]
            assert!(dir.inode.is_some());

            let file = classify(&temp.path().join("file"), policy).unwrap();
            assert_eq!(file.kind, EntryKind::RegularFile);
            assert!(file.inode.is_none());
        }
    }

    #[test]
    fn test_missing_entry_is_fatal() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("gone");

        for policy in [SymlinkPolicy::FollowFirst, SymlinkPolicy::LinkFirst] {
            let err = classify(&missing, policy).unwrap_err();
            assert!(matches!(err, WalkError::Io { .. }));
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_policies() {
        use std::os::unix::fs::symlink;

        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::create_dir(root.join("target_dir")).unwrap();
        fs::write(root.join("target_file"), "x").unwrap();
        symlink(root.join("target_dir"), root.join("to_dir")).unwrap();
        symlink(root.join("target_file"), root.join("to_file")).unwrap();
        symlink(root.join("nowhere"), root.join("broken")).unwrap();

        let follow = |name: &str| classify(&root.join(name), SymlinkPolicy::FollowFirst).unwrap();
        assert_eq!(follow("to_dir").kind, EntryKind::Directory);
        assert_eq!(follow("to_file").kind, EntryKind::RegularFile);
        assert_eq!(follow("broken").kind, EntryKind::SymbolicLink);

        let link = |name: &str| classify(&root.join(name), SymlinkPolicy::LinkFirst).unwrap();
        assert_eq!(link("to_dir").kind, EntryKind::SymbolicLink);
        assert_eq!(link("to_file").kind, EntryKind::SymbolicLink);
        assert_eq!(link("broken").kind, EntryKind::SymbolicLink);
    }

    #[cfg(unix)]
    #[test]
    fn test_followed_dir_link_shares_target_inode() {
        use std::os::unix::fs::symlink;

        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::create_dir(root.join("real")).unwrap();
        symlink(root.join("real"), root.join("alias")).unwrap();

        let real = classify(&root.join("real"), SymlinkPolicy::FollowFirst).unwrap();
        let alias = classify(&root.join("alias"), SymlinkPolicy::FollowFirst).unwrap();
        assert_eq!(real.inode, alias.inode);
    }

    #[cfg(unix)]
    #[test]
    fn test_fifo_is_other() {
        use std::process::Command;

        let temp = TempDir::new().unwrap();
        let fifo = temp.path().join("pipe");
        let made = Command::new("mkfifo").arg(&fifo).status();
        if !made.is_ok_and(|s| s.success()) {
            return;
        }

        for policy in [SymlinkPolicy::FollowFirst, SymlinkPolicy::LinkFirst] {
            assert_eq!(classify(&fifo, policy).unwrap().kind, EntryKind::Other);
        }
    }
}
