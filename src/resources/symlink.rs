//! Symlink resource: the [`LinkSpec`] model and its filesystem operations.
use std::path::{Path, PathBuf};

use super::helpers::fs::{ensure_parent_dir, remove_existing, remove_symlink};
use super::{TargetKind, TargetState};
use crate::error::LinkError;

/// One desired symlink: `target` should be a link resolving to `source`.
///
/// The source is never modified by any operation on a `LinkSpec`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkSpec {
    /// The file or directory the link points to.
    pub source: PathBuf,
    /// Where the link is created.
    pub target: PathBuf,
}

impl LinkSpec {
    /// Create a new link spec.
    #[must_use]
    pub const fn new(source: PathBuf, target: PathBuf) -> Self {
        Self { source, target }
    }

    /// Human-readable description of this link.
    #[must_use]
    pub fn description(&self) -> String {
        format!("{} -> {}", self.target.display(), self.source.display())
    }

    /// Whether the source currently exists (following symlinks).
    #[must_use]
    pub fn source_exists(&self) -> bool {
        self.source.exists()
    }

    /// Classify the current state of the target path.
    ///
    /// A missing source takes precedence over any target state.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::SourceMissing`] if the source does not exist, or
    /// [`LinkError::Io`] if the target metadata cannot be read.
    pub fn inspect(&self) -> Result<TargetState, LinkError> {
        let source_meta = match std::fs::metadata(&self.source) {
            Ok(meta) => meta,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(LinkError::SourceMissing(self.source.clone()));
            }
            Err(e) => return Err(LinkError::io("read source", &self.source, e)),
        };

        let target_meta = match std::fs::symlink_metadata(&self.target) {
            Ok(meta) => meta,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(TargetState::Absent);
            }
            Err(e) => return Err(LinkError::io("read target", &self.target, e)),
        };

        if !target_meta.is_symlink() {
            let kind = if target_meta.is_dir() {
                TargetKind::Directory
            } else if target_meta.is_file() {
                TargetKind::File
            } else {
                TargetKind::Other
            };
            return Ok(TargetState::Occupied { kind });
        }

        let current = std::fs::read_link(&self.target)
            .map_err(|e| LinkError::io("read link", &self.target, e))?;

        // A dangling link resolves to nothing, so it cannot be ours.
        match std::fs::metadata(&self.target) {
            Ok(resolved) if same_file(&resolved, &source_meta, &self.target, &self.source) => {
                Ok(TargetState::CorrectLink)
            }
            _ => Ok(TargetState::WrongLink { current }),
        }
    }

    /// Create the symlink, creating parent directories first.
    ///
    /// The target must be absent.
    ///
    /// # Errors
    ///
    /// Returns an error if a parent directory or the link cannot be created.
    pub fn create(&self) -> Result<(), LinkError> {
        ensure_parent_dir(&self.target)?;
        create_symlink(&self.source, &self.target)
            .map_err(|e| LinkError::io("create link", &self.target, e))
    }

    /// Replace whatever occupies the target with the intended symlink.
    ///
    /// Existing files and links are unlinked; real directories are removed
    /// recursively.
    ///
    /// # Errors
    ///
    /// Returns an error if the existing entry cannot be removed or the link
    /// cannot be created.
    pub fn clobber(&self) -> Result<(), LinkError> {
        remove_existing(&self.target)?;
        self.create()
    }

    /// Remove the symlink at the target.
    ///
    /// Callers must confirm the target is a [`TargetState::CorrectLink`]
    /// first; this method does not re-check ownership.
    ///
    /// # Errors
    ///
    /// Returns an error if the link cannot be removed.
    pub fn remove(&self) -> Result<(), LinkError> {
        remove_symlink(&self.target).map_err(|e| LinkError::io("remove link", &self.target, e))
    }
}

/// Compare file identity by device and inode.
#[cfg(unix)]
fn same_file(a: &std::fs::Metadata, b: &std::fs::Metadata, _: &Path, _: &Path) -> bool {
    use std::os::unix::fs::MetadataExt;
    a.dev() == b.dev() && a.ino() == b.ino()
}

/// Compare file identity by canonical path where inode numbers are unavailable.
#[cfg(not(unix))]
fn same_file(_: &std::fs::Metadata, _: &std::fs::Metadata, a: &Path, b: &Path) -> bool {
    match (dunce::canonicalize(a), dunce::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Create a symlink at `link` pointing to `target`.
fn create_symlink(target: &Path, link: &Path) -> std::io::Result<()> {
    #[cfg(unix)]
    {
        std::os::unix::fs::symlink(target, link)
    }

    #[cfg(windows)]
    {
        if target.is_dir() {
            std::os::windows::fs::symlink_dir(target, link)
        } else {
            std::os::windows::fs::symlink_file(target, link)
        }
    }
}
