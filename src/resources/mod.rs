//! Link primitives: the [`LinkSpec`] model and target inspection.
pub mod helpers;
pub mod symlink;

pub use symlink::LinkSpec;

use std::fmt;
use std::path::PathBuf;

/// Kind of a non-link entry found at a target path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    /// A regular file.
    File,
    /// A real directory (not a symlink to one).
    Directory,
    /// Anything else (socket, fifo, device node, ...).
    Other,
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::File => "regular file",
            Self::Directory => "directory",
            Self::Other => "special file",
        };
        f.write_str(s)
    }
}

/// Filesystem state at a link target.
///
/// # Examples
///
/// ```
/// use homemaker::resources::{TargetKind, TargetState};
///
/// let occupied = TargetState::Occupied { kind: TargetKind::File };
/// assert_eq!(occupied.describe(), "a regular file");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetState {
    /// Nothing exists at the target path.
    Absent,
    /// The target is a symlink resolving to the same file as the source.
    CorrectLink,
    /// The target is a symlink resolving elsewhere (or nowhere).
    WrongLink {
        /// Where the existing link points.
        current: PathBuf,
    },
    /// The target exists and is not a symlink.
    Occupied {
        /// What kind of entry occupies the target.
        kind: TargetKind,
    },
}

impl TargetState {
    /// Short description of what currently occupies the target.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Absent => "absent".to_string(),
            Self::CorrectLink => "already linked".to_string(),
            Self::WrongLink { current } => format!("a link to {}", current.display()),
            Self::Occupied { kind } => format!("a {kind}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrong_link_names_current_target() {
        let state = TargetState::WrongLink {
            current: PathBuf::from("/elsewhere"),
        };
        assert_eq!(state.describe(), "a link to /elsewhere");
    }

    #[test]
    fn occupied_describes_kind() {
        let state = TargetState::Occupied {
            kind: TargetKind::Directory,
        };
        assert_eq!(state.describe(), "a directory");
    }
}
