//! Per-link outcomes and their counters.
use std::fmt;
use std::path::PathBuf;

use crate::resources::LinkSpec;

/// What happened to one link during a run.
///
/// # Examples
///
/// ```
/// use homemaker::engine::LinkOutcome;
/// use std::path::PathBuf;
///
/// assert!(!LinkOutcome::Created.is_fatal());
/// assert!(!LinkOutcome::Skipped.is_fatal());
/// assert!(LinkOutcome::Aborted.is_fatal());
/// assert!(LinkOutcome::NotFound { source: PathBuf::from("/repo/x") }.is_fatal());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkOutcome {
    /// The target was absent and the link was created.
    Created,
    /// The target already resolved to the source.
    AlreadyCorrect,
    /// The target was occupied and left alone.
    Skipped,
    /// The occupied target was replaced with the link.
    Clobbered,
    /// The link was removed, or the target was already absent.
    Removed,
    /// Unlink found something other than our link and left it untouched.
    Kept {
        /// What occupies the target.
        reason: String,
    },
    /// The source does not exist.
    NotFound {
        /// The missing source path.
        source: PathBuf,
    },
    /// The operator (or policy) aborted the run at this link.
    Aborted,
    /// A filesystem operation failed.
    Failed {
        /// The underlying error.
        reason: String,
    },
}

impl LinkOutcome {
    /// Whether this outcome stops the whole run.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. } | Self::Aborted | Self::Failed { .. }
        )
    }

    /// Short label used in log lines.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::AlreadyCorrect => "already linked",
            Self::Skipped => "skipped",
            Self::Clobbered => "clobbered",
            Self::Removed => "removed",
            Self::Kept { .. } => "kept",
            Self::NotFound { .. } => "source not found",
            Self::Aborted => "aborted",
            Self::Failed { .. } => "failed",
        }
    }
}

impl fmt::Display for LinkOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Kept { reason } | Self::Failed { reason } => {
                write!(f, "{} ({reason})", self.label())
            }
            Self::NotFound { source } => write!(f, "{} ({})", self.label(), source.display()),
            _ => f.write_str(self.label()),
        }
    }
}

/// One evaluated link: which task it belongs to, the link, and its outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRecord {
    /// Name of the owning task.
    pub task: String,
    /// The evaluated link.
    pub spec: LinkSpec,
    /// What happened.
    pub outcome: LinkOutcome,
}

/// Per-outcome counters for a batch of link records.
///
/// # Examples
///
/// ```
/// use homemaker::engine::LinkStats;
///
/// let stats = LinkStats { created: 2, already_ok: 3, ..LinkStats::default() };
/// assert_eq!(stats.summary(), "2 created, 3 already ok");
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LinkStats {
    /// Links created.
    pub created: u32,
    /// Links already in place.
    pub already_ok: u32,
    /// Conflicts skipped.
    pub skipped: u32,
    /// Conflicts clobbered.
    pub clobbered: u32,
    /// Links removed (unlink).
    pub removed: u32,
    /// Foreign targets kept (unlink).
    pub kept: u32,
    /// Fatal outcomes (at most one per run).
    pub failed: u32,
}

impl LinkStats {
    /// Count the outcomes in `records`.
    #[must_use]
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a LinkRecord>) -> Self {
        let mut stats = Self::default();
        for record in records {
            stats.add(&record.outcome);
        }
        stats
    }

    /// Count a single outcome.
    pub const fn add(&mut self, outcome: &LinkOutcome) {
        match outcome {
            LinkOutcome::Created => self.created += 1,
            LinkOutcome::AlreadyCorrect => self.already_ok += 1,
            LinkOutcome::Skipped => self.skipped += 1,
            LinkOutcome::Clobbered => self.clobbered += 1,
            LinkOutcome::Removed => self.removed += 1,
            LinkOutcome::Kept { .. } => self.kept += 1,
            LinkOutcome::NotFound { .. } | LinkOutcome::Aborted | LinkOutcome::Failed { .. } => {
                self.failed += 1;
            }
        }
    }

    /// Format the non-zero counters (e.g. "1 created, 2 already ok, 1 skipped").
    #[must_use]
    pub fn summary(&self) -> String {
        let parts: Vec<String> = [
            (self.created, "created"),
            (self.already_ok, "already ok"),
            (self.clobbered, "clobbered"),
            (self.skipped, "skipped"),
            (self.removed, "removed"),
            (self.kept, "kept"),
            (self.failed, "failed"),
        ]
        .iter()
        .filter(|(count, _)| *count > 0)
        .map(|(count, label)| format!("{count} {label}"))
        .collect();

        if parts.is_empty() {
            "no links".to_string()
        } else {
            parts.join(", ")
        }
    }
}
