//! Link engine: evaluates each link of a task against the filesystem.
//!
//! Link mode creates missing links and hands conflicts to a
//! [`ConflictPolicy`]. Unlink mode removes only links that resolve to their
//! source and leaves everything else in place.
mod outcome;

pub use outcome::{LinkOutcome, LinkRecord, LinkStats};

use crate::config::Task;
use crate::conflict::{Conflict, ConflictPolicy, Resolution};
use crate::error::LinkError;
use crate::logging::Log;
use crate::resources::{LinkSpec, TargetState};

/// Whether a run creates or removes links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Create links.
    #[default]
    Link,
    /// Remove links.
    Unlink,
}

/// Evaluates links one at a time, consulting the conflict policy as needed.
pub struct LinkEngine<'a> {
    policy: &'a mut dyn ConflictPolicy,
    log: &'a dyn Log,
    mode: Mode,
    verbose: bool,
}

impl std::fmt::Debug for LinkEngine<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinkEngine")
            .field("mode", &self.mode)
            .field("verbose", &self.verbose)
            .finish_non_exhaustive()
    }
}

impl<'a> LinkEngine<'a> {
    /// Create an engine for `mode`.
    pub fn new(
        policy: &'a mut dyn ConflictPolicy,
        log: &'a dyn Log,
        mode: Mode,
        verbose: bool,
    ) -> Self {
        Self {
            policy,
            log,
            mode,
            verbose,
        }
    }

    /// Evaluate every link of `task`, stopping at the first fatal outcome.
    ///
    /// In link mode all sources are checked before any link is created, so a
    /// missing source leaves the task untouched. Unlink mode walks the links
    /// in reverse declared order.
    pub fn run_task(&mut self, task: &Task) -> Vec<LinkRecord> {
        let mut records = Vec::new();

        if self.mode == Mode::Link
            && let Some(missing) = task.links.iter().find(|l| !l.source_exists())
        {
            let outcome = LinkOutcome::NotFound {
                source: missing.source.clone(),
            };
            self.report(missing, &outcome);
            records.push(LinkRecord {
                task: task.name.clone(),
                spec: missing.clone(),
                outcome,
            });
            return records;
        }

        let ordered: Vec<&LinkSpec> = match self.mode {
            Mode::Link => task.links.iter().collect(),
            Mode::Unlink => task.links.iter().rev().collect(),
        };

        for spec in ordered {
            let outcome = match self.mode {
                Mode::Link => self.link(spec),
                Mode::Unlink => Self::unlink(spec),
            };
            self.report(spec, &outcome);
            let fatal = outcome.is_fatal();
            records.push(LinkRecord {
                task: task.name.clone(),
                spec: spec.clone(),
                outcome,
            });
            if fatal {
                break;
            }
        }

        records
    }

    /// Bring one link into place.
    pub fn link(&mut self, spec: &LinkSpec) -> LinkOutcome {
        let state = match spec.inspect() {
            Ok(state) => state,
            Err(e) => return inspect_failure(e),
        };

        match state {
            TargetState::Absent => match spec.create() {
                Ok(()) => LinkOutcome::Created,
                Err(e) => failed(&e),
            },
            TargetState::CorrectLink => LinkOutcome::AlreadyCorrect,
            TargetState::WrongLink { .. } | TargetState::Occupied { .. } => {
                let conflict = Conflict {
                    spec,
                    state: &state,
                };
                match self.policy.resolve(&conflict) {
                    Ok(Resolution::Skip) => {
                        self.log.warn(&format!("skipping: {}", conflict.to_error()));
                        LinkOutcome::Skipped
                    }
                    Ok(Resolution::Clobber) => match spec.clobber() {
                        Ok(()) => LinkOutcome::Clobbered,
                        Err(e) => failed(&e),
                    },
                    Ok(Resolution::Abort) => {
                        self.log.error(&conflict.to_error().to_string());
                        LinkOutcome::Aborted
                    }
                    Err(e) => failed(&e),
                }
            }
        }
    }

    /// Remove one link if, and only if, it is ours.
    pub fn unlink(spec: &LinkSpec) -> LinkOutcome {
        let state = match spec.inspect() {
            Ok(state) => state,
            Err(e) => return inspect_failure(e),
        };

        match state {
            TargetState::Absent => LinkOutcome::Removed,
            TargetState::CorrectLink => match spec.remove() {
                Ok(()) => LinkOutcome::Removed,
                Err(e) => failed(&e),
            },
            TargetState::WrongLink { .. } | TargetState::Occupied { .. } => LinkOutcome::Kept {
                reason: state.describe(),
            },
        }
    }

    fn report(&self, spec: &LinkSpec, outcome: &LinkOutcome) {
        let msg = format!("{outcome}: {}", spec.description());
        if outcome.is_fatal() {
            self.log.error(&msg);
        } else if self.verbose {
            self.log.info(&msg);
        } else {
            self.log.debug(&msg);
        }
    }
}

fn inspect_failure(e: LinkError) -> LinkOutcome {
    match e {
        LinkError::SourceMissing(source) => LinkOutcome::NotFound { source },
        other => failed(&other),
    }
}

fn failed(e: &LinkError) -> LinkOutcome {
    LinkOutcome::Failed {
        reason: e.to_string(),
    }
}
