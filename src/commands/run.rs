//! Run command implementation.
use anyhow::Result;
use std::io;

use super::CommandSetup;
use crate::cli::{GlobalOpts, RunOpts};
use crate::conflict::{Clobber, ConflictPolicy, Interactive, NonInteractive};
use crate::coordinator::{self, RunRequest};
use crate::engine::Mode;
use crate::logging::Logger;

/// Environment variable that disables prompting when set to a non-empty value.
pub const NONINTERACTIVE_ENV: &str = "HOMEMAKER_NONINTERACTIVE";

/// Which conflict policy a run uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyKind {
    /// Prompt on stdin/stdout.
    Interactive,
    /// Abort on the first conflict.
    NonInteractive,
    /// Replace every conflicting target.
    Clobber,
}

impl PolicyKind {
    /// Pick the policy from the command-line flags and the environment.
    #[must_use]
    pub const fn select(opts: &RunOpts, env_noninteractive: bool) -> Self {
        if opts.clobber {
            Self::Clobber
        } else if opts.no_interactive || env_noninteractive {
            Self::NonInteractive
        } else {
            Self::Interactive
        }
    }

    /// Build the policy. The interactive policy reads answers from stdin.
    #[must_use]
    pub fn build(self) -> Box<dyn ConflictPolicy> {
        match self {
            Self::Interactive => Box::new(Interactive::new(io::stdin().lock(), io::stdout())),
            Self::NonInteractive => Box::new(NonInteractive),
            Self::Clobber => Box::new(Clobber),
        }
    }
}

/// Run the run command.
///
/// # Errors
///
/// Returns an error if the configuration fails to load, a requested task does
/// not exist, the run halts (missing source, abort, I/O failure), or a
/// conflict was skipped.
pub fn run(global: &GlobalOpts, opts: &RunOpts, verbose: bool, log: &Logger) -> Result<()> {
    let setup = CommandSetup::init(global, log)?;

    let request = RunRequest {
        task_names: opts.tasks.clone(),
        mode: if opts.unlink { Mode::Unlink } else { Mode::Link },
        verbose,
    };

    let env_noninteractive =
        std::env::var_os(NONINTERACTIVE_ENV).is_some_and(|v| !v.is_empty());
    let kind = PolicyKind::select(opts, env_noninteractive);
    log.debug(&format!("conflict policy: {kind:?}"));
    let mut policy = kind.build();

    let result = coordinator::run(&setup.config, &request, policy.as_mut(), log)?;

    log.print_summary();

    if let Some(record) = &result.halted_at {
        anyhow::bail!(
            "run halted in task '{}' at {}: {}",
            record.task,
            record.spec.description(),
            record.outcome
        );
    }

    let unresolved: Vec<String> = result
        .unresolved()
        .map(|r| r.spec.target.display().to_string())
        .collect();
    if !unresolved.is_empty() {
        anyhow::bail!(
            "{} task(s) left conflicts unresolved: {}",
            log.failure_count(),
            unresolved.join(", ")
        );
    }
    Ok(())
}
