//! Run coordinator: resolves the requested tasks and drives the engine
//! through them in order.
use crate::config::{Config, Task};
use crate::conflict::ConflictPolicy;
use crate::engine::{LinkEngine, LinkOutcome, LinkRecord, LinkStats, Mode};
use crate::error::ConfigError;
use crate::logging::{Log, TaskStatus};

/// Everything one invocation asks for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunRequest {
    /// Tasks to run in order; empty selects the default task.
    pub task_names: Vec<String>,
    /// Link or unlink.
    pub mode: Mode,
    /// Log each link's outcome at info level instead of debug.
    pub verbose: bool,
}

/// Result of a whole run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunResult {
    /// Every evaluated link in processing order.
    pub records: Vec<LinkRecord>,
    /// The record at which the run stopped, if it halted.
    pub halted_at: Option<LinkRecord>,
}

impl RunResult {
    /// Whether the run completed with every link in place.
    ///
    /// A halt fails the run, and so does any conflict the operator declined.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.halted_at.is_none() && self.unresolved().next().is_none()
    }

    /// Links left unresolved because their conflict was skipped.
    #[must_use = "iterators are lazy"]
    pub fn unresolved(&self) -> impl Iterator<Item = &LinkRecord> {
        self.records
            .iter()
            .filter(|r| r.outcome == LinkOutcome::Skipped)
    }

    /// Counters over all records.
    #[must_use]
    pub fn stats(&self) -> LinkStats {
        LinkStats::from_records(&self.records)
    }
}

/// Resolve `names` to tasks, or the default task when `names` is empty.
///
/// # Errors
///
/// Returns [`ConfigError::UnknownTask`] for a name with no task, or
/// [`ConfigError::NoDefaultTask`] when `names` is empty and there is no
/// default.
pub fn resolve_tasks<'c>(config: &'c Config, names: &[String]) -> Result<Vec<&'c Task>, ConfigError> {
    if names.is_empty() {
        return Ok(vec![config.default_task()?]);
    }
    names.iter().map(|name| config.task(name)).collect()
}

/// Execute the requested tasks strictly in order.
///
/// Processing stops at the first `NotFound`, `Aborted` or `Failed` outcome;
/// tasks after the halting one are recorded as not run. A skipped conflict
/// does not stop processing, but its task is recorded as failed.
///
/// # Errors
///
/// Returns an error if a requested task does not exist. No link is touched
/// in that case.
pub fn run(
    config: &Config,
    request: &RunRequest,
    policy: &mut dyn ConflictPolicy,
    log: &dyn Log,
) -> Result<RunResult, ConfigError> {
    let tasks = resolve_tasks(config, &request.task_names)?;
    let mut engine = LinkEngine::new(policy, log, request.mode, request.verbose);
    let mut result = RunResult::default();

    for task in tasks {
        if result.halted_at.is_some() {
            log.record_task(&task.name, TaskStatus::NotRun, None);
            continue;
        }

        let verb = match request.mode {
            Mode::Link => "Linking",
            Mode::Unlink => "Unlinking",
        };
        log.stage(&format!("{verb} {}", task.name));

        let records = engine.run_task(task);
        let stats = LinkStats::from_records(&records);
        let summary = stats.summary();
        log.info(&summary);

        let halted = records.last().filter(|r| r.outcome.is_fatal()).cloned();
        let (status, message) = match &halted {
            Some(record) => (TaskStatus::Failed, record.outcome.to_string()),
            None if stats.skipped > 0 => (TaskStatus::Failed, summary),
            None if stats.kept > 0 => (TaskStatus::Skipped, summary),
            None => (TaskStatus::Ok, summary),
        };
        log.record_task(&task.name, status, Some(&message));

        result.records.extend(records);
        result.halted_at = halted;
    }

    Ok(result)
}
