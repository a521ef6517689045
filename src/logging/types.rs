//! Core logging types: task entries, status, and the [`Log`] trait.

/// Task execution result for summary reporting.
#[derive(Debug, Clone)]
pub struct TaskEntry {
    /// Task name as written in the configuration.
    pub name: String,
    /// Final status of the task.
    pub status: TaskStatus,
    /// Optional detail message (e.g., abort reason or outcome counts).
    pub message: Option<String>,
}

/// Status of a task at the end of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    /// Every link was created, removed, or already correct.
    Ok,
    /// Unlink finished but kept targets it does not own.
    Skipped,
    /// The task halted the run or left a conflict unresolved.
    Failed,
    /// The run halted before this task started.
    NotRun,
}

/// Abstraction over logging backends.
///
/// The engine and coordinator log through this trait so tests can supply
/// their own sink.
pub trait Log {
    /// Log a stage header (major section).
    fn stage(&self, msg: &str);
    /// Log an informational message.
    fn info(&self, msg: &str);
    /// Log a debug message (may be suppressed on console).
    fn debug(&self, msg: &str);
    /// Log a warning message.
    fn warn(&self, msg: &str);
    /// Log an error message.
    fn error(&self, msg: &str);
    /// Record a task result for the summary.
    fn record_task(&self, name: &str, status: TaskStatus, message: Option<&str>);
}
