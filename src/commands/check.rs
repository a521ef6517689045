//! Check command implementation.
use anyhow::Result;

use super::CommandSetup;
use crate::cli::GlobalOpts;
use crate::config::validation;
use crate::logging::{Logger, TaskStatus};

/// Run the check command: load the configuration, report warnings, and fail
/// if any link source is missing.
///
/// # Errors
///
/// Returns an error if the configuration fails to load or any source does
/// not exist.
pub fn run(global: &GlobalOpts, log: &Logger) -> Result<()> {
    let setup = CommandSetup::init(global, log)?;
    let config = &setup.config;

    log.stage("Checking sources");
    let missing = validation::missing_sources(config);
    for entry in &missing {
        log.error(&format!("{} [{}]: {}", entry.source, entry.item, entry.message));
    }

    for task in &config.tasks {
        let task_missing = task.links.iter().filter(|l| !l.source_exists()).count();
        let summary = format!("{} link(s)", task.links.len());
        if task_missing > 0 {
            log.record_task(
                &task.name,
                TaskStatus::Failed,
                Some(&format!("{summary}, {task_missing} missing source(s)")),
            );
        } else {
            log.record_task(&task.name, TaskStatus::Ok, Some(&summary));
        }
    }

    log.print_summary();

    if !missing.is_empty() {
        anyhow::bail!("{} missing source(s)", missing.len());
    }
    Ok(())
}
