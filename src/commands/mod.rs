//! Subcommand implementations and their shared setup.
pub mod check;
pub mod completions;
pub mod run;
pub mod version;

use anyhow::{Context as _, Result};

use crate::cli::GlobalOpts;
use crate::config::{Config, Locations};
use crate::logging::Logger;

/// Shared state produced by the common command setup sequence.
///
/// Encapsulates root resolution and configuration loading so that each
/// command does not have to repeat the boilerplate.
#[derive(Debug)]
pub struct CommandSetup {
    /// The loaded configuration, with link paths resolved against the root,
    /// destination and home directories.
    pub config: Config,
}

impl CommandSetup {
    /// Resolve the root and destination, then load and validate the
    /// configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the root cannot be resolved, no home directory is
    /// set, or the configuration file is missing or fails to parse.
    pub fn init(global: &GlobalOpts, log: &Logger) -> Result<Self> {
        let locations = Locations::resolve(global.root.as_deref(), global.dest.as_deref())
            .context("resolving configuration root")?;
        log.debug(&format!("root: {}", locations.root.display()));
        log.debug(&format!("dest: {}", locations.dest.display()));

        log.stage("Loading configuration");
        let config = Config::discover(&locations, global.config.as_deref())?;
        log.info(&format!(
            "loaded {} task(s) from {}",
            config.tasks.len(),
            config.file.display()
        ));

        let warnings = config.validate();
        if !warnings.is_empty() {
            log.warn(&format!(
                "found {} configuration warning(s):",
                warnings.len()
            ));
            for warning in &warnings {
                log.warn(&format!(
                    "  {} [{}]: {}",
                    warning.source, warning.item, warning.message
                ));
            }
        }

        Ok(Self { config })
    }
}
