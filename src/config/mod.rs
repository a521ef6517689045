//! Configuration: where links come from and where they go.
//!
//! [`Locations`] fixes the root, destination and home directories.
//! [`Config`] is the loaded task list with every link path resolved against
//! them; `loader` finds and parses the file and `tasks` maps its schema.
pub mod loader;
pub mod tasks;
pub mod validation;

pub use tasks::Task;

use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Name of the task selected when the configuration does not name one.
pub const DEFAULT_TASK_NAME: &str = "default";

/// Directories used to resolve link paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locations {
    /// Configuration root; relative sources are resolved against it.
    pub root: PathBuf,
    /// Destination directory; relative targets are resolved against it.
    pub dest: PathBuf,
    /// Home directory used for `~` expansion.
    pub home: PathBuf,
}

impl Locations {
    /// Resolve locations from CLI overrides and the environment.
    ///
    /// The root is `root`, else `$HOMEMAKER_ROOT`, else the current
    /// directory, canonicalized. The destination is `dest`, else `$HOME`.
    ///
    /// # Errors
    ///
    /// Returns an error if the root cannot be canonicalized or no home
    /// directory is set.
    pub fn resolve(root: Option<&Path>, dest: Option<&Path>) -> Result<Self, ConfigError> {
        let root = match root {
            Some(root) => root.to_path_buf(),
            None => match std::env::var_os("HOMEMAKER_ROOT") {
                Some(root) => PathBuf::from(root),
                None => std::env::current_dir().map_err(|source| ConfigError::Io {
                    path: ".".to_string(),
                    source,
                })?,
            },
        };
        let root = dunce::canonicalize(&root).map_err(|source| ConfigError::Io {
            path: root.display().to_string(),
            source,
        })?;

        let home = home_dir()?;
        let dest = dest.map_or_else(|| home.clone(), Path::to_path_buf);

        Ok(Self { root, dest, home })
    }
}

/// Return the user's home directory from the environment.
///
/// # Errors
///
/// Returns [`ConfigError::HomeNotSet`] when neither `HOME` nor (on Windows)
/// `USERPROFILE` is set.
pub fn home_dir() -> Result<PathBuf, ConfigError> {
    let home = if cfg!(target_os = "windows") {
        std::env::var_os("USERPROFILE").or_else(|| std::env::var_os("HOME"))
    } else {
        std::env::var_os("HOME")
    };
    home.filter(|h| !h.is_empty())
        .map(PathBuf::from)
        .ok_or(ConfigError::HomeNotSet)
}

/// Loaded configuration: every task with fully resolved link paths.
#[derive(Debug, Clone)]
pub struct Config {
    /// Configuration root directory.
    pub root: PathBuf,
    /// File the configuration was read from.
    pub file: PathBuf,
    /// Explicit default task name, if the file sets one.
    pub default_task: Option<String>,
    /// All tasks, sorted by name.
    pub tasks: Vec<Task>,
}

impl Config {
    /// Load the configuration file at `file`, resolving paths against
    /// `locations`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if the
    /// `default` key names a task that does not exist.
    pub fn load(file: &Path, locations: &Locations) -> Result<Self, ConfigError> {
        let raw: tasks::ConfigFile = loader::load_config(file)?;
        let (default_task, tasks) = raw.resolve(file, locations)?;

        if let Some(name) = &default_task
            && !tasks.iter().any(|t| &t.name == name)
        {
            return Err(ConfigError::UnknownTask(name.clone()));
        }

        Ok(Self {
            root: locations.root.clone(),
            file: file.to_path_buf(),
            default_task,
            tasks,
        })
    }

    /// Locate and load the configuration for `locations`.
    ///
    /// # Errors
    ///
    /// Returns an error if no configuration file is found or it fails to
    /// load (see [`Config::load`]).
    pub fn discover(locations: &Locations, explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let file = loader::find_config(&locations.root, explicit)?;
        Self::load(&file, locations)
    }

    /// Look up a task by name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownTask`] if no task has that name.
    pub fn task(&self, name: &str) -> Result<&Task, ConfigError> {
        self.tasks
            .iter()
            .find(|t| t.name == name)
            .ok_or_else(|| ConfigError::UnknownTask(name.to_string()))
    }

    /// The task selected when no name is requested: the `default` key if
    /// set, otherwise the task named [`DEFAULT_TASK_NAME`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoDefaultTask`] if neither exists.
    pub fn default_task(&self) -> Result<&Task, ConfigError> {
        let name = self.default_task.as_deref().unwrap_or(DEFAULT_TASK_NAME);
        self.tasks
            .iter()
            .find(|t| t.name == name)
            .ok_or(ConfigError::NoDefaultTask)
    }

    /// Check the configuration for common mistakes.
    #[must_use]
    pub fn validate(&self) -> Vec<validation::ValidationWarning> {
        validation::validate(self)
    }
}
