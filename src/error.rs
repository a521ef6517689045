//! Domain-specific error types for the link provisioner.
//!
//! Internal modules return typed errors while command handlers at the CLI
//! boundary convert them to [`anyhow::Error`] via the standard `?` operator.
//!
//! - [`ConfigError`]: config file loading, task lookup. Returned by
//!   [`Config::load`](crate::config::Config::load) and
//!   [`coordinator::run`](crate::coordinator::run).
//! - [`LinkError`]: source checks, conflicts, filesystem mutation. The engine
//!   folds these into a per-link outcome rather than returning them.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that arise from configuration loading and task resolution.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A requested task name is not defined in the configuration.
    #[error("Unknown task '{0}'")]
    UnknownTask(String),

    /// No task names were requested and the configuration has no default task.
    #[error("No default task defined: add a task named 'default' or set `default = \"<task>\"`")]
    NoDefaultTask,

    /// No configuration file could be found.
    #[error("Configuration file not found: {0}")]
    NotFound(PathBuf),

    /// The file extension does not name a supported format.
    #[error("Unsupported configuration format: {0} (expected .toml or .json)")]
    UnsupportedFormat(PathBuf),

    /// The configuration file contains a syntax or schema error.
    #[error("Invalid configuration in {file}: {message}")]
    InvalidSyntax {
        /// File that failed to parse.
        file: String,
        /// Parser diagnostic.
        message: String,
    },

    /// An I/O error occurred while reading a configuration file.
    #[error("IO error reading config file {path}: {source}")]
    Io {
        /// Path to the file that could not be read.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Neither `--dest` nor `$HOME` provides a destination directory.
    #[error("HOME environment variable is not set")]
    HomeNotSet,
}

/// Errors that arise while inspecting, creating, or removing links.
#[derive(Error, Debug)]
pub enum LinkError {
    /// The link source does not exist.
    #[error("Source not found: {}", .0.display())]
    SourceMissing(PathBuf),

    /// The target exists and is not a symlink.
    #[error("Target {} is occupied by a {kind}", target.display())]
    TargetOccupied {
        /// Occupied target path.
        target: PathBuf,
        /// Human-readable kind of the existing entry.
        kind: String,
    },

    /// The target is a symlink pointing somewhere else.
    #[error("Target {} links to {}", target.display(), current.display())]
    TargetWrongLink {
        /// Target path.
        target: PathBuf,
        /// Where the existing link points.
        current: PathBuf,
    },

    /// The input stream closed while a conflict response was awaited.
    #[error("Input closed while waiting for a conflict response")]
    InputClosed,

    /// A filesystem operation failed.
    #[error("{action} {}: {source}", path.display())]
    Io {
        /// Short description of the attempted action.
        action: &'static str,
        /// Path the action was applied to.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

impl LinkError {
    /// Wrap an I/O error with the action and path it occurred on.
    pub fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            action,
            path: path.into(),
            source,
        }
    }
}
