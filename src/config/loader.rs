//! Configuration file discovery and format-aware deserialization.
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "homemaker.toml";

/// File names probed in the config root, in order.
pub const CONFIG_FILE_NAMES: &[&str] = &[DEFAULT_CONFIG_FILE, "homemaker.json"];

/// Locate the configuration file: an explicit path wins, otherwise the first
/// of [`CONFIG_FILE_NAMES`] present in `root`.
///
/// # Errors
///
/// Returns [`ConfigError::NotFound`] if no candidate exists.
pub fn find_config(root: &Path, explicit: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = explicit {
        let path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            root.join(path)
        };
        return if path.is_file() {
            Ok(path)
        } else {
            Err(ConfigError::NotFound(path))
        };
    }

    CONFIG_FILE_NAMES
        .iter()
        .map(|name| root.join(name))
        .find(|p| p.is_file())
        .ok_or_else(|| ConfigError::NotFound(root.join(DEFAULT_CONFIG_FILE)))
}

/// Read and deserialize a configuration file, choosing the parser from the
/// file extension (`.toml` or `.json`).
///
/// # Errors
///
/// Returns an error if the file cannot be read, has an unsupported extension,
/// or does not match the expected schema.
pub fn load_config<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let invalid = |message: String| ConfigError::InvalidSyntax {
        file: path.display().to_string(),
        message,
    };

    match path.extension().and_then(|e| e.to_str()) {
        Some("toml") => toml::from_str(&content).map_err(|e| invalid(e.message().to_string())),
        Some("json") => serde_json::from_str(&content).map_err(|e| invalid(e.to_string())),
        _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
    }
}
