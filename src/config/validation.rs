//! Checks for configuration mistakes that do not prevent loading.
use std::collections::HashSet;
use std::path::{Component, Path};

use super::Config;

/// A validation finding detected in a loaded configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// The configuration file the finding comes from.
    pub source: String,
    /// The task or link that triggered the finding.
    pub item: String,
    /// Human-readable message.
    pub message: String,
}

impl ValidationWarning {
    /// Create a finding for `item` in the configuration file `source`.
    #[must_use]
    pub fn new(
        source: impl Into<String>,
        item: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            item: item.into(),
            message: message.into(),
        }
    }
}

/// Check `config` for mistakes that do not prevent loading.
///
/// Reports empty tasks, duplicate targets within a task, links whose target
/// is their own source, and sources outside the configuration root.
#[must_use]
pub fn validate(config: &Config) -> Vec<ValidationWarning> {
    let file = file_name(&config.file);
    let mut warnings = Vec::new();

    for task in &config.tasks {
        if task.links.is_empty() {
            warnings.push(ValidationWarning::new(
                &file,
                &task.name,
                "task has no links",
            ));
        }

        let mut seen = HashSet::new();
        for link in &task.links {
            let item = format!("{}: {}", task.name, link.target.display());

            if !seen.insert(&link.target) {
                warnings.push(ValidationWarning::new(
                    &file,
                    &item,
                    "target is declared more than once",
                ));
            }

            if link.target == link.source {
                warnings.push(ValidationWarning::new(
                    &file,
                    &item,
                    "target is the same path as its source",
                ));
            }

            if escapes_root(&link.source, &config.root) {
                warnings.push(ValidationWarning::new(
                    &file,
                    &item,
                    format!(
                        "source {} is outside the configuration root",
                        link.source.display()
                    ),
                ));
            }
        }
    }

    warnings
}

/// Report every link whose source does not exist.
#[must_use]
pub fn missing_sources(config: &Config) -> Vec<ValidationWarning> {
    let file = file_name(&config.file);
    config
        .tasks
        .iter()
        .flat_map(|task| {
            task.links
                .iter()
                .filter(|link| !link.source_exists())
                .map(|link| {
                    ValidationWarning::new(
                        &file,
                        format!("{}: {}", task.name, link.target.display()),
                        format!("source {} does not exist", link.source.display()),
                    )
                })
        })
        .collect()
}

fn file_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |n| n.to_string_lossy().into_owned(),
    )
}

/// Whether `source` lies outside `root`, either as an unrelated absolute
/// path or by climbing out with `..`.
fn escapes_root(source: &Path, root: &Path) -> bool {
    let Ok(relative) = source.strip_prefix(root) else {
        return true;
    };
    let mut depth = 0usize;
    for component in relative.components() {
        match component {
            Component::ParentDir => {
                if depth == 0 {
                    return true;
                }
                depth -= 1;
            }
            Component::Normal(_) => depth += 1,
            _ => {}
        }
    }
    false
}
