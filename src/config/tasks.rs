//! Task configuration: the on-disk schema and its resolution into [`Task`]s.
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

use super::Locations;
use crate::error::ConfigError;
use crate::resources::LinkSpec;

/// A named, ordered group of links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    /// Task name as written in the configuration.
    pub name: String,
    /// Links in declared order.
    pub links: Vec<LinkSpec>,
}

/// A single entry in a task's `links` list: either a plain source path or a
/// structured `{ source, target }` pair with an explicit target.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LinkEntry {
    /// Plain string: `".config/app/sample.conf"`; the target mirrors the
    /// source path under the destination directory.
    Simple(String),
    /// Structured: `{ source = "vimrc", target = "~/.vimrc" }`.
    WithTarget { source: String, target: String },
}

/// One `[tasks.<name>]` table.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TaskSection {
    #[serde(default)]
    links: Vec<LinkEntry>,
}

/// Root of the configuration file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(super) struct ConfigFile {
    /// Name of the task run when none is requested.
    #[serde(default)]
    default: Option<String>,
    #[serde(default)]
    tasks: BTreeMap<String, TaskSection>,
}

impl ConfigFile {
    /// Resolve every task's link entries against `locations`.
    ///
    /// Returns the explicit default task name (if any) and the tasks sorted
    /// by name.
    pub(super) fn resolve(
        self,
        file: &Path,
        locations: &Locations,
    ) -> Result<(Option<String>, Vec<Task>), ConfigError> {
        let tasks = self
            .tasks
            .into_iter()
            .map(|(name, section)| {
                let links = section
                    .links
                    .into_iter()
                    .map(|entry| resolve_entry(entry, file, &name, locations))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Task { name, links })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;
        Ok((self.default, tasks))
    }
}

fn resolve_entry(
    entry: LinkEntry,
    file: &Path,
    task: &str,
    locations: &Locations,
) -> Result<LinkSpec, ConfigError> {
    match entry {
        LinkEntry::Simple(source) => {
            if Path::new(&source).is_absolute() {
                return Err(ConfigError::InvalidSyntax {
                    file: file.display().to_string(),
                    message: format!(
                        "task '{task}': absolute source '{source}' needs an explicit target"
                    ),
                });
            }
            Ok(LinkSpec::new(
                resolve_source(&locations.root, &source),
                locations.dest.join(normalize(Path::new(&source))),
            ))
        }
        LinkEntry::WithTarget { source, target } => Ok(LinkSpec::new(
            resolve_source(&locations.root, &source),
            resolve_target(locations, &target),
        )),
    }
}

/// Resolve a source path relative to the configuration root.
fn resolve_source(root: &Path, raw: &str) -> PathBuf {
    let path = Path::new(raw);
    if path.is_absolute() {
        normalize(path)
    } else {
        root.join(normalize(path))
    }
}

/// Resolve a target path: `~` expands to the home directory, absolute paths
/// are kept, and relative paths land under the destination directory.
fn resolve_target(locations: &Locations, raw: &str) -> PathBuf {
    if raw == "~" {
        return locations.home.clone();
    }
    if let Some(rest) = raw.strip_prefix("~/") {
        return locations.home.join(normalize(Path::new(rest)));
    }
    let path = Path::new(raw);
    if path.is_absolute() {
        normalize(path)
    } else {
        locations.dest.join(normalize(path))
    }
}

/// Drop `.` components so `./x` and `x` produce the same path.
fn normalize(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}
