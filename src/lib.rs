//! Declarative symlink provisioner.
//!
//! Reads named tasks of `source -> target` links from a TOML or JSON file
//! and brings the home directory into line with them, or removes the links
//! again. Conflicting targets are resolved by a pluggable policy: prompt,
//! abort, or clobber.
//!
//! The public API is organised into layers:
//!
//! - **[`config`]**: load and validate the task configuration
//! - **[`resources`]**: target inspection and link primitives
//! - **[`conflict`]**: policies deciding what to do with occupied targets
//! - **[`engine`]**: per-task link evaluation
//! - **[`coordinator`]**: task resolution and ordered execution
//! - **[`commands`]**: top-level subcommands (`run`, `check`, ...)
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod conflict;
pub mod coordinator;
pub mod engine;
pub mod error;
pub mod logging;
pub mod resources;
