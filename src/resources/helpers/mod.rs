//! Shared helpers for link resources.
pub mod fs;
