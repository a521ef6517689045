//! Command: print version information.
use std::io::{self, Write as _};

use anyhow::Result;

/// Version string baked in by the build script, falling back to the crate
/// version.
#[must_use]
pub fn version() -> &'static str {
    option_env!("HOMEMAKER_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
}

/// Print the homemaker version to stdout.
///
/// # Errors
///
/// Returns an error if stdout cannot be written.
pub fn run() -> Result<()> {
    writeln!(io::stdout().lock(), "homemaker {}", version())?;
    Ok(())
}
