//! Log file location, ANSI stripping, and timestamps.
use std::fs;
use std::path::PathBuf;

/// `chrono` format for per-line timestamps.
pub(super) const LINE_TIME: &str = "%H:%M:%S";

/// `chrono` format for the log file header.
pub(super) const HEADER_TIME: &str = "%Y-%m-%d %H:%M:%S";

/// Current UTC time rendered with `format`.
pub(super) fn utc_now(format: &str) -> String {
    chrono::Utc::now().format(format).to_string()
}

/// Remove CSI escape sequences (colors, cursor movement) from `s`.
///
/// A sequence runs from `ESC [` up to and including its final byte in the
/// `@`..=`~` range. A lone `ESC` is dropped.
pub(super) fn strip_ansi(s: &str) -> String {
    let mut parts = s.split('\x1b');
    let mut out = parts.next().unwrap_or_default().to_string();
    for part in parts {
        let rest = part.strip_prefix('[').map_or(part, |csi| {
            csi.find(|c: char| ('@'..='~').contains(&c))
                .and_then(|end| csi.get(end + 1..))
                .unwrap_or_default()
        });
        out.push_str(rest);
    }
    out
}

/// Path of the log for `command`: `$XDG_CACHE_HOME/homemaker/<command>.log`,
/// falling back to `~/.cache`.
///
/// The directory is created on demand. Returns `None` when neither variable
/// yields a base directory or the directory cannot be created.
pub(super) fn log_file_path(command: &str) -> Option<PathBuf> {
    let base = std::env::var_os("XDG_CACHE_HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| crate::config::home_dir().ok().map(|h| h.join(".cache")))?;
    let dir = base.join("homemaker");
    fs::create_dir_all(&dir).ok()?;
    Some(dir.join(format!("{command}.log")))
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn strip_ansi_removes_colors() {
        assert_eq!(strip_ansi("\x1b[31mERROR\x1b[0m hello"), "ERROR hello");
        assert_eq!(strip_ansi("plain"), "plain");
        assert_eq!(
            strip_ansi("\x1b[1;34m==>\x1b[0m \x1b[1mLinking default\x1b[0m"),
            "==> Linking default"
        );
    }

    #[test]
    fn strip_ansi_handles_other_csi_and_truncated_input() {
        assert_eq!(strip_ansi("\x1b[2;5Htext"), "text");
        assert_eq!(strip_ansi("\x1b[31m\x1b[2Jdone\x1b[0m"), "done");
        assert_eq!(strip_ansi("cut \x1b[31"), "cut ");
        assert_eq!(strip_ansi(""), "");
    }

    #[test]
    fn log_file_is_named_after_command() {
        if let Some(path) = log_file_path("check") {
            assert!(path.ends_with("homemaker/check.log"));
        }
    }

    #[test]
    fn timestamps_use_requested_format() {
        let line = utc_now(LINE_TIME);
        assert_eq!(line.len(), 8);
        assert_eq!(&line[2..3], ":");

        let header = utc_now(HEADER_TIME);
        assert_eq!(header.len(), 19);
        assert_eq!(&header[4..5], "-");
    }
}
