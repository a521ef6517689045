// Shared helpers for integration tests.
//
// Provides a temporary-directory-backed configuration root plus a separate
// home directory, and a fluent builder so each integration test can set up
// an isolated environment without repeating filesystem boilerplate.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use homemaker::config::{Config, Locations};
use homemaker::logging::Logger;

/// Configuration used by the scenario tests: the default task links
/// `.config/app/sample.conf` into the home directory, and a second task
/// references a source that does not exist.
pub const SAMPLE_CONFIG: &str = r#"
[tasks.default]
links = ["./.config/app/sample.conf"]

[tasks.link_unexisting_file]
links = ["./.config/app/not_exist.conf"]
"#;

/// Relative path of the sample source and its mirrored target.
pub const SAMPLE_CONF: &str = ".config/app/sample.conf";

/// An isolated test environment backed by a [`tempfile::TempDir`].
///
/// Layout: `<tmp>/repo` is the configuration root, `<tmp>/home` the home
/// directory, `<tmp>/cache` the log cache.
pub struct IntegrationTestContext {
    /// Temporary directory holding everything.
    pub tmp: tempfile::TempDir,
}

impl IntegrationTestContext {
    /// Create a new context with empty `repo` and `home` directories.
    pub fn new() -> Self {
        let tmp = tempfile::tempdir().expect("create temp dir");
        std::fs::create_dir_all(tmp.path().join("repo")).expect("create repo dir");
        std::fs::create_dir_all(tmp.path().join("home")).expect("create home dir");
        Self { tmp }
    }

    /// Path to the configuration root.
    pub fn repo_path(&self) -> PathBuf {
        self.tmp.path().join("repo")
    }

    /// Path to the home directory.
    pub fn home_path(&self) -> PathBuf {
        self.tmp.path().join("home")
    }

    /// Path to `rel` under the home directory.
    pub fn home_file(&self, rel: &str) -> PathBuf {
        self.home_path().join(rel)
    }

    /// Locations with both destination and home set to the test home.
    pub fn locations(&self) -> Locations {
        Locations {
            root: self.repo_path(),
            dest: self.home_path(),
            home: self.home_path(),
        }
    }

    /// Load `homemaker.toml` from the repository.
    pub fn load_config(&self) -> Config {
        Config::discover(&self.locations(), None).expect("load config")
    }

    /// A logger that records task summaries without writing a log file.
    pub fn logger(&self) -> Logger {
        Logger::with_log_file(None)
    }

    /// A [`Command`] running the built binary against this context.
    ///
    /// `HOME` and `XDG_CACHE_HOME` point into the temp directory and the
    /// root is passed explicitly.
    pub fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_homemaker"));
        cmd.arg("--root")
            .arg(self.repo_path())
            .args(args)
            .env("HOME", self.home_path())
            .env("XDG_CACHE_HOME", self.tmp.path().join("cache"))
            .env_remove("HOMEMAKER_ROOT")
            .env_remove("HOMEMAKER_NONINTERACTIVE")
            .current_dir(self.repo_path());
        cmd
    }

    /// Run the binary with stdin closed.
    pub fn run(&self, args: &[&str]) -> Output {
        self.command(args)
            .stdin(Stdio::null())
            .output()
            .expect("run homemaker")
    }

    /// Run the binary feeding `input` on stdin.
    pub fn run_with_input(&self, args: &[&str], input: &str) -> Output {
        use std::io::Write as _;

        let mut child = self
            .command(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("spawn homemaker");
        // The binary may exit without reading stdin (e.g. `--no-interactive`).
        if let Err(e) = child.stdin.take().expect("stdin").write_all(input.as_bytes()) {
            assert_eq!(e.kind(), std::io::ErrorKind::BrokenPipe, "write stdin: {e}");
        }
        child.wait_with_output().expect("wait for homemaker")
    }
}

/// Fluent builder for [`IntegrationTestContext`].
pub struct TestContextBuilder {
    ctx: IntegrationTestContext,
}

impl TestContextBuilder {
    /// Begin building a new, empty context.
    pub fn new() -> Self {
        Self {
            ctx: IntegrationTestContext::new(),
        }
    }

    /// Write `content` to `homemaker.toml` in the repository.
    pub fn with_config(self, content: &str) -> Self {
        self.with_repo_file("homemaker.toml", content)
    }

    /// Write `content` to `rel` in the repository, creating parents.
    pub fn with_repo_file(self, rel: &str, content: &str) -> Self {
        write_file(&self.ctx.repo_path().join(rel), content);
        self
    }

    /// Write `content` to `rel` in the home directory, creating parents.
    pub fn with_home_file(self, rel: &str, content: &str) -> Self {
        write_file(&self.ctx.home_path().join(rel), content);
        self
    }

    /// Sample configuration with its one existing source.
    pub fn sample(self) -> Self {
        self.with_config(SAMPLE_CONFIG)
            .with_repo_file(SAMPLE_CONF, "key = value\n")
    }

    /// Finalise the builder.
    pub fn build(self) -> IntegrationTestContext {
        self.ctx
    }
}

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create parent dir");
    }
    std::fs::write(path, content).expect("write file");
}

/// Whether `path` is a symlink resolving to the same file as `source`.
pub fn is_link_to(path: &Path, source: &Path) -> bool {
    path.is_symlink()
        && match (std::fs::canonicalize(path), std::fs::canonicalize(source)) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
}

/// Whether anything (including a dangling link) exists at `path`.
pub fn exists_at(path: &Path) -> bool {
    std::fs::symlink_metadata(path).is_ok()
}
