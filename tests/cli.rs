#![cfg(unix)]
#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::wildcard_imports,
    clippy::indexing_slicing
)]
//! End-to-end tests for the `homemaker` binary.
//!
//! Each test runs the built executable with `HOME` and `XDG_CACHE_HOME`
//! redirected into a temporary directory.

mod common;

use common::*;

/// Without a command, help is printed and the exit status is zero.
#[test]
fn no_arguments_prints_help() {
    let ctx = IntegrationTestContext::new();
    let output = ctx.run(&[]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage:"), "stdout: {stdout}");
}

/// `version` prints the binary name and a version.
#[test]
fn version_command() {
    let ctx = IntegrationTestContext::new();
    let output = ctx.run(&["version"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).starts_with("homemaker "));
}

/// `run -v` links the default task and `run -v --unlink` removes it again.
#[test]
fn run_link_and_unlink_default_task() {
    let ctx = TestContextBuilder::new().sample().build();
    let target = ctx.home_file(SAMPLE_CONF);

    let output = ctx.run(&["run", "-v"]);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(is_link_to(&target, &ctx.repo_path().join(SAMPLE_CONF)));

    let output = ctx.run(&["run", "-v", "--unlink"]);
    assert!(output.status.success());
    assert!(!exists_at(&target));
    assert!(ctx.repo_path().join(SAMPLE_CONF).exists());
}

/// The run log is written under `XDG_CACHE_HOME`.
#[test]
fn run_writes_log_file() {
    let ctx = TestContextBuilder::new().sample().build();
    let output = ctx.run(&["run"]);
    assert!(output.status.success());

    let log = ctx.tmp.path().join("cache/homemaker/run.log");
    let contents = std::fs::read_to_string(&log).expect("read run log");
    assert!(contents.contains("==> Linking default"));
    assert!(contents.contains("created: "));
}

/// A task whose source is missing fails without creating a link.
#[test]
fn run_missing_source_fails() {
    let ctx = TestContextBuilder::new().sample().build();
    let output = ctx.run(&["run", "-v", "link_unexisting_file"]);
    assert!(!output.status.success());
    assert!(!exists_at(&ctx.home_file(".config/app/not_exist.conf")));
}

/// Unknown task names fail.
#[test]
fn run_unknown_task_fails() {
    let ctx = TestContextBuilder::new().sample().build();
    let output = ctx.run(&["run", "does_not_exist"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("does_not_exist"));
}

/// With stdin closed, an occupied target aborts and is left untouched.
#[test]
fn run_conflict_with_closed_stdin_aborts() {
    let ctx = TestContextBuilder::new()
        .sample()
        .with_home_file(SAMPLE_CONF, "")
        .build();
    let output = ctx.run(&["run", "-v"]);
    assert!(!output.status.success());
    let target = ctx.home_file(SAMPLE_CONF);
    assert!(target.is_file() && !target.is_symlink());
}

/// `--no-interactive` aborts on conflict without reading stdin.
#[test]
fn run_no_interactive_aborts() {
    let ctx = TestContextBuilder::new()
        .sample()
        .with_home_file(SAMPLE_CONF, "keep")
        .build();
    let output = ctx.run_with_input(&["run", "--no-interactive"], "y\n");
    assert!(!output.status.success());
    assert_eq!(
        std::fs::read_to_string(ctx.home_file(SAMPLE_CONF)).unwrap(),
        "keep"
    );
}

/// Interactively answering `n` then `a` leaves the file and fails.
#[test]
fn run_interactive_decline_then_abort() {
    let ctx = TestContextBuilder::new()
        .sample()
        .with_home_file(SAMPLE_CONF, "")
        .build();

    let output = ctx.run_with_input(&["run", "-v"], "n\na\n");

    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("clobber?"), "stdout: {stdout}");
    let target = ctx.home_file(SAMPLE_CONF);
    assert!(target.is_file() && !target.is_symlink());
    assert!(String::from_utf8_lossy(&output.stderr).contains("unresolved"));
}

/// With two conflicts, `n` skips the first and `a` aborts at the second.
#[test]
fn run_interactive_skip_then_abort_second_conflict() {
    let ctx = TestContextBuilder::new()
        .with_config(
            r#"
[tasks.default]
links = ["./.config/app/sample.conf", "./.config/app/other.conf"]
"#,
        )
        .with_repo_file(SAMPLE_CONF, "a")
        .with_repo_file(".config/app/other.conf", "b")
        .with_home_file(SAMPLE_CONF, "")
        .with_home_file(".config/app/other.conf", "")
        .build();

    let output = ctx.run_with_input(&["run", "-v"], "n\na\n");

    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.matches("clobber?").count(), 2, "stdout: {stdout}");
    assert!(String::from_utf8_lossy(&output.stderr).contains("run halted"));
}

/// Interactively answering `y` clobbers the target.
#[test]
fn run_interactive_clobber() {
    let ctx = TestContextBuilder::new()
        .sample()
        .with_home_file(SAMPLE_CONF, "old")
        .build();

    let output = ctx.run_with_input(&["run"], "y\n");

    assert!(output.status.success());
    assert!(is_link_to(
        &ctx.home_file(SAMPLE_CONF),
        &ctx.repo_path().join(SAMPLE_CONF)
    ));
}

/// `check` succeeds when every source exists.
#[test]
fn check_passes_for_valid_config() {
    let ctx = TestContextBuilder::new()
        .with_config("[tasks.default]\nlinks = [\"a\"]\n")
        .with_repo_file("a", "x")
        .build();
    let output = ctx.run(&["check"]);
    assert!(output.status.success());
}

/// `check` fails when a source is missing.
#[test]
fn check_reports_missing_source() {
    let ctx = TestContextBuilder::new().sample().build();
    let output = ctx.run(&["check"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("not_exist.conf"));
}

/// A missing configuration file is an error.
#[test]
fn missing_config_fails() {
    let ctx = IntegrationTestContext::new();
    let output = ctx.run(&["run"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("homemaker.toml"));
}

/// Completions are generated for the requested shell.
#[test]
fn completions_for_bash() {
    let ctx = IntegrationTestContext::new();
    let output = ctx.run(&["completions", "bash"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("homemaker"));
}
