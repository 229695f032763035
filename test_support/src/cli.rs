//! Helpers for invoking the built `locale-init` binary in tests.
//!
//! These utilities use `assert_cmd` to locate the current workspace's
//! `locale-init` executable and run it in a controlled working directory,
//! capturing stdout/stderr for assertions.

use anyhow::{Context, Result};
use assert_cmd::Command;
use camino::Utf8Path;

/// Captured output from a `locale-init` invocation.
#[derive(Debug)]
pub struct LocaleInitRun {
    /// Captured stdout (lossy UTF-8).
    pub stdout: String,
    /// Captured stderr (lossy UTF-8).
    pub stderr: String,
    /// Whether the command exited successfully.
    pub success: bool,
}

/// Run `locale-init` in `current_dir` with the supplied args.
///
/// # Errors
///
/// Returns an error when `locale-init` cannot be located or the process
/// cannot be spawned.
pub fn run_locale_init_in(current_dir: &Utf8Path, args: &[&str]) -> Result<LocaleInitRun> {
    let mut cmd = Command::cargo_bin("locale-init").context("locate locale-init binary")?;
    let output = cmd
        .current_dir(current_dir)
        .args(args)
        .output()
        .context("run locale-init command")?;
    Ok(LocaleInitRun {
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        success: output.status.success(),
    })
}
