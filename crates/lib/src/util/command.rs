//! Running external tools whose output is inspected rather than shown.

use std::io;
use std::process::{Output, Stdio};

use tokio::process::Command;
use tracing::debug;

/// Runs `command` to completion with stdout and stderr captured.
///
/// The exit status is returned as-is; callers decide what a failure means.
pub async fn run_captured(command: &mut Command) -> io::Result<Output> {
  debug!(command = ?command.as_std(), "spawning process");

  let output = command
    .stdin(Stdio::null())
    .stdout(Stdio::piped())
    .stderr(Stdio::piped())
    .output()
    .await?;

  let stdout = String::from_utf8_lossy(&output.stdout);
  let stderr = String::from_utf8_lossy(&output.stderr);
  if !stdout.trim().is_empty() {
    debug!(stdout = %stdout.trim(), "command stdout");
  }
  if !stderr.trim().is_empty() {
    debug!(stderr = %stderr.trim(), "command stderr");
  }
  debug!(status = ?output.status.code(), "process exited");

  Ok(output)
}

/// Trimmed stderr, falling back to stdout when stderr is empty.
pub fn failure_text(output: &Output) -> String {
  let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
  if stderr.is_empty() {
    String::from_utf8_lossy(&output.stdout).trim().to_string()
  } else {
    stderr
  }
}
