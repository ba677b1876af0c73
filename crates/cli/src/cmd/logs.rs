//! Implementation of the `pgdev logs` command.

use anyhow::{Context as _, Result};
use tokio::process::Command;

use pgdev_lib::logs::tail_lines;

use crate::context::Context;
use crate::output::print_info;

pub fn cmd_logs(ctx: &Context, name: Option<&str>, lines: usize, follow: bool) -> Result<()> {
  let instance = ctx.instance(name)?;
  let log_path = instance.log_path();

  if follow {
    let mut tail = Command::new("tail");
    tail.arg("-n").arg(lines.to_string()).arg("-f").arg(&log_path);
    let status = ctx.run_foreground(&mut tail)?;
    if !status.success() {
      anyhow::bail!("tail exited with {}", status);
    }
    return Ok(());
  }

  let tail = tail_lines(&log_path, lines).with_context(|| format!("Failed to read {}", log_path.display()))?;
  if tail.is_empty() {
    print_info(&format!("No log output for {} yet", instance.name()));
    return Ok(());
  }
  for line in tail {
    println!("{}", line);
  }
  Ok(())
}
