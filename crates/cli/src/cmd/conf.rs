//! Implementation of the `pgdev conf` command.

use std::env;

use anyhow::{Context as _, Result, bail};
use tokio::process::Command;

use pgdev_lib::config;

use crate::context::Context;

const DEFAULT_EDITOR: &str = "vi";

pub fn cmd_conf(ctx: &Context, name: Option<&str>, path_only: bool) -> Result<()> {
  let instance = ctx.instance(name)?;
  if !config::is_initialized(&instance) {
    bail!("{} is not initialized; run `pgdev init {}`", instance.name(), instance.name());
  }

  let conf_path = instance.server_conf_path();
  if path_only {
    println!("{}", conf_path.display());
    return Ok(());
  }

  let editor = env::var("EDITOR")
    .ok()
    .filter(|e| !e.trim().is_empty())
    .unwrap_or_else(|| DEFAULT_EDITOR.to_string());

  // EDITOR may carry flags, e.g. "code --wait"
  let mut parts = editor.split_whitespace();
  let program = parts.next().unwrap_or(DEFAULT_EDITOR);
  let mut command = Command::new(program);
  command.args(parts).arg(&conf_path);
  let status = ctx
    .run_foreground(&mut command)
    .with_context(|| format!("Failed to launch editor '{}'", editor))?;

  if !status.success() {
    bail!("editor exited with {}", status);
  }
  Ok(())
}
