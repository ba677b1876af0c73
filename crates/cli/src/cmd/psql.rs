//! Implementation of the `pgdev psql` command.

use anyhow::{Context as _, Result, bail};
use tokio::process::Command;
use tracing::debug;

use pgdev_lib::config::ConfigRecord;

use crate::context::Context;

/// Opens the instance's own psql against its assigned port.
///
/// psql's exit code becomes pgdev's exit code so scripts can check queries.
pub fn cmd_psql(ctx: &Context, name: Option<&str>, args: &[String]) -> Result<()> {
  let instance = ctx.instance(name)?;
  let record = ConfigRecord::load(&instance)
    .with_context(|| format!("{} is not initialized; run `pgdev init`", instance.name()))?;

  let psql = instance.bin_dir().join("psql");
  if !psql.exists() {
    bail!("psql not found at {}; run `pgdev setup` first", psql.display());
  }

  let mut command = Command::new(&psql);
  command
    .arg("-p")
    .arg(record.port.to_string())
    .arg("-d")
    .arg("postgres")
    .args(args);
  debug!(program = %psql.display(), port = record.port, "launching psql");

  let status = ctx.run_foreground(&mut command)?;

  if !status.success() {
    std::process::exit(status.code().unwrap_or(1));
  }
  Ok(())
}
