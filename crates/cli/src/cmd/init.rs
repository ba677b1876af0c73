//! Implementation of the `pgdev init` command.

use anyhow::{Context as _, Result};

use pgdev_lib::init::initialize;

use crate::context::Context;
use crate::output::{print_stat, print_success};

pub fn cmd_init(ctx: &Context, name: Option<&str>) -> Result<()> {
  let instance = ctx.instance(name)?;

  let rt = ctx.runtime()?;
  let report = rt
    .block_on(initialize(&ctx.registry, &instance))
    .with_context(|| format!("Failed to initialize {}", instance.name()))?;

  print_success(&format!("Initialized {}", instance.name()));
  print_stat("Port", &report.port.to_string());
  print_stat("Version", &report.version);
  if !report.preload_libraries.is_empty() {
    print_stat("Preload", &report.preload_libraries.join(","));
  }

  Ok(())
}
