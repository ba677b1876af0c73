//! Implementation of the `pgdev delete` command.

use anyhow::{Result, bail};

use pgdev_lib::instance::InstanceRegistry;

use crate::context::Context;
use crate::output::print_warning;

/// Deletion is left to the operator; this only explains how.
pub fn cmd_delete(ctx: &Context, name: &str) -> Result<()> {
  InstanceRegistry::check_name(name)?;
  let dir = ctx.registry.instance_dir(name);

  print_warning("pgdev does not delete instances.");
  println!("To remove {} by hand:", name);
  println!("  pgdev stop {}", name);
  println!("  rm -rf {}", dir.display());

  bail!("delete is not implemented")
}
