//! Implementation of the `pgdev create` command.

use anyhow::Result;

use crate::context::Context;

/// `new`, `setup`, `init` and `start` in sequence.
///
/// The first failing stage ends the command; earlier stages are not undone.
pub fn cmd_create(ctx: &Context, name: &str, template: &str) -> Result<()> {
  super::cmd_new(ctx, name, template)?;
  println!();
  super::cmd_setup(ctx, Some(name))?;
  println!();
  super::cmd_init(ctx, Some(name))?;
  super::cmd_start(ctx, Some(name))
}
