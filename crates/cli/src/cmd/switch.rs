//! Implementation of `pgdev switch` and `pgdev default`.
//!
//! Neither command changes the calling shell. `switch` prints an `export`
//! line for a shell wrapper to evaluate; `default` persists the fallback
//! used when `PGDEV_INSTANCE` is unset.

use anyhow::{Context as _, Result};

use pgdev_lib::consts::env;
use pgdev_lib::instance::{read_default, write_default};

use crate::context::Context;
use crate::output::{print_info, print_success};

pub fn cmd_switch(ctx: &Context, name: &str) -> Result<()> {
  let instance = ctx.registry.validate(name)?;
  println!("export {}={}", env::INSTANCE, instance.name());
  Ok(())
}

pub fn cmd_default(ctx: &Context, name: Option<&str>) -> Result<()> {
  match name {
    Some(name) => {
      let instance = ctx.registry.validate(name)?;
      write_default(&ctx.root, instance.name()).context("Failed to save default instance")?;
      print_success(&format!("Default instance is now {}", instance.name()));
    }
    None => match read_default(&ctx.root) {
      Some(name) => println!("{}", name),
      None => print_info("No default instance set"),
    },
  }
  Ok(())
}
