//! Implementation of the `pgdev setup` command.

use std::time::Instant;

use anyhow::{Context as _, Result};

use pgdev_lib::blueprint;

use crate::context::Context;
use crate::output::{format_duration, print_stat, print_step, print_success};

/// Runs the configure and build steps of every component, in order.
///
/// Stops at the first failing step. Components completed before the failure
/// keep their results.
pub fn cmd_setup(ctx: &Context, name: Option<&str>) -> Result<()> {
  let instance = ctx.instance(name)?;
  let start = Instant::now();

  let rt = ctx.runtime()?;
  let report = rt
    .block_on(blueprint::setup(&instance, |component, step| {
      print_step(component.name(), step.as_str())
    }))
    .with_context(|| format!("Setup of {} failed", instance.name()))?;

  println!();
  print_success(&format!("Built {}", instance.name()));
  print_stat("Components", &report.components.len().to_string());
  print_stat("Duration", &format_duration(start.elapsed()));

  Ok(())
}
