//! Implementation of `pgdev configure|build|test <name> <component>`.

use std::time::Instant;

use anyhow::{Context as _, Result};

use pgdev_lib::blueprint::{self, Step};

use crate::context::Context;
use crate::output::{format_duration, print_step, print_success};

/// Runs a single blueprint step outside the `setup` pipeline.
pub fn cmd_step(ctx: &Context, name: &str, component: &str, step: Step) -> Result<()> {
  let instance = ctx.registry.validate(name)?;
  let script = blueprint::resolve_script(&instance, component, step);
  let start = Instant::now();

  print_step(component, step.as_str());
  let rt = ctx.runtime()?;
  rt.block_on(blueprint::run_single(&instance, &script))
    .with_context(|| format!("{} of {} failed", step, component))?;

  print_success(&format!(
    "{} {} finished in {}",
    component,
    step,
    format_duration(start.elapsed())
  ));
  Ok(())
}
