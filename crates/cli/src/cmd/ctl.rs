//! Implementation of `pgdev start|stop|restart|status`.

use anyhow::{Context as _, Result};

use pgdev_lib::control::{ControlOutcome, ProcessController, ServerStatus};
use pgdev_lib::instance::Instance;

use crate::context::Context;
use crate::output::{print_info, print_json, print_stat, print_success, print_warning};

pub fn cmd_start(ctx: &Context, name: Option<&str>) -> Result<()> {
  let instance = ctx.instance(name)?;
  let rt = ctx.runtime()?;
  let outcome = rt
    .block_on(ProcessController::new(&instance).start())
    .with_context(|| format!("Failed to start {}", instance.name()))?;
  report(&instance, outcome);
  Ok(())
}

pub fn cmd_stop(ctx: &Context, name: Option<&str>) -> Result<()> {
  let instance = ctx.instance(name)?;
  let rt = ctx.runtime()?;
  let outcome = rt
    .block_on(ProcessController::new(&instance).stop())
    .with_context(|| format!("Failed to stop {}", instance.name()))?;
  report(&instance, outcome);
  Ok(())
}

pub fn cmd_restart(ctx: &Context, name: Option<&str>) -> Result<()> {
  let instance = ctx.instance(name)?;
  let rt = ctx.runtime()?;
  let outcome = rt
    .block_on(ProcessController::new(&instance).restart())
    .with_context(|| format!("Failed to restart {}", instance.name()))?;
  report(&instance, outcome);
  Ok(())
}

pub fn cmd_status(ctx: &Context, name: Option<&str>, json: bool) -> Result<()> {
  let instance = ctx.instance(name)?;
  let rt = ctx.runtime()?;
  let status = rt
    .block_on(ProcessController::new(&instance).status())
    .with_context(|| format!("Failed to query {}", instance.name()))?;

  if json {
    return print_json(&serde_json::json!({ "instance": instance.name(), "status": status }));
  }

  match status {
    ServerStatus::Running { pid, port } => {
      print_success(&format!("{} is running", instance.name()));
      print_stat("PID", &pid.to_string());
      print_stat("Port", &port.to_string());
    }
    ServerStatus::Stopped => print_info(&format!("{} is stopped", instance.name())),
    ServerStatus::NotInitialized => print_warning(&format!(
      "{} is not initialized; run `pgdev init {}`",
      instance.name(),
      instance.name()
    )),
  }
  Ok(())
}

fn report(instance: &Instance, outcome: ControlOutcome) {
  let name = instance.name();
  match outcome {
    ControlOutcome::Started => print_success(&format!("Started {}", name)),
    ControlOutcome::AlreadyRunning => print_info(&format!("{} is already running", name)),
    ControlOutcome::Stopped => print_success(&format!("Stopped {}", name)),
    ControlOutcome::AlreadyStopped => print_info(&format!("{} is already stopped", name)),
    ControlOutcome::Restarted => print_success(&format!("Restarted {}", name)),
  }
}
