//! Implementation of the `pgdev list` command.

use anyhow::Result;
use owo_colors::{OwoColorize, Stream};
use serde::Serialize;

use pgdev_lib::config::{self, ConfigRecord};
use pgdev_lib::control::{ProcessController, ServerStatus};

use crate::context::Context;
use crate::output::{print_info, print_json};

#[derive(Debug, Serialize)]
struct InstanceRow {
  name: String,
  port: Option<u16>,
  version: Option<String>,
  active: bool,
  status: RowStatus,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum RowStatus {
  Known(ServerStatus),
  Error { error: String },
}

pub fn cmd_list(ctx: &Context, json: bool) -> Result<()> {
  let instances = ctx.registry.list()?;
  let rt = ctx.runtime()?;

  let rows: Vec<InstanceRow> = instances
    .iter()
    .map(|instance| {
      let record = config::is_initialized(instance)
        .then(|| ConfigRecord::load(instance).ok())
        .flatten();
      let status = match rt.block_on(ProcessController::new(instance).status()) {
        Ok(status) => RowStatus::Known(status),
        Err(e) => RowStatus::Error { error: e.to_string() },
      };
      InstanceRow {
        name: instance.name().to_string(),
        port: record.as_ref().map(|r| r.port),
        version: record.map(|r| r.version),
        active: ctx.active.name() == Some(instance.name()),
        status,
      }
    })
    .collect();

  if json {
    return print_json(&rows);
  }

  if rows.is_empty() {
    print_info("No instances. Create one with `pgdev create <name>`.");
    return Ok(());
  }

  for row in &rows {
    let marker = if row.active { "*" } else { " " };
    let port = row.port.map(|p| p.to_string()).unwrap_or_else(|| "-".to_string());
    let version = row.version.as_deref().unwrap_or("-");
    let status = match &row.status {
      RowStatus::Known(ServerStatus::Running { pid, .. }) => format!(
        "{}",
        format!("running (pid {})", pid).if_supports_color(Stream::Stdout, |s| s.green())
      ),
      RowStatus::Known(ServerStatus::Stopped) => "stopped".to_string(),
      RowStatus::Known(ServerStatus::NotInitialized) => format!(
        "{}",
        "not initialized".if_supports_color(Stream::Stdout, |s| s.dimmed())
      ),
      RowStatus::Error { error } => format!("{}", error.if_supports_color(Stream::Stdout, |s| s.red())),
    };
    println!("{} {:<20} {:>6}  {:<12} {}", marker, row.name, port, version, status);
  }

  Ok(())
}
