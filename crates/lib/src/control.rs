//! Process Controller: drives an instance's server through `pg_ctl`.
//!
//! The controller keeps no state; each call asks `pg_ctl` again.

use std::fs;
use std::io;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, info};

use crate::config::{self, ConfigError, ConfigRecord};
use crate::instance::Instance;
use crate::util::command::{failure_text, run_captured};

#[derive(Debug, Error)]
pub enum ControlError {
  #[error("instance {name} is not initialized; run `pgdev init {name}` first")]
  NotInitialized { name: String },

  #[error(transparent)]
  Config(#[from] ConfigError),

  #[error("control binary not found: {} (is the instance built?)", path.display())]
  MissingBinary { path: PathBuf },

  #[error("failed to run {}: {source}", path.display())]
  Spawn { path: PathBuf, source: io::Error },

  #[error("pg_ctl {action} failed with exit code {code:?}: {stderr}")]
  CommandFailed {
    action: &'static str,
    code: Option<i32>,
    stderr: String,
  },

  #[error("server is running but its PID file {} is unreadable", path.display())]
  PidFile { path: PathBuf },
}

/// Server state as reported by `pg_ctl`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ServerStatus {
  Running { pid: u32, port: u16 },
  Stopped,
  NotInitialized,
}

impl ServerStatus {
  pub fn is_running(&self) -> bool {
    matches!(self, ServerStatus::Running { .. })
  }
}

/// Result of a start/stop/restart request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlOutcome {
  Started,
  AlreadyRunning,
  Stopped,
  AlreadyStopped,
  Restarted,
}

/// Wraps the `pg_ctl` of one instance.
#[derive(Debug)]
pub struct ProcessController<'a> {
  instance: &'a Instance,
}

impl<'a> ProcessController<'a> {
  pub fn new(instance: &'a Instance) -> Self {
    Self { instance }
  }

  fn pg_ctl(&self) -> PathBuf {
    self.instance.bin_dir().join("pg_ctl")
  }

  pub async fn status(&self) -> Result<ServerStatus, ControlError> {
    if !config::is_initialized(self.instance) {
      return Ok(ServerStatus::NotInitialized);
    }
    let record = ConfigRecord::load(self.instance)?;

    let output = self.pg_ctl_output("status", &[]).await?;
    if !output.status.success() {
      debug!(instance = self.instance.name(), code = ?output.status.code(), "server not running");
      return Ok(ServerStatus::Stopped);
    }

    let pid = self.read_pid()?;
    Ok(ServerStatus::Running { pid, port: record.port })
  }

  pub async fn start(&self) -> Result<ControlOutcome, ControlError> {
    match self.status().await? {
      ServerStatus::NotInitialized => Err(self.not_initialized()),
      ServerStatus::Running { .. } => Ok(ControlOutcome::AlreadyRunning),
      ServerStatus::Stopped => {
        let log = self.instance.log_path();
        self.pg_ctl_checked("start", &["-l".into(), log.into(), "-w".into()]).await?;
        info!(instance = self.instance.name(), "server started");
        Ok(ControlOutcome::Started)
      }
    }
  }

  pub async fn stop(&self) -> Result<ControlOutcome, ControlError> {
    match self.status().await? {
      ServerStatus::NotInitialized => Err(self.not_initialized()),
      ServerStatus::Stopped => Ok(ControlOutcome::AlreadyStopped),
      ServerStatus::Running { .. } => {
        self.pg_ctl_checked("stop", &["-m".into(), "fast".into(), "-w".into()]).await?;
        info!(instance = self.instance.name(), "server stopped");
        Ok(ControlOutcome::Stopped)
      }
    }
  }

  /// Restarts regardless of the current state.
  pub async fn restart(&self) -> Result<ControlOutcome, ControlError> {
    if !config::is_initialized(self.instance) {
      return Err(self.not_initialized());
    }
    let log = self.instance.log_path();
    self
      .pg_ctl_checked(
        "restart",
        &["-l".into(), log.into(), "-m".into(), "fast".into(), "-w".into()],
      )
      .await?;
    info!(instance = self.instance.name(), "server restarted");
    Ok(ControlOutcome::Restarted)
  }

  fn not_initialized(&self) -> ControlError {
    ControlError::NotInitialized {
      name: self.instance.name().to_string(),
    }
  }

  fn read_pid(&self) -> Result<u32, ControlError> {
    let path = self.instance.pid_path();
    fs::read_to_string(&path)
      .ok()
      .and_then(|content| content.lines().next().and_then(|line| line.trim().parse().ok()))
      .ok_or(ControlError::PidFile { path })
  }

  async fn pg_ctl_output(
    &self,
    action: &'static str,
    extra: &[std::ffi::OsString],
  ) -> Result<std::process::Output, ControlError> {
    let pg_ctl = self.pg_ctl();
    let mut command = Command::new(&pg_ctl);
    command.arg(action).arg("-D").arg(self.instance.data_dir()).args(extra);

    run_captured(&mut command).await.map_err(|source| {
      if source.kind() == io::ErrorKind::NotFound {
        ControlError::MissingBinary { path: pg_ctl.clone() }
      } else {
        ControlError::Spawn {
          path: pg_ctl.clone(),
          source,
        }
      }
    })
  }

  async fn pg_ctl_checked(&self, action: &'static str, extra: &[std::ffi::OsString]) -> Result<(), ControlError> {
    let output = self.pg_ctl_output(action, extra).await?;
    if !output.status.success() {
      return Err(ControlError::CommandFailed {
        action,
        code: output.status.code(),
        stderr: failure_text(&output),
      });
    }
    Ok(())
  }
}
