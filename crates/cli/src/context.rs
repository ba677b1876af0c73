//! State shared by every command, read once at startup.

use std::path::PathBuf;
use std::process::ExitStatus;

use anyhow::{Context as _, Result};
use tokio::process::Command;

use pgdev_lib::instance::{ActiveInstance, Instance, InstanceRegistry};
use pgdev_lib::platform::paths::root_dir;
use pgdev_lib::scaffold::Templates;

pub struct Context {
  pub root: PathBuf,
  pub registry: InstanceRegistry,
  pub templates: Templates,
  pub active: ActiveInstance,
}

impl Context {
  pub fn load() -> Self {
    let root = root_dir();
    let active = ActiveInstance::load(&root);
    Self {
      registry: InstanceRegistry::default_registry(),
      templates: Templates::default_sources(),
      root,
      active,
    }
  }

  /// Resolves an optional command-line name against the active instance and validates it.
  pub fn instance(&self, name: Option<&str>) -> Result<Instance> {
    Ok(self.registry.lookup(name, &self.active)?)
  }

  /// A current-thread runtime; child processes are awaited one at a time.
  pub fn runtime(&self) -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
      .enable_all()
      .build()
      .context("Failed to create async runtime")
  }

  /// Runs an interactive child with inherited stdio and waits for it.
  ///
  /// The child is spawned inside the runtime; tokio registers its reaper
  /// with the reactor at spawn time.
  pub fn run_foreground(&self, command: &mut Command) -> Result<ExitStatus> {
    let program = command.as_std().get_program().to_string_lossy().into_owned();
    self
      .runtime()?
      .block_on(async { command.status().await })
      .with_context(|| format!("Failed to run {}", program))
  }
}
