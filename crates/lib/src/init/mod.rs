//! Database cluster initialization for a built instance.
//!
//! Captures the server version, runs `initdb`, writes the port and the
//! manifest's preload libraries into the server configuration and persists
//! the Config Record. Port allocation and the record write happen under the
//! root lock so concurrent initializations cannot pick the same port.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::process::Command;
use tracing::{info, warn};

use crate::config::{self, ConfigError};
use crate::instance::{Instance, InstanceRegistry};
use crate::manifest::{self, ManifestError};
use crate::port::{self, PortError};
use crate::root_lock::{RootLock, RootLockError};
use crate::util::command::{failure_text, run_captured};

const VERSION_PREFIX: &str = "postgres (PostgreSQL) ";

#[derive(Debug, Error)]
pub enum InitError {
  #[error("instance {name} is not built (missing {}); run `pgdev setup {name}` first", path.display())]
  NotBuilt { name: String, path: PathBuf },

  #[error("instance {name} is already initialized ({} exists)", path.display())]
  AlreadyInitialized { name: String, path: PathBuf },

  #[error(transparent)]
  Lock(#[from] RootLockError),

  #[error(transparent)]
  Port(#[from] PortError),

  #[error(transparent)]
  Manifest(#[from] ManifestError),

  #[error(transparent)]
  Config(#[from] ConfigError),

  #[error("failed to run {}: {source}", program.display())]
  Spawn { program: PathBuf, source: io::Error },

  #[error("{} exited with code {code:?}: {stderr}", program.display())]
  CommandFailed {
    program: PathBuf,
    code: Option<i32>,
    stderr: String,
  },

  #[error("failed to update {}: {source}", path.display())]
  WriteServerConf { path: PathBuf, source: io::Error },

  #[error("failed to remove unfinished data directory {}: {source}", path.display())]
  RemoveDataDir { path: PathBuf, source: io::Error },
}

/// What initialization decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitReport {
  pub port: u16,
  pub version: String,
  pub preload_libraries: Vec<String>,
}

/// Initializes the data directory of a built instance.
pub async fn initialize(registry: &InstanceRegistry, instance: &Instance) -> Result<InitReport, InitError> {
  let initdb = instance.bin_dir().join("initdb");
  if !initdb.is_file() {
    return Err(InitError::NotBuilt {
      name: instance.name().to_string(),
      path: initdb,
    });
  }

  let data_dir = instance.data_dir();
  let pg_version = data_dir.join("PG_VERSION");
  if pg_version.exists() {
    if config::is_initialized(instance) {
      return Err(InitError::AlreadyInitialized {
        name: instance.name().to_string(),
        path: pg_version,
      });
    }
    // an earlier init stopped before the record was written
    warn!(instance = instance.name(), path = %data_dir.display(), "removing unfinished data directory");
    remove_data_dir(&data_dir)?;
  }

  let preload_libraries = manifest::collect_preload_libraries(instance)?;
  let version = server_version(instance).await?;

  let _lock = RootLock::acquire(registry.root(), instance.name())?;
  let port = port::allocate(registry)?;
  info!(instance = instance.name(), port, "allocated port");

  let created_data_dir = !data_dir.exists();
  let result = create_cluster(instance, &initdb, port, &version, &preload_libraries).await;
  if let Err(e) = result {
    if created_data_dir && data_dir.exists() {
      let _ = fs::remove_dir_all(&data_dir);
    }
    return Err(e);
  }
  info!(instance = instance.name(), port, version = %version, "instance initialized");

  Ok(InitReport {
    port,
    version,
    preload_libraries,
  })
}

/// Runs `initdb`, then writes the server settings and the Config Record.
async fn create_cluster(
  instance: &Instance,
  initdb: &Path,
  port: u16,
  version: &str,
  preload_libraries: &[String],
) -> Result<(), InitError> {
  run_checked(Command::new(initdb).arg("-D").arg(instance.data_dir()), initdb).await?;
  write_server_conf(instance, port, preload_libraries)?;
  config::write(instance, port, version)?;
  Ok(())
}

fn remove_data_dir(path: &Path) -> Result<(), InitError> {
  fs::remove_dir_all(path).map_err(|source| InitError::RemoveDataDir {
    path: path.to_path_buf(),
    source,
  })
}

/// Renders the settings appended to `postgresql.conf`.
pub fn server_settings(port: u16, preload_libraries: &[String]) -> String {
  let mut settings = format!("\n# Added by pgdev\nport = {}\n", port);
  if !preload_libraries.is_empty() {
    // postgresql.conf doubles a quote inside a quoted value
    let value = preload_libraries.join(",").replace('\'', "''");
    settings.push_str(&format!("shared_preload_libraries = '{}'\n", value));
  }
  settings
}

fn write_server_conf(instance: &Instance, port: u16, preload_libraries: &[String]) -> Result<(), InitError> {
  let path = instance.server_conf_path();
  let wrap = |source| InitError::WriteServerConf {
    path: path.clone(),
    source,
  };

  let mut file = OpenOptions::new().create(true).append(true).open(&path).map_err(wrap)?;
  file
    .write_all(server_settings(port, preload_libraries).as_bytes())
    .map_err(wrap)
}

/// The version reported by the instance's `postgres --version`.
async fn server_version(instance: &Instance) -> Result<String, InitError> {
  let postgres = instance.bin_dir().join("postgres");
  let stdout = run_checked(Command::new(&postgres).arg("--version"), &postgres).await?;
  Ok(parse_version(&stdout))
}

/// `postgres (PostgreSQL) 18.0` becomes `18.0`; anything else is kept verbatim.
pub fn parse_version(output: &str) -> String {
  let line = output.lines().next().unwrap_or_default().trim();
  line.strip_prefix(VERSION_PREFIX).unwrap_or(line).trim().to_string()
}

async fn run_checked(command: &mut Command, program: &Path) -> Result<String, InitError> {
  let output = run_captured(command).await.map_err(|source| InitError::Spawn {
    program: program.to_path_buf(),
    source,
  })?;

  if !output.status.success() {
    return Err(InitError::CommandFailed {
      program: program.to_path_buf(),
      code: output.status.code(),
      stderr: failure_text(&output),
    });
  }

  Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
