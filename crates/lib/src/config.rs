//! Config Store: the per-instance `pgdev.conf` record.
//!
//! The record holds exactly two `key=value` lines, `port` and `version`.
//! A missing file means the instance has not been initialized yet, which is
//! a different condition from the instance not existing.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

use crate::instance::Instance;

pub const PORT_KEY: &str = "port";
pub const VERSION_KEY: &str = "version";

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("instance {name} is not initialized (no {})", path.display())]
  Missing { name: String, path: PathBuf },

  #[error("key {key:?} not found in {}", path.display())]
  MissingKey { key: String, path: PathBuf },

  #[error("invalid port {value:?} in {}", path.display())]
  InvalidPort { value: String, path: PathBuf },

  #[error("failed to read {}: {source}", path.display())]
  Read { path: PathBuf, source: io::Error },

  #[error("failed to write {}: {source}", path.display())]
  Write { path: PathBuf, source: io::Error },
}

/// The parsed content of `pgdev.conf`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigRecord {
  pub port: u16,
  pub version: String,
}

impl ConfigRecord {
  /// Loads and validates both required keys.
  pub fn load(instance: &Instance) -> Result<Self, ConfigError> {
    let path = instance.config_path();
    let port = read(instance, PORT_KEY)?;
    let port = port.parse().map_err(|_| ConfigError::InvalidPort {
      value: port.clone(),
      path: path.clone(),
    })?;
    let version = read(instance, VERSION_KEY)?;
    Ok(Self { port, version })
  }
}

/// Writes the record, replacing any previous one.
///
/// The file is written to a temporary sibling and renamed into place so a
/// reader never observes a half-written record.
pub fn write(instance: &Instance, port: u16, version: &str) -> Result<(), ConfigError> {
  let path = instance.config_path();
  let wrap = |source| ConfigError::Write {
    path: path.clone(),
    source,
  };

  let mut temp = NamedTempFile::new_in(instance.dir()).map_err(wrap)?;
  write!(temp, "{}={}\n{}={}\n", PORT_KEY, port, VERSION_KEY, version.trim()).map_err(wrap)?;
  temp.persist(&path).map_err(|e| wrap(e.error))?;
  Ok(())
}

/// Reads one key from the record.
pub fn read(instance: &Instance, key: &str) -> Result<String, ConfigError> {
  let path = instance.config_path();
  let content = match fs::read_to_string(&path) {
    Ok(content) => content,
    Err(e) if e.kind() == io::ErrorKind::NotFound => {
      return Err(ConfigError::Missing {
        name: instance.name().to_string(),
        path,
      });
    }
    Err(source) => return Err(ConfigError::Read { path, source }),
  };

  lookup(&content, key).ok_or_else(|| ConfigError::MissingKey {
    key: key.to_string(),
    path,
  })
}

/// Whether the record exists at all.
pub fn is_initialized(instance: &Instance) -> bool {
  instance.config_path().is_file()
}

/// Reads the port straight from a record file, used when scanning every instance.
pub(crate) fn read_port_file(path: &Path) -> io::Result<Option<String>> {
  match fs::read_to_string(path) {
    Ok(content) => Ok(lookup(&content, PORT_KEY)),
    Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
    Err(e) => Err(e),
  }
}

/// First value for `key`. Values may contain spaces and further `=`.
fn lookup(content: &str, key: &str) -> Option<String> {
  content
    .lines()
    .filter_map(|line| line.split_once('='))
    .find(|(k, _)| k.trim() == key)
    .map(|(_, v)| v.trim().to_string())
}
