use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::{ActiveInstance, Instance};
use crate::platform::paths::instances_dir;

#[derive(Debug, Error)]
pub enum RegistryError {
  #[error("no instance specified and no active instance set")]
  NoInstanceSpecified,

  #[error("instance not found: {name}")]
  NotFound { name: String },

  #[error("invalid instance name {name:?}: {reason}")]
  InvalidName { name: String, reason: &'static str },

  #[error("failed to read instances directory {}: {source}", path.display())]
  ReadDir { path: PathBuf, source: io::Error },
}

/// Enumerates and resolves instances under a single instances directory.
#[derive(Debug, Clone)]
pub struct InstanceRegistry {
  root: PathBuf,
}

impl InstanceRegistry {
  pub fn new(root: impl Into<PathBuf>) -> Self {
    Self { root: root.into() }
  }

  /// Registry rooted at the default instances directory.
  pub fn default_registry() -> Self {
    Self::new(instances_dir())
  }

  pub fn root(&self) -> &Path {
    &self.root
  }

  /// Directory an instance with this name lives (or would live) in.
  pub fn instance_dir(&self, name: &str) -> PathBuf {
    self.root.join(name)
  }

  /// Picks the instance to operate on.
  ///
  /// An explicit name wins over the active instance. Neither being present
  /// is an error; existence is not checked here.
  pub fn resolve(&self, explicit: Option<&str>, active: &ActiveInstance) -> Result<String, RegistryError> {
    explicit
      .filter(|name| !name.is_empty())
      .or_else(|| active.name())
      .map(str::to_string)
      .ok_or(RegistryError::NoInstanceSpecified)
  }

  pub fn exists(&self, name: &str) -> bool {
    Self::check_name(name).is_ok() && self.instance_dir(name).is_dir()
  }

  /// The gate every operation passes before touching instance state.
  pub fn validate(&self, name: &str) -> Result<Instance, RegistryError> {
    Self::check_name(name)?;
    if !self.exists(name) {
      return Err(RegistryError::NotFound { name: name.to_string() });
    }
    Ok(Instance::new(name, self.instance_dir(name)))
  }

  /// `resolve` followed by `validate`.
  pub fn lookup(&self, explicit: Option<&str>, active: &ActiveInstance) -> Result<Instance, RegistryError> {
    let name = self.resolve(explicit, active)?;
    self.validate(&name)
  }

  /// All instances, sorted by name. A missing instances directory is empty.
  pub fn list(&self) -> Result<Vec<Instance>, RegistryError> {
    let entries = match fs::read_dir(&self.root) {
      Ok(entries) => entries,
      Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
      Err(source) => {
        return Err(RegistryError::ReadDir {
          path: self.root.clone(),
          source,
        });
      }
    };

    let mut instances: Vec<Instance> = entries
      .flatten()
      .filter(|entry| entry.path().is_dir())
      .filter_map(|entry| entry.file_name().into_string().ok())
      .filter(|name| Self::check_name(name).is_ok())
      .map(|name| {
        let dir = self.instance_dir(&name);
        Instance::new(name, dir)
      })
      .collect();
    instances.sort_by(|a, b| a.name().cmp(b.name()));
    Ok(instances)
  }

  /// Rejects names that would escape the instances directory or hide from `list`.
  pub fn check_name(name: &str) -> Result<(), RegistryError> {
    let invalid = |reason| RegistryError::InvalidName {
      name: name.to_string(),
      reason,
    };

    if name.is_empty() {
      return Err(invalid("name is empty"));
    }
    if name.starts_with('.') {
      return Err(invalid("name must not start with '.'"));
    }
    if !name
      .chars()
      .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
    {
      return Err(invalid("only ASCII letters, digits, '-', '_' and '.' are allowed"));
    }
    Ok(())
  }
}
