//! The "currently active" instance supplied from outside the process.

use std::fs;
use std::path::Path;

use crate::consts::{DEFAULT_INSTANCE_FILENAME, env};

/// The instance commands fall back to when no name is given.
///
/// Read once at startup and never changed afterwards. The shell wrapper sets
/// `PGDEV_INSTANCE`; without it the persisted default under the root is used.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveInstance(Option<String>);

impl ActiveInstance {
  pub fn new(name: Option<String>) -> Self {
    Self(name.filter(|n| !n.is_empty()))
  }

  pub fn none() -> Self {
    Self(None)
  }

  /// Reads `PGDEV_INSTANCE`, then `<root>/default`.
  pub fn load(root: &Path) -> Self {
    if let Ok(name) = std::env::var(env::INSTANCE)
      && !name.trim().is_empty()
    {
      return Self(Some(name.trim().to_string()));
    }
    Self::new(read_default(root))
  }

  pub fn name(&self) -> Option<&str> {
    self.0.as_deref()
  }
}

/// The persisted default instance name, if any.
pub fn read_default(root: &Path) -> Option<String> {
  fs::read_to_string(root.join(DEFAULT_INSTANCE_FILENAME))
    .ok()
    .map(|s| s.trim().to_string())
    .filter(|s| !s.is_empty())
}

/// Persists the default instance name.
pub fn write_default(root: &Path, name: &str) -> std::io::Result<()> {
  fs::create_dir_all(root)?;
  fs::write(root.join(DEFAULT_INSTANCE_FILENAME), format!("{}\n", name))
}
