//! Instances and the registry that finds them.
//!
//! An instance is a directory under `<root>/instances/<name>` that owns its
//! blueprint scripts, source tree, install prefix, data directory and the
//! two metadata files written by the tool:
//!
//! ```text
//! <root>/instances/<name>/
//! ├── 01-postgres.configure.sh
//! ├── 01-postgres.build.sh
//! ├── src/
//! ├── install/
//! ├── data/
//! ├── pgdev.conf
//! ├── pgdev.manifest
//! └── postgresql.log
//! ```

mod active;
mod registry;

use std::path::{Path, PathBuf};

use crate::consts::{CONFIG_FILENAME, DATA_DIR, INSTALL_DIR, LOG_FILENAME, MANIFEST_FILENAME, SRC_DIR};

pub use active::{ActiveInstance, read_default, write_default};
pub use registry::{InstanceRegistry, RegistryError};

/// A named, self-contained environment on disk.
///
/// Holding an `Instance` only means the name resolved to a directory at the
/// time of lookup. Use [`InstanceRegistry::validate`] to obtain one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instance {
  name: String,
  dir: PathBuf,
}

impl Instance {
  pub(crate) fn new(name: impl Into<String>, dir: PathBuf) -> Self {
    Self { name: name.into(), dir }
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn dir(&self) -> &Path {
    &self.dir
  }

  pub fn src_dir(&self) -> PathBuf {
    self.dir.join(SRC_DIR)
  }

  pub fn install_dir(&self) -> PathBuf {
    self.dir.join(INSTALL_DIR)
  }

  pub fn bin_dir(&self) -> PathBuf {
    self.install_dir().join("bin")
  }

  pub fn data_dir(&self) -> PathBuf {
    self.dir.join(DATA_DIR)
  }

  pub fn config_path(&self) -> PathBuf {
    self.dir.join(CONFIG_FILENAME)
  }

  pub fn manifest_path(&self) -> PathBuf {
    self.dir.join(MANIFEST_FILENAME)
  }

  pub fn log_path(&self) -> PathBuf {
    self.dir.join(LOG_FILENAME)
  }

  /// The server configuration file created by `initdb`.
  pub fn server_conf_path(&self) -> PathBuf {
    self.data_dir().join("postgresql.conf")
  }

  /// The PID file `pg_ctl` maintains while the server runs.
  pub fn pid_path(&self) -> PathBuf {
    self.data_dir().join("postmaster.pid")
  }
}
