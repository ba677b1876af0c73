//! Manifest Coordinator: the per-instance `pgdev.manifest` declarations file.
//!
//! Blueprint steps append `key=value` lines to publish requirements other
//! components must honour at runtime. The tool only hands out the path while
//! building and reads the file back once, during initialization.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;

use thiserror::Error;

use crate::instance::Instance;

/// Names a library the server must load through `shared_preload_libraries`.
pub const REQUIRES_PRELOAD: &str = "requires_preload";

#[derive(Debug, Error)]
pub enum ManifestError {
  #[error("failed to read manifest {}: {source}", path.display())]
  Read { path: PathBuf, source: io::Error },

  #[error("failed to write manifest {}: {source}", path.display())]
  Write { path: PathBuf, source: io::Error },
}

/// One `key=value` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
  pub key: String,
  pub value: String,
}

/// Creates an empty manifest, truncating any existing one.
pub fn create(instance: &Instance) -> Result<(), ManifestError> {
  let path = instance.manifest_path();
  fs::write(&path, "").map_err(|source| ManifestError::Write { path, source })
}

/// Appends a declaration.
pub fn append(instance: &Instance, key: &str, value: &str) -> Result<(), ManifestError> {
  let path = instance.manifest_path();
  let wrap = |source| ManifestError::Write {
    path: path.clone(),
    source,
  };

  let mut file = OpenOptions::new().create(true).append(true).open(&path).map_err(wrap)?;
  writeln!(file, "{}={}", key, value).map_err(wrap)
}

/// All declarations in file order. An absent manifest has none.
pub fn entries(instance: &Instance) -> Result<Vec<Entry>, ManifestError> {
  let path = instance.manifest_path();
  let content = match fs::read_to_string(&path) {
    Ok(content) => content,
    Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
    Err(source) => return Err(ManifestError::Read { path, source }),
  };

  Ok(
    content
      .lines()
      .filter_map(|line| line.split_once('='))
      .map(|(key, value)| Entry {
        key: key.trim().to_string(),
        value: value.trim().to_string(),
      })
      .filter(|entry| !entry.key.is_empty())
      .collect(),
  )
}

/// Libraries declared with `requires_preload`, first occurrence wins.
pub fn collect_preload_libraries(instance: &Instance) -> Result<Vec<String>, ManifestError> {
  let mut libraries: Vec<String> = Vec::new();
  for entry in entries(instance)? {
    if entry.key == REQUIRES_PRELOAD && !entry.value.is_empty() && !libraries.contains(&entry.value) {
      libraries.push(entry.value);
    }
  }
  Ok(libraries)
}
