//! Creating new instances from templates.
//!
//! A template is a flat set of blueprint scripts. The operator's override
//! directory (`~/.config/pgdev/templates/<name>/`) is searched first, then the
//! templates compiled into the binary. The chosen template is copied into the
//! new instance directory; later changes to the template do not affect it.

mod templates;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::instance::{Instance, InstanceRegistry, RegistryError};
use crate::manifest::{self, ManifestError};
use crate::platform::paths::user_templates_dir;

pub use templates::{BUILTIN_TEMPLATES, BuiltinTemplate};

/// Template used when `new` is not given one.
pub const DEFAULT_TEMPLATE: &str = "default";

#[derive(Debug, Error)]
pub enum ScaffoldError {
  #[error("instance already exists: {name}")]
  AlreadyExists { name: String },

  #[error("template not found: {name} (available: {})", available.join(", "))]
  TemplateNotFound { name: String, available: Vec<String> },

  #[error(transparent)]
  Registry(#[from] RegistryError),

  #[error(transparent)]
  Manifest(#[from] ManifestError),

  #[error("failed to create directory {}: {source}", path.display())]
  CreateDir { path: PathBuf, source: io::Error },

  #[error("failed to copy {}: {source}", path.display())]
  Copy { path: PathBuf, source: io::Error },

  #[error("failed to walk template {}: {source}", path.display())]
  Walk { path: PathBuf, source: walkdir::Error },
}

/// Where a resolved template comes from.
#[derive(Debug, Clone)]
pub enum Template {
  Builtin(&'static BuiltinTemplate),
  Directory { name: String, path: PathBuf },
}

impl Template {
  pub fn name(&self) -> &str {
    match self {
      Template::Builtin(t) => t.name,
      Template::Directory { name, .. } => name,
    }
  }

  /// Copies the template's files into `dest`, which must exist.
  fn materialize(&self, dest: &Path) -> Result<(), ScaffoldError> {
    match self {
      Template::Builtin(template) => {
        for (file_name, content) in template.files {
          let path = dest.join(file_name);
          fs::write(&path, content).map_err(|source| ScaffoldError::Copy {
            path: path.clone(),
            source,
          })?;
          make_executable(&path)?;
        }
      }
      Template::Directory { path: src, .. } => {
        for entry in WalkDir::new(src).min_depth(1).sort_by_file_name() {
          let entry = entry.map_err(|source| ScaffoldError::Walk {
            path: src.clone(),
            source,
          })?;
          let relative = entry.path().strip_prefix(src).unwrap_or(entry.path());
          let target = dest.join(relative);

          if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(|source| ScaffoldError::CreateDir {
              path: target.clone(),
              source,
            })?;
          } else {
            fs::copy(entry.path(), &target).map_err(|source| ScaffoldError::Copy {
              path: entry.path().to_path_buf(),
              source,
            })?;
            if target.extension().is_some_and(|ext| ext == "sh") {
              make_executable(&target)?;
            }
          }
        }
      }
    }
    Ok(())
  }
}

/// Template lookup over an override directory and the built-in set.
#[derive(Debug, Clone)]
pub struct Templates {
  user_dir: PathBuf,
}

impl Templates {
  pub fn new(user_dir: impl Into<PathBuf>) -> Self {
    Self {
      user_dir: user_dir.into(),
    }
  }

  pub fn default_sources() -> Self {
    Self::new(user_templates_dir())
  }

  pub fn resolve(&self, name: &str) -> Result<Template, ScaffoldError> {
    let dir = self.user_dir.join(name);
    if InstanceRegistry::check_name(name).is_ok() && dir.is_dir() {
      return Ok(Template::Directory {
        name: name.to_string(),
        path: dir,
      });
    }

    templates::builtin(name)
      .map(Template::Builtin)
      .ok_or_else(|| ScaffoldError::TemplateNotFound {
        name: name.to_string(),
        available: self.names(),
      })
  }

  /// Names of every resolvable template, overrides first, deduplicated.
  pub fn names(&self) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(&self.user_dir)
      .map(|entries| {
        entries
          .flatten()
          .filter(|e| e.path().is_dir())
          .filter_map(|e| e.file_name().into_string().ok())
          .collect()
      })
      .unwrap_or_default();
    names.sort();
    for template in BUILTIN_TEMPLATES {
      if !names.iter().any(|n| n == template.name) {
        names.push(template.name.to_string());
      }
    }
    names
  }
}

/// Creates instance `name` as a copy of `template`, with an empty manifest.
///
/// Fails without touching the filesystem if the instance already exists or
/// the template cannot be found.
pub fn scaffold(
  registry: &InstanceRegistry,
  templates: &Templates,
  name: &str,
  template: &str,
) -> Result<Instance, ScaffoldError> {
  InstanceRegistry::check_name(name)?;
  let dir = registry.instance_dir(name);
  if dir.exists() {
    return Err(ScaffoldError::AlreadyExists { name: name.to_string() });
  }

  let template = templates.resolve(template)?;
  debug!(template = template.name(), dir = %dir.display(), "scaffolding instance");

  fs::create_dir_all(registry.root()).map_err(|source| ScaffoldError::CreateDir {
    path: registry.root().to_path_buf(),
    source,
  })?;
  claim_dir(&dir, name)?;

  let instance = Instance::new(name, dir);
  if let Err(e) = populate(&instance, &template) {
    let _ = fs::remove_dir_all(instance.dir());
    return Err(e);
  }

  info!(instance = name, template = template.name(), "instance created");
  Ok(instance)
}

/// Creates `dir` only if nothing is there yet.
///
/// A concurrent `new` of the same name that loses here returns before it owns
/// anything, so its cleanup never touches the winner's files.
fn claim_dir(dir: &Path, name: &str) -> Result<(), ScaffoldError> {
  match fs::create_dir(dir) {
    Ok(()) => Ok(()),
    Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Err(ScaffoldError::AlreadyExists { name: name.to_string() }),
    Err(source) => Err(ScaffoldError::CreateDir {
      path: dir.to_path_buf(),
      source,
    }),
  }
}

fn populate(instance: &Instance, template: &Template) -> Result<(), ScaffoldError> {
  template.materialize(instance.dir())?;
  manifest::create(instance)?;
  Ok(())
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<(), ScaffoldError> {
  use std::os::unix::fs::PermissionsExt;

  fs::set_permissions(path, fs::Permissions::from_mode(0o755)).map_err(|source| ScaffoldError::Copy {
    path: path.to_path_buf(),
    source,
  })
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<(), ScaffoldError> {
  Ok(())
}
