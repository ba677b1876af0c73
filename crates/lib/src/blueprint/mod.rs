//! Blueprint Orchestrator.
//!
//! Discovers the components of an instance from its flat
//! `<prefix>-<component>.{configure,build,test}.sh` scripts and runs them.
//! `setup` walks every component in order, configure then build, and stops
//! at the first failure. Completed components are left as they are.

mod component;
mod execute;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::instance::Instance;

pub use component::{Component, Step, component_order, discover};
pub use execute::{BuildContext, run_script};

#[derive(Debug, Error)]
pub enum BlueprintError {
  #[error("component {component} has no build step (expected {})", missing.display())]
  IncompleteComponent { component: String, missing: PathBuf },

  #[error("script not found: {}", path.display())]
  ScriptNotFound { path: PathBuf },

  #[error("{} failed with exit code {code:?}", script.display())]
  StepFailed { script: PathBuf, code: Option<i32> },

  #[error("failed to run {}: {source}", script.display())]
  Spawn { script: PathBuf, source: io::Error },

  #[error("failed to read {}: {source}", path.display())]
  Io { path: PathBuf, source: io::Error },
}

/// What a completed `setup` ran.
#[derive(Debug, Clone, Default)]
pub struct SetupReport {
  pub components: Vec<String>,
}

/// Components of an instance in execution order.
pub fn components(instance: &Instance) -> Result<Vec<Component>, BlueprintError> {
  discover(instance.dir()).map_err(|source| BlueprintError::Io {
    path: instance.dir().to_path_buf(),
    source,
  })
}

/// Runs the full build pipeline of an instance.
///
/// `on_step` is called right before each script starts.
pub async fn setup<F>(instance: &Instance, mut on_step: F) -> Result<SetupReport, BlueprintError>
where
  F: FnMut(&Component, Step),
{
  let src_dir = instance.src_dir();
  fs::create_dir_all(&src_dir).map_err(|source| BlueprintError::Io { path: src_dir, source })?;

  let ctx = BuildContext::for_instance(instance);
  let mut report = SetupReport::default();

  for component in components(instance)? {
    if !component.has(Step::Build) {
      return Err(BlueprintError::IncompleteComponent {
        component: component.name().to_string(),
        missing: component.script(Step::Build),
      });
    }

    for step in [Step::Configure, Step::Build] {
      on_step(&component, step);
      run_script(&ctx, &component.script(step)).await?;
    }

    info!(component = component.name(), "component built");
    report.components.push(component.name().to_string());
  }

  Ok(report)
}

/// Maps a command-line component argument to a script path.
///
/// `01-postgres` becomes `<instance>/01-postgres.<step>.sh`. Anything ending
/// in `.sh` or containing a path separator is taken as a script path,
/// relative to the instance directory unless absolute.
pub fn resolve_script(instance: &Instance, component: &str, step: Step) -> PathBuf {
  let looks_like_path = component.ends_with(".sh") || component.contains(std::path::MAIN_SEPARATOR);
  if looks_like_path {
    let path = Path::new(component);
    if path.is_absolute() {
      path.to_path_buf()
    } else {
      instance.dir().join(path)
    }
  } else {
    Component::new(component, instance.dir()).script(step)
  }
}

/// Runs one script outside the ordered pipeline.
pub async fn run_single(instance: &Instance, script: &Path) -> Result<(), BlueprintError> {
  let src_dir = instance.src_dir();
  fs::create_dir_all(&src_dir).map_err(|source| BlueprintError::Io { path: src_dir, source })?;

  let script = dunce::canonicalize(script).map_err(|_| BlueprintError::ScriptNotFound {
    path: script.to_path_buf(),
  })?;
  run_script(&BuildContext::for_instance(instance), &script).await
}
