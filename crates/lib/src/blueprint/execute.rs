//! Running a single blueprint script.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Instant;

use tokio::process::Command;
use tracing::{debug, info};

use super::BlueprintError;
use crate::consts::env;
use crate::instance::Instance;

/// Interpreter every blueprint script is run with.
const BLUEPRINT_SHELL: &str = "bash";

/// Paths a blueprint step is told about.
///
/// The values are bound on each child process only; the orchestrator's own
/// environment is never modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildContext {
  pub instance_name: String,
  pub instance_dir: PathBuf,
  pub install_dir: PathBuf,
  pub src_dir: PathBuf,
  pub manifest_path: PathBuf,
}

impl BuildContext {
  pub fn for_instance(instance: &Instance) -> Self {
    Self {
      instance_name: instance.name().to_string(),
      instance_dir: instance.dir().to_path_buf(),
      install_dir: instance.install_dir(),
      src_dir: instance.src_dir(),
      manifest_path: instance.manifest_path(),
    }
  }

  /// The variables as `(name, value)` pairs.
  pub fn env_vars(&self) -> [(&'static str, &Path); 4] {
    [
      (env::INSTANCE_DIR, self.instance_dir.as_path()),
      (env::INSTALL_DIR, self.install_dir.as_path()),
      (env::SRC_DIR, self.src_dir.as_path()),
      (env::MANIFEST, self.manifest_path.as_path()),
    ]
  }

  fn apply(&self, command: &mut Command) {
    for (key, value) in self.env_vars() {
      command.env(key, value);
    }
    command.env(env::INSTANCE, &self.instance_name);
  }
}

/// Runs `script` from the instance directory and waits for it.
///
/// Output goes straight to the terminal; build steps are long and their
/// progress is the interesting part. A non-zero exit is an error.
pub async fn run_script(ctx: &BuildContext, script: &Path) -> Result<(), BlueprintError> {
  if !script.is_file() {
    return Err(BlueprintError::ScriptNotFound {
      path: script.to_path_buf(),
    });
  }

  info!(script = %script.display(), "running blueprint script");
  let started = Instant::now();

  let mut command = Command::new(BLUEPRINT_SHELL);
  command
    .arg(script)
    .current_dir(&ctx.instance_dir)
    .stdin(Stdio::null())
    .stdout(Stdio::inherit())
    .stderr(Stdio::inherit());
  ctx.apply(&mut command);

  debug!(shell = BLUEPRINT_SHELL, working_dir = %ctx.instance_dir.display(), "spawning process");

  let status = command.status().await.map_err(|source| BlueprintError::Spawn {
    script: script.to_path_buf(),
    source,
  })?;

  if !status.success() {
    return Err(BlueprintError::StepFailed {
      script: script.to_path_buf(),
      code: status.code(),
    });
  }

  debug!(script = %script.display(), elapsed_ms = started.elapsed().as_millis() as u64, "script finished");
  Ok(())
}
