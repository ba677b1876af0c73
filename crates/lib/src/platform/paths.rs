use std::env::var_os;
use std::path::PathBuf;

use crate::consts::{APP_NAME, INSTANCES_DIR, TEMPLATES_DIR, env};

/// `$HOME`, or `/` when unset.
pub fn home_dir() -> PathBuf {
  var_os("HOME").map(PathBuf::from).unwrap_or_else(|| PathBuf::from("/"))
}

/// `<base>/pgdev`, where `base` is `$<var>` if set and non-empty, else `~/<fallback>`.
fn xdg_app_dir(var: &str, fallback: &[&str]) -> PathBuf {
  let base = match var_os(var) {
    Some(value) if !value.is_empty() => PathBuf::from(value),
    _ => fallback.iter().fold(home_dir(), |dir, part| dir.join(part)),
  };
  base.join(APP_NAME)
}

/// Personal configuration, i.e. template overrides.
pub fn config_dir() -> PathBuf {
  xdg_app_dir("XDG_CONFIG_HOME", &[".config"])
}

/// Default home of the tool root.
pub fn data_dir() -> PathBuf {
  xdg_app_dir("XDG_DATA_HOME", &[".local", "share"])
}

/// The tool root. `PGDEV_ROOT` overrides the XDG data directory.
pub fn root_dir() -> PathBuf {
  match var_os(env::ROOT) {
    Some(root) if !root.is_empty() => PathBuf::from(root),
    _ => data_dir(),
  }
}

/// One subdirectory per instance lives here.
pub fn instances_dir() -> PathBuf {
  root_dir().join(INSTANCES_DIR)
}

pub fn user_templates_dir() -> PathBuf {
  config_dir().join(TEMPLATES_DIR)
}
