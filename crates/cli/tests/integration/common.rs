//! Shared test helpers for CLI integration tests.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

/// Template whose build step installs shell stand-ins for the PostgreSQL binaries.
pub const FAKE_TEMPLATE: &str = "fake";

/// Get path to a fixture file or directory.
pub fn fixture_path(name: &str) -> PathBuf {
  PathBuf::from(env!("CARGO_MANIFEST_DIR"))
    .join("tests")
    .join("fixtures")
    .join(name)
}

/// Isolated test environment.
///
/// Each test gets its own root and configuration directory, with the fake
/// template installed as a user template.
pub struct TestEnv {
  pub temp: TempDir,
}

impl TestEnv {
  pub fn new() -> Self {
    let temp = TempDir::new().unwrap();
    let env = Self { temp };
    env.install_template(FAKE_TEMPLATE);
    env
  }

  fn install_template(&self, name: &str) {
    let target = self.config_path().join("pgdev").join("templates").join(name);
    std::fs::create_dir_all(&target).unwrap();
    for entry in std::fs::read_dir(fixture_path(name)).unwrap() {
      let entry = entry.unwrap();
      std::fs::copy(entry.path(), target.join(entry.file_name())).unwrap();
    }
  }

  /// Tool root (isolated per test).
  pub fn root_path(&self) -> PathBuf {
    let p = self.temp.path().join("root");
    std::fs::create_dir_all(&p).unwrap();
    dunce::canonicalize(&p).unwrap_or(p)
  }

  /// `XDG_CONFIG_HOME` for the user template directory.
  pub fn config_path(&self) -> PathBuf {
    let p = self.temp.path().join("config");
    std::fs::create_dir_all(&p).unwrap();
    dunce::canonicalize(&p).unwrap_or(p)
  }

  pub fn instance_dir(&self, name: &str) -> PathBuf {
    self.root_path().join("instances").join(name)
  }

  pub fn read(&self, path: &Path) -> String {
    std::fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e))
  }

  /// Get a pre-configured Command for the pgdev binary.
  ///
  /// Sets environment variables for isolated testing:
  /// - `PGDEV_ROOT`: Isolated root path
  /// - `XDG_CONFIG_HOME`: Isolated template overrides
  /// - `PGDEV_INSTANCE`: Removed so the caller's shell does not leak in
  pub fn pgdev_cmd(&self) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("pgdev");
    cmd.env("PGDEV_ROOT", self.root_path());
    cmd.env("XDG_CONFIG_HOME", self.config_path());
    cmd.env_remove("PGDEV_INSTANCE");
    cmd
  }

  /// Runs `new`, `setup` and `init` for `name` with the fake template.
  pub fn initialized(&self, name: &str) {
    self.pgdev_cmd().args(["new", name, FAKE_TEMPLATE]).assert().success();
    self.pgdev_cmd().args(["setup", name]).assert().success();
    self.pgdev_cmd().args(["init", name]).assert().success();
  }
}
