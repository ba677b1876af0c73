//! Single-step commands: configure, build and test.

use predicates::prelude::*;

use super::common::{FAKE_TEMPLATE, TestEnv};

#[test]
fn test_step_runs_component_script() {
  let env = TestEnv::new();
  env.pgdev_cmd().args(["new", "pg18", FAKE_TEMPLATE]).assert().success();
  env.pgdev_cmd().args(["setup", "pg18"]).assert().success();

  env
    .pgdev_cmd()
    .args(["test", "pg18", "01-toolchain"])
    .assert()
    .success()
    .stdout(predicate::str::contains("toolchain ok"));
}

#[test]
fn build_step_accepts_script_path() {
  let env = TestEnv::new();
  env.pgdev_cmd().args(["new", "pg18", FAKE_TEMPLATE]).assert().success();

  env
    .pgdev_cmd()
    .args(["build", "pg18", "02-extension.build.sh"])
    .assert()
    .success();

  let manifest = env.read(&env.instance_dir("pg18").join("pgdev.manifest"));
  assert_eq!(manifest.matches("requires_preload=fake_ext").count(), 1);
}

#[test]
fn missing_step_script_fails() {
  let env = TestEnv::new();
  env.pgdev_cmd().args(["new", "pg18", FAKE_TEMPLATE]).assert().success();

  env
    .pgdev_cmd()
    .args(["test", "pg18", "02-extension"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("not found"));
}

#[test]
fn failing_step_reports_exit_code() {
  let env = TestEnv::new();
  env.pgdev_cmd().args(["new", "pg18", FAKE_TEMPLATE]).assert().success();

  // test step before setup: pg_ctl is not installed yet
  env
    .pgdev_cmd()
    .args(["test", "pg18", "01-toolchain"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("01-toolchain"));
}
