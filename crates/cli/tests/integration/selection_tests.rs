//! Active instance selection, listing and deletion guidance.

use predicates::prelude::*;

use super::common::{FAKE_TEMPLATE, TestEnv};

#[test]
fn active_instance_comes_from_environment() {
  let env = TestEnv::new();
  env.initialized("pg18");

  env
    .pgdev_cmd()
    .arg("status")
    .env("PGDEV_INSTANCE", "pg18")
    .assert()
    .success()
    .stdout(predicate::str::contains("stopped"));
}

#[test]
fn explicit_name_overrides_active_instance() {
  let env = TestEnv::new();
  env.initialized("pg18");

  env
    .pgdev_cmd()
    .args(["status", "pg18"])
    .env("PGDEV_INSTANCE", "ghost")
    .assert()
    .success();
}

#[test]
fn switch_prints_export_line() {
  let env = TestEnv::new();
  env.pgdev_cmd().args(["new", "pg18", FAKE_TEMPLATE]).assert().success();

  env
    .pgdev_cmd()
    .args(["switch", "pg18"])
    .assert()
    .success()
    .stdout(predicate::str::diff("export PGDEV_INSTANCE=pg18\n"));
}

#[test]
fn switch_to_unknown_instance_fails() {
  let env = TestEnv::new();
  env.pgdev_cmd().args(["switch", "ghost"]).assert().failure();
}

#[test]
fn default_is_persisted_and_used() {
  let env = TestEnv::new();
  env.initialized("pg18");

  env.pgdev_cmd().arg("default").assert().success().stdout(predicate::str::contains("No default"));
  env.pgdev_cmd().args(["default", "pg18"]).assert().success();
  env
    .pgdev_cmd()
    .arg("default")
    .assert()
    .success()
    .stdout(predicate::str::diff("pg18\n"));

  env
    .pgdev_cmd()
    .arg("status")
    .assert()
    .success()
    .stdout(predicate::str::contains("stopped"));
}

#[test]
fn list_shows_every_instance() {
  let env = TestEnv::new();
  env.initialized("a");
  env.pgdev_cmd().args(["new", "b", FAKE_TEMPLATE]).assert().success();

  env
    .pgdev_cmd()
    .arg("list")
    .assert()
    .success()
    .stdout(predicate::str::contains("a").and(predicate::str::contains("5432")))
    .stdout(predicate::str::contains("not initialized"));
}

#[test]
fn list_json_includes_port_and_state() {
  let env = TestEnv::new();
  env.initialized("a");

  env
    .pgdev_cmd()
    .args(["list", "--json"])
    .env("PGDEV_INSTANCE", "a")
    .assert()
    .success()
    .stdout(predicate::str::contains("\"name\": \"a\""))
    .stdout(predicate::str::contains("\"port\": 5432"))
    .stdout(predicate::str::contains("\"active\": true"))
    .stdout(predicate::str::contains("\"state\": \"stopped\""));
}

#[test]
fn delete_leaves_instance_in_place() {
  let env = TestEnv::new();
  env.pgdev_cmd().args(["new", "pg18", FAKE_TEMPLATE]).assert().success();

  env
    .pgdev_cmd()
    .args(["delete", "pg18"])
    .assert()
    .failure()
    .stdout(predicate::str::contains("pgdev stop pg18"));

  assert!(env.instance_dir("pg18").exists());
}
