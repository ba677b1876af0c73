//! Instance lifecycle integration tests: new, setup, init and server control.

use predicates::prelude::*;

use super::common::{FAKE_TEMPLATE, TestEnv};

#[test]
fn new_copies_template_and_creates_manifest() {
  let env = TestEnv::new();

  env
    .pgdev_cmd()
    .args(["new", "pg18", FAKE_TEMPLATE])
    .assert()
    .success()
    .stdout(predicate::str::contains("Created instance"))
    .stdout(predicate::str::contains("01-toolchain"));

  let dir = env.instance_dir("pg18");
  assert!(dir.join("01-toolchain.configure.sh").is_file());
  assert!(dir.join("02-extension.build.sh").is_file());
  assert_eq!(env.read(&dir.join("pgdev.manifest")), "");
}

#[test]
fn piped_output_has_no_color_codes() {
  let env = TestEnv::new();

  env
    .pgdev_cmd()
    .args(["new", "pg18", FAKE_TEMPLATE])
    .env_remove("FORCE_COLOR")
    .env_remove("CLICOLOR_FORCE")
    .assert()
    .success()
    .stdout(predicate::str::contains("Next steps"))
    .stdout(predicate::str::contains("\u{1b}[").not());
}

#[test]
fn new_refuses_existing_instance() {
  let env = TestEnv::new();
  env.pgdev_cmd().args(["new", "pg18", FAKE_TEMPLATE]).assert().success();

  env
    .pgdev_cmd()
    .args(["new", "pg18", FAKE_TEMPLATE])
    .assert()
    .failure()
    .stderr(predicate::str::contains("already exists"));
}

#[test]
fn setup_runs_steps_in_order_and_records_manifest() {
  let env = TestEnv::new();
  env.pgdev_cmd().args(["new", "pg18", FAKE_TEMPLATE]).assert().success();

  env
    .pgdev_cmd()
    .args(["setup", "pg18"])
    .assert()
    .success()
    .stdout(predicate::str::contains("01-toolchain"))
    .stdout(predicate::str::contains("02-extension"));

  let dir = env.instance_dir("pg18");
  assert_eq!(env.read(&dir.join("src/toolchain/configured")).trim(), "configured pg18");
  assert!(dir.join("install/bin/pg_ctl").is_file());
  assert!(env.read(&dir.join("pgdev.manifest")).contains("requires_preload=fake_ext"));
}

#[test]
fn init_before_setup_fails() {
  let env = TestEnv::new();
  env.pgdev_cmd().args(["new", "pg18", FAKE_TEMPLATE]).assert().success();

  env
    .pgdev_cmd()
    .args(["init", "pg18"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("pgdev setup"));
}

#[test]
fn init_assigns_base_port_and_preloads_libraries() {
  let env = TestEnv::new();
  env.pgdev_cmd().args(["new", "pg18", FAKE_TEMPLATE]).assert().success();
  env.pgdev_cmd().args(["setup", "pg18"]).assert().success();

  env
    .pgdev_cmd()
    .args(["init", "pg18"])
    .assert()
    .success()
    .stdout(predicate::str::contains("5432"))
    .stdout(predicate::str::contains("18.0"));

  let dir = env.instance_dir("pg18");
  assert_eq!(env.read(&dir.join("pgdev.conf")), "port=5432\nversion=18.0\n");

  let server_conf = env.read(&dir.join("data/postgresql.conf"));
  assert!(server_conf.contains("port = 5432"));
  assert!(server_conf.contains("shared_preload_libraries = 'fake_ext'"));
}

#[test]
fn second_instance_gets_next_port() {
  let env = TestEnv::new();
  env.initialized("a");
  env.initialized("b");

  assert!(env.read(&env.instance_dir("b").join("pgdev.conf")).contains("port=5433"));
}

#[test]
fn init_twice_fails() {
  let env = TestEnv::new();
  env.initialized("pg18");

  env
    .pgdev_cmd()
    .args(["init", "pg18"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("already initialized"));
}

#[test]
fn status_before_init_reports_not_initialized() {
  let env = TestEnv::new();
  env.pgdev_cmd().args(["new", "pg18", FAKE_TEMPLATE]).assert().success();

  env
    .pgdev_cmd()
    .args(["status", "pg18"])
    .assert()
    .success()
    .stderr(predicate::str::contains("not initialized"));

  env
    .pgdev_cmd()
    .args(["start", "pg18"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("not initialized"));
}

#[test]
fn start_status_stop_cycle() {
  let env = TestEnv::new();
  env.initialized("pg18");

  env
    .pgdev_cmd()
    .args(["status", "pg18"])
    .assert()
    .success()
    .stdout(predicate::str::contains("stopped"));

  env
    .pgdev_cmd()
    .args(["start", "pg18"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Started pg18"));

  env
    .pgdev_cmd()
    .args(["status", "pg18"])
    .assert()
    .success()
    .stdout(predicate::str::contains("running"))
    .stdout(predicate::str::contains("4242"));

  env
    .pgdev_cmd()
    .args(["start", "pg18"])
    .assert()
    .success()
    .stdout(predicate::str::contains("already running"));

  env
    .pgdev_cmd()
    .args(["stop", "pg18"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Stopped pg18"));

  env
    .pgdev_cmd()
    .args(["stop", "pg18"])
    .assert()
    .success()
    .stdout(predicate::str::contains("already stopped"));
}

#[test]
fn restart_starts_a_stopped_server() {
  let env = TestEnv::new();
  env.initialized("pg18");

  env
    .pgdev_cmd()
    .args(["restart", "pg18"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Restarted pg18"));

  env
    .pgdev_cmd()
    .args(["status", "pg18", "--json"])
    .assert()
    .success()
    .stdout(predicate::str::contains("\"state\": \"running\""))
    .stdout(predicate::str::contains("\"pid\": 4243"));
}

#[test]
fn create_runs_every_stage() {
  let env = TestEnv::new();

  env
    .pgdev_cmd()
    .args(["create", "pg18", FAKE_TEMPLATE])
    .assert()
    .success()
    .stdout(predicate::str::contains("Started pg18"));

  env
    .pgdev_cmd()
    .args(["status", "pg18"])
    .assert()
    .success()
    .stdout(predicate::str::contains("running"));
}

#[test]
fn logs_show_server_output() {
  let env = TestEnv::new();
  env.initialized("pg18");

  env
    .pgdev_cmd()
    .args(["logs", "pg18"])
    .assert()
    .success()
    .stdout(predicate::str::contains("No log output"));

  env.pgdev_cmd().args(["start", "pg18"]).assert().success();

  env
    .pgdev_cmd()
    .args(["logs", "pg18", "-n", "1"])
    .assert()
    .success()
    .stdout(predicate::str::contains("database system is ready"));
}

#[test]
fn psql_connects_on_assigned_port() {
  let env = TestEnv::new();
  env.initialized("pg18");

  env
    .pgdev_cmd()
    .args(["psql", "pg18", "--", "-c", "select 1"])
    .assert()
    .success()
    .stdout(predicate::str::contains("psql -p 5432 -d postgres -c select 1"));
}

#[test]
fn conf_path_points_at_server_configuration() {
  let env = TestEnv::new();
  env.initialized("pg18");

  env
    .pgdev_cmd()
    .args(["conf", "pg18", "--path"])
    .assert()
    .success()
    .stdout(predicate::str::contains("data/postgresql.conf"));
}

#[test]
fn conf_reports_failing_editor() {
  let env = TestEnv::new();
  env.initialized("pg18");

  env
    .pgdev_cmd()
    .args(["conf", "pg18"])
    .env("EDITOR", "false")
    .assert()
    .failure()
    .stderr(predicate::str::contains("editor exited"));
}

#[test]
fn conf_runs_editor() {
  let env = TestEnv::new();
  env.initialized("pg18");

  env
    .pgdev_cmd()
    .args(["conf", "pg18"])
    .env("EDITOR", "true")
    .assert()
    .success();
}
