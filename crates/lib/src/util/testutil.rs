//! Test utilities for pgdev-lib.
//!
//! Stand-ins for the PostgreSQL binaries the tool drives, so instance
//! lifecycles can be exercised without a real build.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::instance::{Instance, InstanceRegistry};

/// `initdb -D <dir>`: creates a data directory with a stub configuration.
pub const FAKE_INITDB: &str = r##"#!/bin/sh
while [ $# -gt 0 ]; do
  case "$1" in
    -D) data="$2"; shift 2 ;;
    *) shift ;;
  esac
done
mkdir -p "$data"
echo 18 > "$data/PG_VERSION"
echo "# fake postgresql.conf" > "$data/postgresql.conf"
"##;

/// `postgres --version`.
pub const FAKE_POSTGRES: &str = r##"#!/bin/sh
echo "postgres (PostgreSQL) 18.0"
"##;

/// `pg_ctl <action> -D <dir> [-l <log>] ...`, tracking liveness through the PID file.
///
/// A `fail_start` file in the data directory makes `start` fail.
pub const FAKE_PG_CTL: &str = r##"#!/bin/sh
action="$1"; shift
data=""; log="/dev/null"
while [ $# -gt 0 ]; do
  case "$1" in
    -D) data="$2"; shift 2 ;;
    -l) log="$2"; shift 2 ;;
    -m) shift 2 ;;
    *) shift ;;
  esac
done
pidfile="$data/postmaster.pid"
case "$action" in
  status)
    if [ -f "$pidfile" ]; then echo "pg_ctl: server is running (PID: $(head -n 1 "$pidfile"))"; exit 0; fi
    echo "pg_ctl: no server running"; exit 3 ;;
  start)
    if [ -f "$data/fail_start" ]; then echo "pg_ctl: could not start server" >&2; exit 1; fi
    echo 4242 > "$pidfile"; echo "database system is ready" >> "$log"; exit 0 ;;
  stop)
    rm -f "$pidfile"; exit 0 ;;
  restart)
    echo 4243 > "$pidfile"; echo "database system restarted" >> "$log"; exit 0 ;;
esac
exit 1
"##;

/// `psql ...`: echoes its arguments.
pub const FAKE_PSQL: &str = r##"#!/bin/sh
echo "psql $*"
"##;

/// A registry in a temporary directory.
pub fn temp_registry() -> (TempDir, InstanceRegistry) {
  let temp = TempDir::new().unwrap();
  let registry = InstanceRegistry::new(temp.path().join("instances"));
  (temp, registry)
}

/// Creates an empty instance directory and returns the validated instance.
pub fn bare_instance(registry: &InstanceRegistry, name: &str) -> Instance {
  fs::create_dir_all(registry.instance_dir(name)).unwrap();
  registry.validate(name).unwrap()
}

/// Installs the fake toolchain into the instance's `install/bin`.
pub fn install_fake_toolchain(instance: &Instance) {
  let bin = instance.bin_dir();
  fs::create_dir_all(&bin).unwrap();
  for (name, content) in [
    ("initdb", FAKE_INITDB),
    ("postgres", FAKE_POSTGRES),
    ("pg_ctl", FAKE_PG_CTL),
    ("psql", FAKE_PSQL),
  ] {
    write_executable(&bin.join(name), content);
  }
}

pub fn write_executable(path: &Path, content: &str) -> PathBuf {
  use std::os::unix::fs::PermissionsExt;

  fs::write(path, content).unwrap();
  fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
  path.to_path_buf()
}
