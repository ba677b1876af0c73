//! Names shared between the tool and the blueprint scripts it runs.

pub const APP_NAME: &str = "pgdev";

/// Lowest port handed out to an instance.
pub const BASE_PORT: u16 = 5432;

pub const INSTANCES_DIR: &str = "instances";
pub const TEMPLATES_DIR: &str = "templates";

pub const CONFIG_FILENAME: &str = "pgdev.conf";
pub const MANIFEST_FILENAME: &str = "pgdev.manifest";
pub const LOG_FILENAME: &str = "postgresql.log";
pub const DEFAULT_INSTANCE_FILENAME: &str = "default";

pub const SRC_DIR: &str = "src";
pub const INSTALL_DIR: &str = "install";
pub const DATA_DIR: &str = "data";

/// Environment variables exported to every blueprint step.
pub mod env {
  pub const INSTANCE: &str = "PGDEV_INSTANCE";
  pub const INSTANCE_DIR: &str = "PGDEV_INSTANCE_DIR";
  pub const INSTALL_DIR: &str = "PGDEV_INSTALL_DIR";
  pub const SRC_DIR: &str = "PGDEV_SRC_DIR";
  pub const MANIFEST: &str = "PGDEV_MANIFEST";
  pub const ROOT: &str = "PGDEV_ROOT";
}
