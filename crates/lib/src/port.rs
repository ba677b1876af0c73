//! Port Allocator.
//!
//! Picks the lowest port at or above [`BASE_PORT`] that no instance's Config
//! Record claims. Nothing is reserved; callers that persist the result should
//! hold a [`RootLock`](crate::root_lock::RootLock) from allocation until the
//! record is written.

use std::collections::BTreeSet;

use thiserror::Error;
use tracing::warn;

use crate::config;
use crate::consts::BASE_PORT;
use crate::instance::{InstanceRegistry, RegistryError};

#[derive(Debug, Error)]
pub enum PortError {
  #[error("no free port between {} and {}", BASE_PORT, u16::MAX)]
  Exhausted,

  #[error(transparent)]
  Registry(#[from] RegistryError),
}

/// Ports currently recorded by any instance.
///
/// Instances without a record are skipped. A record whose port does not
/// parse is skipped with a warning.
pub fn used_ports(registry: &InstanceRegistry) -> Result<BTreeSet<u16>, PortError> {
  let mut used = BTreeSet::new();
  for instance in registry.list()? {
    let path = instance.config_path();
    match config::read_port_file(&path) {
      Ok(Some(value)) => match value.parse::<u16>() {
        Ok(port) => {
          used.insert(port);
        }
        Err(_) => warn!(instance = instance.name(), value = %value, "ignoring unparsable port"),
      },
      Ok(None) => {}
      Err(e) => warn!(instance = instance.name(), error = %e, "ignoring unreadable config record"),
    }
  }
  Ok(used)
}

/// `min({BASE_PORT, BASE_PORT + 1, ...} \ used)`.
pub fn lowest_free_port(used: &BTreeSet<u16>) -> Option<u16> {
  (BASE_PORT..=u16::MAX).find(|port| !used.contains(port))
}

/// Allocates a port not recorded by any instance in the registry.
pub fn allocate(registry: &InstanceRegistry) -> Result<u16, PortError> {
  let used = used_ports(registry)?;
  lowest_free_port(&used).ok_or(PortError::Exhausted)
}
