//! Advisory lock over port allocation.
//!
//! A port is picked by scanning every instance's `pgdev.conf`, but the choice
//! only becomes visible to other scans once `init` writes the new record. The
//! lock spans that window. A second `init` or `create` fails fast and names the
//! instance that is being initialized.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use thiserror::Error;
use tracing::debug;

const LOCK_FILENAME: &str = ".lock";

/// The process inside the allocation window, as recorded in the lock file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockHolder {
  pub pid: u32,
  pub instance: String,
  pub since_unix: u64,
}

impl LockHolder {
  fn current(instance: &str) -> Self {
    Self {
      pid: std::process::id(),
      instance: instance.to_string(),
      since_unix: SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default(),
    }
  }

  /// `key=value` lines, the same shape as `pgdev.conf`.
  fn render(&self) -> String {
    format!("pid={}\ninstance={}\nsince={}\n", self.pid, self.instance, self.since_unix)
  }

  fn parse(content: &str) -> Option<Self> {
    let mut pid = None;
    let mut instance = None;
    let mut since_unix = None;
    for (key, value) in content.lines().filter_map(|line| line.split_once('=')) {
      match key.trim() {
        "pid" => pid = value.trim().parse().ok(),
        "instance" => instance = Some(value.trim().to_string()),
        "since" => since_unix = value.trim().parse().ok(),
        _ => {}
      }
    }
    Some(Self {
      pid: pid?,
      instance: instance?,
      since_unix: since_unix.unwrap_or_default(),
    })
  }
}

#[derive(Debug, Error)]
pub enum RootLockError {
  #[error(
    "a port is being allocated for instance {} by pgdev PID {}; retry once it finishes\n\
     If that process is gone, remove {}",
    holder.instance,
    holder.pid,
    path.display()
  )]
  Busy { holder: LockHolder, path: PathBuf },

  #[error("a port is being allocated by another pgdev process (lock {})", path.display())]
  BusyUnknown { path: PathBuf },

  #[error("failed to use port allocation lock {}: {source}", path.display())]
  Io { path: PathBuf, source: io::Error },
}

/// Exclusive hold on the allocation window, released on drop.
#[derive(Debug)]
pub struct RootLock {
  _file: File,
  path: PathBuf,
}

impl RootLock {
  /// Takes the lock in `dir` for `instance` without waiting.
  pub fn acquire(dir: &Path, instance: &str) -> Result<Self, RootLockError> {
    let path = dir.join(LOCK_FILENAME);
    let io_err = |source| RootLockError::Io {
      path: path.clone(),
      source,
    };

    fs::create_dir_all(dir).map_err(io_err)?;
    let mut file = OpenOptions::new()
      .read(true)
      .write(true)
      .create(true)
      .truncate(false)
      .open(&path)
      .map_err(io_err)?;

    match try_lock(&file) {
      Ok(()) => {}
      Err(e) if e.kind() == io::ErrorKind::WouldBlock => return Err(busy(&path)),
      Err(e) => return Err(io_err(e)),
    }

    // truncate only once the lock is ours, or the holder's record is lost
    file.set_len(0).map_err(io_err)?;
    file
      .write_all(LockHolder::current(instance).render().as_bytes())
      .map_err(io_err)?;
    debug!(path = %path.display(), instance, "holding port allocation lock");

    Ok(Self { _file: file, path })
  }

  /// The holder recorded in the lock file.
  pub fn holder(&self) -> io::Result<Option<LockHolder>> {
    fs::read_to_string(&self.path).map(|content| LockHolder::parse(&content))
  }

  pub fn path(&self) -> &Path {
    &self.path
  }
}

fn busy(path: &Path) -> RootLockError {
  match fs::read_to_string(path).ok().as_deref().and_then(LockHolder::parse) {
    Some(holder) => RootLockError::Busy {
      holder,
      path: path.to_path_buf(),
    },
    None => RootLockError::BusyUnknown {
      path: path.to_path_buf(),
    },
  }
}

#[cfg(unix)]
fn try_lock(file: &File) -> io::Result<()> {
  use rustix::fs::{FlockOperation, flock};

  flock(file, FlockOperation::NonBlockingLockExclusive).map_err(io::Error::from)
}

#[cfg(not(unix))]
fn try_lock(_file: &File) -> io::Result<()> {
  Ok(())
}
