//! Blueprint components and the order they run in.

use std::cmp::Ordering;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// One step of a component, identified by its script suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
  Configure,
  Build,
  Test,
}

impl Step {
  pub fn as_str(self) -> &'static str {
    match self {
      Step::Configure => "configure",
      Step::Build => "build",
      Step::Test => "test",
    }
  }

  /// `.configure.sh`, `.build.sh`, `.test.sh`.
  pub fn suffix(self) -> String {
    format!(".{}.sh", self.as_str())
  }
}

impl fmt::Display for Step {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// A buildable component, named after the `<prefix>-<component>` base of its scripts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
  name: String,
  dir: PathBuf,
}

impl Component {
  pub fn new(name: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
    Self {
      name: name.into(),
      dir: dir.into(),
    }
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn script(&self, step: Step) -> PathBuf {
    self.dir.join(format!("{}{}", self.name, step.suffix()))
  }

  pub fn has(&self, step: Step) -> bool {
    self.script(step).is_file()
  }
}

/// The execution order of components: byte-wise comparison of their names.
///
/// A numeric prefix (`01-postgres`, `02-postgis`) is how blueprints pin
/// their position. Prefixes are compared as text, so `10-x` sorts before `2-y`.
pub fn component_order(a: &Component, b: &Component) -> Ordering {
  a.name.as_bytes().cmp(b.name.as_bytes())
}

/// Every component with a configure step directly inside `dir`, in execution order.
///
/// Only the configure step is required for discovery. Whether the build step
/// exists is checked when the component is reached.
pub fn discover(dir: &Path) -> io::Result<Vec<Component>> {
  let suffix = Step::Configure.suffix();
  let mut components: Vec<Component> = fs::read_dir(dir)?
    .flatten()
    .filter(|entry| entry.path().is_file())
    .filter_map(|entry| entry.file_name().into_string().ok())
    .filter_map(|file_name| {
      file_name
        .strip_suffix(suffix.as_str())
        .filter(|base| !base.is_empty())
        .map(|base| Component::new(base, dir))
    })
    .collect();
  components.sort_by(component_order);
  Ok(components)
}
