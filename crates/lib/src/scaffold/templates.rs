//! Templates compiled into the binary.

macro_rules! template_file {
  ($name:literal) => {
    (
      $name,
      include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/templates/default/", $name)),
    )
  };
}

/// A template shipped with the tool: `(file name, content)` pairs.
#[derive(Debug, Clone, Copy)]
pub struct BuiltinTemplate {
  pub name: &'static str,
  pub description: &'static str,
  pub files: &'static [(&'static str, &'static str)],
}

const POSTGRES_FILES: [(&str, &str); 3] = [
  template_file!("01-postgres.configure.sh"),
  template_file!("01-postgres.build.sh"),
  template_file!("01-postgres.test.sh"),
];

const DEFAULT_FILES: [(&str, &str); 6] = [
  POSTGRES_FILES[0],
  POSTGRES_FILES[1],
  POSTGRES_FILES[2],
  template_file!("02-pg_stat_statements.configure.sh"),
  template_file!("02-pg_stat_statements.build.sh"),
  template_file!("02-pg_stat_statements.test.sh"),
];

pub const BUILTIN_TEMPLATES: &[BuiltinTemplate] = &[
  BuiltinTemplate {
    name: "default",
    description: "PostgreSQL from git with pg_stat_statements preloaded",
    files: &DEFAULT_FILES,
  },
  BuiltinTemplate {
    name: "minimal",
    description: "PostgreSQL from git",
    files: &POSTGRES_FILES,
  },
];

pub fn builtin(name: &str) -> Option<&'static BuiltinTemplate> {
  BUILTIN_TEMPLATES.iter().find(|t| t.name == name)
}
