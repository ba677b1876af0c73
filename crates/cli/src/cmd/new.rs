//! Implementation of the `pgdev new` command.

use anyhow::{Context as _, Result};
use owo_colors::{OwoColorize, Stream};

use pgdev_lib::blueprint;
use pgdev_lib::scaffold::scaffold;

use crate::context::Context;
use crate::output::{print_stat, print_success, symbols};

/// Copies `template` into a new instance directory.
///
/// Nothing is built; the blueprints can be edited before `pgdev setup`.
pub fn cmd_new(ctx: &Context, name: &str, template: &str) -> Result<()> {
  let instance = scaffold(&ctx.registry, &ctx.templates, name, template)
    .with_context(|| format!("Failed to create instance {}", name))?;

  print_success(&format!(
    "Created instance {} from template {}",
    name.if_supports_color(Stream::Stdout, |s| s.bold()),
    template
  ));
  print_stat("Directory", &instance.dir().display().to_string());

  let components = blueprint::components(&instance)?;
  if !components.is_empty() {
    println!();
    println!("Components:");
    for component in &components {
      println!("  {} {}", symbols::INFO, component.name());
    }
  }

  println!();
  println!("{}", "Next steps:".if_supports_color(Stream::Stdout, |s| s.bold()));
  let dir = instance.dir().display().to_string();
  let steps = [
    format!("Review the blueprints in {}", highlight(&dir)),
    format!("Run: {}", highlight(&format!("pgdev setup {}", name))),
    format!("Run: {}", highlight(&format!("pgdev init {}", name))),
  ];
  for (i, step) in steps.iter().enumerate() {
    println!("  {}. {}", i + 1, step);
  }

  Ok(())
}

fn highlight(text: &str) -> String {
  text.if_supports_color(Stream::Stdout, |s| s.cyan()).to_string()
}
