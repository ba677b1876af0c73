//! Terminal output for pgdev commands.
//!
//! Progress and results go to stdout; warnings and errors go to stderr so
//! `pgdev switch` and `--json` output stay machine-readable. Color is applied
//! only when the stream is a terminal that supports it.

use std::time::Duration;

use anyhow::Context;
use owo_colors::{AnsiColors, OwoColorize, Stream};

pub mod symbols {
  pub const SUCCESS: &str = "✓";
  pub const ERROR: &str = "✗";
  pub const WARNING: &str = "⚠";
  pub const INFO: &str = "•";
  pub const ARROW: &str = "→";
}

#[derive(Clone, Copy)]
enum Level {
  Success,
  Info,
  Warning,
  Error,
}

impl Level {
  fn symbol(self) -> &'static str {
    match self {
      Level::Success => symbols::SUCCESS,
      Level::Info => symbols::INFO,
      Level::Warning => symbols::WARNING,
      Level::Error => symbols::ERROR,
    }
  }

  fn color(self) -> AnsiColors {
    match self {
      Level::Success => AnsiColors::Green,
      Level::Info => AnsiColors::Blue,
      Level::Warning => AnsiColors::Yellow,
      Level::Error => AnsiColors::Red,
    }
  }

  fn stream(self) -> Stream {
    match self {
      Level::Success | Level::Info => Stream::Stdout,
      Level::Warning | Level::Error => Stream::Stderr,
    }
  }
}

fn emit(level: Level, message: &str) {
  let stream = level.stream();
  let symbol = level.symbol();
  let symbol = symbol.if_supports_color(stream, |s| s.color(level.color()));
  match stream {
    Stream::Stdout => println!("{} {}", symbol, message),
    // the whole line is colored on stderr
    _ => eprintln!("{} {}", symbol, message.if_supports_color(stream, |s| s.color(level.color()))),
  }
}

pub fn print_success(message: &str) {
  emit(Level::Success, message);
}

pub fn print_info(message: &str) {
  emit(Level::Info, message);
}

pub fn print_warning(message: &str) {
  emit(Level::Warning, message);
}

pub fn print_error(message: &str) {
  emit(Level::Error, message);
}

/// `→ 01-postgres configure`, printed before a blueprint script starts.
pub fn print_step(component: &str, step: &str) {
  println!(
    "{} {} {}",
    symbols::ARROW.if_supports_color(Stream::Stdout, |s| s.cyan()),
    component.if_supports_color(Stream::Stdout, |s| s.bold()),
    step.if_supports_color(Stream::Stdout, |s| s.dimmed())
  );
}

/// An indented `label: value` line under a result.
pub fn print_stat(label: &str, value: &str) {
  println!("  {}: {}", label.if_supports_color(Stream::Stdout, |s| s.dimmed()), value);
}

pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
  let rendered = serde_json::to_string_pretty(value).context("Failed to render JSON output")?;
  println!("{}", rendered);
  Ok(())
}

/// Milliseconds below one second, whole seconds above.
pub fn format_duration(elapsed: Duration) -> String {
  match elapsed.as_secs() {
    0 => format!("{}ms", elapsed.subsec_millis()),
    secs => humantime::format_duration(Duration::from_secs(secs)).to_string(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn sub_second_durations_use_milliseconds() {
    assert_eq!(format_duration(Duration::from_millis(50)), "50ms");
    assert_eq!(format_duration(Duration::ZERO), "0ms");
  }

  #[test]
  fn longer_durations_drop_fractions() {
    assert_eq!(format_duration(Duration::from_millis(1500)), "1s");
    assert_eq!(format_duration(Duration::from_secs(65)), "1m 5s");
    assert_eq!(format_duration(Duration::from_secs(3725)), "1h 2m 5s");
  }

  #[test]
  fn every_level_prints() {
    for level in [Level::Success, Level::Info, Level::Warning, Level::Error] {
      emit(level, "message");
    }
  }

  #[test]
  fn warnings_and_errors_go_to_stderr() {
    assert!(matches!(Level::Warning.stream(), Stream::Stderr));
    assert!(matches!(Level::Error.stream(), Stream::Stderr));
    assert!(matches!(Level::Info.stream(), Stream::Stdout));
  }
}
