mod cmd;
mod context;
mod output;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use pgdev_lib::blueprint::Step;
use pgdev_lib::scaffold::DEFAULT_TEMPLATE;

use crate::context::Context;
use crate::output::print_error;

/// pgdev - isolated, source-built PostgreSQL development instances
#[derive(Parser)]
#[command(name = "pgdev")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose logging
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Create a new instance from a template
  New {
    /// Instance name
    name: String,
    /// Template to copy blueprints from
    #[arg(default_value = DEFAULT_TEMPLATE)]
    template: String,
  },

  /// Run every component's configure and build steps
  Setup {
    /// Instance name (defaults to the active instance)
    name: Option<String>,
  },

  /// Initialize the database cluster and assign a port
  Init {
    /// Instance name (defaults to the active instance)
    name: Option<String>,
  },

  /// Create, build, initialize and start an instance
  Create {
    /// Instance name
    name: String,
    /// Template to copy blueprints from
    #[arg(default_value = DEFAULT_TEMPLATE)]
    template: String,
  },

  /// Delete an instance (not supported; prints instructions)
  Delete {
    /// Instance name
    name: String,
  },

  /// Start the server
  Start {
    /// Instance name (defaults to the active instance)
    name: Option<String>,
  },

  /// Stop the server
  Stop {
    /// Instance name (defaults to the active instance)
    name: Option<String>,
  },

  /// Restart the server
  Restart {
    /// Instance name (defaults to the active instance)
    name: Option<String>,
  },

  /// Show whether the server is running
  Status {
    /// Instance name (defaults to the active instance)
    name: Option<String>,
    /// Output as JSON
    #[arg(long)]
    json: bool,
  },

  /// List all instances
  List {
    /// Output as JSON
    #[arg(long)]
    json: bool,
  },

  /// Print the shell command that makes an instance active
  Switch {
    /// Instance name
    name: String,
  },

  /// Show or set the default instance
  Default {
    /// Instance name to make the default
    name: Option<String>,
  },

  /// Re-run one component's configure step
  Configure {
    /// Instance name
    name: String,
    /// Component (e.g. 01-postgres) or script file
    component: String,
  },

  /// Re-run one component's build step
  Build {
    /// Instance name
    name: String,
    /// Component (e.g. 01-postgres) or script file
    component: String,
  },

  /// Run one component's test step
  Test {
    /// Instance name
    name: String,
    /// Component (e.g. 01-postgres) or script file
    component: String,
  },

  /// Connect to the instance with psql
  Psql {
    /// Instance name (defaults to the active instance)
    name: Option<String>,
    /// Extra arguments passed to psql
    #[arg(last = true)]
    args: Vec<String>,
  },

  /// Show the server log
  Logs {
    /// Instance name (defaults to the active instance)
    name: Option<String>,
    /// Number of lines to show
    #[arg(short = 'n', long, default_value_t = 50)]
    lines: usize,
    /// Keep printing as the log grows
    #[arg(short, long)]
    follow: bool,
  },

  /// Edit the server configuration
  Conf {
    /// Instance name (defaults to the active instance)
    name: Option<String>,
    /// Print the path instead of opening an editor
    #[arg(long)]
    path: bool,
  },
}

fn main() -> ExitCode {
  let cli = Cli::parse();

  let default_level = if cli.verbose { "debug" } else { "warn" };
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  let ctx = Context::load();

  let result = match cli.command {
    Commands::New { name, template } => cmd::cmd_new(&ctx, &name, &template),
    Commands::Setup { name } => cmd::cmd_setup(&ctx, name.as_deref()),
    Commands::Init { name } => cmd::cmd_init(&ctx, name.as_deref()),
    Commands::Create { name, template } => cmd::cmd_create(&ctx, &name, &template),
    Commands::Delete { name } => cmd::cmd_delete(&ctx, &name),
    Commands::Start { name } => cmd::cmd_start(&ctx, name.as_deref()),
    Commands::Stop { name } => cmd::cmd_stop(&ctx, name.as_deref()),
    Commands::Restart { name } => cmd::cmd_restart(&ctx, name.as_deref()),
    Commands::Status { name, json } => cmd::cmd_status(&ctx, name.as_deref(), json),
    Commands::List { json } => cmd::cmd_list(&ctx, json),
    Commands::Switch { name } => cmd::cmd_switch(&ctx, &name),
    Commands::Default { name } => cmd::cmd_default(&ctx, name.as_deref()),
    Commands::Configure { name, component } => cmd::cmd_step(&ctx, &name, &component, Step::Configure),
    Commands::Build { name, component } => cmd::cmd_step(&ctx, &name, &component, Step::Build),
    Commands::Test { name, component } => cmd::cmd_step(&ctx, &name, &component, Step::Test),
    Commands::Psql { name, args } => cmd::cmd_psql(&ctx, name.as_deref(), &args),
    Commands::Logs { name, lines, follow } => cmd::cmd_logs(&ctx, name.as_deref(), lines, follow),
    Commands::Conf { name, path } => cmd::cmd_conf(&ctx, name.as_deref(), path),
  };

  match result {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      print_error(&format!("{:#}", e));
      ExitCode::FAILURE
    }
  }
}
