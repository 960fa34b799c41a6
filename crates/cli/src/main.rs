mod cmd;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::cmd::{Source, UpdateArgs, cmd_diff, cmd_pending, cmd_update};
use crate::output::{OutputFormat, print_error};

/// candysync - push changed cache links to minted candy machine items
#[derive(Parser)]
#[command(name = "candysync")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Output format
  #[arg(long, value_enum, global = true, default_value_t)]
  output: OutputFormat,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Update on-chain metadata for minted items whose link changed
  Update(UpdateArgs),

  /// Show changed links and the records that would be updated
  Diff {
    #[command(flatten)]
    source: Source,

    /// Cache file with the desired links
    #[arg(long)]
    new_cache: PathBuf,
  },

  /// List items that have not been minted yet
  Pending {
    #[command(flatten)]
    source: Source,
  },
}

fn init_logging(verbose: bool) {
  let default_level = if verbose { "debug" } else { "info" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();
}

fn main() -> ExitCode {
  let cli = Cli::parse();
  init_logging(cli.verbose);

  let result = match &cli.command {
    Commands::Update(args) => cmd_update(args, cli.output),
    Commands::Diff { source, new_cache } => cmd_diff(source, new_cache, cli.output),
    Commands::Pending { source } => cmd_pending(source, cli.output),
  };

  match result {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      print_error(&format!("{:#}", e));
      ExitCode::FAILURE
    }
  }
}
