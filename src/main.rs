mod commands;
mod core;

use clap::{Parser, Subcommand};

use crate::core::error::{BridgeResult, print_error};

/// Run the cq code-quality CLI across native, containerized, and
/// development deployments
#[derive(Parser)]
#[command(name = "cq-bridge")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(styles = get_styles())]
struct BridgeCli {
  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Analyze the code health of a file, printing the full review
  Review {
    /// Absolute path to the source file to analyze
    file: String,
  },
  /// Analyze a file and print just the code-health score (10.0 best, 1.0 worst)
  Score {
    /// Absolute path to the source file to analyze
    file: String,
  },
  /// Analyze the code-health delta of uncommitted changes in a repository
  Delta {
    /// Absolute path to the git repository
    repo: String,
  },
  /// Diagnose the execution environment
  Doctor {
    /// Output the report in JSON format
    #[arg(long)]
    json: bool,
  },
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .valid(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

fn main() {
  env_logger::init();

  let cli = BridgeCli::parse();

  let result: BridgeResult<()> = match cli.command {
    Commands::Review { file } => commands::run_review(&file),
    Commands::Score { file } => commands::run_score(&file),
    Commands::Delta { repo } => commands::run_delta(&repo),
    Commands::Doctor { json } => commands::run_doctor(json),
  };

  if let Err(err) = result {
    print_error(&err);
    std::process::exit(err.exit_code().as_i32());
  }
}
