//! # Command Line Interface
//!
//! Defines the CLI structure and command handlers for the triage tool:
//! credential checking, issue fetching, component/status reporting, and
//! the reminder notifier.

mod check;
mod fetch;
mod remind;
mod report;

use anyhow::Result;
use clap::builder::Styles;
use clap::builder::styling::AnsiColor;
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

use crate::consts::DEFAULT_PAGE_DELAY_MS;

/// Enum representing different color modes for output
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
  /// Enable colored output
  Always,
  /// Automatically detect if colors should be used based on terminal
  /// capabilities
  Auto,
  /// Disable colored output
  Never,
}

/// Top-level CLI command for the triage tool
#[derive(Parser)]
#[command(name = "triage")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(about = "Aggregate Jira issues into component and status reports")]
#[command(
  long_about = "Triage queries a Jira instance over its REST API, flattens the matching issues\n\
        into normalized rows, and presents them as console tables, CSV exports, and\n\
        component-assignment reminder emails."
)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(propagate_version = true)]
#[command(subcommand_required(true))]
#[command(disable_help_subcommand = true)]
#[command(max_term_width = 120)]
#[command(styles = Styles::styled()
    .header(AnsiColor::BrightGreen.on_default().bold().underline())
    .usage(AnsiColor::Green.on_default().bold())
    .literal(AnsiColor::BrightGreen.on_default().bold())
    .placeholder(AnsiColor::BrightWhite.on_default().italic())
    .valid(AnsiColor::Green.on_default())
    .invalid(AnsiColor::BrightRed.on_default().bold())
)]
pub struct Cli {
  /// Sets the level of verbosity (can be used multiple times)
  #[arg(
    short = 'v',
    long = "verbose",
    action = ArgAction::Count,
    long_help = "Sets the level of verbosity for tracing and logging output.\n\n\
             -v: Show info level messages\n\
             -vv: Show debug level messages\n\
             -vvv: Show trace level messages"
  )]
  pub verbose: u8,

  /// Controls when colored output is used
  #[arg(
    long,
    value_enum,
    ignore_case = true,
    default_value_t = ColorMode::Auto,
  )]
  pub colors: ColorMode,

  /// Subcommands
  #[command(subcommand)]
  pub command: Commands,
}

/// Subcommands for the triage tool
#[derive(Subcommand)]
pub enum Commands {
  /// Verify Jira and SMTP configuration
  #[command(long_about = "Verify the Jira and SMTP configuration from the environment.\n\n\
            Resolves the Jira credentials, calls the authenticated-user endpoint to\n\
            prove connectivity, and reports whether the SMTP settings needed by the\n\
            remind command are present.")]
  Check(check::CheckArgs),

  /// Fetch and list issues matching a query
  #[command(long_about = "Fetch issues page by page and print a listing.\n\n\
            Runs the bounded pagination loop with incremental progress output, then\n\
            prints one table row per issue with key, summary, status, assignee, and\n\
            created/updated dates.")]
  Fetch(fetch::FetchArgs),

  /// Aggregate issues into component and status views
  #[command(long_about = "Aggregate fetched issues into component and status views.\n\n\
            Normalizes every issue (defaulting missing assignees, components, and\n\
            priorities), prints dataset statistics and a per-component summary table,\n\
            and optionally exports the normalized rows as CSV. With --assignee,\n\
            shows one developer's workload metrics and ticket listing instead.")]
  Report(report::ReportArgs),

  /// Email reminders for issues missing a component
  #[command(long_about = "Send reminder emails for issues without a component.\n\n\
            Filters the normalized rows down to those whose component is unset and\n\
            sends one reminder per row to the assignee's address over SMTP. Rows\n\
            without a resolvable address are skipped.")]
  Remind(remind::RemindArgs),
}

/// Pagination flags shared by the fetching commands.
#[derive(Args)]
pub struct PageArgs {
  /// Issues requested per page
  #[arg(long, default_value_t = triage_jira::DEFAULT_PAGE_SIZE)]
  pub page_size: usize,

  /// Cap on the total number of issues fetched
  #[arg(long, default_value_t = triage_jira::DEFAULT_TOTAL_CAP)]
  pub limit: usize,

  /// Pause between page requests, in milliseconds
  #[arg(long, default_value_t = DEFAULT_PAGE_DELAY_MS)]
  pub delay_ms: u64,
}

/// Handle the parsed CLI command
pub fn handle_cli(cli: Cli) -> Result<()> {
  // Set global color override based on --colors argument
  match cli.colors {
    ColorMode::Always => owo_colors::set_override(true),
    ColorMode::Never => owo_colors::set_override(false),
    ColorMode::Auto => {
      // Let owo_colors use its default auto-detection
    }
  }

  match cli.command {
    Commands::Check(check) => check::handle_check_command(check),
    Commands::Fetch(fetch) => fetch::handle_fetch_command(fetch),
    Commands::Report(report) => report::handle_report_command(report),
    Commands::Remind(remind) => remind::handle_remind_command(remind),
  }
}

/// Shorten text for table cells, appending an ellipsis when truncated.
pub(crate) fn truncate_text(text: &str, max_chars: usize) -> String {
  if text.chars().count() <= max_chars {
    return text.to_string();
  }
  let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
  format!("{kept}...")
}
