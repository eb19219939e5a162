//! # Remind Command
//!
//! Sends one reminder email per issue whose component is unset, addressed
//! to the issue's assignee. `--dry-run` lists the would-be recipients
//! without touching the mail transport.

use anyhow::{Context, Result};
use clap::Args;
use tabled::settings::Style;
use tabled::{Table, Tabled};
use triage_core::ReportFilter;
use triage_core::creds::SmtpSettings;
use triage_core::output::{print_header, print_info, print_success, print_warning};
use triage_core::report::Row;
use triage_notify::{SmtpMailer, pending_reminders, send_component_reminders};

use super::PageArgs;
use crate::consts::{DEFAULT_CATEGORY_FIELD, REPORT_FIELDS};
use crate::{clients, pipeline};

/// Command for the component reminder emails
#[derive(Args)]
pub struct RemindArgs {
  /// Project key to scan for component-less issues
  #[arg(long, short = 'p', required = true, value_name = "KEY")]
  pub project: String,

  /// Only issues created in the last N days
  #[arg(long, value_name = "N")]
  pub days: Option<i64>,

  /// Custom field id carrying the task category
  #[arg(long, default_value = DEFAULT_CATEGORY_FIELD, value_name = "FIELD_ID")]
  pub category_field: String,

  /// List the recipients without sending anything
  #[arg(long)]
  pub dry_run: bool,

  #[command(flatten)]
  pub page: PageArgs,
}

#[derive(Tabled)]
struct RecipientRow {
  #[tabled(rename = "Key")]
  key: String,
  #[tabled(rename = "Assignee")]
  assignee: String,
  #[tabled(rename = "Recipient")]
  recipient: String,
}

/// Handle the remind command
pub(crate) fn handle_remind_command(remind: RemindArgs) -> Result<()> {
  let mut filter = ReportFilter::new(remind.project.clone());
  if let Some(days) = remind.days {
    let today = chrono::Local::now().date_naive();
    filter.created_since = Some(today - chrono::Duration::days(days));
    filter.created_until = Some(today);
  }

  let (rt, credentials, client) = clients::create_jira_runtime_and_client()?;
  let query = pipeline::build_query(filter.to_jql(), &REPORT_FIELDS, Some(&remind.category_field), &remind.page)?;
  let outcome = pipeline::run_search(&rt, &client, &query);
  let rows = pipeline::normalize_all(&outcome, &remind.category_field);

  let pending = pending_reminders(&rows);
  if pending.is_empty() {
    print_info("No tickets found without components.");
    return Ok(());
  }

  print_header("Tickets without a component");
  print_recipients(&pending);

  if remind.dry_run {
    print_info("Dry run: no emails sent.");
    return Ok(());
  }

  let settings = SmtpSettings::from_env().context("SMTP configuration is required to send reminders")?;
  let mut mailer = SmtpMailer::new(&settings)?;
  let batch = send_component_reminders(&rows, &credentials.base_url, &settings.sender, &mut mailer)?;

  print_success(&format!("Successfully sent reminder emails for {} ticket(s).", batch.sent));
  if batch.skipped > 0 {
    print_warning(&format!(
      "Skipped {} ticket(s) with no resolvable assignee address.",
      batch.skipped
    ));
  }

  Ok(())
}

fn print_recipients(pending: &[&Row]) {
  let recipients: Vec<RecipientRow> = pending
    .iter()
    .map(|row| RecipientRow {
      key: row.key.clone(),
      assignee: row.assignee.clone(),
      recipient: row
        .assignee_email
        .clone()
        .unwrap_or_else(|| "(no address, will be skipped)".to_string()),
    })
    .collect();

  let mut table = Table::new(recipients);
  table.with(Style::modern());
  println!("{table}");
}
