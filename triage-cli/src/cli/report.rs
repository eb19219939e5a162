//! # Report Command
//!
//! Normalizes fetched issues and aggregates them into dataset statistics,
//! a per-component summary table, and an optional CSV export of the rows.
//! With `--assignee`, renders the utilization view for one developer
//! instead: workload metrics, status distribution, and their tickets.

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Duration, Local, NaiveDate};
use clap::Args;
use tabled::settings::Style;
use tabled::{Table, Tabled};
use triage_core::ReportFilter;
use triage_core::export::write_csv;
use triage_core::output::{format_count, print_header, print_info, print_success, print_warning};
use triage_core::report::{
  Row, dataset_stats, no_component_count, rows_for_assignee, status_counts, summarize_assignee, summarize_components,
  unique_assignees,
};

use super::{PageArgs, truncate_text};
use crate::consts::{DEFAULT_CATEGORY_FIELD, REPORT_FIELDS};
use crate::{clients, pipeline};

/// Command for the component/status report
#[derive(Args)]
pub struct ReportArgs {
  /// Project key to report on
  #[arg(long, short = 'p', required = true, value_name = "KEY")]
  pub project: String,

  /// Restrict the report to one component
  #[arg(long, value_name = "NAME")]
  pub component: Option<String>,

  /// Only issues created in the last N days
  #[arg(long, value_name = "N")]
  pub days: Option<i64>,

  /// Custom field id carrying the task category
  #[arg(long, default_value = DEFAULT_CATEGORY_FIELD, value_name = "FIELD_ID")]
  pub category_field: String,

  /// Write the normalized rows as CSV to this path
  #[arg(long, value_name = "PATH")]
  pub csv: Option<PathBuf>,

  /// Show the utilization view for one developer instead of the
  /// component summary
  #[arg(long, value_name = "NAME")]
  pub assignee: Option<String>,

  #[command(flatten)]
  pub page: PageArgs,
}

#[derive(Tabled)]
struct ComponentTableRow {
  #[tabled(rename = "Component")]
  component: String,
  #[tabled(rename = "Total")]
  total: usize,
  #[tabled(rename = "Status Breakdown")]
  status_breakdown: String,
  #[tabled(rename = "Avg Age (Days)")]
  avg_age_days: f64,
  #[tabled(rename = "Latest")]
  latest: String,
  #[tabled(rename = "Oldest")]
  oldest: String,
}

#[derive(Tabled)]
struct TicketTableRow {
  #[tabled(rename = "Key")]
  key: String,
  #[tabled(rename = "Summary")]
  summary: String,
  #[tabled(rename = "Component")]
  component: String,
  #[tabled(rename = "Status")]
  status: String,
  #[tabled(rename = "Priority")]
  priority: String,
  #[tabled(rename = "Created")]
  created: String,
  #[tabled(rename = "Issue Type")]
  issue_type: String,
  #[tabled(rename = "Task Category")]
  category: String,
  #[tabled(rename = "Aging (Days)")]
  aging_days: i64,
}

/// Build the request-scoped filter from the CLI flags.
fn build_filter(report: &ReportArgs, today: NaiveDate) -> ReportFilter {
  let mut filter = ReportFilter::new(report.project.clone());
  filter.component = report.component.clone();
  if let Some(days) = report.days {
    filter.created_since = Some(today - Duration::days(days));
    filter.created_until = Some(today);
  }
  filter
}

/// Handle the report command
pub(crate) fn handle_report_command(report: ReportArgs) -> Result<()> {
  let today = Local::now().date_naive();
  let filter = build_filter(&report, today);
  let jql = filter.to_jql();

  let (rt, _credentials, client) = clients::create_jira_runtime_and_client()?;
  let query = pipeline::build_query(jql.clone(), &REPORT_FIELDS, Some(&report.category_field), &report.page)?;
  let outcome = pipeline::run_search(&rt, &client, &query);
  let rows = pipeline::normalize_all(&outcome, &report.category_field);

  print_header("Query");
  println!("{jql}");

  if rows.is_empty() {
    print_info("No issues found matching the selected criteria.");
    return Ok(());
  }

  if let Some(assignee) = &report.assignee {
    return print_assignee_view(&rows, assignee, report.csv.as_deref());
  }

  print_dataset(&rows);
  print_component_summary(&rows);

  if let Some(path) = &report.csv {
    export_rows(&rows, path)?;
  }

  Ok(())
}

fn export_rows(rows: &[Row], path: &Path) -> Result<()> {
  let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
  write_csv(rows, file)?;
  print_success(&format!("Wrote {} row(s) to {}", rows.len(), path.display()));
  Ok(())
}

/// Render the workload view for one developer: key metrics, status
/// distribution, and their ticket listing.
fn print_assignee_view(rows: &[Row], assignee: &str, csv: Option<&Path>) -> Result<()> {
  let mine: Vec<Row> = rows_for_assignee(rows, assignee).into_iter().cloned().collect();

  if mine.is_empty() {
    print_warning(&format!("No data found for {assignee}"));
    let known = unique_assignees(rows);
    print_info(&format!("Known assignees: {}", known.join(", ")));
    return Ok(());
  }

  let summary = summarize_assignee(rows, assignee);

  print_header(&format!("Workload for {assignee}"));
  print_info(&format!("Total tickets: {}", format_count(summary.total)));
  print_info(&format!("In Progress: {}", format_count(summary.in_progress)));
  print_info(&format!("Done: {}", format_count(summary.done)));
  print_info(&format!("To Do: {}", format_count(summary.to_do)));

  let counts = status_counts(&mine);
  let rendered: Vec<String> = counts.iter().map(|(status, count)| format!("{status}: {count}")).collect();
  print_info(&format!("Status distribution: {}", rendered.join(", ")));

  let table_rows: Vec<TicketTableRow> = mine
    .iter()
    .map(|row| TicketTableRow {
      key: row.key.clone(),
      summary: truncate_text(&row.summary, 40),
      component: truncate_text(&row.component, 20),
      status: row.status.clone(),
      priority: row.priority.clone(),
      created: row.created.clone(),
      issue_type: row.issue_type.clone(),
      category: row.category.clone(),
      aging_days: row.aging_days,
    })
    .collect();

  print_header("Tickets");
  let mut table = Table::new(table_rows);
  table.with(Style::modern());
  println!("{table}");

  if let Some(path) = csv {
    export_rows(&mine, path)?;
  }

  Ok(())
}

fn print_dataset(rows: &[Row]) {
  let stats = dataset_stats(rows);

  print_header("Dataset");
  print_info(&format!("Total records processed: {}", format_count(stats.total)));
  print_info(&format!("Unique components: {}", format_count(stats.unique_components)));
  print_info(&format!("Unique statuses: {}", format_count(stats.unique_statuses)));
  print_info(&format!("Unique assignees: {}", format_count(stats.unique_assignees)));

  let counts = status_counts(rows);
  let rendered: Vec<String> = counts.iter().map(|(status, count)| format!("{status}: {count}")).collect();
  print_info(&format!("Statuses: {}", rendered.join(", ")));

  let missing = no_component_count(rows);
  if missing > 0 {
    print_info(&format!(
      "{missing} ticket(s) are not assigned to any component; run `triage remind` to nudge their owners."
    ));
  }
}

fn print_component_summary(rows: &[Row]) {
  let summaries = summarize_components(rows);

  let table_rows: Vec<ComponentTableRow> = summaries
    .into_iter()
    .map(|summary| ComponentTableRow {
      component: truncate_text(&summary.component, 30),
      total: summary.total,
      status_breakdown: summary.status_breakdown,
      avg_age_days: summary.avg_age_days,
      latest: summary.latest_created,
      oldest: summary.oldest_created,
    })
    .collect();

  print_header("Component summary");
  let mut table = Table::new(table_rows);
  table.with(Style::modern());
  println!("{table}");
}
