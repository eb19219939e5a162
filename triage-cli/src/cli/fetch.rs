//! # Fetch Command
//!
//! Runs the bounded pagination loop for a JQL query and prints the fetched
//! issues as a table with key, summary, status, assignee, and dates.

use anyhow::{Result, bail};
use clap::Args;
use tabled::settings::Style;
use tabled::{Table, Tabled};
use triage_core::ReportFilter;
use triage_core::output::{print_header, print_info};
use triage_core::report::{UNASSIGNED, truncate_date};
use triage_jira::JiraIssue;

use super::{PageArgs, truncate_text};
use crate::consts::LISTING_FIELDS;
use crate::{clients, pipeline};

/// Command for fetching and listing issues
#[derive(Args)]
pub struct FetchArgs {
  /// Full JQL query to run (overrides --project)
  #[arg(long, value_name = "JQL")]
  pub jql: Option<String>,

  /// Project key to build the default query from
  #[arg(long, short = 'p', value_name = "KEY")]
  pub project: Option<String>,

  #[command(flatten)]
  pub page: PageArgs,
}

#[derive(Tabled)]
struct IssueListing {
  #[tabled(rename = "Key")]
  key: String,
  #[tabled(rename = "Summary")]
  summary: String,
  #[tabled(rename = "Status")]
  status: String,
  #[tabled(rename = "Assignee")]
  assignee: String,
  #[tabled(rename = "Created")]
  created: String,
  #[tabled(rename = "Updated")]
  updated: String,
}

impl IssueListing {
  fn from_issue(issue: &JiraIssue) -> Self {
    Self {
      key: issue.key.clone(),
      summary: truncate_text(&issue.fields.summary, 60),
      status: issue.fields.status.name.clone(),
      assignee: issue
        .fields
        .assignee
        .as_ref()
        .map(|user| user.display_name.clone())
        .unwrap_or_else(|| UNASSIGNED.to_string()),
      created: truncate_date(&issue.fields.created),
      updated: truncate_date(&issue.fields.updated),
    }
  }
}

/// Handle the fetch command
pub(crate) fn handle_fetch_command(fetch: FetchArgs) -> Result<()> {
  let jql = match (&fetch.jql, &fetch.project) {
    (Some(jql), _) => jql.clone(),
    (None, Some(project)) => ReportFilter::new(project.clone()).to_jql(),
    (None, None) => bail!("Provide --jql or --project"),
  };

  let (rt, _credentials, client) = clients::create_jira_runtime_and_client()?;
  let query = pipeline::build_query(jql.clone(), &LISTING_FIELDS, None, &fetch.page)?;
  let outcome = pipeline::run_search(&rt, &client, &query);

  print_header("Query");
  println!("{jql}");
  print_info(&format!("Total issues fetched: {}", outcome.issues.len()));

  if outcome.issues.is_empty() {
    return Ok(());
  }

  let listings: Vec<IssueListing> = outcome.issues.iter().map(IssueListing::from_issue).collect();
  let mut table = Table::new(listings);
  table.with(Style::modern());
  println!("{table}");

  Ok(())
}
