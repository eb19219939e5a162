//! Shared fetch-and-normalize pipeline driven by the command handlers.
//!
//! Every command restarts the whole pipeline: issues are fetched fresh on
//! each invocation, and the normalized rows live only for the run.

use std::io::Write as _;
use std::time::Duration;

use anyhow::{Result, bail};
use chrono::Local;
use tokio::runtime::Runtime;
use triage_core::TriageError;
use triage_core::output::print_warning;
use triage_core::report::{self, Row};
use triage_jira::{FetchOutcome, JiraClient, SearchQuery};

use crate::cli::PageArgs;

/// Assemble a bounded search from the CLI pagination flags.
pub(crate) fn build_query(jql: String, fields: &[&str], extra_field: Option<&str>, page: &PageArgs) -> Result<SearchQuery> {
  if page.page_size == 0 {
    bail!("--page-size must be greater than zero");
  }
  if page.limit == 0 {
    bail!("--limit must be greater than zero");
  }

  let mut field_list: Vec<String> = fields.iter().map(|f| (*f).to_string()).collect();
  if let Some(extra) = extra_field {
    field_list.push(extra.to_string());
  }

  let mut query = SearchQuery::new(jql).with_fields(field_list);
  query.page_size = page.page_size;
  query.total_cap = page.limit;
  query.page_delay = Duration::from_millis(page.delay_ms);
  Ok(query)
}

/// Run the paginated search with an incremental progress line.
///
/// A mid-pagination failure is reported as a warning; the partial result is
/// still returned and used.
pub(crate) fn run_search(rt: &Runtime, client: &JiraClient, query: &SearchQuery) -> FetchOutcome {
  println!("Fetching issues...");
  let outcome = rt.block_on(client.search_all(query, |count| {
    print!("\rFetched {count} issues so far...");
    let _ = std::io::stdout().flush();
  }));
  println!();

  if let Some(failure) = &outcome.failure {
    let partial = TriageError::PartialFetch {
      fetched: outcome.issues.len(),
      reason: format!("{failure:#}"),
    };
    print_warning(&partial.to_string());
    print_warning("Proceeding with the partial result.");
  }

  outcome
}

/// Normalize every fetched issue against today's date.
pub(crate) fn normalize_all(outcome: &FetchOutcome, category_field: &str) -> Vec<Row> {
  let today = Local::now().date_naive();
  outcome
    .issues
    .iter()
    .map(|issue| report::normalize(issue, category_field, today))
    .collect()
}
