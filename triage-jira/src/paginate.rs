//! # Pagination Aggregator
//!
//! Drives the search endpoint across pages until the result set is
//! exhausted or a total cap is reached, with a fixed inter-request delay as
//! rudimentary backpressure. A mid-pagination failure aborts the loop and
//! surfaces whatever was accumulated so far instead of discarding it.

use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, warn};

use crate::client::JiraClient;
use crate::models::JiraIssue;

/// Default number of issues requested per page.
pub const DEFAULT_PAGE_SIZE: usize = 100;
/// Default cap on the total number of issues fetched in one run.
pub const DEFAULT_TOTAL_CAP: usize = 500;
/// Default pause between successive page requests.
pub const DEFAULT_PAGE_DELAY: Duration = Duration::from_millis(500);

/// A bounded, paginated JQL search.
#[derive(Debug, Clone)]
pub struct SearchQuery {
  /// JQL text, passed through to the server opaque and unvalidated.
  pub jql: String,
  /// Field ids to fetch; empty means server default. Restricting this list
  /// keeps the wire payload small.
  pub fields: Vec<String>,
  /// Issues per page request. Must be greater than zero.
  pub page_size: usize,
  /// Upper bound on the accumulated result. Must be greater than zero.
  pub total_cap: usize,
  /// Pause between successive page requests.
  pub page_delay: Duration,
}

impl SearchQuery {
  /// A query with the default page size, cap, and inter-page delay.
  pub fn new(jql: impl Into<String>) -> Self {
    Self {
      jql: jql.into(),
      fields: Vec::new(),
      page_size: DEFAULT_PAGE_SIZE,
      total_cap: DEFAULT_TOTAL_CAP,
      page_delay: DEFAULT_PAGE_DELAY,
    }
  }

  /// Restrict the fetched fields to the given ids.
  pub fn with_fields<I, S>(mut self, fields: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.fields = fields.into_iter().map(Into::into).collect();
    self
  }
}

/// The accumulated result of a paginated search.
///
/// `issues` preserves server order and never exceeds the query's total cap.
/// When a page request failed mid-loop, `failure` carries the error and
/// `issues` holds everything fetched before it.
pub struct FetchOutcome {
  pub issues: Vec<JiraIssue>,
  pub failure: Option<anyhow::Error>,
}

impl FetchOutcome {
  /// Whether the fetch stopped early because a page request failed.
  pub fn is_partial(&self) -> bool {
    self.failure.is_some()
  }
}

impl JiraClient {
  /// Fetch all issues matching the query, page by page.
  ///
  /// The cursor starts at zero and advances by the number of issues each
  /// page returns. The loop stops on an empty page (source exhausted), a
  /// short page (last page), or once the total cap is reached; the cap is
  /// enforced by truncation so the result never exceeds it.
  ///
  /// `on_progress` is invoked with the accumulated count after every page
  /// so callers can show responsiveness during a long fetch.
  pub async fn search_all<F>(&self, query: &SearchQuery, mut on_progress: F) -> FetchOutcome
  where
    F: FnMut(usize),
  {
    let mut issues: Vec<JiraIssue> = Vec::new();
    let mut cursor = 0usize;

    loop {
      let page = match self
        .search_issues(&query.jql, cursor, query.page_size, &query.fields)
        .await
      {
        Ok(page) => page,
        Err(err) => {
          warn!(cursor, fetched = issues.len(), "Search page request failed, returning partial result");
          return FetchOutcome {
            issues,
            failure: Some(err),
          };
        }
      };

      let count = page.issues.len();
      if count == 0 {
        debug!(fetched = issues.len(), "Empty page, source exhausted");
        break;
      }

      issues.extend(page.issues);
      cursor += count;

      if issues.len() >= query.total_cap {
        issues.truncate(query.total_cap);
        on_progress(issues.len());
        debug!(fetched = issues.len(), "Total cap reached");
        break;
      }
      on_progress(issues.len());

      if count < query.page_size {
        debug!(fetched = issues.len(), "Short page, last page reached");
        break;
      }

      sleep(query.page_delay).await;
    }

    FetchOutcome { issues, failure: None }
  }
}
