//! # Jira Search Endpoint
//!
//! Single-page JQL search against `/rest/api/2/search`. The pagination
//! aggregator drives this endpoint; callers wanting more than one page
//! should use [`JiraClient::search_all`](crate::JiraClient::search_all).

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::debug;

use crate::client::JiraClient;
use crate::models::JiraIssue;

/// One page of search results as served by the Jira search endpoint.
///
/// An empty `issues` vector signals that the result set is exhausted.
#[derive(Debug, Deserialize)]
pub struct SearchPage {
  #[serde(rename = "startAt")]
  pub start_at: usize,
  #[serde(rename = "maxResults")]
  pub max_results: usize,
  /// Total match count as reported by the server, when it reports one.
  #[serde(default)]
  pub total: Option<usize>,
  pub issues: Vec<JiraIssue>,
}

impl JiraClient {
  /// Run one JQL search request at the given cursor.
  ///
  /// `fields` restricts the wire payload to the listed field ids; an empty
  /// slice lets the server decide. The JQL text is passed through opaque,
  /// never parsed or validated locally.
  pub async fn search_issues(
    &self,
    jql: &str,
    start_at: usize,
    max_results: usize,
    fields: &[String],
  ) -> Result<SearchPage> {
    let url = format!("{}/rest/api/2/search", self.base_url);
    debug!(start_at, max_results, "Requesting Jira search page");

    let mut request = self
      .client
      .get(&url)
      .basic_auth(&self.auth.email, Some(&self.auth.api_token))
      .query(&[("jql", jql)])
      .query(&[("startAt", start_at), ("maxResults", max_results)]);
    if !fields.is_empty() {
      request = request.query(&[("fields", fields.join(","))]);
    }

    let response = request.send().await.context("Failed to query Jira search")?;

    match response.status() {
      StatusCode::OK => {
        let page = response
          .json::<SearchPage>()
          .await
          .context("Failed to parse Jira search results")?;
        Ok(page)
      }
      StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(anyhow::anyhow!(
        "Authentication failed. Please check your Jira credentials."
      )),
      StatusCode::BAD_REQUEST => Err(anyhow::anyhow!(
        "Jira rejected the search query: {}",
        response.text().await.unwrap_or_default()
      )),
      _ => Err(anyhow::anyhow!(
        "Unexpected error: HTTP {} - {}",
        response.status(),
        response.text().await.unwrap_or_default()
      )),
    }
  }
}
