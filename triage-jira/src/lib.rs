//! # Jira API Client
//!
//! Provides Jira REST API integration for the triage reporting pipeline:
//! authenticated search queries, a bounded pagination aggregator, and the
//! issue models the normalizer consumes.

mod client;
mod endpoints;
pub mod models;
mod paginate;

// Re-export the client
pub use client::{JiraClient, create_jira_client};
pub use endpoints::search::SearchPage;
// Re-export models
pub use models::{CustomFieldValue, JiraAuth, JiraComponent, JiraIssue, JiraIssueFields, JiraIssueStatus, JiraUser};
pub use paginate::{DEFAULT_PAGE_DELAY, DEFAULT_PAGE_SIZE, DEFAULT_TOTAL_CAP, FetchOutcome, SearchQuery};
