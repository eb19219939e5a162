//! Shared constants for the triage CLI.

/// Default custom field id carrying the task category.
pub const DEFAULT_CATEGORY_FIELD: &str = "customfield_21928";

/// Default pause between page requests, in milliseconds.
pub const DEFAULT_PAGE_DELAY_MS: u64 = 500;

/// Fields fetched for the plain issue listing.
pub const LISTING_FIELDS: [&str; 5] = ["summary", "status", "assignee", "created", "updated"];

/// Fields fetched for the component/status reports, before the category
/// field id is appended.
pub const REPORT_FIELDS: [&str; 8] = [
  "summary",
  "status",
  "assignee",
  "created",
  "updated",
  "components",
  "issuetype",
  "priority",
];
