//! Field normalization and tabular aggregation.
//!
//! `normalize` flattens one Jira issue into a [`Row`] with every optional
//! field resolved to a concrete default, so nothing downstream ever handles
//! a missing value. The aggregation functions are pure and deterministic:
//! grouped views sort by total descending with ties broken alphabetically
//! by group key.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;
use triage_jira::{CustomFieldValue, JiraIssue};

/// Default shown when an issue has no assignee.
pub const UNASSIGNED: &str = "Unassigned";
/// Default shown when an issue has no component.
pub const NO_COMPONENT: &str = "No Component";
/// Default shown when an issue has no priority.
pub const NO_PRIORITY: &str = "No Priority";
/// Default shown when the category custom field is absent.
pub const CATEGORY_NOT_SET: &str = "Not Set";
/// Default shown when the issue type was not fetched.
pub const UNKNOWN_TYPE: &str = "Unknown";

/// A flattened, default-resolved view of one issue.
///
/// Serialization order doubles as the CSV column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
  #[serde(rename = "Key")]
  pub key: String,
  #[serde(rename = "Summary")]
  pub summary: String,
  #[serde(rename = "Component")]
  pub component: String,
  #[serde(rename = "Status")]
  pub status: String,
  #[serde(rename = "Assignee")]
  pub assignee: String,
  #[serde(rename = "Created")]
  pub created: String,
  #[serde(rename = "Updated")]
  pub updated: String,
  #[serde(rename = "Issue Type")]
  pub issue_type: String,
  #[serde(rename = "Priority")]
  pub priority: String,
  #[serde(rename = "Task Category")]
  pub category: String,
  #[serde(rename = "Aging (Days)")]
  pub aging_days: i64,
  /// Contact address for the reminder notifier, when Jira exposes one.
  /// Not a display field and not exported.
  #[serde(skip)]
  pub assignee_email: Option<String>,
}

/// Flatten an issue into a row, resolving defaults for everything optional.
///
/// Multi-component issues are lossily reduced to their first component.
/// Dates keep only their `YYYY-MM-DD` prefix with no timezone handling.
pub fn normalize(issue: &JiraIssue, category_field: &str, today: NaiveDate) -> Row {
  let fields = &issue.fields;

  let component = fields
    .components
    .first()
    .map(|c| c.name.clone())
    .unwrap_or_else(|| NO_COMPONENT.to_string());
  let assignee = fields
    .assignee
    .as_ref()
    .map(|user| user.display_name.clone())
    .unwrap_or_else(|| UNASSIGNED.to_string());
  let assignee_email = fields.assignee.as_ref().and_then(|user| user.email_address.clone());
  let priority = fields
    .priority
    .as_ref()
    .map(|p| p.name.clone())
    .unwrap_or_else(|| NO_PRIORITY.to_string());
  let issue_type = fields
    .issuetype
    .as_ref()
    .map(|t| t.name.clone())
    .unwrap_or_else(|| UNKNOWN_TYPE.to_string());
  let category = fields
    .custom_field(category_field)
    .map(CustomFieldValue::into_string)
    .unwrap_or_else(|| CATEGORY_NOT_SET.to_string());

  let created = truncate_date(&fields.created);
  let aging_days = aging_days(&created, today);

  Row {
    key: issue.key.clone(),
    summary: fields.summary.clone(),
    component,
    status: fields.status.name.clone(),
    assignee,
    created,
    updated: truncate_date(&fields.updated),
    issue_type,
    priority,
    category,
    aging_days,
    assignee_email,
  }
}

/// Keep the first ten characters of an ISO-8601-like timestamp.
///
/// Assumes upstream timestamps begin with `YYYY-MM-DD`; shorter input is
/// passed through unchanged.
pub fn truncate_date(timestamp: &str) -> String {
  timestamp.chars().take(10).collect()
}

/// Elapsed days between a `YYYY-MM-DD` date and `today`.
///
/// Unparseable input yields 0. That silent fallback mirrors the upstream
/// scripts and is relied on by callers; it is not sound aging semantics.
pub fn aging_days(created: &str, today: NaiveDate) -> i64 {
  match NaiveDate::parse_from_str(&truncate_date(created), "%Y-%m-%d") {
    Ok(date) => (today - date).num_days(),
    Err(_) => 0,
  }
}

/// Per-component grouped view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentSummary {
  pub component: String,
  pub total: usize,
  /// One "Status: count" line per status, most frequent first.
  pub status_breakdown: String,
  /// Mean aging in days, rounded to one decimal.
  pub avg_age_days: f64,
  pub latest_created: String,
  pub oldest_created: String,
}

/// Group rows by component with counts, status breakdown, average age, and
/// the created-date range. Sorted by total descending, then component name
/// ascending.
pub fn summarize_components(rows: &[Row]) -> Vec<ComponentSummary> {
  let mut groups: BTreeMap<&str, Vec<&Row>> = BTreeMap::new();
  for row in rows {
    groups.entry(row.component.as_str()).or_default().push(row);
  }

  let mut summaries: Vec<ComponentSummary> = groups
    .into_iter()
    .map(|(component, members)| {
      let total = members.len();
      let age_sum: i64 = members.iter().map(|r| r.aging_days).sum();
      let avg_age_days = (age_sum as f64 / total as f64 * 10.0).round() / 10.0;
      let latest_created = members.iter().map(|r| r.created.as_str()).max().unwrap_or_default();
      let oldest_created = members.iter().map(|r| r.created.as_str()).min().unwrap_or_default();

      ComponentSummary {
        component: component.to_string(),
        total,
        status_breakdown: breakdown_text(members.iter().map(|r| r.status.as_str())),
        avg_age_days,
        latest_created: latest_created.to_string(),
        oldest_created: oldest_created.to_string(),
      }
    })
    .collect();

  summaries.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.component.cmp(&b.component)));
  summaries
}

/// Count rows per status, most frequent first, ties alphabetical.
pub fn status_counts(rows: &[Row]) -> Vec<(String, usize)> {
  let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
  for row in rows {
    *counts.entry(row.status.as_str()).or_default() += 1;
  }

  let mut counts: Vec<(String, usize)> = counts.into_iter().map(|(k, v)| (k.to_string(), v)).collect();
  counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
  counts
}

/// Number of rows whose component resolved to the missing-component default.
pub fn no_component_count(rows: &[Row]) -> usize {
  rows.iter().filter(|r| r.component == NO_COMPONENT).count()
}

/// Distinct assignee names, sorted ascending.
pub fn unique_assignees(rows: &[Row]) -> Vec<String> {
  let names: std::collections::BTreeSet<&str> = rows.iter().map(|r| r.assignee.as_str()).collect();
  names.into_iter().map(|name| name.to_string()).collect()
}

/// Rows assigned to the given developer, in input order.
///
/// Matching is exact on the resolved assignee display name, including the
/// "Unassigned" default.
pub fn rows_for_assignee<'a>(rows: &'a [Row], assignee: &str) -> Vec<&'a Row> {
  rows.iter().filter(|r| r.assignee == assignee).collect()
}

/// Utilization metrics for one developer.
#[derive(Debug, PartialEq, Eq)]
pub struct AssigneeSummary {
  pub assignee: String,
  pub total: usize,
  pub in_progress: usize,
  pub done: usize,
  pub to_do: usize,
}

/// Headline ticket counts for one developer: total workload plus the
/// three tracked workflow statuses. Other statuses count toward the total
/// only.
pub fn summarize_assignee(rows: &[Row], assignee: &str) -> AssigneeSummary {
  let mine = rows_for_assignee(rows, assignee);
  let count_status = |status: &str| mine.iter().filter(|r| r.status == status).count();

  AssigneeSummary {
    assignee: assignee.to_string(),
    total: mine.len(),
    in_progress: count_status("In Progress"),
    done: count_status("Done"),
    to_do: count_status("To Do"),
  }
}

/// Headline counts for a normalized dataset.
#[derive(Debug, PartialEq, Eq)]
pub struct DatasetStats {
  pub total: usize,
  pub unique_components: usize,
  pub unique_statuses: usize,
  pub unique_assignees: usize,
}

pub fn dataset_stats(rows: &[Row]) -> DatasetStats {
  DatasetStats {
    total: rows.len(),
    unique_components: unique_count(rows.iter().map(|r| r.component.as_str())),
    unique_statuses: unique_count(rows.iter().map(|r| r.status.as_str())),
    unique_assignees: unique_count(rows.iter().map(|r| r.assignee.as_str())),
  }
}

fn unique_count<'a>(values: impl Iterator<Item = &'a str>) -> usize {
  values.collect::<std::collections::BTreeSet<_>>().len()
}

fn breakdown_text<'a>(statuses: impl Iterator<Item = &'a str>) -> String {
  let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
  for status in statuses {
    *counts.entry(status).or_default() += 1;
  }

  let mut counts: Vec<(&str, usize)> = counts.into_iter().collect();
  counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
  counts
    .into_iter()
    .map(|(status, count)| format!("{status}: {count}"))
    .collect::<Vec<_>>()
    .join("\n")
}
