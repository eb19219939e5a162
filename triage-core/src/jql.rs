//! Dynamic JQL assembly for the report commands.
//!
//! A request-scoped [`ReportFilter`] carries the selected project,
//! component, and created-date range, and renders the JQL string handed to
//! the search endpoint. The text is never parsed back; the server is the
//! only JQL authority.

use chrono::NaiveDate;

/// Filter selections for one report run.
#[derive(Debug, Clone)]
pub struct ReportFilter {
  pub project: String,
  /// Statuses excluded from every report query.
  pub excluded_statuses: Vec<String>,
  pub component: Option<String>,
  pub created_since: Option<NaiveDate>,
  pub created_until: Option<NaiveDate>,
}

impl ReportFilter {
  pub fn new(project: impl Into<String>) -> Self {
    Self {
      project: project.into(),
      excluded_statuses: vec!["Queue".to_string()],
      component: None,
      created_since: None,
      created_until: None,
    }
  }

  /// Render the filter as a JQL query ordered by update time, newest first.
  pub fn to_jql(&self) -> String {
    let mut parts = vec![format!("project = {}", self.project)];

    if !self.excluded_statuses.is_empty() {
      parts.push(format!("status not in ({})", self.excluded_statuses.join(", ")));
    }
    if let Some(component) = &self.component {
      parts.push(format!("component = \"{component}\""));
    }
    if let Some(since) = self.created_since {
      parts.push(format!("created >= \"{since}\""));
    }
    if let Some(until) = self.created_until {
      parts.push(format!("created <= \"{until}\""));
    }

    format!("{} ORDER BY updated DESC", parts.join(" AND "))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_default_filter() {
    let filter = ReportFilter::new("PGP");
    assert_eq!(filter.to_jql(), "project = PGP AND status not in (Queue) ORDER BY updated DESC");
  }

  #[test]
  fn test_full_filter() {
    let mut filter = ReportFilter::new("PGP");
    filter.component = Some("Gateway".to_string());
    filter.created_since = NaiveDate::from_ymd_opt(2024, 2, 14);
    filter.created_until = NaiveDate::from_ymd_opt(2024, 3, 15);

    assert_eq!(
      filter.to_jql(),
      "project = PGP AND status not in (Queue) AND component = \"Gateway\" \
       AND created >= \"2024-02-14\" AND created <= \"2024-03-15\" ORDER BY updated DESC"
    );
  }

  #[test]
  fn test_no_excluded_statuses() {
    let mut filter = ReportFilter::new("OPS");
    filter.excluded_statuses.clear();
    assert_eq!(filter.to_jql(), "project = OPS ORDER BY updated DESC");
  }
}
