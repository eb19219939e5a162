use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

/// Represents Jira authentication credentials
#[derive(Clone)]
pub struct JiraAuth {
  pub email: String,
  pub api_token: String,
}

/// Represents a Jira user
#[derive(Debug, Clone, Deserialize)]
pub struct JiraUser {
  #[serde(rename = "displayName")]
  pub display_name: String,
  #[serde(rename = "emailAddress", default)]
  pub email_address: Option<String>,
}

/// Represents a Jira issue
#[derive(Debug, Deserialize)]
pub struct JiraIssue {
  #[allow(dead_code)]
  pub id: String,
  pub key: String,
  pub fields: JiraIssueFields,
}

/// Represents Jira issue fields.
///
/// Only the fields the reporting pipeline asks for are modeled; anything
/// else the server returns (custom fields in particular) lands in `extra`
/// and can be looked up by field id.
#[derive(Debug, Deserialize)]
pub struct JiraIssueFields {
  pub summary: String,
  pub status: JiraIssueStatus,
  #[serde(default)]
  pub assignee: Option<JiraUser>,
  pub created: String,
  pub updated: String,
  #[serde(default)]
  pub components: Vec<JiraComponent>,
  #[serde(default)]
  pub issuetype: Option<JiraIssueType>,
  #[serde(default)]
  pub priority: Option<JiraPriority>,
  #[serde(flatten)]
  pub extra: BTreeMap<String, Value>,
}

impl JiraIssueFields {
  /// Look up a custom field by id (e.g. `customfield_21928`).
  ///
  /// Returns `None` when the field is absent or JSON null.
  pub fn custom_field(&self, field_id: &str) -> Option<CustomFieldValue> {
    self.extra.get(field_id).and_then(CustomFieldValue::from_json)
  }
}

/// Represents a Jira issue status
#[derive(Debug, Deserialize)]
pub struct JiraIssueStatus {
  #[allow(dead_code)]
  #[serde(default)]
  pub id: Option<String>,
  pub name: String,
}

/// Represents a Jira component
#[derive(Debug, Deserialize)]
pub struct JiraComponent {
  pub name: String,
}

/// Represents a Jira issue type
#[derive(Debug, Deserialize)]
pub struct JiraIssueType {
  pub name: String,
}

/// Represents a Jira priority
#[derive(Debug, Deserialize)]
pub struct JiraPriority {
  pub name: String,
}

/// A custom field value as Jira serves it.
///
/// Jira custom fields are polymorphic on the wire: plain scalars, option
/// objects carrying a `value` attribute, or entity objects carrying a
/// `name` attribute. Modeling the three shapes explicitly keeps the
/// resolution an exhaustive match instead of attribute probing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomFieldValue {
  /// A bare scalar (string, number, or boolean).
  Scalar(String),
  /// An object exposing a `value` attribute (select/option fields).
  ValueObject(String),
  /// An object exposing a `name` attribute (entity references).
  NamedObject(String),
}

impl CustomFieldValue {
  /// Classify a raw JSON value. Returns `None` for JSON null.
  pub fn from_json(value: &Value) -> Option<Self> {
    match value {
      Value::Null => None,
      Value::String(s) => Some(Self::Scalar(s.clone())),
      Value::Number(n) => Some(Self::Scalar(n.to_string())),
      Value::Bool(b) => Some(Self::Scalar(b.to_string())),
      Value::Object(map) => match (map.get("value"), map.get("name")) {
        (Some(Value::String(v)), _) => Some(Self::ValueObject(v.clone())),
        (_, Some(Value::String(n))) => Some(Self::NamedObject(n.clone())),
        // Unknown object shape: fall back to its JSON representation.
        _ => Some(Self::Scalar(value.to_string())),
      },
      Value::Array(_) => Some(Self::Scalar(value.to_string())),
    }
  }

  /// Resolve the carried text regardless of shape.
  pub fn into_string(self) -> String {
    match self {
      Self::Scalar(s) | Self::ValueObject(s) | Self::NamedObject(s) => s,
    }
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn test_jira_issue_deserialization() {
    let json = json!({
        "id": "10000",
        "key": "PGP-123",
        "fields": {
            "summary": "Payment webhook retries",
            "status": { "id": "3", "name": "In Progress" },
            "assignee": {
                "displayName": "Priya Sharma",
                "emailAddress": "priya@example.com"
            },
            "created": "2024-03-01T09:30:00.000+0530",
            "updated": "2024-03-04T17:12:45.000+0530",
            "components": [{ "name": "Gateway" }, { "name": "Webhooks" }],
            "issuetype": { "name": "Bug" },
            "priority": { "name": "High" },
            "customfield_21928": { "value": "Tech Debt" }
        }
    });

    let issue: JiraIssue = serde_json::from_value(json).unwrap();

    assert_eq!(issue.key, "PGP-123");
    assert_eq!(issue.fields.summary, "Payment webhook retries");
    assert_eq!(issue.fields.status.name, "In Progress");
    assert_eq!(issue.fields.assignee.as_ref().unwrap().display_name, "Priya Sharma");
    assert_eq!(issue.fields.components.len(), 2);
    assert_eq!(issue.fields.components[0].name, "Gateway");
    assert_eq!(issue.fields.priority.as_ref().unwrap().name, "High");
    assert_eq!(
      issue.fields.custom_field("customfield_21928"),
      Some(CustomFieldValue::ValueObject("Tech Debt".to_string()))
    );
  }

  #[test]
  fn test_jira_issue_deserialization_minimal_fields() {
    // Restricted field lists leave most optionals out entirely.
    let json = json!({
        "id": "10001",
        "key": "PGP-456",
        "fields": {
            "summary": "Stale session cleanup",
            "status": { "name": "Queue" },
            "created": "2024-02-10T11:00:00.000+0530",
            "updated": "2024-02-11T08:00:00.000+0530"
        }
    });

    let issue: JiraIssue = serde_json::from_value(json).unwrap();

    assert!(issue.fields.assignee.is_none());
    assert!(issue.fields.components.is_empty());
    assert!(issue.fields.issuetype.is_none());
    assert!(issue.fields.priority.is_none());
    assert!(issue.fields.custom_field("customfield_21928").is_none());
  }

  #[test]
  fn test_custom_field_scalar() {
    assert_eq!(
      CustomFieldValue::from_json(&json!("Platform")),
      Some(CustomFieldValue::Scalar("Platform".to_string()))
    );
    assert_eq!(
      CustomFieldValue::from_json(&json!(42)),
      Some(CustomFieldValue::Scalar("42".to_string()))
    );
    assert_eq!(
      CustomFieldValue::from_json(&json!(true)),
      Some(CustomFieldValue::Scalar("true".to_string()))
    );
  }

  #[test]
  fn test_custom_field_value_object_wins_over_name() {
    let value = json!({ "value": "Tech Debt", "name": "ignored", "id": "9" });
    assert_eq!(
      CustomFieldValue::from_json(&value),
      Some(CustomFieldValue::ValueObject("Tech Debt".to_string()))
    );
  }

  #[test]
  fn test_custom_field_named_object() {
    let value = json!({ "name": "Payments", "id": "12" });
    assert_eq!(
      CustomFieldValue::from_json(&value),
      Some(CustomFieldValue::NamedObject("Payments".to_string()))
    );
  }

  #[test]
  fn test_custom_field_unknown_object_coerces_to_json_text() {
    let value = json!({ "id": "77" });
    assert_eq!(
      CustomFieldValue::from_json(&value),
      Some(CustomFieldValue::Scalar("{\"id\":\"77\"}".to_string()))
    );
  }

  #[test]
  fn test_custom_field_null_is_absent() {
    assert_eq!(CustomFieldValue::from_json(&Value::Null), None);
  }
}
