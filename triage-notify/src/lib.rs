//! # Reminder Notifier
//!
//! Sends one reminder email per issue whose component resolved to the
//! missing-component default. The mail transport sits behind the [`Mailer`]
//! trait so the batch logic stays testable without a live SMTP server; the
//! production implementation is a lettre STARTTLS session with credential
//! login.
//!
//! Delivery is best effort: rows without a resolvable contact address are
//! silently skipped, and any transport failure aborts the remainder of the
//! batch without retry.

use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use tracing::{debug, warn};
use triage_core::creds::SmtpSettings;
use triage_core::error::TriageError;
use triage_core::report::{NO_COMPONENT, Row};

/// One rendered reminder message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderEmail {
  pub to: String,
  pub subject: String,
  pub body: String,
}

impl ReminderEmail {
  /// Render the reminder for one row, linking back to the issue.
  pub fn for_row(row: &Row, jira_base_url: &str, to: &str) -> Self {
    let subject = format!("Action Required: Add Component to Jira Ticket {}", row.key);
    let body = format!(
      "Hello,\n\n\
       This is a reminder that the following Jira ticket needs a component assigned:\n\n\
       Ticket: {key}\n\
       Summary: {summary}\n\
       Status: {status}\n\
       Created: {created}\n\n\
       Please add an appropriate component to this ticket at your earliest convenience.\n\n\
       You can access the ticket here: {base}/browse/{key}\n\n\
       Best regards,\n\
       Triage Bot\n",
      key = row.key,
      summary = row.summary,
      status = row.status,
      created = row.created,
      base = jira_base_url.trim_end_matches('/'),
    );

    Self {
      to: to.to_string(),
      subject,
      body,
    }
  }
}

/// Mail transport seam.
pub trait Mailer {
  /// Send one message from `sender`. A transport error is terminal for the
  /// whole batch.
  fn send(&mut self, sender: &str, email: &ReminderEmail) -> Result<(), TriageError>;
}

/// Production mailer backed by a lettre SMTP transport with STARTTLS
/// upgrade and credential login.
pub struct SmtpMailer {
  transport: SmtpTransport,
}

impl SmtpMailer {
  /// Build a transport for the given SMTP settings. The connection itself
  /// is established lazily on the first send.
  pub fn new(settings: &SmtpSettings) -> Result<Self, TriageError> {
    let transport = SmtpTransport::starttls_relay(&settings.server)
      .map_err(|e| TriageError::NotifierTransport { reason: e.to_string() })?
      .port(settings.port)
      .credentials(Credentials::new(settings.username.clone(), settings.password.clone()))
      .build();

    Ok(Self { transport })
  }
}

impl Mailer for SmtpMailer {
  fn send(&mut self, sender: &str, email: &ReminderEmail) -> Result<(), TriageError> {
    let from: Mailbox = sender.parse().map_err(|err| TriageError::NotifierTransport {
      reason: format!("Invalid sender address '{sender}': {err}"),
    })?;
    let to: Mailbox = email.to.parse().map_err(|err| TriageError::NotifierTransport {
      reason: format!("Invalid recipient address '{}': {err}", email.to),
    })?;

    let message = Message::builder()
      .from(from)
      .to(to)
      .subject(email.subject.clone())
      .body(email.body.clone())
      .map_err(|e| TriageError::NotifierTransport { reason: e.to_string() })?;

    self
      .transport
      .send(&message)
      .map_err(|e| TriageError::NotifierTransport { reason: e.to_string() })?;
    Ok(())
  }
}

/// Outcome of one reminder batch.
#[derive(Debug, PartialEq, Eq)]
pub struct ReminderBatch {
  /// Messages handed to the transport.
  pub sent: usize,
  /// Rows skipped because no contact address was resolvable.
  pub skipped: usize,
}

/// Rows that a reminder batch would target.
pub fn pending_reminders(rows: &[Row]) -> Vec<&Row> {
  rows.iter().filter(|row| row.component == NO_COMPONENT).collect()
}

/// Send one reminder per missing-component row.
///
/// Rows without an assignee address are skipped and counted; the first
/// transport error aborts the batch and surfaces as a single failure, with
/// earlier sends already delivered (no exactly-once guarantee).
pub fn send_component_reminders(
  rows: &[Row],
  jira_base_url: &str,
  sender: &str,
  mailer: &mut dyn Mailer,
) -> Result<ReminderBatch, TriageError> {
  let mut sent = 0;
  let mut skipped = 0;

  for row in pending_reminders(rows) {
    let Some(address) = row.assignee_email.as_deref() else {
      debug!(key = %row.key, "No contact address resolvable, skipping reminder");
      skipped += 1;
      continue;
    };

    let email = ReminderEmail::for_row(row, jira_base_url, address);
    if let Err(err) = mailer.send(sender, &email) {
      warn!(key = %row.key, sent, "Reminder batch aborted by transport failure");
      return Err(err);
    }
    sent += 1;
  }

  Ok(ReminderBatch { sent, skipped })
}

#[cfg(test)]
mod tests {
  use triage_core::report::{CATEGORY_NOT_SET, NO_PRIORITY, UNASSIGNED};

  use super::*;

  fn row(key: &str, component: &str, assignee_email: Option<&str>) -> Row {
    Row {
      key: key.to_string(),
      summary: format!("Summary {key}"),
      component: component.to_string(),
      status: "In Progress".to_string(),
      assignee: UNASSIGNED.to_string(),
      created: "2024-03-01".to_string(),
      updated: "2024-03-02".to_string(),
      issue_type: "Bug".to_string(),
      priority: NO_PRIORITY.to_string(),
      category: CATEGORY_NOT_SET.to_string(),
      aging_days: 3,
      assignee_email: assignee_email.map(|s| s.to_string()),
    }
  }

  /// Records every send; optionally fails from the nth message onward.
  struct RecordingMailer {
    sent: Vec<ReminderEmail>,
    fail_from: Option<usize>,
  }

  impl RecordingMailer {
    fn new() -> Self {
      Self {
        sent: Vec::new(),
        fail_from: None,
      }
    }
  }

  impl Mailer for RecordingMailer {
    fn send(&mut self, _sender: &str, email: &ReminderEmail) -> Result<(), TriageError> {
      if let Some(n) = self.fail_from {
        if self.sent.len() >= n {
          return Err(TriageError::NotifierTransport {
            reason: "connection reset".to_string(),
          });
        }
      }
      self.sent.push(email.clone());
      Ok(())
    }
  }

  #[test]
  fn test_sends_only_resolvable_missing_component_rows() {
    let rows = vec![
      row("PGP-1", NO_COMPONENT, Some("a@example.com")),
      row("PGP-2", "Gateway", Some("b@example.com")),
      row("PGP-3", NO_COMPONENT, None),
      row("PGP-4", NO_COMPONENT, Some("c@example.com")),
    ];
    let mut mailer = RecordingMailer::new();

    let batch = send_component_reminders(&rows, "https://jira.example.com", "bot@example.com", &mut mailer).unwrap();

    assert_eq!(batch, ReminderBatch { sent: 2, skipped: 1 });
    assert_eq!(mailer.sent.len(), 2);
    assert_eq!(mailer.sent[0].to, "a@example.com");
    assert_eq!(mailer.sent[1].to, "c@example.com");
  }

  #[test]
  fn test_transport_failure_aborts_batch() {
    let rows = vec![
      row("PGP-1", NO_COMPONENT, Some("a@example.com")),
      row("PGP-2", NO_COMPONENT, Some("b@example.com")),
      row("PGP-3", NO_COMPONENT, Some("c@example.com")),
    ];
    let mut mailer = RecordingMailer::new();
    mailer.fail_from = Some(1);

    let err = send_component_reminders(&rows, "https://jira.example.com", "bot@example.com", &mut mailer).unwrap_err();

    assert!(err.to_string().contains("Mail transport failure"));
    // The first message was already delivered; nothing is retried.
    assert_eq!(mailer.sent.len(), 1);
  }

  #[test]
  fn test_reminder_email_content() {
    let target = row("PGP-9", NO_COMPONENT, Some("dev@example.com"));
    let email = ReminderEmail::for_row(&target, "https://jira.example.com/", "dev@example.com");

    assert_eq!(email.subject, "Action Required: Add Component to Jira Ticket PGP-9");
    assert!(email.body.contains("Ticket: PGP-9"));
    assert!(email.body.contains("Summary: Summary PGP-9"));
    assert!(email.body.contains("https://jira.example.com/browse/PGP-9"));
  }

  #[test]
  fn test_pending_reminders_filter() {
    let rows = vec![
      row("PGP-1", "Gateway", None),
      row("PGP-2", NO_COMPONENT, None),
    ];
    let pending = pending_reminders(&rows);
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].key, "PGP-2");
  }
}
