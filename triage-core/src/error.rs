//! Error taxonomy for the triage pipeline.
//!
//! Typed variants for the conditions the commands distinguish; everything
//! else travels as `anyhow::Error` with context, and every variant is
//! converted to a displayed message at the command boundary.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TriageError {
  /// A required environment variable is unset. Fatal at startup, before
  /// any request is made.
  #[error("Missing required environment variable '{var}'")]
  MissingCredentials { var: &'static str },

  /// An environment variable is set but unusable.
  #[error("Invalid value in environment variable '{var}': {reason}")]
  InvalidCredentials { var: &'static str, reason: String },

  /// Pagination aborted mid-fetch. Non-fatal: the accumulated issues are
  /// still reported.
  #[error("Fetch aborted after {fetched} issue(s): {reason}")]
  PartialFetch { fetched: usize, reason: String },

  /// The reminder batch failed at the mail transport. Fatal to the batch,
  /// no per-message retry.
  #[error("Mail transport failure: {reason}")]
  NotifierTransport { reason: String },
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_error_display() {
    let err = TriageError::MissingCredentials { var: "JIRA_TOKEN" };
    assert_eq!(err.to_string(), "Missing required environment variable 'JIRA_TOKEN'");

    let err = TriageError::PartialFetch {
      fetched: 100,
      reason: "HTTP 500".to_string(),
    };
    assert!(err.to_string().contains("100 issue(s)"));
    assert!(err.to_string().contains("HTTP 500"));
  }
}
