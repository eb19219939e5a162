//! # Client Creation
//!
//! Centralized construction of the authenticated Jira client plus the
//! tokio runtime the synchronous command handlers drive it with.

use anyhow::{Context, Result};
use tokio::runtime::Runtime;
use triage_core::creds::JiraCredentials;
use triage_jira::{JiraClient, create_jira_client};

/// Creates an authenticated Jira client from environment credentials.
pub fn create_jira_client_from_env() -> Result<(JiraCredentials, JiraClient)> {
  let credentials = JiraCredentials::from_env().context("Failed to resolve Jira credentials")?;
  let client = create_jira_client(&credentials.base_url, &credentials.email, &credentials.api_token);
  Ok((credentials, client))
}

/// Creates a tokio runtime and an authenticated Jira client.
///
/// This is a convenience function for command handlers that block on the
/// async client.
pub fn create_jira_runtime_and_client() -> Result<(Runtime, JiraCredentials, JiraClient)> {
  let rt = Runtime::new().context("Failed to create async runtime")?;
  let (credentials, client) = create_jira_client_from_env()?;
  Ok((rt, credentials, client))
}
