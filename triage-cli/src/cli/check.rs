//! # Check Command
//!
//! Verifies the Jira and SMTP configuration: resolves credentials from the
//! environment, proves Jira connectivity via the authenticated-user
//! endpoint, and reports whether the reminder transport is configured.

use anyhow::Result;
use clap::Args;
use triage_core::creds::{JiraCredentials, SmtpSettings};
use triage_core::output::{print_error, print_header, print_info, print_success, print_warning};
use triage_jira::create_jira_client;

/// Command for verifying configuration
#[derive(Args)]
pub struct CheckArgs {}

/// Handle the check command
///
/// Each check reports its own outcome; a failed Jira check does not stop
/// the SMTP check from running.
pub(crate) fn handle_check_command(_check: CheckArgs) -> Result<()> {
  print_header("Jira configuration");
  let jira_ok = check_jira();

  print_header("SMTP configuration");
  let smtp_ok = check_smtp();

  if !jira_ok {
    print_error("Jira configuration is incomplete or rejected; fetch, report, and remind will fail.");
  } else if !smtp_ok {
    print_warning("SMTP configuration is incomplete; remind will fail until it is set.");
  }

  Ok(())
}

fn check_jira() -> bool {
  let credentials = match JiraCredentials::from_env() {
    Ok(credentials) => credentials,
    Err(err) => {
      print_error(&err.to_string());
      return false;
    }
  };

  print_info(&format!("URL: {}", credentials.base_url));
  print_info(&format!("Email: {}", credentials.email));
  print_info("Token: [hidden]");

  let rt = match tokio::runtime::Runtime::new() {
    Ok(rt) => rt,
    Err(err) => {
      print_error(&format!("Failed to create async runtime: {err}"));
      return false;
    }
  };

  let client = create_jira_client(&credentials.base_url, &credentials.email, &credentials.api_token);
  match rt.block_on(client.current_user()) {
    Ok(user) => {
      print_success(&format!("Connected to Jira as: {}", user.display_name));
      true
    }
    Err(err) => {
      print_error(&format!("Failed to connect to Jira: {err:#}"));
      false
    }
  }
}

fn check_smtp() -> bool {
  match SmtpSettings::from_env() {
    Ok(settings) => {
      print_info(&format!("Server: {}:{}", settings.server, settings.port));
      print_info(&format!("Username: {}", settings.username));
      print_info(&format!("Sender: {}", settings.sender));
      print_info("Password: [hidden]");
      print_success("SMTP settings loaded");
      true
    }
    Err(err) => {
      print_warning(&err.to_string());
      false
    }
  }
}
