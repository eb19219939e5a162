//! Credential resolution from the environment.
//!
//! Jira and SMTP settings come from environment variables so the same
//! binary works under a shell, cron, or CI secret injection. Missing Jira
//! variables are fatal before any request goes out; SMTP settings are only
//! demanded by the reminder command.

use url::Url;

use crate::error::TriageError;

/// Environment variable holding the Jira base URL.
pub const ENV_JIRA_URL: &str = "JIRA_URL";
/// Environment variable holding the Jira account email.
pub const ENV_JIRA_EMAIL: &str = "JIRA_EMAIL";
/// Environment variable holding the Jira API token.
pub const ENV_JIRA_TOKEN: &str = "JIRA_TOKEN";

pub const ENV_SMTP_SERVER: &str = "SMTP_SERVER";
pub const ENV_SMTP_PORT: &str = "SMTP_PORT";
pub const ENV_SMTP_USERNAME: &str = "SMTP_USERNAME";
pub const ENV_SMTP_PASSWORD: &str = "SMTP_PASSWORD";
pub const ENV_SENDER_EMAIL: &str = "SENDER_EMAIL";

const DEFAULT_SMTP_SERVER: &str = "smtp.gmail.com";
const DEFAULT_SMTP_PORT: u16 = 587;

/// Jira connection parameters.
#[derive(Debug, Clone)]
pub struct JiraCredentials {
  pub base_url: String,
  pub email: String,
  pub api_token: String,
}

impl JiraCredentials {
  /// Resolve Jira credentials from the environment.
  pub fn from_env() -> Result<Self, TriageError> {
    let base_url = ensure_url_scheme(&required_var(ENV_JIRA_URL)?)?;
    let email = required_var(ENV_JIRA_EMAIL)?;
    let api_token = required_var(ENV_JIRA_TOKEN)?;

    Ok(Self {
      base_url,
      email,
      api_token,
    })
  }
}

/// SMTP submission parameters for the reminder notifier.
#[derive(Debug, Clone)]
pub struct SmtpSettings {
  pub server: String,
  pub port: u16,
  pub username: String,
  pub password: String,
  pub sender: String,
}

impl SmtpSettings {
  /// Resolve SMTP settings from the environment. Server and port fall back
  /// to the Gmail submission defaults; the rest are required.
  pub fn from_env() -> Result<Self, TriageError> {
    let server = optional_var(ENV_SMTP_SERVER).unwrap_or_else(|| DEFAULT_SMTP_SERVER.to_string());
    let port = match optional_var(ENV_SMTP_PORT) {
      Some(raw) => raw.parse::<u16>().map_err(|e| TriageError::InvalidCredentials {
        var: ENV_SMTP_PORT,
        reason: e.to_string(),
      })?,
      None => DEFAULT_SMTP_PORT,
    };

    Ok(Self {
      server,
      port,
      username: required_var(ENV_SMTP_USERNAME)?,
      password: required_var(ENV_SMTP_PASSWORD)?,
      sender: required_var(ENV_SENDER_EMAIL)?,
    })
  }
}

fn optional_var(var: &'static str) -> Option<String> {
  match std::env::var(var) {
    Ok(value) if !value.trim().is_empty() => Some(value),
    _ => None,
  }
}

fn required_var(var: &'static str) -> Result<String, TriageError> {
  optional_var(var).ok_or(TriageError::MissingCredentials { var })
}

/// Ensure the Jira base URL carries a scheme, assuming https:// when the
/// environment only names a host, and strip any trailing slash.
pub fn ensure_url_scheme(host: &str) -> Result<String, TriageError> {
  let candidate = if host.starts_with("http://") || host.starts_with("https://") {
    host.to_string()
  } else {
    format!("https://{host}")
  };

  Url::parse(&candidate).map_err(|e| TriageError::InvalidCredentials {
    var: ENV_JIRA_URL,
    reason: e.to_string(),
  })?;

  Ok(candidate.trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
  use std::sync::{Mutex, MutexGuard, OnceLock};

  use super::*;

  /// Environment mutation is process-global; serialize the tests touching it.
  fn env_lock() -> MutexGuard<'static, ()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK
      .get_or_init(|| Mutex::new(()))
      .lock()
      .unwrap_or_else(|poisoned| poisoned.into_inner())
  }

  fn clear_jira_env() {
    for var in [ENV_JIRA_URL, ENV_JIRA_EMAIL, ENV_JIRA_TOKEN] {
      std::env::remove_var(var);
    }
  }

  fn clear_smtp_env() {
    for var in [
      ENV_SMTP_SERVER,
      ENV_SMTP_PORT,
      ENV_SMTP_USERNAME,
      ENV_SMTP_PASSWORD,
      ENV_SENDER_EMAIL,
    ] {
      std::env::remove_var(var);
    }
  }

  #[test]
  fn test_jira_credentials_from_env() {
    let _guard = env_lock();
    clear_jira_env();

    std::env::set_var(ENV_JIRA_URL, "jira.example.com");
    std::env::set_var(ENV_JIRA_EMAIL, "pm@example.com");
    std::env::set_var(ENV_JIRA_TOKEN, "token-123");

    let creds = JiraCredentials::from_env().unwrap();
    assert_eq!(creds.base_url, "https://jira.example.com");
    assert_eq!(creds.email, "pm@example.com");
    assert_eq!(creds.api_token, "token-123");

    clear_jira_env();
  }

  #[test]
  fn test_jira_credentials_missing_token() {
    let _guard = env_lock();
    clear_jira_env();

    std::env::set_var(ENV_JIRA_URL, "https://jira.example.com");
    std::env::set_var(ENV_JIRA_EMAIL, "pm@example.com");

    let err = JiraCredentials::from_env().unwrap_err();
    assert!(err.to_string().contains("JIRA_TOKEN"));

    clear_jira_env();
  }

  #[test]
  fn test_smtp_settings_defaults() {
    let _guard = env_lock();
    clear_smtp_env();

    std::env::set_var(ENV_SMTP_USERNAME, "bot@example.com");
    std::env::set_var(ENV_SMTP_PASSWORD, "app-password");
    std::env::set_var(ENV_SENDER_EMAIL, "bot@example.com");

    let settings = SmtpSettings::from_env().unwrap();
    assert_eq!(settings.server, "smtp.gmail.com");
    assert_eq!(settings.port, 587);

    clear_smtp_env();
  }

  #[test]
  fn test_smtp_settings_bad_port() {
    let _guard = env_lock();
    clear_smtp_env();

    std::env::set_var(ENV_SMTP_PORT, "not-a-port");
    std::env::set_var(ENV_SMTP_USERNAME, "bot@example.com");
    std::env::set_var(ENV_SMTP_PASSWORD, "app-password");
    std::env::set_var(ENV_SENDER_EMAIL, "bot@example.com");

    let err = SmtpSettings::from_env().unwrap_err();
    assert!(err.to_string().contains("SMTP_PORT"));

    clear_smtp_env();
  }

  #[test]
  fn test_ensure_url_scheme() {
    assert_eq!(ensure_url_scheme("jira.example.com").unwrap(), "https://jira.example.com");
    assert_eq!(
      ensure_url_scheme("http://jira.internal:8080").unwrap(),
      "http://jira.internal:8080"
    );
    assert_eq!(
      ensure_url_scheme("https://jira.example.com/").unwrap(),
      "https://jira.example.com"
    );
  }
}
