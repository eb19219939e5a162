//! # Triage Core Library
//!
//! Domain logic shared by the triage commands: environment-based credential
//! resolution, the issue field normalizer, tabular aggregation, JQL
//! building, CSV export, and terminal output helpers.

pub mod creds;
pub mod error;
pub mod export;
pub mod jql;
pub mod output;
pub mod report;

pub use creds::{JiraCredentials, SmtpSettings};
pub use error::TriageError;
pub use jql::ReportFilter;
pub use report::{AssigneeSummary, ComponentSummary, DatasetStats, Row, normalize};
