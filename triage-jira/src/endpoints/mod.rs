//! # Jira API Endpoints
//!
//! Endpoint implementations for the Jira resources the reporting pipeline
//! consumes: issue search and the authenticated-user lookup (on the client).

pub mod search;
