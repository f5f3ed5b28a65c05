//! JIRA API client and types.
//!
//! This module provides the interface for communicating with the JIRA REST API.

mod auth;
mod client;
pub mod error;
mod issue_key;
mod types;

pub use auth::Auth;
pub use client::JiraClient;
pub use error::ApiError;
pub use issue_key::extract_issue_keys;
pub use types::{ApiResponse, Comment, CommentAuthor, CommentsPage};
