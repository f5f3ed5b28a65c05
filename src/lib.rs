//! # gitjira
//!
//! Links GitLab commits to the JIRA issues their messages reference, posting
//! one comment per commit and issue.

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod linker;
pub mod logging;

pub use api::{ApiError, ApiResponse, Comment, JiraClient};
pub use config::JiraConfig;
pub use error::AppError;
pub use linker::{Commit, CommitLinker, LinkOutcome, LinkReport};
