//! Linking commits to the JIRA issues they reference.
//!
//! For every issue referenced in a commit message the linker:
//! 1. checks that the issue exists,
//! 2. checks that no comment already mentions the commit,
//! 3. posts a comment pointing at the commit.
//!
//! Steps 1 and 2 both answer "skip" when JIRA cannot be reached, so an
//! unreachable server never produces a comment.

use std::collections::HashSet;
use std::fmt;

use tracing::{info, instrument, warn};

use crate::api::{Comment, JiraClient};

/// Author name used when a commit carries none.
const UNKNOWN_AUTHOR: &str = "Someone";

/// A commit to link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    /// The commit identifier (usually the SHA).
    pub id: String,
    /// The full commit message.
    pub message: String,
    /// Link to the commit in the source-control UI.
    pub url: Option<String>,
    /// The commit author's display name.
    pub author: Option<String>,
}

impl Commit {
    /// Create a commit with only an id and message.
    pub fn new(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            message: message.into(),
            url: None,
            author: None,
        }
    }

    /// Set the commit URL.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Set the commit author.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Build the comment posted on referenced issues.
    ///
    /// The body always contains the commit id, which is what
    /// [`JiraClient::is_issue_already_commented`] looks for.
    pub fn to_comment(&self) -> Comment {
        let author = self.author.as_deref().unwrap_or(UNKNOWN_AUTHOR);
        let mut body = format!("{} mentioned this issue in commit {}", author, self.id);
        if let Some(url) = &self.url {
            body.push_str(&format!(" ({})", url));
        }
        body.push_str(&format!("\n\n{{quote}}{}{{quote}}", self.message.trim()));
        Comment::new(body)
    }
}

/// What happened to one referenced issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkOutcome {
    /// A comment was posted.
    Commented,
    /// A comment mentioning the commit already exists, or that could not be ruled out.
    AlreadyCommented,
    /// The issue does not exist or could not be looked up.
    IssueNotFound,
    /// The key appeared earlier in the same message.
    Duplicate,
    /// JIRA answered the comment request with an error status.
    Rejected(u16),
    /// The comment request got no usable response.
    Failed(String),
}

impl fmt::Display for LinkOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkOutcome::Commented => write!(f, "commented"),
            LinkOutcome::AlreadyCommented => write!(f, "already commented"),
            LinkOutcome::IssueNotFound => write!(f, "issue not found"),
            LinkOutcome::Duplicate => write!(f, "duplicate reference"),
            LinkOutcome::Rejected(status) => write!(f, "rejected with HTTP {}", status),
            LinkOutcome::Failed(msg) => write!(f, "failed: {}", msg),
        }
    }
}

/// The per-issue results of linking one commit, in message order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkReport {
    pub results: Vec<(String, LinkOutcome)>,
}

impl LinkReport {
    /// Number of comments posted.
    pub fn commented(&self) -> usize {
        self.results
            .iter()
            .filter(|(_, outcome)| *outcome == LinkOutcome::Commented)
            .count()
    }

    /// Whether the message referenced no issue at all.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Posts commit references on JIRA issues.
#[derive(Debug)]
pub struct CommitLinker<'a> {
    client: &'a JiraClient,
}

impl<'a> CommitLinker<'a> {
    /// Create a linker that talks to JIRA through `client`.
    pub fn new(client: &'a JiraClient) -> Self {
        Self { client }
    }

    /// Link a commit to every issue its message references.
    ///
    /// Never fails; per-issue problems are recorded in the report.
    #[instrument(skip(self, commit), fields(commit_id = %commit.id))]
    pub async fn link(&self, commit: &Commit) -> LinkReport {
        let keys = self.client.extract_issues_from_message(&commit.message);
        if keys.is_empty() {
            info!("Commit references no issue");
            return LinkReport::default();
        }

        let comment = commit.to_comment();
        let mut seen = HashSet::new();
        let mut report = LinkReport::default();

        for key in keys {
            let outcome = if seen.insert(key.clone()) {
                self.link_issue(&key, &commit.id, &comment).await
            } else {
                LinkOutcome::Duplicate
            };
            info!(issue_key = %key, outcome = %outcome, "Processed issue reference");
            report.results.push((key, outcome));
        }

        report
    }

    async fn link_issue(&self, key: &str, commit_id: &str, comment: &Comment) -> LinkOutcome {
        if !self.client.is_existing_issue(key).await {
            return LinkOutcome::IssueNotFound;
        }

        if self.client.is_issue_already_commented(key, commit_id).await {
            return LinkOutcome::AlreadyCommented;
        }

        match self.client.comment_issue(key, comment).await {
            Ok(response) if response.is_success() => LinkOutcome::Commented,
            Ok(response) => {
                if let Some(err) = response.error(key) {
                    warn!(issue_key = %key, error = %err, "JIRA rejected the comment");
                }
                LinkOutcome::Rejected(response.code())
            }
            Err(e) => {
                warn!(issue_key = %key, error = %e, "Failed to post comment");
                LinkOutcome::Failed(e.to_string())
            }
        }
    }
}
