//! JIRA API request and response types.
//!
//! These types model the subset of the JIRA REST API v2 used to link commits
//! to issues. Comment bodies in v2 are plain wiki-markup strings.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use super::error::ApiError;

/// A comment on a JIRA issue.
///
/// Sent as `{"body": "..."}` to `POST /rest/api/2/issue/{issueKey}/comment`
/// and returned by the same endpoint and by the comment listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Comment {
    /// The comment ID, assigned by JIRA.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// The comment text.
    pub body: String,
    /// The user who authored the comment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<CommentAuthor>,
    /// When the comment was created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
}

impl Comment {
    /// Create a new comment with the given body.
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            id: None,
            body: body.into(),
            author: None,
            created: None,
        }
    }

    /// Whether the comment body mentions the given text.
    pub fn mentions(&self, needle: &str) -> bool {
        self.body.contains(needle)
    }
}

/// The author of a comment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CommentAuthor {
    /// The username (server/data center installations).
    #[serde(default)]
    pub name: Option<String>,
    /// The user's display name.
    #[serde(default)]
    pub display_name: Option<String>,
}

/// A page of comments.
///
/// Returned by `GET /rest/api/2/issue/{issueKey}/comment`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentsPage {
    /// The index of the first result.
    #[serde(default)]
    pub start_at: Option<u32>,
    /// Maximum results requested.
    #[serde(default)]
    pub max_results: Option<u32>,
    /// Total number of comments.
    #[serde(default)]
    pub total: Option<u32>,
    /// The list of comments.
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl CommentsPage {
    /// Whether any comment body mentions the given text.
    pub fn any_mentions(&self, needle: &str) -> bool {
        self.comments.iter().any(|c| c.mentions(needle))
    }
}

/// The outcome of a call that received an HTTP response.
///
/// A non-2xx status is ordinary data: `body` is `None` and `error_body`
/// holds whatever text the server sent back.
#[derive(Debug, Clone)]
pub struct ApiResponse<T> {
    status: StatusCode,
    body: Option<T>,
    error_body: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Wrap a 2xx response. `body` is `None` when the server sent nothing.
    pub(crate) fn success(status: StatusCode, body: Option<T>) -> Self {
        Self {
            status,
            body,
            error_body: None,
        }
    }

    /// Wrap a non-2xx response, keeping its raw text for diagnostics.
    pub(crate) fn failure(status: StatusCode, error_body: String) -> Self {
        Self {
            status,
            body: None,
            error_body: Some(error_body).filter(|b| !b.is_empty()),
        }
    }

    /// The HTTP status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// The HTTP status code as a number.
    pub fn code(&self) -> u16 {
        self.status.as_u16()
    }

    /// Whether the status is 2xx.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// The parsed body, if the call succeeded and the server sent one.
    pub fn body(&self) -> Option<&T> {
        self.body.as_ref()
    }

    /// Consume the envelope, returning the parsed body.
    pub fn into_body(self) -> Option<T> {
        self.body
    }

    /// The raw text of an error response.
    pub fn error_body(&self) -> Option<&str> {
        self.error_body.as_deref()
    }

    /// Describe a non-2xx status as an [`ApiError`].
    ///
    /// Returns `None` for a successful response.
    pub fn error(&self, context: &str) -> Option<ApiError> {
        if self.is_success() {
            return None;
        }
        Some(ApiError::from_response(
            self.status,
            context,
            self.error_body().unwrap_or_default(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comment_serializes_body_only() {
        let comment = Comment::new("This is a comment");
        let json = serde_json::to_string(&comment).unwrap();
        assert_eq!(json, r#"{"body":"This is a comment"}"#);
    }

    #[test]
    fn test_parse_comment() {
        let json = r#"{
            "self": "https://jira.example.com/rest/api/2/issue/10010/comment/10000",
            "id": "10000",
            "author": {
                "name": "fred",
                "displayName": "Fred F. User",
                "active": false
            },
            "body": "Lorem ipsum dolor sit amet",
            "created": "2016-03-02T13:52:30.123+0000"
        }"#;

        let comment: Comment = serde_json::from_str(json).unwrap();
        assert_eq!(comment.id.as_deref(), Some("10000"));
        assert_eq!(comment.body, "Lorem ipsum dolor sit amet");
        let author = comment.author.unwrap();
        assert_eq!(author.display_name.as_deref(), Some("Fred F. User"));
    }

    #[test]
    fn test_parse_minimal_comments_page() {
        let json = r#"{ "comments" : [{"body":"commitId"}, {"body":"commitId2"}] }"#;

        let page: CommentsPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.comments.len(), 2);
        assert!(page.total.is_none());
        assert!(page.any_mentions("commitId2"));
        assert!(!page.any_mentions("newOne"));
    }

    #[test]
    fn test_parse_comments_page_without_comments() {
        let page: CommentsPage = serde_json::from_str("{}").unwrap();
        assert!(page.comments.is_empty());
        assert!(!page.any_mentions(""));
    }

    #[test]
    fn test_failure_envelope_drops_empty_error_body() {
        let response: ApiResponse<Comment> =
            ApiResponse::failure(StatusCode::NOT_FOUND, String::new());
        assert_eq!(response.code(), 404);
        assert!(!response.is_success());
        assert!(response.body().is_none());
        assert!(response.error_body().is_none());
        assert!(matches!(
            response.error("TEST-1"),
            Some(ApiError::NotFound(ref ctx)) if ctx == "TEST-1"
        ));
    }

    #[test]
    fn test_success_envelope_has_no_error() {
        let response = ApiResponse::success(StatusCode::OK, Some(Comment::new("hi")));
        assert!(response.error("TEST-1").is_none());
        assert_eq!(response.into_body().unwrap().body, "hi");
    }
}
