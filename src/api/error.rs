//! API error types for the JIRA client.
//!
//! Only faults are errors here. A non-2xx status is returned to the caller
//! inside an [`ApiResponse`](super::ApiResponse); [`ApiError::from_status`]
//! turns one into a readable message when the caller wants to report it.

use thiserror::Error;

/// Errors that can occur when interacting with the JIRA API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Authentication failed - invalid username or password.
    #[error("Authentication failed: check your username and password")]
    Unauthorized,

    /// Permission denied - user lacks access to the resource.
    #[error("Permission denied: you don't have access to this resource")]
    Forbidden,

    /// Resource not found.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Rate limited by the JIRA API.
    #[error("Rate limited: please wait before retrying")]
    RateLimited,

    /// JIRA server error.
    #[error("JIRA server error: {0}")]
    ServerError(String),

    /// Network or HTTP transport error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A success response whose body could not be parsed.
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
}

/// Result type for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

impl ApiError {
    /// Create an error from an HTTP status code.
    pub fn from_status(status: reqwest::StatusCode, context: &str) -> Self {
        match status.as_u16() {
            401 => ApiError::Unauthorized,
            403 => ApiError::Forbidden,
            404 => ApiError::NotFound(context.to_string()),
            429 => ApiError::RateLimited,
            500..=599 => ApiError::ServerError(format!("HTTP {}: {}", status, context)),
            _ => ApiError::ServerError(format!("Unexpected HTTP {}: {}", status, context)),
        }
    }

    /// Create an error from a non-2xx response, using JIRA's error details
    /// when the body carries them.
    pub fn from_response(status: reqwest::StatusCode, fallback: &str, body: &str) -> Self {
        if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
            if let Some(arr) = json.get("errorMessages").and_then(|m| m.as_array()) {
                if !arr.is_empty() {
                    return ApiError::from_status(
                        status,
                        &arr.iter()
                            .filter_map(|v| v.as_str())
                            .collect::<Vec<_>>()
                            .join(", "),
                    );
                }
            }
            if let Some(obj) = json.get("errors").and_then(|e| e.as_object()) {
                let error_strings: Vec<String> =
                    obj.iter().map(|(k, v)| format!("{}: {}", k, v)).collect();
                if !error_strings.is_empty() {
                    return ApiError::from_status(status, &error_strings.join(", "));
                }
            }
        }

        ApiError::from_status(status, fallback)
    }

    /// Whether the error means no response was received at all.
    pub fn is_fault(&self) -> bool {
        matches!(self, ApiError::Network(_))
    }
}
