//! JIRA API client implementation.
//!
//! This module provides the client used to link commits to JIRA issues over
//! the REST API v2. Each method performs exactly one request; nothing is
//! retried.
//!
//! The raw methods (`get_issue`, `comment_issue`, `get_comments`,
//! `server_info`) hand any received response back as an [`ApiResponse`],
//! whatever its status, and fail only when no usable response arrived. The
//! boolean helpers never fail: they fold faults into a fixed answer.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::{header, Client, Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, warn};

use super::auth::Auth;
use super::error::{ApiError, Result};
use super::issue_key::extract_issue_keys;
use super::types::{ApiResponse, Comment, CommentsPage};
use crate::config::JiraConfig;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Path prefix of the REST API v2.
const API_PREFIX: &str = "/rest/api/2";

/// The JIRA API client.
#[derive(Debug)]
pub struct JiraClient {
    /// The HTTP client.
    client: Client,
    /// The base URL for the JIRA instance, without trailing slash.
    base_url: String,
    /// Authentication credentials.
    auth: Auth,
}

impl JiraClient {
    /// Create a new JIRA client from configuration.
    ///
    /// Does not contact the server; use [`server_info`](Self::server_info)
    /// to check connectivity.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL cannot be parsed or the HTTP client
    /// cannot be built.
    #[instrument(skip(config), fields(base_url = %config.base_url, username = %config.username))]
    pub fn new(config: &JiraConfig) -> Result<Self> {
        let base_url = normalize_base_url(&config.base_url);
        Url::parse(&base_url)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;

        let client = Self::build_http_client()?;
        let auth = Auth::new(&config.username, &config.password);

        info!("JIRA client created");
        Ok(Self {
            client,
            base_url,
            auth,
        })
    }

    /// Build the HTTP client with appropriate settings.
    fn build_http_client() -> Result<Client> {
        Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(ApiError::Network)
    }

    /// Get a single issue by key.
    ///
    /// Calls `GET /rest/api/2/issue/{issueKey}`. A 404 for an unknown issue
    /// comes back as an envelope, not an error.
    #[instrument(skip(self), fields(issue_key = %key))]
    pub async fn get_issue(&self, key: &str) -> Result<ApiResponse<serde_json::Value>> {
        debug!("Fetching issue");
        self.send(self.request(Method::GET, &issue_path(key))).await
    }

    /// Post a comment on an issue.
    ///
    /// Calls `POST /rest/api/2/issue/{issueKey}/comment` with
    /// `{"body": "..."}` and returns the comment JIRA created.
    #[instrument(skip(self, comment), fields(issue_key = %key))]
    pub async fn comment_issue(&self, key: &str, comment: &Comment) -> Result<ApiResponse<Comment>> {
        debug!("Posting comment");
        let url = format!("{}/comment", issue_path(key));
        let request = self
            .request(Method::POST, &url)
            .json(&Comment::new(comment.body.as_str()));
        self.send(request).await
    }

    /// List the comments of an issue.
    ///
    /// Calls `GET /rest/api/2/issue/{issueKey}/comment`.
    #[instrument(skip(self), fields(issue_key = %key))]
    pub async fn get_comments(&self, key: &str) -> Result<ApiResponse<CommentsPage>> {
        debug!("Fetching comments");
        let url = format!("{}/comment", issue_path(key));
        self.send(self.request(Method::GET, &url)).await
    }

    /// Fetch server information.
    ///
    /// Calls `GET /rest/api/2/serverInfo`. Useful as a connectivity and
    /// credentials check.
    #[instrument(skip(self))]
    pub async fn server_info(&self) -> Result<ApiResponse<HashMap<String, serde_json::Value>>> {
        debug!("Fetching server info");
        let url = format!("{}/serverInfo", API_PREFIX);
        self.send(self.request(Method::GET, &url)).await
    }

    /// Check whether an issue exists.
    ///
    /// True only for a 200 response. Any other status, and any failure to
    /// get a response, yields `false`.
    #[instrument(skip(self), fields(issue_key = %key))]
    pub async fn is_existing_issue(&self, key: &str) -> bool {
        match self.get_issue(key).await {
            Ok(response) => {
                let exists = response.status() == StatusCode::OK;
                debug!(status = response.code(), exists, "Issue lookup finished");
                exists
            }
            Err(e) => {
                warn!(error = %e, "Issue lookup failed, treating issue as missing");
                false
            }
        }
    }

    /// Check whether an issue already has a comment mentioning `commit_id`.
    ///
    /// True when any comment body contains `commit_id`. When the comments
    /// cannot be read (no response, an error status, an empty body or a body
    /// that does not parse) this also returns `true`, so the caller does not
    /// post.
    #[instrument(skip(self), fields(issue_key = %key, commit_id = %commit_id))]
    pub async fn is_issue_already_commented(&self, key: &str, commit_id: &str) -> bool {
        match self.get_comments(key).await {
            Ok(response) if response.is_success() => match response.body() {
                Some(page) => {
                    let commented = page.any_mentions(commit_id);
                    debug!(commented, "Comment lookup finished");
                    commented
                }
                None => {
                    warn!(
                        status = response.code(),
                        "Comment lookup returned no body, treating issue as already commented"
                    );
                    true
                }
            },
            Ok(response) => {
                warn!(
                    status = response.code(),
                    "Comment lookup rejected, treating issue as already commented"
                );
                true
            }
            Err(e) => {
                warn!(error = %e, "Comment lookup failed, treating issue as already commented");
                true
            }
        }
    }

    /// Extract the issue keys referenced in a commit message.
    ///
    /// See [`extract_issue_keys`] for the accepted form.
    pub fn extract_issues_from_message(&self, message: &str) -> Vec<String> {
        extract_issue_keys(message)
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Start an authenticated request to a path under the base URL.
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}{}", self.base_url, path))
            .header(header::AUTHORIZATION, self.auth.header_value())
            .header(header::ACCEPT, "application/json")
    }

    /// Send a request and wrap the response.
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<ApiResponse<T>> {
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Turn an HTTP response into an envelope, parsing the body on success.
    async fn handle_response<T: DeserializeOwned>(response: Response) -> Result<ApiResponse<T>> {
        let status = response.status();

        if status.is_success() {
            let text = response.text().await?;
            if text.trim().is_empty() {
                return Ok(ApiResponse::success(status, None));
            }
            let body = serde_json::from_str::<T>(&text)
                .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse response: {}", e)))?;
            Ok(ApiResponse::success(status, Some(body)))
        } else {
            let url = response.url().to_string();
            let error_body = response.text().await.unwrap_or_default();
            debug!(status = status.as_u16(), url = %url, "Error response body: {}", error_body);
            Ok(ApiResponse::failure(status, error_body))
        }
    }
}

/// Build the path of an issue resource, encoding the key.
fn issue_path(key: &str) -> String {
    format!("{}/issue/{}", API_PREFIX, urlencoding::encode(key))
}

/// Normalize the base URL by removing trailing slashes and warning about
/// plain HTTP.
fn normalize_base_url(url: &str) -> String {
    let url = url.trim_end_matches('/');

    // Not enforced, local test instances run on plain HTTP
    if !url.starts_with("https://") && !url.contains("localhost") && !url.contains("127.0.0.1") {
        warn!("URL does not use HTTPS: {}. This is insecure for production use.", url);
    }

    url.to_string()
}
