//! JIRA connection configuration.

use std::fmt;

use serde::Deserialize;

use super::{ConfigError, Result};

/// Connection details for a JIRA instance.
///
/// The password is used for basic authentication; it may also be an API
/// token on JIRA Cloud.
#[derive(Clone, Deserialize, PartialEq, Eq)]
pub struct JiraConfig {
    /// The account used to post comments.
    pub username: String,

    /// The account password or API token.
    pub password: String,

    /// The JIRA instance URL (e.g., "https://jira.example.com").
    #[serde(alias = "url")]
    pub base_url: String,
}

impl JiraConfig {
    /// Create a new configuration.
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            base_url: base_url.into(),
        }
    }

    /// Validate this configuration.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::ValidationError` with details if validation fails.
    pub fn validate(&self) -> Result<()> {
        if self.username.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "username cannot be empty".to_string(),
            ));
        }

        if self.password.is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "password for '{}' cannot be empty",
                self.username
            )));
        }

        if self.base_url.is_empty() {
            return Err(ConfigError::ValidationError(
                "base URL cannot be empty".to_string(),
            ));
        }

        if !self.base_url.starts_with("https://") && !self.base_url.starts_with("http://") {
            return Err(ConfigError::ValidationError(format!(
                "base URL '{}' must start with http:// or https://",
                self.base_url
            )));
        }

        Ok(())
    }
}

impl fmt::Debug for JiraConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JiraConfig")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}
