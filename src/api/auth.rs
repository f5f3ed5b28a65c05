//! Basic authentication for the JIRA API.
//!
//! Credentials are static: a username and password taken from configuration,
//! encoded once into an `Authorization` header value.

use std::fmt;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

/// Authentication credentials for JIRA.
#[derive(Clone)]
pub struct Auth {
    /// The complete `Basic ...` header value.
    auth_header: String,
}

impl Auth {
    /// Create credentials from a username and password.
    ///
    /// The password is encoded immediately and not kept around.
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            auth_header: build_auth_header(username, password),
        }
    }

    /// Get the authorization header value for HTTP requests.
    pub fn header_value(&self) -> &str {
        &self.auth_header
    }
}

impl fmt::Debug for Auth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Auth")
            .field("auth_header", &"Basic <redacted>")
            .finish()
    }
}

/// Encode "username:password" in Base64 and prepend "Basic ".
fn build_auth_header(username: &str, password: &str) -> String {
    let credentials = format!("{}:{}", username, password);
    let encoded = BASE64.encode(credentials.as_bytes());
    format!("Basic {}", encoded)
}
