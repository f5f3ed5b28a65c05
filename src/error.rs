//! Centralized error types for gitjira.
//!
//! Aggregates configuration and API errors into one type with messages
//! suitable for printing to a terminal.

use thiserror::Error;

use crate::api::ApiError;
use crate::config::ConfigError;

/// The main application error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration-related errors.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// API-related errors.
    #[error("{0}")]
    Api(#[from] ApiError),
}

impl AppError {
    /// Get a user-friendly message for display.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Config(e) => match e {
                ConfigError::NoConfigDir => {
                    "Could not find the configuration directory. Pass --config explicitly."
                        .to_string()
                }
                ConfigError::ReadError(_) => {
                    "Could not read the configuration file. Check that it is readable.".to_string()
                }
                ConfigError::ParseError(_) => {
                    "The configuration file is invalid. Check the TOML syntax.".to_string()
                }
                ConfigError::MissingValue(name, var) => {
                    format!("JIRA {} is not configured. Set it in the config file or {}.", name, var)
                }
                ConfigError::ValidationError(msg) => format!("Configuration error: {}", msg),
            },
            AppError::Api(e) => match e {
                ApiError::Unauthorized => {
                    "Authentication failed. Please check the JIRA username and password.".to_string()
                }
                ApiError::Forbidden => {
                    "Access denied. The JIRA account lacks permission for this resource.".to_string()
                }
                ApiError::NotFound(resource) => format!("'{}' was not found.", resource),
                ApiError::RateLimited => {
                    "Too many requests. Please wait a moment and try again.".to_string()
                }
                ApiError::ServerError(_) => "JIRA server error. Please try again later.".to_string(),
                ApiError::Network(_) => {
                    "Connection failed. Please check the JIRA URL and your network.".to_string()
                }
                ApiError::InvalidUrl(_) => "Invalid JIRA URL in configuration.".to_string(),
                ApiError::InvalidResponse(_) => {
                    "Unexpected response from JIRA. Please try again.".to_string()
                }
            },
        }
    }
}
