//! Configuration loading.
//!
//! The JIRA connection is read from a TOML file with a `[jira]` table:
//!
//! ```toml
//! [jira]
//! username = "gitlab-bot"
//! password = "secret"
//! base_url = "https://jira.example.com"
//! ```
//!
//! Each value can be overridden with `GITJIRA_USERNAME`, `GITJIRA_PASSWORD`
//! and `GITJIRA_BASE_URL`. When no file exists the environment alone is used.

mod jira;

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

pub use jira::JiraConfig;

/// Environment variable overriding the username.
pub const ENV_USERNAME: &str = "GITJIRA_USERNAME";
/// Environment variable overriding the password.
pub const ENV_PASSWORD: &str = "GITJIRA_PASSWORD";
/// Environment variable overriding the base URL.
pub const ENV_BASE_URL: &str = "GITJIRA_BASE_URL";

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform configuration directory could not be determined.
    #[error("could not determine configuration directory")]
    NoConfigDir,

    /// The configuration file could not be read.
    #[error("failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    /// The configuration file is not valid TOML.
    #[error("failed to parse configuration file: {0}")]
    ParseError(#[from] toml::de::Error),

    /// A required value is missing from both file and environment.
    #[error("missing '{0}' (set it in the [jira] table or via {1})")]
    MissingValue(&'static str, &'static str),

    /// A value is present but invalid.
    #[error("invalid configuration: {0}")]
    ValidationError(String),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    jira: PartialJiraConfig,
}

#[derive(Debug, Default, Deserialize)]
struct PartialJiraConfig {
    username: Option<String>,
    password: Option<String>,
    #[serde(alias = "url")]
    base_url: Option<String>,
}

/// The default configuration file path: `<config dir>/gitjira/config.toml`.
pub fn default_config_path() -> Result<PathBuf> {
    let base = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
    Ok(base.join("gitjira").join("config.toml"))
}

/// Load the JIRA configuration.
///
/// Reads `path`, or the default path when `None`. A missing file is not an
/// error; environment variables then have to supply every value.
pub fn load(path: Option<&Path>) -> Result<JiraConfig> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => default_config_path()?,
    };

    let file = if path.exists() {
        debug!(path = %path.display(), "Reading configuration file");
        let contents = std::fs::read_to_string(&path)?;
        toml::from_str::<ConfigFile>(&contents)?
    } else {
        debug!(path = %path.display(), "No configuration file, using environment");
        ConfigFile::default()
    };

    resolve(file.jira, |key| std::env::var(key).ok())
}

/// Merge file values with overrides looked up by `env`.
fn resolve(
    file: PartialJiraConfig,
    env: impl Fn(&str) -> Option<String>,
) -> Result<JiraConfig> {
    let pick = |file_value: Option<String>, var: &'static str, name: &'static str| {
        env(var)
            .filter(|v| !v.is_empty())
            .or(file_value)
            .ok_or(ConfigError::MissingValue(name, var))
    };

    let config = JiraConfig {
        username: pick(file.username, ENV_USERNAME, "username")?,
        password: pick(file.password, ENV_PASSWORD, "password")?,
        base_url: pick(file.base_url, ENV_BASE_URL, "base_url")?,
    };
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::Write;

    use serial_test::serial;
    use tempfile::NamedTempFile;

    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn write_config(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn clear_env() {
        std::env::remove_var(ENV_USERNAME);
        std::env::remove_var(ENV_PASSWORD);
        std::env::remove_var(ENV_BASE_URL);
    }

    #[test]
    fn test_resolve_from_file_values() {
        let file = PartialJiraConfig {
            username: Some("bot".to_string()),
            password: Some("secret".to_string()),
            base_url: Some("https://jira.example.com".to_string()),
        };

        let config = resolve(file, no_env).unwrap();
        assert_eq!(config, JiraConfig::new("bot", "secret", "https://jira.example.com"));
    }

    #[test]
    fn test_resolve_env_overrides_file() {
        let file = PartialJiraConfig {
            username: Some("bot".to_string()),
            password: Some("secret".to_string()),
            base_url: Some("https://jira.example.com".to_string()),
        };
        let env: HashMap<&str, &str> = [(ENV_PASSWORD, "rotated")].into_iter().collect();

        let config = resolve(file, |k| env.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(config.password, "rotated");
        assert_eq!(config.username, "bot");
    }

    #[test]
    fn test_resolve_ignores_empty_env() {
        let file = PartialJiraConfig {
            username: Some("bot".to_string()),
            password: Some("secret".to_string()),
            base_url: Some("https://jira.example.com".to_string()),
        };

        let config = resolve(file, |_| Some(String::new())).unwrap();
        assert_eq!(config.username, "bot");
    }

    #[test]
    fn test_resolve_missing_value() {
        let file = PartialJiraConfig {
            username: Some("bot".to_string()),
            ..Default::default()
        };

        let err = resolve(file, no_env).unwrap_err();
        assert!(matches!(err, ConfigError::MissingValue("password", ENV_PASSWORD)));
    }

    #[test]
    fn test_resolve_validates() {
        let file = PartialJiraConfig {
            username: Some("bot".to_string()),
            password: Some("secret".to_string()),
            base_url: Some("jira.example.com".to_string()),
        };

        let err = resolve(file, no_env).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    #[serial]
    fn test_load_from_file() {
        clear_env();
        let file = write_config(
            r#"
            [jira]
            username = "username"
            password = "password"
            base_url = "http://localhost:1520"
            "#,
        );

        let config = load(Some(file.path())).unwrap();
        assert_eq!(config.base_url, "http://localhost:1520");
    }

    #[test]
    #[serial]
    fn test_load_env_only_when_file_missing() {
        clear_env();
        std::env::set_var(ENV_USERNAME, "env-bot");
        std::env::set_var(ENV_PASSWORD, "env-secret");
        std::env::set_var(ENV_BASE_URL, "https://jira.example.com");

        let dir = tempfile::tempdir().unwrap();
        let config = load(Some(&dir.path().join("absent.toml"))).unwrap();
        clear_env();

        assert_eq!(config.username, "env-bot");
    }

    #[test]
    #[serial]
    fn test_load_rejects_invalid_toml() {
        clear_env();
        let file = write_config("[jira\nusername = ");

        let err = load(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }
}
