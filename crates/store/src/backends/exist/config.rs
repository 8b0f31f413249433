//! eXist-db backend configuration.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Connection settings for [`ExistRestStore`](super::ExistRestStore).
///
/// The `Debug` output never contains the password.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExistConfig {
    /// Root of the REST interface; collection paths are appended to it.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_username")]
    pub username: String,

    #[serde(default)]
    pub password: String,

    /// Upper bound on the items returned by one query (`_howmany`).
    #[serde(default = "default_max_results")]
    pub max_results: u32,

    /// Per-request timeout in seconds. Requests wait indefinitely when unset.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    "http://localhost:8080/exist/rest".to_string()
}

fn default_username() -> String {
    "admin".to_string()
}

fn default_max_results() -> u32 {
    10_000
}

/// Stand-in printed for a non-empty password.
pub(crate) fn redacted(secret: &str) -> &'static str {
    if secret.is_empty() { "" } else { "<redacted>" }
}

impl fmt::Debug for ExistConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExistConfig")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &redacted(&self.password))
            .field("max_results", &self.max_results)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Default for ExistConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            username: default_username(),
            password: String::new(),
            max_results: default_max_results(),
            timeout_secs: None,
        }
    }
}

impl ExistConfig {
    /// Creates a configuration for `base_url` with default credentials.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Checks the configuration, returning every problem found.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        match url::Url::parse(&self.base_url) {
            Ok(url) if !matches!(url.scheme(), "http" | "https") => {
                errors.push(format!(
                    "base_url must use http or https, got '{}'",
                    url.scheme()
                ));
            }
            Ok(_) => {}
            Err(e) => errors.push(format!("base_url '{}' is not a valid URL: {}", self.base_url, e)),
        }

        if self.username.is_empty() {
            errors.push("username must not be empty".to_string());
        }

        if self.max_results == 0 {
            errors.push("max_results must be at least 1".to_string());
        }

        if self.timeout_secs == Some(0) {
            errors.push("timeout_secs must be at least 1 when set".to_string());
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ExistConfig::default();
        assert_eq!(config.base_url, "http://localhost:8080/exist/rest");
        assert_eq!(config.username, "admin");
        assert_eq!(config.password, "");
        assert_eq!(config.max_results, 10_000);
        assert_eq!(config.timeout(), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_deserialize_fills_defaults() {
        let config: ExistConfig =
            serde_json::from_str(r#"{"base_url": "https://exist.example.org/exist/rest", "timeout_secs": 30}"#)
                .unwrap();
        assert_eq!(config.base_url, "https://exist.example.org/exist/rest");
        assert_eq!(config.username, "admin");
        assert_eq!(config.max_results, 10_000);
        assert_eq!(config.timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_validate_collects_every_problem() {
        let config = ExistConfig {
            base_url: "ftp://localhost/exist".to_string(),
            username: String::new(),
            password: String::new(),
            max_results: 0,
            timeout_secs: Some(0),
        };
        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors[0].contains("http or https"));
    }

    #[test]
    fn test_debug_hides_password() {
        let mut config = ExistConfig::new("http://localhost:8080/exist/rest");
        config.password = "s3cr3t-pw".to_string();

        let printed = format!("{:?}", config);
        assert!(!printed.contains("s3cr3t-pw"));
        assert!(printed.contains(r#"password: "<redacted>""#));
        assert!(printed.contains(r#"username: "admin""#));

        let printed = format!("{:?}", ExistConfig::default());
        assert!(printed.contains(r#"password: """#));
    }

    #[test]
    fn test_validate_rejects_garbage_url() {
        let config = ExistConfig::new("not a url");
        assert!(config.validate().is_err());
    }
}
