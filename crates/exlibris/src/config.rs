//! Driver configuration.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `EXLIBRIS_EXIST_URL` | http://localhost:8080/exist/rest | eXist-db REST root |
//! | `EXLIBRIS_USERNAME` | admin | eXist-db user |
//! | `EXLIBRIS_PASSWORD` | (empty) | eXist-db password |
//! | `EXLIBRIS_MAX_RESULTS` | 10000 | Items returned per query |
//! | `EXLIBRIS_TIMEOUT` | (none) | HTTP timeout (seconds) |
//! | `EXLIBRIS_LOG_LEVEL` | info | Log level |

use std::fmt;

use clap::Args;
use exlibris_store::ExistConfig;

const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Connection and logging settings shared by every subcommand.
///
/// The `Debug` output never contains the password.
#[derive(Clone, Args)]
pub struct ExlibrisConfig {
    /// eXist-db REST root URL.
    #[arg(
        long,
        env = "EXLIBRIS_EXIST_URL",
        default_value = "http://localhost:8080/exist/rest"
    )]
    pub exist_url: String,

    /// eXist-db user name.
    #[arg(long, env = "EXLIBRIS_USERNAME", default_value = "admin")]
    pub username: String,

    /// eXist-db password.
    #[arg(long, env = "EXLIBRIS_PASSWORD", default_value = "", hide_env_values = true)]
    pub password: String,

    /// Maximum number of items returned by one query.
    #[arg(long, env = "EXLIBRIS_MAX_RESULTS", default_value = "10000")]
    pub max_results: u32,

    /// HTTP timeout in seconds (no timeout when unset).
    #[arg(long, env = "EXLIBRIS_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "EXLIBRIS_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl fmt::Debug for ExlibrisConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let password = if self.password.is_empty() { "" } else { "<redacted>" };
        f.debug_struct("ExlibrisConfig")
            .field("exist_url", &self.exist_url)
            .field("username", &self.username)
            .field("password", &password)
            .field("max_results", &self.max_results)
            .field("timeout", &self.timeout)
            .field("log_level", &self.log_level)
            .finish()
    }
}

impl Default for ExlibrisConfig {
    fn default() -> Self {
        let exist = ExistConfig::default();
        Self {
            exist_url: exist.base_url,
            username: exist.username,
            password: exist.password,
            max_results: exist.max_results,
            timeout: exist.timeout_secs,
            log_level: "info".to_string(),
        }
    }
}

impl ExlibrisConfig {
    /// The store settings carried by this configuration.
    pub fn exist_config(&self) -> ExistConfig {
        ExistConfig {
            base_url: self.exist_url.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
            max_results: self.max_results,
            timeout_secs: self.timeout,
        }
    }

    /// Validates the configuration and returns errors if any.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = self.exist_config().validate().err().unwrap_or_default();

        if !LOG_LEVELS.contains(&self.log_level.to_ascii_lowercase().as_str()) {
            errors.push(format!(
                "Log level '{}' is not one of {}",
                self.log_level,
                LOG_LEVELS.join(", ")
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
