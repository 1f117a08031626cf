use std::path::PathBuf;

use crate::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub data_dir: PathBuf,
    pub log_level: String,
    pub search_url: Option<String>,
    pub search_api_key: Option<String>,
    pub search_timeout_secs: u64,
    pub user_agent: String,
    pub outdated_search_days: u32,
}

impl AppConfig {
    /// The search endpoint, for commands that cannot run without one.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] when `ANGOCONTACTS_SEARCH_URL`
    /// is unset or blank.
    pub fn require_search_url(&self) -> Result<&str, ConfigError> {
        self.search_url
            .as_deref()
            .ok_or_else(|| ConfigError::MissingEnvVar("ANGOCONTACTS_SEARCH_URL".to_string()))
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("data_dir", &self.data_dir)
            .field("log_level", &self.log_level)
            .field("search_url", &self.search_url)
            .field(
                "search_api_key",
                &self.search_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("search_timeout_secs", &self.search_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("outdated_search_days", &self.outdated_search_days)
            .finish()
    }
}
