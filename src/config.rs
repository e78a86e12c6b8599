/// Runtime configuration
///
/// Read from `FITROOM_*` environment variables. A `.env` file in the
/// working directory is loaded first when present.
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

const PREFIX: &str = "FITROOM_";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Env(#[from] envy::Error),
    #[error("FITROOM_SUPABASE_URL must be an http(s) URL, got {0:?}")]
    InvalidUrl(String),
    #[error("{0} must be greater than zero")]
    Zero(&'static str),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Project URL hosting the generation function, e.g. `https://xyz.supabase.co`
    pub supabase_url: String,
    /// Public (anon) key sent with every request
    pub supabase_anon_key: String,
    #[serde(default = "default_function_name")]
    pub function_name: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_notification_ttl_secs")]
    pub notification_ttl_secs: u64,
    #[serde(default = "default_notification_limit")]
    pub notification_limit: usize,
}

fn default_function_name() -> String {
    "virtual-tryon".to_string()
}

fn default_request_timeout_secs() -> u64 {
    120
}

fn default_notification_ttl_secs() -> u64 {
    5
}

fn default_notification_limit() -> usize {
    3
}

impl Config {
    /// Load configuration from `.env` (optional) and the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "loaded .env file");
        }
        Self::from_vars(std::env::vars())
    }

    /// Build a configuration from explicit key/value pairs
    pub fn from_vars<I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config: Config = envy::prefixed(PREFIX).from_iter(vars)?;
        config.validated()
    }

    fn validated(mut self) -> Result<Self, ConfigError> {
        let url = self.supabase_url.trim().trim_end_matches('/').to_string();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidUrl(self.supabase_url));
        }
        self.supabase_url = url;

        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Zero("FITROOM_REQUEST_TIMEOUT_SECS"));
        }
        if self.notification_ttl_secs == 0 {
            return Err(ConfigError::Zero("FITROOM_NOTIFICATION_TTL_SECS"));
        }
        if self.notification_limit == 0 {
            return Err(ConfigError::Zero("FITROOM_NOTIFICATION_LIMIT"));
        }

        Ok(self)
    }

    /// Full URL of the generation function
    pub fn endpoint(&self) -> String {
        format!("{}/functions/v1/{}", self.supabase_url, self.function_name)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn notification_ttl(&self) -> Duration {
        Duration::from_secs(self.notification_ttl_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_apply() {
        let config = Config::from_vars(vars(&[
            ("FITROOM_SUPABASE_URL", "https://demo.supabase.co/"),
            ("FITROOM_SUPABASE_ANON_KEY", "anon"),
        ]))
        .unwrap();

        assert_eq!(config.supabase_url, "https://demo.supabase.co");
        assert_eq!(config.function_name, "virtual-tryon");
        assert_eq!(config.request_timeout(), Duration::from_secs(120));
        assert_eq!(config.notification_ttl(), Duration::from_secs(5));
        assert_eq!(config.notification_limit, 3);
        assert_eq!(
            config.endpoint(),
            "https://demo.supabase.co/functions/v1/virtual-tryon"
        );
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_vars(vars(&[
            ("FITROOM_SUPABASE_URL", "http://localhost:54321"),
            ("FITROOM_SUPABASE_ANON_KEY", "anon"),
            ("FITROOM_FUNCTION_NAME", "tryon-v2"),
            ("FITROOM_REQUEST_TIMEOUT_SECS", "30"),
            ("FITROOM_NOTIFICATION_LIMIT", "5"),
            ("UNRELATED", "ignored"),
        ]))
        .unwrap();

        assert_eq!(config.endpoint(), "http://localhost:54321/functions/v1/tryon-v2");
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.notification_limit, 5);
    }

    #[test]
    fn test_missing_key_is_an_error() {
        let result = Config::from_vars(vars(&[("FITROOM_SUPABASE_URL", "https://x.co")]));
        assert!(matches!(result, Err(ConfigError::Env(_))));
    }

    #[test]
    fn test_rejects_bad_values() {
        let result = Config::from_vars(vars(&[
            ("FITROOM_SUPABASE_URL", "ftp://x.co"),
            ("FITROOM_SUPABASE_ANON_KEY", "anon"),
        ]));
        assert!(matches!(result, Err(ConfigError::InvalidUrl(_))));

        let result = Config::from_vars(vars(&[
            ("FITROOM_SUPABASE_URL", "https://x.co"),
            ("FITROOM_SUPABASE_ANON_KEY", "anon"),
            ("FITROOM_REQUEST_TIMEOUT_SECS", "0"),
        ]));
        assert!(matches!(result, Err(ConfigError::Zero(_))));
    }
}
