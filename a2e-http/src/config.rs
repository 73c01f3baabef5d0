//! Client configuration.
//!
//! [`ClientConfig`] starts from the platform defaults and is adjusted with
//! chained `with_*` calls; later calls override earlier ones. It can also be
//! read from the environment:
//!
//! - `A2E_BASE_URL` — Platform base URL (default: `https://api.a2e-platform.com`)
//! - `A2E_APP_ID` — Application ID
//! - `A2E_APP_SECRET` — Application secret
//! - `A2E_TIMEOUT` — Request timeout in whole seconds (default: `30`)
//!
//! Nothing is validated here. An unusable base URL surfaces as a
//! [`ClientError`](crate::ClientError) on the first request.

use std::num::ParseIntError;
use std::time::Duration;

use crate::constants::{
    DEFAULT_BASE_URL, DEFAULT_TIMEOUT, ENV_APP_ID, ENV_APP_SECRET, ENV_BASE_URL, ENV_TIMEOUT,
};

/// Errors raised while loading configuration from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The timeout variable is not a whole number of seconds.
    #[error("invalid {var} value {value:?}: {source}")]
    InvalidTimeout {
        /// Variable name.
        var: &'static str,
        /// The raw value.
        value: String,
        /// The underlying parse error.
        #[source]
        source: ParseIntError,
    },
}

/// Configuration for [`ProtocolClient`](crate::ProtocolClient).
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use a2e_http::ClientConfig;
///
/// let config = ClientConfig::new("https://a2e.example.com/")
///     .with_timeout_secs(5)
///     .with_app_id("app-1")
///     .with_app_secret("secret");
/// assert_eq!(config.timeout, Duration::from_secs(5));
/// assert!(config.has_identity());
/// ```
#[derive(Clone)]
pub struct ClientConfig {
    /// Platform base URL. Trailing slashes are ignored.
    pub base_url: String,

    /// Per-request timeout.
    pub timeout: Duration,

    /// Application ID, sent as `X-App-ID` when a secret is also set.
    pub app_id: Option<String>,

    /// Application secret. Reserved for request signing; never sent.
    pub app_secret: Option<String>,

    /// Optional pre-configured reqwest client. If `None`, a default client
    /// is created.
    pub http_client: Option<reqwest::Client>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: DEFAULT_TIMEOUT,
            app_id: None,
            app_secret: None,
            http_client: None,
        }
    }
}

impl ClientConfig {
    /// Creates a config with the given base URL and default settings.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::default().with_base_url(base_url)
    }

    /// Loads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidTimeout`] if `A2E_TIMEOUT` is set but
    /// is not a whole number of seconds.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Loads configuration through a custom variable lookup.
    ///
    /// Unset or empty variables keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidTimeout`] if the timeout value is not a
    /// whole number of seconds.
    pub fn from_env_with<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(url) = get(ENV_BASE_URL) {
            config = config.with_base_url(url);
        }
        if let Some(id) = get(ENV_APP_ID) {
            config = config.with_app_id(id);
        }
        if let Some(secret) = get(ENV_APP_SECRET) {
            config = config.with_app_secret(secret);
        }
        if let Some(raw) = get(ENV_TIMEOUT) {
            let secs = raw
                .trim()
                .parse::<u64>()
                .map_err(|source| ConfigError::InvalidTimeout {
                    var: ENV_TIMEOUT,
                    value: raw.clone(),
                    source,
                })?;
            config = config.with_timeout_secs(secs);
        }

        Ok(config)
    }

    /// Sets the base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the request timeout in whole seconds.
    #[must_use]
    pub const fn with_timeout_secs(self, seconds: u64) -> Self {
        self.with_timeout(Duration::from_secs(seconds))
    }

    /// Sets the application ID.
    #[must_use]
    pub fn with_app_id(mut self, app_id: impl Into<String>) -> Self {
        self.app_id = Some(app_id.into());
        self
    }

    /// Sets the application secret.
    #[must_use]
    pub fn with_app_secret(mut self, app_secret: impl Into<String>) -> Self {
        self.app_secret = Some(app_secret.into());
        self
    }

    /// Sets a pre-configured reqwest client.
    #[must_use]
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Returns the base URL without trailing slashes.
    #[must_use]
    pub fn normalized_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Returns `true` if both application ID and secret are non-empty.
    #[must_use]
    pub fn has_identity(&self) -> bool {
        let set = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.is_empty());
        set(&self.app_id) && set(&self.app_secret)
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("app_id", &self.app_id)
            .field("has_app_secret", &self.app_secret.is_some())
            .field("has_http_client", &self.http_client.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.app_id.is_none());
        assert!(!config.has_identity());
    }

    #[test]
    fn test_later_options_override_earlier() {
        let config = ClientConfig::default()
            .with_base_url("https://one.example")
            .with_timeout_secs(5)
            .with_base_url("https://two.example")
            .with_timeout(Duration::from_millis(1500));
        assert_eq!(config.base_url, "https://two.example");
        assert_eq!(config.timeout, Duration::from_millis(1500));
    }

    #[test]
    fn test_identity_requires_both_values() {
        assert!(!ClientConfig::default().with_app_id("id").has_identity());
        assert!(!ClientConfig::default().with_app_secret("s").has_identity());
        assert!(
            !ClientConfig::default()
                .with_app_id("")
                .with_app_secret("s")
                .has_identity()
        );
        assert!(
            ClientConfig::default()
                .with_app_id("id")
                .with_app_secret("s")
                .has_identity()
        );
    }

    #[test]
    fn test_normalized_base_url() {
        let config = ClientConfig::new("https://a2e.example.com/prefix//");
        assert_eq!(config.normalized_base_url(), "https://a2e.example.com/prefix");
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = ClientConfig::default()
            .with_app_id("app-1")
            .with_app_secret("top-secret");
        let debug = format!("{config:?}");
        assert!(debug.contains("app-1"));
        assert!(!debug.contains("top-secret"));
    }

    #[test]
    fn test_from_env_with_all_vars() {
        let config = ClientConfig::from_env_with(lookup(&[
            (ENV_BASE_URL, "http://localhost:8080"),
            (ENV_APP_ID, "app-1"),
            (ENV_APP_SECRET, "secret"),
            (ENV_TIMEOUT, "12"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout, Duration::from_secs(12));
        assert!(config.has_identity());
    }

    #[test]
    fn test_from_env_with_no_vars_keeps_defaults() {
        let config = ClientConfig::from_env_with(lookup(&[(ENV_APP_ID, "  ")])).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert!(config.app_id.is_none());
    }

    #[test]
    fn test_from_env_with_bad_timeout() {
        let err = ClientConfig::from_env_with(lookup(&[(ENV_TIMEOUT, "soon")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTimeout { var: ENV_TIMEOUT, .. }));
        assert!(err.to_string().contains("soon"));
    }
}
