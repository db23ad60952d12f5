//! Connection settings for an n8n instance.

use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5678";
/// Per-request timeout applied when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors raised while building an [`N8nConfig`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid n8n base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("Invalid API key: {reason}")]
    InvalidApiKey { reason: String },

    #[error("Failed to build HTTP client: {reason}")]
    HttpClient { reason: String },
}

/// Immutable connection settings shared by every request of an [`crate::N8nClient`].
///
/// The base URL is stored without trailing slashes so that API and webhook
/// URLs can be joined with a plain `format!`.
#[derive(Clone, PartialEq, Eq)]
pub struct N8nConfig {
    base_url: String,
    api_key: String,
    timeout: Duration,
}

impl N8nConfig {
    /// Validate and build a configuration.
    ///
    /// Rules:
    /// - the URL must parse and use the `http` or `https` scheme
    /// - the URL must include a host
    /// - the API key must be usable as an HTTP header value
    pub fn new(base_url: &str, api_key: impl Into<String>) -> Result<Self, ConfigError> {
        let base_url = validate_base_url(base_url)?;
        let api_key = api_key.into();
        if api_key.chars().any(|ch| ch.is_control()) {
            return Err(ConfigError::InvalidApiKey {
                reason: "must not contain control characters".into(),
            });
        }
        Ok(Self {
            base_url,
            api_key,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Override the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Whether an API key was supplied at all.
    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }
}

// The API key is redacted so configs can be logged.
impl std::fmt::Debug for N8nConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("N8nConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &if self.has_api_key() { "<redacted>" } else { "<empty>" })
            .field("timeout", &self.timeout)
            .finish()
    }
}

fn validate_base_url(base: &str) -> Result<String, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidBaseUrl {
        url: base.to_string(),
        reason,
    };

    let trimmed = base.trim().trim_end_matches('/');
    let parsed = Url::parse(trimmed).map_err(|error| invalid(error.to_string()))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(invalid(format!("scheme must be http or https; got '{}://'", parsed.scheme())));
    }
    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(invalid("URL must include a host".into()));
    }
    if parsed.query().is_some() || parsed.fragment().is_some() {
        return Err(invalid("URL must not carry a query string or fragment".into()));
    }

    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_trailing_slashes() {
        let config = N8nConfig::new("https://n8n.example.com/", "key").expect("valid config");
        assert_eq!(config.base_url(), "https://n8n.example.com");

        let config = N8nConfig::new("http://localhost:5678//", "key").expect("valid config");
        assert_eq!(config.base_url(), "http://localhost:5678");
    }

    #[test]
    fn keeps_path_prefix() {
        let config = N8nConfig::new("https://example.com/n8n", "key").expect("valid config");
        assert_eq!(config.base_url(), "https://example.com/n8n");
    }

    #[test]
    fn rejects_non_http_scheme() {
        let error = N8nConfig::new("ftp://example.com", "key").unwrap_err();
        assert!(matches!(error, ConfigError::InvalidBaseUrl { .. }));
        assert!(error.to_string().contains("http or https"));
    }

    #[test]
    fn rejects_unparseable_url() {
        assert!(N8nConfig::new("not a url", "key").is_err());
    }

    #[test]
    fn rejects_query_string() {
        assert!(N8nConfig::new("https://example.com?x=1", "key").is_err());
    }

    #[test]
    fn rejects_control_characters_in_key() {
        let error = N8nConfig::new(DEFAULT_BASE_URL, "bad\nkey").unwrap_err();
        assert!(matches!(error, ConfigError::InvalidApiKey { .. }));
    }

    #[test]
    fn default_timeout_can_be_overridden() {
        let config = N8nConfig::new(DEFAULT_BASE_URL, "").expect("valid config");
        assert_eq!(config.timeout(), DEFAULT_TIMEOUT);
        assert!(!config.has_api_key());

        let config = config.with_timeout(Duration::from_secs(5));
        assert_eq!(config.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn debug_output_redacts_api_key() {
        let config = N8nConfig::new(DEFAULT_BASE_URL, "super-secret").expect("valid config");
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
