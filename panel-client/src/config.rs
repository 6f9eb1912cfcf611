//! Client configuration

/// Backend URL used when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Request timeout used when nothing else is configured
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client configuration for connecting to the panel backend
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL (e.g., "http://localhost:5000")
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Access token to start the session with
    pub access_token: Option<String>,

    /// Refresh token to start the session with
    pub refresh_token: Option<String>,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT_SECS,
            access_token: None,
            refresh_token: None,
        }
    }

    /// Load configuration from environment variables
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `PANEL_BACKEND_URL` | `http://localhost:5000` |
    /// | `PANEL_TIMEOUT_SECS` | `30` |
    /// | `PANEL_ACCESS_TOKEN` | none |
    /// | `PANEL_REFRESH_TOKEN` | none |
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("PANEL_BACKEND_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.into()),
            timeout: std::env::var("PANEL_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
            access_token: std::env::var("PANEL_ACCESS_TOKEN")
                .ok()
                .filter(|t| !t.is_empty()),
            refresh_token: std::env::var("PANEL_REFRESH_TOKEN")
                .ok()
                .filter(|t| !t.is_empty()),
        }
    }

    /// Set the access token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Set the refresh token
    pub fn with_refresh_token(mut self, token: impl Into<String>) -> Self {
        self.refresh_token = Some(token.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Base URL without a trailing slash
    pub fn normalized_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Create a client from this configuration
    pub fn build(&self) -> crate::ClientResult<crate::PanelClient> {
        crate::PanelClient::new(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = ClientConfig::new("http://api.local/")
            .with_timeout(5)
            .with_token("a")
            .with_refresh_token("r");
        assert_eq!(config.normalized_base_url(), "http://api.local");
        assert_eq!(config.timeout, 5);
        assert_eq!(config.access_token.as_deref(), Some("a"));
        assert_eq!(config.refresh_token.as_deref(), Some("r"));
    }

    #[test]
    fn test_default() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT_SECS);
        assert!(config.access_token.is_none());
    }
}
