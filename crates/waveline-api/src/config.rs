//! Client configuration loaded from environment variables.
//!
//! Defaults target a local development backend so the CLI works with zero
//! configuration.

/// API client configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the backend, without a trailing slash.
    /// Env: `WAVELINE_API_URL`
    /// Default: `http://localhost:8000`
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
        }
    }
}

impl ApiConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("WAVELINE_API_URL") {
            match normalize_base_url(&url) {
                Some(url) => config.base_url = url,
                None => {
                    tracing::warn!(value = %url, "Empty WAVELINE_API_URL, using default");
                }
            }
        }

        // RUST_LOG is handled directly by tracing-subscriber's EnvFilter,
        // so we do not store it here.

        config
    }

    /// Build a config for an explicit base URL (tests, self-hosted setups).
    pub fn with_base_url(url: &str) -> Self {
        Self {
            base_url: normalize_base_url(url).unwrap_or_else(|| Self::default().base_url),
        }
    }
}

/// Strip trailing slashes and surrounding whitespace. Returns `None` when
/// nothing remains.
fn normalize_base_url(url: &str) -> Option<String> {
    let trimmed = url.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ApiConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000");
    }

    #[test]
    fn test_normalize_strips_trailing_slash() {
        assert_eq!(
            normalize_base_url("https://api.example.com/"),
            Some("https://api.example.com".to_string())
        );
    }

    #[test]
    fn test_normalize_rejects_empty() {
        assert_eq!(normalize_base_url("  / "), None);
    }
}
