//! Endpoint configuration for the recommendation adapter.
//!
//! The adapter never carries a baked-in credential: the key is supplied
//! explicitly or read from the environment (a `.env` file is honored).

use thiserror::Error;
use url::Url;

/// Default `generateContent` endpoint.
pub const DEFAULT_API_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent";

/// Environment variable holding the API key.
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";

/// Optional environment variable overriding the endpoint URL.
pub const API_URL_VAR: &str = "GEMINI_API_URL";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("API key is not set (expected GEMINI_API_KEY in the environment)")]
    MissingApiKey,

    #[error("invalid endpoint URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Connection settings handed to the adapter at construction.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: Url,
    pub api_key: String,
}

impl Config {
    pub fn new(api_url: &str, api_key: impl Into<String>) -> Result<Self, ConfigError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }

        Ok(Self {
            api_url: Url::parse(api_url)?,
            api_key,
        })
    }

    /// Reads the key (and an optional URL override) from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();

        let api_key = std::env::var(API_KEY_VAR).map_err(|_| ConfigError::MissingApiKey)?;
        let api_url =
            std::env::var(API_URL_VAR).unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        Self::new(&api_url, api_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_endpoint_parses() {
        let config = Config::new(DEFAULT_API_URL, "test-key").unwrap();
        assert_eq!(config.api_url.scheme(), "https");
        assert_eq!(config.api_key, "test-key");
    }

    #[test]
    fn blank_key_is_rejected() {
        assert!(matches!(
            Config::new(DEFAULT_API_URL, "  "),
            Err(ConfigError::MissingApiKey)
        ));
    }

    #[test]
    fn malformed_url_is_rejected() {
        assert!(matches!(
            Config::new("not a url", "test-key"),
            Err(ConfigError::InvalidUrl(_))
        ));
    }
}
