//! Configuration management for the agent hub.
//!
//! Configuration can be set via environment variables:
//! - `HOST` - Optional. Server host. Defaults to `127.0.0.1`.
//! - `PORT` - Optional. Server port. Defaults to `8000`.
//! - `ENV_FILE` - Optional. Path to the dotenv credential store. Defaults to `.env`.
//! - `CARBON_VOICE_AUTHORIZATION_ENDPOINT` - Optional. OAuth authorization URL.
//! - `CARBON_VOICE_TOKEN_ENDPOINT` - Optional. OAuth token-exchange URL.
//! - `CARBON_VOICE_REDIRECT_URI` - Optional. OAuth redirect URI. Defaults to
//!   `http://localhost:3000/oauth/callback`.
//!
//! Secrets (tokens, client credentials) are resolved separately; see
//! [`crate::credentials`].

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// OAuth2 endpoint set for the Carbon Voice integration.
///
/// The endpoint URLs are deployment configuration rather than constants:
/// the hosted defaults below can be overridden per environment.
#[derive(Debug, Clone)]
pub struct OauthEndpoints {
    /// User-facing authorization URL
    pub authorization_endpoint: String,

    /// Back-channel token-exchange URL
    pub token_endpoint: String,

    /// Redirect URI the local callback listener is bound from
    pub redirect_uri: String,
}

impl Default for OauthEndpoints {
    fn default() -> Self {
        Self {
            authorization_endpoint: "https://api.carbonvoice.app/oauth/authorize".to_string(),
            token_endpoint: "https://api.carbonvoice.app/oauth/token".to_string(),
            redirect_uri: "http://localhost:3000/oauth/callback".to_string(),
        }
    }
}

impl OauthEndpoints {
    fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            authorization_endpoint: std::env::var("CARBON_VOICE_AUTHORIZATION_ENDPOINT")
                .unwrap_or(defaults.authorization_endpoint),
            token_endpoint: std::env::var("CARBON_VOICE_TOKEN_ENDPOINT")
                .unwrap_or(defaults.token_endpoint),
            redirect_uri: std::env::var("CARBON_VOICE_REDIRECT_URI")
                .unwrap_or(defaults.redirect_uri),
        }
    }
}

/// Process configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,

    /// Path to the dotenv-style credential store
    pub env_file: PathBuf,

    /// OAuth endpoints for the Carbon Voice integration
    pub oauth: OauthEndpoints,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if `PORT` is not a valid port number.
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "8000".to_string())
            .parse()
            .map_err(|e| ConfigError::InvalidValue("PORT".to_string(), format!("{}", e)))?;

        let env_file = std::env::var("ENV_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(".env"));

        Ok(Self {
            host,
            port,
            env_file,
            oauth: OauthEndpoints::from_env(),
        })
    }
}
