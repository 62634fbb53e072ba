//! Application configuration loaded from environment variables.
//!
//! Every option has a default suitable for local development only;
//! production deployments must override the Discord credentials and
//! redirect URI.

use std::env;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Discord OAuth client ID (public)
    pub client_id: String,
    /// Discord OAuth client secret
    pub client_secret: String,
    /// Registered redirect URI; must byte-for-byte match the one sent
    /// to the authorize endpoint.
    pub redirect_uri: String,
    /// GCP project ID for the Firestore user pool
    pub gcp_project_id: String,
    /// Server port
    pub port: u16,

    // --- Discord endpoints (overridable so tests can point at stubs) ---
    /// Authorization endpoint users are redirected to
    pub authorize_url: String,
    /// Token exchange endpoint
    pub token_url: String,
    /// REST API base URL (profile endpoint lives under it)
    pub api_base: String,

    // --- Reverse proxy headers ---
    /// Header carrying the original request scheme
    pub proxy_header_proto: String,
    /// Header carrying the original request host
    pub proxy_header_host: String,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            client_id: "local-dev-client".to_string(),
            client_secret: "local-dev-secret".to_string(),
            redirect_uri: "http://localhost:8443/callback".to_string(),
            gcp_project_id: "local-dev".to_string(),
            port: 8443,
            authorize_url: "https://discord.com/api/oauth2/authorize".to_string(),
            token_url: "https://discord.com/api/oauth2/token".to_string(),
            api_base: "https://discord.com/api/v10".to_string(),
            proxy_header_proto: "X-Forwarded-Proto".to_string(),
            proxy_header_host: "X-Forwarded-Host".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Fails only on a malformed `PORT`; everything else falls back to
    /// the local-development defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let defaults = Self::default();

        let port = match env::var("PORT") {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            Err(_) => defaults.port,
        };

        Ok(Self {
            client_id: env::var("DISCORD_CLIENT_ID").unwrap_or(defaults.client_id),
            client_secret: env::var("DISCORD_CLIENT_SECRET")
                .map(|v| v.trim().to_string())
                .unwrap_or(defaults.client_secret),
            redirect_uri: env::var("OAUTH_REDIRECT_URI").unwrap_or(defaults.redirect_uri),
            gcp_project_id: env::var("GCP_PROJECT_ID").unwrap_or(defaults.gcp_project_id),
            port,
            authorize_url: env::var("DISCORD_OAUTH_URL").unwrap_or(defaults.authorize_url),
            token_url: env::var("DISCORD_TOKEN_URL").unwrap_or(defaults.token_url),
            api_base: env::var("DISCORD_API").unwrap_or(defaults.api_base),
            proxy_header_proto: env::var("PROXY_HEADER_PROTO")
                .unwrap_or(defaults.proxy_header_proto),
            proxy_header_host: env::var("PROXY_HEADER_HOST").unwrap_or(defaults.proxy_header_host),
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),
}
