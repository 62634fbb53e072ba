// SPDX-License-Identifier: MIT

//! Discord API client for the token exchange and profile fetch.
//!
//! Both calls run against a pooled `reqwest::Client` with per-request
//! timeouts and translate failures into a small closed taxonomy
//! (`Timeout` / `Rejected` / `Network`) so the callback flow can map
//! them to user-visible error codes.

use std::time::Duration;

use serde::Deserialize;

use crate::config::Config;

/// Bodies echoed back in a rejection message are capped at this length.
const ERROR_BODY_CAP: usize = 200;

const EXCHANGE_TIMEOUT: Duration = Duration::from_secs(30);
const PROFILE_TIMEOUT: Duration = Duration::from_secs(15);

/// Outbound provider call failures.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("request timed out")]
    Timeout,

    #[error("provider rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("network error: {0}")]
    Network(String),
}

/// Token endpoint response.
///
/// `access_token` stays optional here; a 200 without a token is the
/// caller's `NO_TOKEN` case, not a transport failure.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

/// Authenticated user profile from `/users/@me`.
#[derive(Debug, Clone, Deserialize)]
pub struct UserProfile {
    /// Discord user ID; kept verbatim as a string
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub discriminator: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
}

impl UserProfile {
    /// Display name using the legacy discriminator convention:
    /// `name#1234` when a discriminator other than the literal "0" is
    /// present, plain username otherwise. Providers without the field
    /// fall through to the plain username.
    pub fn display_name(&self) -> String {
        match self.discriminator.as_deref() {
            Some(d) if d != "0" => format!("{}#{}", self.username, d),
            _ => self.username.clone(),
        }
    }
}

/// Error body shape Discord returns from the token endpoint.
#[derive(Deserialize)]
struct TokenErrorBody {
    error: Option<String>,
    error_description: Option<String>,
}

/// Error body shape Discord returns from the REST API.
#[derive(Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
}

/// Discord API client.
#[derive(Clone)]
pub struct ProviderClient {
    http: reqwest::Client,
    token_url: String,
    api_base: String,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
    exchange_timeout: Duration,
    profile_timeout: Duration,
}

impl ProviderClient {
    /// Create a new client with OAuth credentials from config.
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            token_url: config.token_url.clone(),
            api_base: config.api_base.clone(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            redirect_uri: config.redirect_uri.clone(),
            exchange_timeout: EXCHANGE_TIMEOUT,
            profile_timeout: PROFILE_TIMEOUT,
        }
    }

    /// Override the call timeouts (for tests against slow stubs).
    pub fn with_timeouts(mut self, exchange: Duration, profile: Duration) -> Self {
        self.exchange_timeout = exchange;
        self.profile_timeout = profile;
        self
    }

    /// Exchange an authorization code for tokens.
    ///
    /// The redirect URI sent here must byte-for-byte match the one used
    /// to start the flow, per OAuth2 semantics.
    pub async fn exchange_code(&self, code: &str) -> Result<TokenResponse, ProviderError> {
        let response = self
            .http
            .post(&self.token_url)
            .timeout(self.exchange_timeout)
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", self.redirect_uri.as_str()),
            ])
            .send()
            .await
            .map_err(classify_transport)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            let message = match serde_json::from_str::<TokenErrorBody>(&body) {
                Ok(parsed) => parsed
                    .error_description
                    .or(parsed.error)
                    .unwrap_or_else(|| truncate(&body)),
                Err(_) => truncate(&body),
            };
            return Err(ProviderError::Rejected { status, message });
        }

        response
            .json()
            .await
            .map_err(|e| ProviderError::Network(format!("invalid JSON in token response: {}", e)))
    }

    /// Fetch the authenticated user's profile with a bearer token.
    pub async fn fetch_profile(&self, access_token: &str) -> Result<UserProfile, ProviderError> {
        let url = format!("{}/users/@me", self.api_base);

        let response = self
            .http
            .get(&url)
            .timeout(self.profile_timeout)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(classify_transport)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            let message = match serde_json::from_str::<ApiErrorBody>(&body) {
                Ok(parsed) => parsed.message.unwrap_or_else(|| truncate(&body)),
                Err(_) => truncate(&body),
            };
            return Err(ProviderError::Rejected { status, message });
        }

        response
            .json()
            .await
            .map_err(|e| ProviderError::Network(format!("invalid JSON in profile: {}", e)))
    }
}

fn classify_transport(err: reqwest::Error) -> ProviderError {
    if err.is_timeout() {
        ProviderError::Timeout
    } else {
        ProviderError::Network(err.to_string())
    }
}

fn truncate(body: &str) -> String {
    if body.len() > ERROR_BODY_CAP {
        let mut cap = ERROR_BODY_CAP;
        while !body.is_char_boundary(cap) {
            cap -= 1;
        }
        body[..cap].to_string()
    } else {
        body.to_string()
    }
}
