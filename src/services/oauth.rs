// SPDX-License-Identifier: MIT

//! OAuth callback flow: code → token → profile → pool upsert.
//!
//! The sequence is strictly linear; every failure short-circuits to a
//! classified outcome that the route layer renders in-band. A store
//! failure is the one exception: the handshake itself succeeded, so the
//! user still gets a success page and the failure is only logged.

use chrono::Utc;
use serde::Deserialize;

use crate::config::Config;
use crate::db::FirestoreDb;
use crate::models::PoolUser;
use crate::services::provider::ProviderClient;

/// Query parameters Discord sends to the redirect target.
/// Unrecognized parameters are ignored by the extractor.
#[derive(Debug, Default, Deserialize)]
pub struct CallbackParams {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
}

/// Outcome of one callback invocation, consumed only by the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackOutcome {
    Success { user_id: String, display_name: String },
    Failure { code: String, message: String },
}

impl CallbackOutcome {
    fn failure(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Failure {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// OAuth flow orchestrator.
#[derive(Clone)]
pub struct OauthService {
    provider: ProviderClient,
    db: FirestoreDb,
    authorize_url: String,
    client_id: String,
    redirect_uri: String,
}

impl OauthService {
    pub fn new(config: &Config, provider: ProviderClient, db: FirestoreDb) -> Self {
        Self {
            provider,
            db,
            authorize_url: config.authorize_url.clone(),
            client_id: config.client_id.clone(),
            redirect_uri: config.redirect_uri.clone(),
        }
    }

    /// The provider authorize URL users are sent to.
    ///
    /// No `state` parameter is sent, so the callback does no CSRF
    /// verification. Known gap; see DESIGN.md.
    pub fn authorize_url(&self) -> String {
        format!(
            "{}?client_id={}&redirect_uri={}&response_type=code&scope=identify",
            self.authorize_url,
            urlencoding::encode(&self.client_id),
            urlencoding::encode(&self.redirect_uri),
        )
    }

    /// Run the callback sequence for one redirect request.
    pub async fn handle_callback(&self, params: CallbackParams) -> CallbackOutcome {
        // Provider-reported error wins over everything, code included.
        if let Some(error) = params.error {
            tracing::warn!(error = %error, "OAuth error from Discord");
            let description = params
                .error_description
                .unwrap_or_else(|| "Authorization was denied.".to_string());
            return CallbackOutcome::failure(error.to_uppercase(), description);
        }

        let Some(code) = params.code else {
            return CallbackOutcome::failure("NO_CODE", "No authorization code received.");
        };

        let token = match self.provider.exchange_code(&code).await {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!(error = %e, "Token exchange failed");
                return CallbackOutcome::failure("TOKEN_ERROR", e.to_string());
            }
        };

        let Some(access_token) = token.access_token else {
            return CallbackOutcome::failure("NO_TOKEN", "No access token in response.");
        };

        let profile = match self.provider.fetch_profile(&access_token).await {
            Ok(profile) => profile,
            Err(e) => {
                tracing::warn!(error = %e, "Profile fetch failed");
                return CallbackOutcome::failure("USER_ERROR", e.to_string());
            }
        };

        let user = PoolUser::from_profile(&profile, Utc::now().timestamp());

        // Non-fatal: the handshake succeeded, the user sees success
        // either way and the bot simply never picks them up.
        if let Err(e) = self.db.upsert_user(&user).await {
            tracing::warn!(user_id = %user.id, error = %e, "Failed to save user to pool");
        } else {
            tracing::info!(
                user_id = %user.id,
                username = %user.username,
                "User saved to pool"
            );
        }

        CallbackOutcome::Success {
            user_id: profile.id.clone(),
            display_name: profile.display_name(),
        }
    }
}
