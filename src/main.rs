// SPDX-License-Identifier: MIT

//! OAuth-Pool server
//!
//! Runs the Discord OAuth2 authorization-code flow and saves linked
//! users into the shared Firestore pool for the bot to pick up.

use oauth_pool::{
    config::Config,
    db::FirestoreDb,
    services::{OauthService, ProviderClient},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(
        port = config.port,
        redirect_uri = %config.redirect_uri,
        "Starting OAuth-Pool server"
    );

    // Connect to the user pool. A failed connection degrades to offline
    // mode rather than aborting: the OAuth pages still work and /health
    // reports 503 until the store is back.
    let db = match FirestoreDb::new(&config.gcp_project_id).await {
        Ok(db) => db,
        Err(e) => {
            tracing::warn!(error = %e, "Store unreachable, running without database");
            FirestoreDb::new_offline()
        }
    };

    // Initialize the Discord client (one pooled HTTP client for all requests)
    let provider = ProviderClient::new(&config);
    let oauth = OauthService::new(&config, provider, db.clone());

    // Build shared state
    let state = Arc::new(AppState { config: config.clone(), db, oauth });

    // Build router
    let app = oauth_pool::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("oauth_pool=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
