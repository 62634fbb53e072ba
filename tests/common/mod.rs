// SPDX-License-Identifier: MIT

use oauth_pool::config::Config;
use oauth_pool::db::FirestoreDb;
use oauth_pool::routes::create_router;
use oauth_pool::services::{OauthService, ProviderClient};
use oauth_pool::AppState;
use std::sync::Arc;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Create an offline database connection.
#[allow(dead_code)]
pub fn test_db_offline() -> FirestoreDb {
    FirestoreDb::new_offline()
}

/// Create a test app from an explicit config and database.
#[allow(dead_code)]
pub fn create_test_app_with(config: Config, db: FirestoreDb) -> (axum::Router, Arc<AppState>) {
    let provider = ProviderClient::new(&config);
    let oauth = OauthService::new(&config, provider, db.clone());

    let state = Arc::new(AppState { config, db, oauth });

    (create_router(state.clone()), state)
}

/// Create a test app with default config and an offline store.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    create_test_app_with(Config::default(), test_db_offline())
}

/// Serve a stub router on an ephemeral local port, returning its base URL.
#[allow(dead_code)]
pub async fn spawn_stub(router: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind stub listener");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://{}", addr)
}

/// Config pointed at a stub provider server.
#[allow(dead_code)]
pub fn stub_config(stub_base: &str) -> Config {
    Config {
        token_url: format!("{}/oauth2/token", stub_base),
        api_base: stub_base.to_string(),
        ..Config::default()
    }
}
