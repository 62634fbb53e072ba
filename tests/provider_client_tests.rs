// SPDX-License-Identifier: MIT

//! ProviderClient timeout and classification tests against local stubs.

mod common;

use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use std::time::{Duration, Instant};

use common::{spawn_stub, stub_config};
use oauth_pool::services::{ProviderClient, ProviderError};

#[tokio::test]
async fn test_exchange_timeout_respects_configured_bound() {
    let stub_router = Router::new().route(
        "/oauth2/token",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Json(json!({"access_token": "too-late"}))
        }),
    );
    let stub = spawn_stub(stub_router).await;

    let client = ProviderClient::new(&stub_config(&stub))
        .with_timeouts(Duration::from_millis(200), Duration::from_millis(200));

    let started = Instant::now();
    let result = client.exchange_code("slow").await;
    let elapsed = started.elapsed();

    assert!(matches!(result, Err(ProviderError::Timeout)));
    assert!(elapsed >= Duration::from_millis(200));
    assert!(elapsed < Duration::from_secs(2), "timed out too late: {:?}", elapsed);
}

#[tokio::test]
async fn test_rejection_falls_back_to_truncated_body() {
    // Non-JSON error body longer than the 200-char cap.
    let long_body = "maintenance ".repeat(40);
    let stub_router = Router::new().route(
        "/oauth2/token",
        post(move || {
            let body = long_body.clone();
            async move { (StatusCode::BAD_GATEWAY, body) }
        }),
    );
    let stub = spawn_stub(stub_router).await;

    let client = ProviderClient::new(&stub_config(&stub));
    let result = client.exchange_code("x").await;

    match result {
        Err(ProviderError::Rejected { status, message }) => {
            assert_eq!(status, 502);
            assert_eq!(message.len(), 200);
            assert!(message.starts_with("maintenance"));
        }
        other => panic!("expected rejection, got {:?}", other),
    }
}

#[tokio::test]
async fn test_rejection_prefers_error_description() {
    let stub_router = Router::new().route(
        "/oauth2/token",
        post(|| async {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": "invalid_grant", "error_description": "Code expired"})),
            )
        }),
    );
    let stub = spawn_stub(stub_router).await;

    let client = ProviderClient::new(&stub_config(&stub));
    let result = client.exchange_code("x").await;

    match result {
        Err(ProviderError::Rejected { status, message }) => {
            assert_eq!(status, 400);
            assert_eq!(message, "Code expired");
        }
        other => panic!("expected rejection, got {:?}", other),
    }
}

#[tokio::test]
async fn test_profile_rejection_uses_message_field() {
    let stub_router = Router::new().route(
        "/users/@me",
        get(|| async {
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({"message": "401: Unauthorized", "code": 0})),
            )
        }),
    );
    let stub = spawn_stub(stub_router).await;

    let client = ProviderClient::new(&stub_config(&stub));
    let result = client.fetch_profile("bad-token").await;

    match result {
        Err(ProviderError::Rejected { status, message }) => {
            assert_eq!(status, 401);
            assert_eq!(message, "401: Unauthorized");
        }
        other => panic!("expected rejection, got {:?}", other),
    }
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    // Nothing is listening on this port.
    let config = stub_config("http://127.0.0.1:1");
    let client = ProviderClient::new(&config);

    let result = client.exchange_code("x").await;

    assert!(matches!(result, Err(ProviderError::Network(_))));
}

#[tokio::test]
async fn test_successful_exchange_parses_token() {
    let stub_router = Router::new().route(
        "/oauth2/token",
        post(|| async {
            Json(json!({
                "access_token": "tok-9",
                "token_type": "Bearer",
                "expires_in": 604800,
                "scope": "identify",
            }))
        }),
    );
    let stub = spawn_stub(stub_router).await;

    let client = ProviderClient::new(&stub_config(&stub));
    let token = client.exchange_code("good").await.unwrap();

    assert_eq!(token.access_token.as_deref(), Some("tok-9"));
    assert_eq!(token.expires_in, Some(604800));
}
