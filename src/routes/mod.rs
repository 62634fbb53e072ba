// SPDX-License-Identifier: MIT

//! HTTP route handlers.

pub mod oauth;
pub mod pages;

use crate::middleware::proxy::ClientInfo;
use crate::AppState;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::{middleware, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: i64,
    pub store: String,
    pub client_ip: String,
    pub scheme: String,
}

/// ALB/ELB-compatible health check: 503 while the store is detached.
async fn health_check(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> (StatusCode, Json<HealthResponse>) {
    let connected = state.db.is_connected();
    let client = ClientInfo::from_headers(&headers, &state.config);

    let status_code = if connected {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let body = HealthResponse {
        status: if connected { "healthy" } else { "degraded" }.to_string(),
        timestamp: chrono::Utc::now().timestamp(),
        store: if connected { "connected" } else { "disconnected" }.to_string(),
        client_ip: client.ip,
        scheme: client.scheme,
    };

    (status_code, Json(body))
}

/// Build the complete router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .merge(pages::routes())
        .merge(oauth::routes())
        .layer(middleware::from_fn(
            crate::middleware::security::add_security_headers,
        ))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}
