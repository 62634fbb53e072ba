// SPDX-License-Identifier: MIT

//! Presentation-only routes: landing page and direct error view.

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap},
    response::Html,
    routing::get,
    Router,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::render;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(home))
        .route("/error", get(error_page))
}

const MOBILE_KEYWORDS: &[&str] = &[
    "mobile",
    "android",
    "iphone",
    "ipad",
    "ipod",
    "webos",
    "blackberry",
    "opera mini",
    "opera mobi",
];

fn is_mobile(headers: &HeaderMap) -> bool {
    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_lowercase();
    MOBILE_KEYWORDS.iter().any(|kw| user_agent.contains(kw))
}

/// Landing page with the connect link.
async fn home(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Html<String> {
    Html(render::render_home(
        &state.oauth.authorize_url(),
        is_mobile(&headers),
    ))
}

#[derive(Deserialize)]
pub struct ErrorPageParams {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Direct error render from query parameters.
async fn error_page(Query(params): Query<ErrorPageParams>) -> Html<String> {
    let code = params.code.as_deref().unwrap_or("AUTH_FAILED");
    let message = params
        .message
        .as_deref()
        .unwrap_or("Authorization was denied or expired.");
    Html(render::render_error(code, message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_is_mobile() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            HeaderValue::from_static("Mozilla/5.0 (iPhone; CPU iPhone OS 17_0)"),
        );
        assert!(is_mobile(&headers));

        let mut headers = HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            HeaderValue::from_static("Mozilla/5.0 (X11; Linux x86_64)"),
        );
        assert!(!is_mobile(&headers));

        assert!(!is_mobile(&HeaderMap::new()));
    }
}
