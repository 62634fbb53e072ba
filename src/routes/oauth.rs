// SPDX-License-Identifier: MIT

//! OAuth flow routes: authorize redirect and the callback target.

use axum::{
    extract::{Query, State},
    response::{Html, Redirect},
    routing::get,
    Router,
};
use std::sync::Arc;

use crate::render;
use crate::services::CallbackParams;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/authorize", get(authorize))
        .route("/callback", get(callback))
}

/// Redirect to the Discord authorization page.
async fn authorize(State(state): State<Arc<AppState>>) -> Redirect {
    Redirect::temporary(&state.oauth.authorize_url())
}

/// OAuth redirect target. Failures are content, not transport errors:
/// the response is a rendered page with status 200 either way.
async fn callback(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CallbackParams>,
) -> Html<String> {
    let outcome = state.oauth.handle_callback(params).await;
    Html(render::render_outcome(&outcome))
}
