//! Route definitions and router construction.

use std::sync::Arc;

use axum::Router;
use axum::middleware;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use crate::auth::require_token;
use crate::bootstrap::AxumContext;
use crate::handlers;
use crate::state::AppState;

/// Create the application router.
///
/// `/status.json` sits behind the token middleware; `/health` does not.
pub fn create_router(ctx: AxumContext) -> Router {
    let state: AppState = Arc::new(ctx);
    let auth_layer = middleware::from_fn_with_state(state.clone(), require_token);

    Router::new()
        .route("/status.json", get(handlers::status::status_json))
        .route_layer(auth_layer)
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub(crate) async fn health_check() -> &'static str {
    "OK"
}
