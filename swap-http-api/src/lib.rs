pub mod auth;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use tower_http::cors::CorsLayer;

use swap_runtime::SwapService;

pub struct SwapApiState {
    pub service: SwapService,
    /// Bearer token required on every route except `/health`, when set.
    pub api_token: Option<String>,
}

pub fn build_router(state: Arc<SwapApiState>) -> Router {
    Router::new()
        .merge(routes::health::router())
        .merge(routes::tokens::router())
        .merge(routes::quote::router())
        .merge(routes::swap::router())
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            auth::auth_middleware,
        ))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
