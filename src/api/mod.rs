//! HTTP layer - routes, middleware and static assets

pub mod health;
pub mod middleware;
pub mod router;
pub mod state;
pub mod static_assets;

pub use router::create_router;
pub use state::AppState;

use axum::{Json, extract::State, response::IntoResponse};

/// Root index: a minimal application descriptor. Useful for smoke tests
/// and for checking how the instance is mounted.
pub async fn index(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "application_root": state.config().server.application_root,
        "static_assets_prefix": state.config().static_assets.url_prefix,
    }))
}
