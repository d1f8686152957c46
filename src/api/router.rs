use axum::{Router, middleware, routing::get};
use tower_http::trace::TraceLayer;

use super::health;
use super::index;
use super::middleware::logging::logging_middleware;
use super::state::AppState;
use super::static_assets::StaticAssets;

/// Internal mount for static assets. External asset URLs are derived from
/// `static_assets.url_prefix`, which the factory keeps in sync with the
/// application root.
pub const STATIC_ROUTE: &str = "/static";

/// Create the base router: index, health probes and the static mount.
pub fn create_router(state: AppState) -> Router {
    let assets = StaticAssets::new(&state.config().static_assets.directory);

    Router::new()
        .route("/", get(index))
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        .nest_service(STATIC_ROUTE, assets)
        .with_state(state)
        .layer(middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::config::AppConfig;

    use super::*;

    fn test_router() -> Router {
        create_router(AppState::new(AppConfig::default()))
    }

    #[tokio::test]
    async fn test_health_endpoint_works() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_live_endpoint_works() {
        let response = test_router()
            .oneshot(Request::builder().uri("/live").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/unknown")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
