//! Static asset serving
//!
//! Wraps `ServeDir` so missing hot-module-reload probe files answer 204
//! instead of 404. The front-end build watcher deletes hot-update chunks
//! while browsers may still request them; those misses are expected and
//! should not show up as errors. Every other path and status passes
//! through untouched.

use std::convert::Infallible;
use std::future::Future;
use std::path::Path;
use std::pin::Pin;
use std::task::{Context, Poll};

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::{IntoResponse, Response};
use tower::Service;
use tower_http::services::ServeDir;
use tracing::debug;

/// Marker the front-end build tooling puts in transient chunk names.
pub const HOT_UPDATE_MARKER: &str = ".hot-update.";

/// `ServeDir` with the hot-update 404 suppression applied.
#[derive(Clone, Debug)]
pub struct StaticAssets {
    inner: ServeDir,
}

impl StaticAssets {
    pub fn new(directory: impl AsRef<Path>) -> Self {
        Self {
            inner: ServeDir::new(directory),
        }
    }
}

impl Service<Request<Body>> for StaticAssets {
    type Response = Response;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Response, Infallible>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        <ServeDir as Service<Request<Body>>>::poll_ready(&mut self.inner, cx)
    }

    fn call(&mut self, request: Request<Body>) -> Self::Future {
        let path = request.uri().path().to_owned();
        let lookup = self.inner.call(request);

        Box::pin(async move {
            let response = lookup.await?.into_response();

            if response.status() == StatusCode::NOT_FOUND && path.contains(HOT_UPDATE_MARKER) {
                debug!(path = %path, "hot-update file not found, returning no content");
                return Ok(StatusCode::NO_CONTENT.into_response());
            }

            Ok(response)
        })
    }
}

#[cfg(test)]
mod tests {
    use tower::ServiceExt;

    use super::*;

    fn asset_request(path: &str) -> Request<Body> {
        Request::builder().uri(path).body(Body::empty()).unwrap()
    }

    async fn body_string(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_missing_hot_update_file_answers_no_content() {
        let dir = tempfile::tempdir().unwrap();
        let assets = StaticAssets::new(dir.path());

        let response = assets
            .oneshot(asset_request("/main.abc123.hot-update.js"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert!(body_string(response).await.is_empty());
    }

    #[tokio::test]
    async fn test_missing_regular_file_answers_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let assets = StaticAssets::new(dir.path());

        let response = assets.oneshot(asset_request("/bundle.js")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_existing_hot_update_file_is_served_normally() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("main.abc123.hot-update.js"), "chunk").unwrap();
        let assets = StaticAssets::new(dir.path());

        let response = assets
            .oneshot(asset_request("/main.abc123.hot-update.js"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "chunk");
    }

    #[tokio::test]
    async fn test_existing_regular_file_is_served() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("app.css"), "body {}").unwrap();
        let assets = StaticAssets::new(dir.path());

        let response = assets.oneshot(asset_request("/app.css")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "body {}");
    }
}
