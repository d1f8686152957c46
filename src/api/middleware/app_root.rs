//! Remounts the application under a fixed URL prefix.
//!
//! When the server sits behind a proxy that exposes it under a sub-path,
//! incoming paths carry the prefix while the application's own routing does
//! not. The adapter strips the prefix before routing and records it as the
//! mount point so handlers can generate prefixed URLs. Paths outside the
//! prefix are answered with 404 without touching the application.

use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use axum::Router;
use axum::body::Body;
use axum::http::uri::{PathAndQuery, Uri};
use axum::http::{Request, StatusCode};
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tower::{Layer, Service};

/// The prefix a request was remounted from, stored in request extensions
/// for URL generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountPoint(pub String);

/// Rejections for an unusable application root.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AppRootError {
    #[error("application root must start with '/': {0}")]
    NotRooted(String),

    #[error("application root must not end with '/': {0}")]
    TrailingSlash(String),
}

#[derive(Debug, Clone)]
pub struct AppRootLayer {
    app_root: String,
}

impl AppRootLayer {
    /// Validates and captures the prefix. `/` itself is rejected; a root
    /// mount needs no adapter.
    pub fn new(app_root: &str) -> Result<Self, AppRootError> {
        if !app_root.starts_with('/') {
            return Err(AppRootError::NotRooted(app_root.to_owned()));
        }
        if app_root.ends_with('/') {
            return Err(AppRootError::TrailingSlash(app_root.to_owned()));
        }

        Ok(Self {
            app_root: app_root.to_owned(),
        })
    }

    /// Wrap a finished router so the whole application answers under the
    /// prefix. The rewrite has to happen before routing, which
    /// `Router::layer` does not provide, hence the fallback composition.
    pub fn remount(&self, router: Router) -> Router {
        Router::new().fallback_service(self.layer(router))
    }
}

impl<S> Layer<S> for AppRootLayer {
    type Service = AppRootService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        AppRootService {
            inner,
            app_root: self.app_root.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppRootService<S> {
    inner: S,
    app_root: String,
}

impl<S> Service<Request<Body>> for AppRootService<S>
where
    S: Service<Request<Body>, Response = Response, Error = Infallible> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = Response;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Response, Infallible>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut request: Request<Body>) -> Self::Future {
        let Some(rewritten) = strip_app_root(request.uri(), &self.app_root) else {
            return Box::pin(async { Ok(StatusCode::NOT_FOUND.into_response()) });
        };

        *request.uri_mut() = rewritten;
        request
            .extensions_mut()
            .insert(MountPoint(self.app_root.clone()));

        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);
        Box::pin(async move { inner.call(request).await })
    }
}

/// Strip the prefix exactly once, keeping the query string. Returns `None`
/// when the path lies outside the prefix. The remainder is rooted again
/// since an HTTP path cannot be empty or relative.
fn strip_app_root(uri: &Uri, app_root: &str) -> Option<Uri> {
    let rest = uri.path().strip_prefix(app_root)?;

    let rooted = match rest {
        "" => "/".to_owned(),
        r if r.starts_with('/') => r.to_owned(),
        r => format!("/{r}"),
    };

    let path_and_query = match uri.query() {
        Some(query) => format!("{rooted}?{query}"),
        None => rooted,
    };

    let mut parts = uri.clone().into_parts();
    parts.path_and_query = Some(path_and_query.parse::<PathAndQuery>().ok()?);
    Uri::from_parts(parts).ok()
}
