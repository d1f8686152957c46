//! Insight BI server
//!
//! HTTP bootstrap for the Insight analytics application:
//! - an application factory that assembles the router and middleware stack
//! - a path-prefix remount adapter for hosting the app under a sub-path
//! - static asset serving that keeps hot-module-reload probes out of the logs
//!
//! The product itself (data models, queries, dashboards) registers its routes
//! through the [`AppInitializer`] seam; nothing in this crate depends on it.

pub mod api;
pub mod cli;
pub mod config;
pub mod infrastructure;

pub use config::AppConfig;

use std::env;
use std::sync::Arc;

use axum::Router;
use tracing::error;

use api::middleware::app_root::AppRootLayer;
use api::router::create_router;
use api::state::AppState;

/// Environment variable naming an alternate configuration source.
pub const CONFIG_ENV: &str = "INSIGHT_CONFIG";

/// Environment variable placing the application under a URL prefix.
pub const APP_ROOT_ENV: &str = "INSIGHT_APP_ROOT";

/// Hook through which the surrounding product registers its routes on the
/// assembled base router.
pub trait AppInitializer: Send + Sync {
    fn init_app(&self, router: Router) -> anyhow::Result<Router>;
}

/// Initializer used when no custom one is configured. Registers nothing;
/// the base router already carries the index, health and static routes.
#[derive(Debug, Default)]
pub struct DefaultAppInitializer;

impl AppInitializer for DefaultAppInitializer {
    fn init_app(&self, router: Router) -> anyhow::Result<Router> {
        Ok(router)
    }
}

/// Overrides accepted by [`create_app`].
#[derive(Default)]
pub struct CreateAppOptions {
    /// Configuration source name; falls back to `INSIGHT_CONFIG`.
    pub config_source: Option<String>,
    /// URL prefix to mount the application under; falls back to
    /// `INSIGHT_APP_ROOT`, then to `server.application_root`.
    pub app_root: Option<String>,
    /// Route registration hook; defaults to [`DefaultAppInitializer`].
    pub initializer: Option<Arc<dyn AppInitializer>>,
}

/// Build and configure the application.
///
/// Bootstrap failures are logged here before they propagate so a broken
/// deployment always leaves a trace in the logs.
pub fn create_app(options: CreateAppOptions) -> anyhow::Result<Router> {
    match build_app(options) {
        Ok(app) => Ok(app),
        Err(err) => {
            error!(error = %err, "Failed to create app");
            Err(err)
        }
    }
}

fn build_app(options: CreateAppOptions) -> anyhow::Result<Router> {
    let config_source = options.config_source.or_else(|| env::var(CONFIG_ENV).ok());
    let mut config = AppConfig::load(config_source.as_deref())?;

    let app_root = options
        .app_root
        .or_else(|| env::var(APP_ROOT_ENV).ok())
        .unwrap_or_else(|| config.server.application_root.clone());

    let remount = if app_root == "/" {
        None
    } else {
        let layer = AppRootLayer::new(&app_root)?;
        // Settings that depend on the app root get matching values unless
        // they were configured explicitly.
        if config.static_assets.url_prefix.is_empty() {
            config.static_assets.url_prefix = app_root.clone();
        }
        if config.server.application_root == "/" {
            config.server.application_root = app_root.clone();
        }
        Some(layer)
    };

    let state = AppState::new(config);
    let router = create_router(state);

    let initializer = options
        .initializer
        .unwrap_or_else(|| Arc::new(DefaultAppInitializer));
    let router = initializer.init_app(router)?;

    Ok(match remount {
        Some(layer) => layer.remount(router),
        None => router,
    })
}
