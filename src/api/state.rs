//! Shared application state

use std::sync::Arc;

use crate::config::AppConfig;

/// Immutable state shared across handlers. Configuration is read once at
/// startup and never mutated afterwards.
#[derive(Clone)]
pub struct AppState {
    config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// External URL for a static asset, honoring the configured asset
    /// prefix when the application is remounted.
    pub fn asset_url(&self, file: &str) -> String {
        let prefix = self.config.static_assets.url_prefix.trim_end_matches('/');
        format!("{}/static/{}", prefix, file.trim_start_matches('/'))
    }
}
