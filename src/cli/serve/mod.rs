//! Serve command - boots the application and binds the listener

use std::net::SocketAddr;

use clap::Args;
use tokio::net::TcpListener;
use tracing::info;

use crate::config::AppConfig;
use crate::infrastructure::logging;
use crate::{CreateAppOptions, create_app};

/// Arguments for the serve command
#[derive(Args, Clone)]
pub struct ServeArgs {
    /// Configuration source (overrides INSIGHT_CONFIG)
    #[arg(long)]
    pub config: Option<String>,

    /// URL prefix to mount the application under (overrides INSIGHT_APP_ROOT)
    #[arg(long)]
    pub app_root: Option<String>,
}

/// Run the HTTP server
pub async fn run(args: ServeArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load(args.config.as_deref()).unwrap_or_default();
    logging::init_logging(&config.logging);

    let app = create_app(CreateAppOptions {
        config_source: args.config,
        app_root: args.app_root,
        initializer: None,
    })?;

    let addr = build_socket_addr(&config)?;
    info!("Starting server on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn build_socket_addr(config: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_socket_addr() {
        let mut config = AppConfig::default();
        config.server.host = "127.0.0.1".to_string();
        config.server.port = 9090;

        let addr = build_socket_addr(&config).unwrap();
        assert_eq!(addr.to_string(), "127.0.0.1:9090");
    }

    #[test]
    fn test_build_socket_addr_rejects_bad_host() {
        let mut config = AppConfig::default();
        config.server.host = "not-an-ip".to_string();

        assert!(build_socket_addr(&config).is_err());
    }
}
