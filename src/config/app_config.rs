use serde::Deserialize;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub static_assets: StaticAssetsConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Root path the application is served under. Anything other than `/`
    /// makes the factory wrap the app in the prefix remount adapter.
    pub application_root: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StaticAssetsConfig {
    /// Directory the static mount serves from.
    pub directory: String,
    /// Prefix used when generating asset URLs. Empty means the application
    /// root; the factory fills it in when the app is remounted.
    pub url_prefix: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
            static_assets: StaticAssetsConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8088,
            application_root: "/".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for StaticAssetsConfig {
    fn default() -> Self {
        Self {
            directory: "static".to_string(),
            url_prefix: String::new(),
        }
    }
}

impl AppConfig {
    /// Layered load: optional `config/default` and `config/local` files, an
    /// explicitly selected source, then `INSIGHT__*` environment overrides.
    ///
    /// The default layers stay optional so a bare checkout boots, but a
    /// source named by the caller (or `INSIGHT_CONFIG`) must exist and
    /// parse; a broken override is a bootstrap error, not a silent default.
    pub fn load(selected: Option<&str>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false));

        if let Some(name) = selected {
            builder = builder.add_source(config::File::with_name(name).required(true));
        }

        let config = builder
            .add_source(
                config::Environment::with_prefix("INSIGHT")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
