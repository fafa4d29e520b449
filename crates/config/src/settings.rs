//! Top-level settings
//!
//! Settings are assembled from, in order of precedence:
//! 1. `FIELDCALL_`-prefixed environment variables (`__` separates levels,
//!    e.g. `FIELDCALL_SERVER__PORT=8080`)
//! 2. An optional TOML file
//! 3. The built-in defaults

use serde::{Deserialize, Serialize};

use crate::engine::{RoutingConfig, ScoringConfig, StorageConfig};
use crate::ConfigError;

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    #[serde(default = "default_host")]
    pub host: String,

    /// Bind port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Enforce the configured CORS origin list
    #[serde(default = "default_true")]
    pub cors_enabled: bool,

    /// Allowed CORS origins; empty falls back to localhost
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_true() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_enabled: default_true(),
            cors_origins: Vec::new(),
        }
    }
}

/// Complete application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub scoring: ScoringConfig,

    #[serde(default)]
    pub routing: RoutingConfig,

    #[serde(default)]
    pub storage: StorageConfig,
}

impl Settings {
    /// Bind address as `host:port`
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// Load settings from an optional TOML file plus the environment
pub fn load_settings(path: Option<&str>) -> Result<Settings, ConfigError> {
    let mut builder = config::Config::builder();

    if let Some(path) = path {
        builder = builder.add_source(config::File::with_name(path));
    } else {
        builder = builder.add_source(config::File::with_name("fieldcall").required(false));
    }

    builder = builder.add_source(
        config::Environment::with_prefix("FIELDCALL")
            .separator("__")
            .try_parsing(true),
    );

    let settings: Settings = builder.build()?.try_deserialize()?;

    tracing::debug!(
        addr = %settings.bind_addr(),
        list_limit = settings.routing.list_limit,
        "Settings loaded"
    );

    Ok(settings)
}
