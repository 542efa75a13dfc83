//! Configuration management for the DART MCP server.
//!
//! Configuration is read from environment variables, with `.env` files
//! honoured through `dotenvy`. Every field has a default, so the server
//! starts without any configuration (DART tools then report the missing key).

use super::transport::TransportConfig;
use crate::domains::dart::DEFAULT_BASE_URL;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{info, warn};

/// Main configuration structure for the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// OpenDART access and the local corporation index.
    pub dart: DartConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,

    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
}

/// OpenDART configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct DartConfig {
    /// OpenDART API key (`crtfc_key`).
    /// Get one at: https://opendart.fss.or.kr
    pub api_key: Option<String>,

    /// API root, overridable for testing.
    pub base_url: String,

    /// SQLite file for the corporation index; in memory when unset.
    pub corp_db_path: Option<PathBuf>,

    /// Download the corporation registry before serving.
    pub sync_corp_codes_on_startup: bool,
}

/// Custom Debug implementation to redact the API key from logs.
impl std::fmt::Debug for DartConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DartConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .field("corp_db_path", &self.corp_db_path)
            .field("sync_corp_codes_on_startup", &self.sync_corp_codes_on_startup)
            .finish()
    }
}

impl Default for DartConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            corp_db_path: None,
            sync_corp_codes_on_startup: false,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "dart-mcp-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            dart: DartConfig::default(),
            logging: LoggingConfig {
                level: "info".to_string(),
                with_timestamps: true,
            },
            transport: TransportConfig::default(),
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// DART settings use the `DART_` prefix, server settings the `MCP_`
    /// prefix. For example: `DART_API_KEY`, `MCP_LOG_LEVEL`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Some(name) = non_empty_var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Some(level) = non_empty_var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Some(flag) = non_empty_var("MCP_LOG_TIMESTAMPS").and_then(|v| parse_flag(&v)) {
            config.logging.with_timestamps = flag;
        }

        config.transport = TransportConfig::from_env();

        config.dart.api_key = non_empty_var("DART_API_KEY");

        if let Some(base_url) = non_empty_var("DART_BASE_URL") {
            config.dart.base_url = base_url;
        }

        if let Some(path) = non_empty_var("DART_DB_PATH") {
            config.dart.corp_db_path = Some(PathBuf::from(path));
        }

        if let Some(flag) = non_empty_var("DART_SYNC_ON_STARTUP").and_then(|v| parse_flag(&v)) {
            config.dart.sync_corp_codes_on_startup = flag;
        }

        config
    }

    /// Warning to show at startup when the DART key is missing.
    pub fn api_key_warning(&self) -> Option<&'static str> {
        match self.dart.api_key {
            Some(_) => None,
            None => Some(
                "DART_API_KEY not set. DART tools will fail until a key is configured \
                 (get one at https://opendart.fss.or.kr)",
            ),
        }
    }

    /// Log the DART key status. Call once logging is initialized.
    pub fn log_dart_status(&self) {
        match self.api_key_warning() {
            Some(message) => warn!("{}", message),
            None => info!("DART API key loaded"),
        }
    }
}
