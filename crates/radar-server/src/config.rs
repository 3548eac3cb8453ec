//! Server configuration loading from file and environment variables.

use radar_db::DbRuntimeSettings;
use radar_query::{LimitPolicy, DEFAULT_ANALYSIS_LIMIT, DEFAULT_MAX_LIMIT, DEFAULT_TRENDS_LIMIT};
use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;
use thiserror::Error;

/// Top-level server configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Server network settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Snapshot directory settings.
    #[serde(default)]
    pub snapshots: SnapshotConfig,

    /// Query limit settings.
    #[serde(default)]
    pub query: QueryConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Network configuration for the HTTP server.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to.
    #[serde(default = "default_host")]
    pub host: IpAddr,

    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Where snapshots live and how they are opened.
#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotConfig {
    /// Directory the crawler writes snapshot files into.
    #[serde(default = "default_snapshot_dir")]
    pub dir: PathBuf,

    /// Snapshot file extension, without the leading dot.
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Busy timeout for snapshot connections, in milliseconds.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
}

/// Defaults and bounds for the `limit` query parameter.
#[derive(Debug, Clone, Deserialize)]
pub struct QueryConfig {
    #[serde(default = "default_trends_limit")]
    pub trends_default_limit: i64,

    #[serde(default = "default_analysis_limit")]
    pub analysis_default_limit: i64,

    /// Ceiling for client-supplied limits. `0` disables the ceiling.
    #[serde(default = "default_max_limit")]
    pub max_limit: i64,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "radar_server=debug,info").
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to output logs in JSON format.
    #[serde(default)]
    pub json: bool,
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

fn default_port() -> u16 {
    8000
}

fn default_snapshot_dir() -> PathBuf {
    PathBuf::from("/app/output/news")
}

fn default_extension() -> String {
    radar_db::DEFAULT_EXTENSION.to_string()
}

fn default_busy_timeout_ms() -> u64 {
    DbRuntimeSettings::default().busy_timeout_ms
}

fn default_trends_limit() -> i64 {
    DEFAULT_TRENDS_LIMIT
}

fn default_analysis_limit() -> i64 {
    DEFAULT_ANALYSIS_LIMIT
}

fn default_max_limit() -> i64 {
    DEFAULT_MAX_LIMIT
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            dir: default_snapshot_dir(),
            extension: default_extension(),
            busy_timeout_ms: default_busy_timeout_ms(),
        }
    }
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            trends_default_limit: default_trends_limit(),
            analysis_default_limit: default_analysis_limit(),
            max_limit: default_max_limit(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl SnapshotConfig {
    pub fn db_settings(&self) -> DbRuntimeSettings {
        DbRuntimeSettings {
            busy_timeout_ms: self.busy_timeout_ms,
        }
    }
}

impl QueryConfig {
    pub fn limit_policy(&self) -> LimitPolicy {
        LimitPolicy {
            trends_default: self.trends_default_limit,
            analysis_default: self.analysis_default_limit,
            max: (self.max_limit > 0).then_some(self.max_limit),
        }
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse the configuration file.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Loads configuration from a TOML file, falling back to defaults.
///
/// Environment variable overrides:
/// - `RADAR_HOST` overrides `server.host`
/// - `RADAR_PORT` overrides `server.port`
/// - `RADAR_DB_DIR` overrides `snapshots.dir`
/// - `RADAR_DB_EXTENSION` overrides `snapshots.extension`
/// - `RADAR_BUSY_TIMEOUT_MS` overrides `snapshots.busy_timeout_ms`
/// - `RADAR_MAX_LIMIT` overrides `query.max_limit`
/// - `RADAR_LOG_LEVEL` overrides `logging.level`
/// - `RADAR_LOG_JSON` overrides `logging.json` (set to "true" to enable)
///
/// # Errors
///
/// Returns `ConfigError` if the file exists but cannot be read or parsed.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let mut config = match path {
        Some(p) => match std::fs::read_to_string(p) {
            Ok(contents) => parse_config(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = p, "config file not found, using defaults");
                Config::default()
            }
            Err(e) => return Err(ConfigError::FileRead(e)),
        },
        None => Config::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    Ok(config)
}

/// Parses a TOML configuration document.
///
/// # Errors
///
/// Returns `ConfigError::Parse` if the document is not valid configuration.
pub fn parse_config(contents: &str) -> Result<Config, ConfigError> {
    Ok(toml::from_str(contents)?)
}

fn apply_env_overrides(config: &mut Config, var: impl Fn(&str) -> Option<String>) {
    if let Some(host) = var("RADAR_HOST") {
        if let Ok(parsed) = host.parse() {
            config.server.host = parsed;
        }
    }
    if let Some(port) = var("RADAR_PORT") {
        if let Ok(parsed) = port.parse() {
            config.server.port = parsed;
        }
    }
    if let Some(dir) = var("RADAR_DB_DIR") {
        config.snapshots.dir = PathBuf::from(dir);
    }
    if let Some(extension) = var("RADAR_DB_EXTENSION") {
        config.snapshots.extension = extension;
    }
    if let Some(timeout) = var("RADAR_BUSY_TIMEOUT_MS") {
        if let Ok(parsed) = timeout.parse() {
            config.snapshots.busy_timeout_ms = parsed;
        }
    }
    if let Some(max) = var("RADAR_MAX_LIMIT") {
        if let Ok(parsed) = max.parse() {
            config.query.max_limit = parsed;
        }
    }
    if let Some(level) = var("RADAR_LOG_LEVEL") {
        config.logging.level = level;
    }
    if let Some(json) = var("RADAR_LOG_JSON") {
        config.logging.json = json == "true" || json == "1";
    }
}
