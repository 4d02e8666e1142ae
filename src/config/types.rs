// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub http: HttpConfig,
    /// Static asset settings (optional section, sensible defaults)
    #[serde(default)]
    pub assets: AssetsConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Log level ("debug" enables per-connection logging)
    pub level: String,
    pub access_log: bool,
    /// Access log format (combined, common, json)
    #[serde(default = "default_access_log_format")]
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

#[allow(clippy::missing_const_for_fn)]
fn default_access_log_format() -> String {
    "combined".to_string()
}

/// Performance configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
    pub max_connections: Option<u64>,
    pub backlog: u32,
}

/// HTTP configuration
#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    pub server_name: String,
    pub enable_cors: bool,
    pub max_body_size: u64,
}

/// Static assets configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AssetsConfig {
    /// Directory served for static requests, relative to the working directory
    #[serde(default = "default_assets_dir")]
    pub dir: String,
    /// URL prefix the assets directory is mounted at
    #[serde(default = "default_assets_mount")]
    pub mount: String,
    /// File names tried when a directory is requested
    #[serde(default = "default_index_files")]
    pub index_files: Vec<String>,
    /// Paths answered from the assets directory root
    #[serde(default = "default_favicon_paths")]
    pub favicon_paths: Vec<String>,
}

#[allow(clippy::missing_const_for_fn)]
fn default_assets_dir() -> String {
    "static".to_string()
}

#[allow(clippy::missing_const_for_fn)]
fn default_assets_mount() -> String {
    "/static".to_string()
}

fn default_index_files() -> Vec<String> {
    vec!["index.html".to_string(), "index.htm".to_string()]
}

fn default_favicon_paths() -> Vec<String> {
    vec!["/favicon.ico".to_string(), "/favicon.svg".to_string()]
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            dir: default_assets_dir(),
            mount: default_assets_mount(),
            index_files: default_index_files(),
            favicon_paths: default_favicon_paths(),
        }
    }
}
