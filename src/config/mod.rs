// Configuration module entry point
// Manages application configuration and shared runtime state

mod state;
mod types;

use std::net::SocketAddr;

// Re-export the types the rest of the crate names directly; the section
// structs stay reachable as fields of Config
pub use state::AppState;
pub use types::{AssetsConfig, Config};

impl Config {
    /// Load configuration from the default "config.toml" in the working directory
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from specified file path (without extension)
    ///
    /// Missing files are fine: every setting has a default, and any value
    /// can be overridden through `WEBDEMO_`-prefixed environment variables.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("WEBDEMO"))
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "combined")?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("performance.backlog", 1024)?
            .set_default("http.server_name", "webdemo/0.1")?
            .set_default("http.enable_cors", false)?
            .set_default("http.max_body_size", 1_048_576)? // 1MB
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_file_missing() {
        let config = Config::load_from("no-such-config-file").expect("defaults should apply");

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.workers, None);
        assert_eq!(config.logging.access_log_format, "combined");
        assert_eq!(config.logging.access_log_file, None);
        assert_eq!(config.performance.keep_alive_timeout, 75);
        assert_eq!(config.performance.backlog, 1024);
        assert_eq!(config.performance.max_connections, None);
        assert_eq!(config.http.max_body_size, 1_048_576);
        assert!(!config.http.enable_cors);
        assert_eq!(config.assets.dir, "static");
        assert_eq!(config.assets.mount, "/static");
        assert_eq!(config.assets.index_files, vec!["index.html", "index.htm"]);
    }

    #[test]
    fn test_socket_addr_from_defaults() {
        let config = Config::load_from("no-such-config-file").expect("defaults should apply");
        let addr = config.get_socket_addr().expect("valid address");
        assert_eq!(addr.to_string(), "127.0.0.1:8080");
    }

    #[test]
    fn test_socket_addr_rejects_bad_host() {
        let mut config = Config::load_from("no-such-config-file").expect("defaults should apply");
        config.server.host = "not a host".to_string();
        assert!(config.get_socket_addr().is_err());
    }
}
