//! Configuration model loaded from external sources.

use std::time::Duration;

use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
/// Top-level server settings.
pub struct ServerConfig {
    #[serde(default = "default_address")]
    pub address: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub database_url: String,
    /// Deadline applied to every request that touches the database.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Maximum accepted JSON body size in bytes.
    #[serde(default = "default_body_limit")]
    pub body_limit: usize,
    /// Time a client has to send the request head.
    #[serde(default = "default_read_timeout_secs")]
    pub read_timeout_secs: u64,
    /// Time a client has to acknowledge the end of a response before the
    /// connection is dropped.
    #[serde(default = "default_write_timeout_secs")]
    pub write_timeout_secs: u64,
    /// Grace period for in-flight requests on shutdown.
    #[serde(default = "default_shutdown_timeout_secs")]
    pub shutdown_timeout_secs: u64,
    #[serde(default)]
    pub database: DatabaseConfig,
}

#[derive(Clone, Debug, Deserialize)]
/// Connection pool settings.
pub struct DatabaseConfig {
    #[serde(default = "default_max_size")]
    pub max_size: u32,
    #[serde(default = "default_min_idle")]
    pub min_idle: u32,
    #[serde(default = "default_max_lifetime_secs")]
    pub max_lifetime_secs: u64,
    #[serde(default = "default_idle_timeout_secs")]
    pub idle_timeout_secs: u64,
    #[serde(default = "default_connection_timeout_secs")]
    pub connection_timeout_secs: u64,
    /// How long SQLite waits on a locked database before failing.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
}

fn default_address() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_request_timeout_secs() -> u64 {
    5
}

fn default_body_limit() -> usize {
    2 * 1024 * 1024
}

fn default_read_timeout_secs() -> u64 {
    10
}

fn default_write_timeout_secs() -> u64 {
    10
}

fn default_shutdown_timeout_secs() -> u64 {
    5
}

fn default_max_size() -> u32 {
    60
}

fn default_min_idle() -> u32 {
    30
}

fn default_max_lifetime_secs() -> u64 {
    120
}

fn default_idle_timeout_secs() -> u64 {
    60
}

fn default_connection_timeout_secs() -> u64 {
    30
}

fn default_busy_timeout_ms() -> u64 {
    5000
}

impl ServerConfig {
    /// Settings with every default applied for the given database.
    pub fn with_database_url(database_url: impl Into<String>) -> Self {
        Self {
            address: default_address(),
            port: default_port(),
            database_url: database_url.into(),
            request_timeout_secs: default_request_timeout_secs(),
            body_limit: default_body_limit(),
            read_timeout_secs: default_read_timeout_secs(),
            write_timeout_secs: default_write_timeout_secs(),
            shutdown_timeout_secs: default_shutdown_timeout_secs(),
            database: DatabaseConfig::default(),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs)
    }

    pub fn write_timeout(&self) -> Duration {
        Duration::from_secs(self.write_timeout_secs)
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            max_size: default_max_size(),
            min_idle: default_min_idle(),
            max_lifetime_secs: default_max_lifetime_secs(),
            idle_timeout_secs: default_idle_timeout_secs(),
            connection_timeout_secs: default_connection_timeout_secs(),
            busy_timeout_ms: default_busy_timeout_ms(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: ServerConfig =
            serde_json::from_value(serde_json::json!({ "database_url": "app.db" })).unwrap();

        assert_eq!(config.address, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
        assert_eq!(config.body_limit, 2 * 1024 * 1024);
        assert_eq!(config.read_timeout(), Duration::from_secs(10));
        assert_eq!(config.write_timeout(), Duration::from_secs(10));
        assert_eq!(config.shutdown_timeout_secs, 5);
        assert_eq!(config.database.max_size, 60);
        assert_eq!(config.database.min_idle, 30);
    }

    #[test]
    fn nested_database_settings_override_defaults() {
        let config: ServerConfig = serde_json::from_value(serde_json::json!({
            "database_url": "app.db",
            "database": { "max_size": 4 }
        }))
        .unwrap();

        assert_eq!(config.database.max_size, 4);
        assert_eq!(config.database.busy_timeout_ms, 5000);
    }
}
