//! Configuration management

use marcbench_ingest::remote::hub::{DEFAULT_HUB_CONFIG, DEFAULT_HUB_URL, MAX_PAGE_SIZE};
use serde::{Deserialize, Serialize};

// ============================================================================
// Server Configuration Constants
// ============================================================================

/// Default server host binding.
pub const DEFAULT_SERVER_HOST: &str = "127.0.0.1";

/// Default server port.
pub const DEFAULT_SERVER_PORT: u16 = 8000;

/// Default shutdown timeout in seconds.
pub const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 30;

/// Default run history database, created next to the working directory.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://marcbench.db";

/// Default maximum database connections in the pool.
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 5;

/// Default CORS allowed origin for local development.
pub const DEFAULT_CORS_ALLOWED_ORIGIN: &str = "http://localhost:3000";

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub hub: HubConfig,
    pub cors: CorsConfig,
}

/// Server-specific configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub shutdown_timeout_secs: u64,
}

/// Run history database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// Dataset hub configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HubConfig {
    pub base_url: String,
    pub config_name: String,
    pub page_size: usize,
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub allow_credentials: bool,
}

/// Parse `key` when set, `default` otherwise. A set but unparseable value is an error.
fn env_or<T: std::str::FromStr>(key: &str, default: T) -> anyhow::Result<T> {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("Invalid value for {}: '{}'", key, raw)),
        Err(_) => Ok(default),
    }
}

impl Config {
    /// Load configuration from environment and defaults
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Config {
            server: ServerConfig {
                host: std::env::var("MARCBENCH_HOST")
                    .unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
                port: env_or("MARCBENCH_PORT", DEFAULT_SERVER_PORT)?,
                shutdown_timeout_secs: env_or(
                    "MARCBENCH_SHUTDOWN_TIMEOUT",
                    DEFAULT_SHUTDOWN_TIMEOUT_SECS,
                )?,
            },
            database: DatabaseConfig {
                url: std::env::var("DATABASE_URL")
                    .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
                max_connections: env_or(
                    "DATABASE_MAX_CONNECTIONS",
                    DEFAULT_DATABASE_MAX_CONNECTIONS,
                )?,
            },
            hub: HubConfig {
                base_url: std::env::var("MARCBENCH_HUB_URL")
                    .unwrap_or_else(|_| DEFAULT_HUB_URL.to_string()),
                config_name: std::env::var("MARCBENCH_HUB_CONFIG")
                    .unwrap_or_else(|_| DEFAULT_HUB_CONFIG.to_string()),
                page_size: env_or("MARCBENCH_HUB_PAGE_SIZE", MAX_PAGE_SIZE)?,
            },
            cors: CorsConfig {
                allowed_origins: std::env::var("CORS_ALLOWED_ORIGINS")
                    .unwrap_or_else(|_| DEFAULT_CORS_ALLOWED_ORIGIN.to_string())
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect(),
                allow_credentials: env_or("CORS_ALLOW_CREDENTIALS", true)?,
            },
        };

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.server.port == 0 {
            anyhow::bail!("Server port must be greater than 0");
        }

        if self.database.url.is_empty() {
            anyhow::bail!("Database URL cannot be empty");
        }

        if self.database.max_connections == 0 {
            anyhow::bail!("Database max_connections must be greater than 0");
        }

        if self.hub.base_url.is_empty() {
            anyhow::bail!("Dataset hub URL cannot be empty");
        }

        if !(1..=MAX_PAGE_SIZE).contains(&self.hub.page_size) {
            anyhow::bail!(
                "Hub page size must be between 1 and {} (got {})",
                MAX_PAGE_SIZE,
                self.hub.page_size
            );
        }

        if self.cors.allowed_origins.is_empty() {
            tracing::warn!("No CORS origins configured - all origins will be allowed");
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: DEFAULT_SERVER_HOST.to_string(),
                port: DEFAULT_SERVER_PORT,
                shutdown_timeout_secs: DEFAULT_SHUTDOWN_TIMEOUT_SECS,
            },
            database: DatabaseConfig {
                url: DEFAULT_DATABASE_URL.to_string(),
                max_connections: DEFAULT_DATABASE_MAX_CONNECTIONS,
            },
            hub: HubConfig {
                base_url: DEFAULT_HUB_URL.to_string(),
                config_name: DEFAULT_HUB_CONFIG.to_string(),
                page_size: MAX_PAGE_SIZE,
            },
            cors: CorsConfig {
                allowed_origins: vec![DEFAULT_CORS_ALLOWED_ORIGIN.to_string()],
                allow_credentials: true,
            },
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serial_test::serial;

    const KEYS: &[&str] = &[
        "MARCBENCH_HOST",
        "MARCBENCH_PORT",
        "MARCBENCH_HUB_PAGE_SIZE",
        "MARCBENCH_HUB_URL",
        "MARCBENCH_SHUTDOWN_TIMEOUT",
        "CORS_ALLOWED_ORIGINS",
        "DATABASE_URL",
    ];

    fn clear_env() {
        for key in KEYS {
            std::env::remove_var(key);
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.database.url, "sqlite://marcbench.db");
        assert_eq!(config.hub.page_size, 100);
    }

    #[test]
    fn test_validate_rejects_bad_page_size() {
        let mut config = Config::default();
        config.hub.page_size = 0;
        assert!(config.validate().is_err());

        config.hub.page_size = 101;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_port() {
        let mut config = Config::default();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    #[serial]
    fn test_load_reads_environment() {
        clear_env();
        std::env::set_var("MARCBENCH_PORT", "9100");
        std::env::set_var("MARCBENCH_HUB_URL", "http://hub.internal");
        std::env::set_var("CORS_ALLOWED_ORIGINS", "http://a.test, http://b.test,");
        std::env::set_var("DATABASE_URL", "sqlite::memory:");

        let config = Config::load().unwrap();
        clear_env();

        assert_eq!(config.server.port, 9100);
        assert_eq!(config.hub.base_url, "http://hub.internal");
        assert_eq!(config.cors.allowed_origins, vec!["http://a.test", "http://b.test"]);
        assert_eq!(config.database.url, "sqlite::memory:");
    }

    #[test]
    #[serial]
    fn test_load_rejects_out_of_range_page_size() {
        clear_env();
        std::env::set_var("MARCBENCH_HUB_PAGE_SIZE", "500");

        let result = Config::load();
        clear_env();

        assert!(result.is_err());
    }

    #[test]
    #[serial]
    fn test_load_rejects_unparseable_values() {
        clear_env();
        std::env::set_var("MARCBENCH_HUB_PAGE_SIZE", "abc");
        let page_size = Config::load();
        clear_env();

        std::env::set_var("MARCBENCH_PORT", "x");
        let port = Config::load();
        clear_env();

        let err = page_size.unwrap_err().to_string();
        assert!(err.contains("MARCBENCH_HUB_PAGE_SIZE"));
        assert!(err.contains("abc"));
        assert!(port.is_err());
    }
}
