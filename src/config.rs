//! Configuration module
//!
//! Settings load from a TOML file (default `~/.config/carlane/config.toml`,
//! overridable via `CARLANE_CONFIG`), with sane defaults when the file is
//! missing so the service runs out of the box against local SQLite.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level application configuration
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseSettings,
    pub security: SecurityConfig,
    pub logging: LoggingConfig,
    pub cache: CacheConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// SeaORM connection URL. SQLite by default, PostgreSQL URLs work too.
    pub url: String,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: "sqlite://./carlane.db?mode=rwc".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Shared secret the identity provider signs tokens with
    pub jwt_secret: String,
    /// Expected `iss` claim on incoming tokens
    pub jwt_issuer: String,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "super-secret-key-change-in-production".to_string(),
            jwt_issuer: "carlane-identity".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default tracing filter, overridden by RUST_LOG
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info,sqlx=warn".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// How long the latest-cars landing response stays cached
    pub latest_cars_ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            latest_cars_ttl_secs: 15 * 60,
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        let cfg: AppConfig = toml::from_str(&raw)?;
        Ok(cfg.with_env_overrides())
    }

    /// Environment variables win over any other source for deploy-time
    /// secrets. Applies whether the settings came from a file or from
    /// defaults, so env-var-only deployments work without a config file.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var("DATABASE_URL") {
            self.database.url = url;
        }
        if let Ok(secret) = std::env::var("JWT_SECRET") {
            self.security.jwt_secret = secret;
        }
        self
    }
}

/// Default config location: `~/.config/carlane/config.toml`
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("carlane")
        .join("config.toml")
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_usable() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.server.port, 8080);
        assert!(cfg.database.url.starts_with("sqlite://"));
        assert_eq!(cfg.cache.latest_cars_ttl_secs, 900);
    }

    #[test]
    fn partial_file_falls_back_per_section() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [server]
            port = 9090

            [cache]
            latest_cars_ttl_secs = 60
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.port, 9090);
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.cache.latest_cars_ttl_secs, 60);
        assert_eq!(cfg.logging.level, "info,sqlx=warn");
    }

    #[test]
    fn env_overrides_apply_without_a_config_file() {
        std::env::set_var("DATABASE_URL", "postgres://db.example/carlane");

        let cfg = AppConfig::default().with_env_overrides();
        assert_eq!(cfg.database.url, "postgres://db.example/carlane");

        std::env::remove_var("DATABASE_URL");
    }
}
