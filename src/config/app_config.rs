use serde::Deserialize;

use crate::infrastructure::auth::{JwtConfig, TokenError};
use crate::infrastructure::storage::{PostgresConfig, StorageConfig, StorageType};
use crate::infrastructure::user::PasswordHashConfig;

const DEV_JWT_SECRET: &str = "change-me-in-production";

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub auth: AuthConfig,
    pub storage: StorageSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Session and credential settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Secret used to sign session tokens
    pub jwt_secret: String,
    /// Session token and cookie lifetime
    pub token_ttl_hours: u64,
    /// Name of the session cookie
    pub cookie_name: String,
    /// Mark the session cookie `Secure`
    pub cookie_secure: bool,
    /// Argon2 work factor
    pub password: PasswordHashConfig,
}

/// User store settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    pub backend: StorageType,
    /// Falls back to the `DATABASE_URL` environment variable
    pub database_url: Option<String>,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
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

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: DEV_JWT_SECRET.to_string(),
            token_ttl_hours: 24,
            cookie_name: "jwt".to_string(),
            cookie_secure: false,
            password: PasswordHashConfig::default(),
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: StorageType::InMemory,
            database_url: None,
            max_connections: 5,
            min_connections: 1,
            connect_timeout_secs: 30,
        }
    }
}

impl AuthConfig {
    /// Whether the signing secret is still the development default
    pub fn uses_default_secret(&self) -> bool {
        self.jwt_secret == DEV_JWT_SECRET
    }

    /// Token service settings; fails on an out-of-range `token_ttl_hours`
    pub fn jwt_config(&self) -> Result<JwtConfig, TokenError> {
        JwtConfig::new(&self.jwt_secret, self.token_ttl_hours)
    }
}

impl StorageSettings {
    /// Resolve the user store configuration
    pub fn storage_config(&self) -> anyhow::Result<StorageConfig> {
        match self.backend {
            StorageType::InMemory => Ok(StorageConfig::in_memory()),
            StorageType::Postgres => {
                let url = match &self.database_url {
                    Some(url) => url.clone(),
                    None => std::env::var("DATABASE_URL").map_err(|_| {
                        anyhow::anyhow!(
                            "storage.database_url or DATABASE_URL is required for the postgres backend"
                        )
                    })?,
                };

                Ok(StorageConfig::Postgres(
                    PostgresConfig::new(url)
                        .with_max_connections(self.max_connections)
                        .with_min_connections(self.min_connections)
                        .with_connect_timeout(self.connect_timeout_secs),
                ))
            }
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
