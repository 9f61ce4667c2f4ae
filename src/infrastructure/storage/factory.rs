//! User store factory

use std::sync::Arc;

use serde::Deserialize;
use tracing::info;

use super::migrations::run_migrations;
use super::postgres::{PostgresConfig, connect_pool};
use crate::domain::DomainError;
use crate::domain::user::UserRepository;
use crate::infrastructure::user::{InMemoryUserRepository, PostgresUserRepository};

/// Storage backend type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum StorageType {
    /// In-memory storage (for testing/development)
    #[default]
    InMemory,
    /// PostgreSQL storage
    Postgres,
}

impl StorageType {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "memory" | "inmemory" | "in-memory" | "in_memory" => Some(Self::InMemory),
            "postgres" | "postgresql" | "pg" => Some(Self::Postgres),
            _ => None,
        }
    }
}

impl TryFrom<String> for StorageType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or_else(|| format!("Unknown storage backend '{}'", value))
    }
}

/// Storage configuration
#[derive(Debug, Clone)]
pub enum StorageConfig {
    /// In-memory storage configuration
    InMemory,
    /// PostgreSQL storage configuration
    Postgres(PostgresConfig),
}

impl StorageConfig {
    /// Creates an in-memory storage configuration
    pub fn in_memory() -> Self {
        Self::InMemory
    }

    /// Creates a PostgreSQL configuration from a URL
    pub fn postgres_url(url: impl Into<String>) -> Self {
        Self::Postgres(PostgresConfig::new(url))
    }

    pub fn storage_type(&self) -> StorageType {
        match self {
            Self::InMemory => StorageType::InMemory,
            Self::Postgres(_) => StorageType::Postgres,
        }
    }
}

/// Factory for creating user store instances
#[derive(Debug)]
pub struct UserStoreFactory;

impl UserStoreFactory {
    /// Creates a user store based on the configuration
    ///
    /// PostgreSQL stores have pending migrations applied before use.
    pub async fn create(config: &StorageConfig) -> Result<Arc<dyn UserRepository>, DomainError> {
        match config {
            StorageConfig::InMemory => {
                info!("Using in-memory user store");
                Ok(Arc::new(InMemoryUserRepository::new()))
            }
            StorageConfig::Postgres(pg_config) => {
                let pool = connect_pool(pg_config).await?;
                let applied = run_migrations(&pool).await?;
                info!(applied, "Using PostgreSQL user store");
                Ok(Arc::new(PostgresUserRepository::new(pool)))
            }
        }
    }
}
