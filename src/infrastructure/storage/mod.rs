//! Storage infrastructure - user store backends and schema migrations

mod factory;
pub mod migrations;
mod postgres;

pub use factory::{StorageConfig, StorageType, UserStoreFactory};
pub use migrations::{Migration, PostgresMigrator, run_migrations};
pub use postgres::{PostgresConfig, connect_pool};
