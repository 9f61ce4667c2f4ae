//! Migrate command - applies pending PostgreSQL migrations

use tracing::info;

use crate::infrastructure::storage::{
    PostgresMigrator, StorageConfig, connect_pool, run_migrations,
};

/// Apply user store migrations and exit
pub async fn run() -> anyhow::Result<()> {
    let config = super::bootstrap()?;

    let StorageConfig::Postgres(postgres) = config.storage.storage_config()? else {
        anyhow::bail!("migrate requires storage.backend = postgres");
    };

    let pool = connect_pool(&postgres).await?;
    let applied = run_migrations(&pool).await?;
    let version = PostgresMigrator::new(pool).current_version().await?;

    info!(applied, version = ?version, "Migrations complete");

    Ok(())
}
