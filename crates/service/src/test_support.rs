#![cfg(test)]
use std::path::{Path, PathBuf};

use configs::DatabaseConfig;
use migration::MigratorTrait;
use models::db::connect_with_config;
use sea_orm::DatabaseConnection;

/// Fresh in-memory SQLite database with migrations applied. One per test.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let cfg = DatabaseConfig {
        url: "sqlite::memory:".into(),
        max_connections: 1,
        min_connections: 1,
        ..DatabaseConfig::default()
    };
    let db = connect_with_config(&cfg).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

/// Unique path under the system temp dir for a file-backed store.
pub fn temp_path(prefix: &str) -> PathBuf {
    std::env::temp_dir()
        .join("bank-admin-tests")
        .join(format!("{prefix}_{}.json", uuid::Uuid::new_v4()))
}

/// Make every later write of the store at `path` fail by occupying its temp file slot with a directory.
pub async fn block_writes(path: &Path) -> std::io::Result<PathBuf> {
    let tmp = path.with_extension("json.tmp");
    tokio::fs::create_dir_all(&tmp).await?;
    Ok(tmp)
}
