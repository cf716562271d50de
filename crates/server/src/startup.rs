use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::{AppConfig, StorageBackend};
use migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use service::account::{AccountRepository, FileAccountRepository, SeaOrmAccountRepository};
use service::card::{CardRepository, FileCardRepository, SeaOrmCardRepository};
use service::seed::seed_sample_data;

use crate::errors::StartupError;
use crate::routes;
use crate::state::AppState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn load_bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", cfg.server.host, cfg.server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("server address: {e}")))
}

/// Open the account and card stores selected by `storage.backend`.
pub async fn open_stores(
    cfg: &AppConfig,
) -> Result<(Arc<dyn AccountRepository>, Arc<dyn CardRepository>), StartupError> {
    match cfg.storage.backend {
        StorageBackend::Database => {
            let db = models::db::connect_with_config(&cfg.database)
                .await
                .map_err(|e| StartupError::Storage(e.to_string()))?;
            if cfg.database.auto_migrate {
                migration::Migrator::up(&db, None)
                    .await
                    .map_err(|e| StartupError::Storage(format!("migrations: {e}")))?;
                info!(event = "migrations_applied", "schema up to date");
            }
            Ok((
                Arc::new(SeaOrmAccountRepository::new(db.clone())),
                Arc::new(SeaOrmCardRepository::new(db)),
            ))
        }
        StorageBackend::File => {
            let dir = &cfg.storage.data_dir;
            common::env::ensure_data_dir(dir).map_err(|e| StartupError::Storage(e.to_string()))?;
            let accounts = FileAccountRepository::open(dir.join("accounts.json")).await?;
            let cards = FileCardRepository::open(dir.join("cards.json")).await?;
            info!(data_dir = %dir.display(), "file stores opened");
            Ok((Arc::new(accounts), Arc::new(cards)))
        }
    }
}

/// Build the app from `cfg` and serve until Ctrl+C.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let (accounts, cards) = open_stores(&cfg).await?;
    let state = AppState::new(accounts, cards);

    if cfg.seed.enabled {
        match seed_sample_data(state.accounts.as_ref(), state.cards.as_ref(), cfg.seed.pairs).await {
            Ok(Some(report)) => {
                info!(event = "seeded", accounts = report.accounts, cards = report.cards, "sample data written")
            }
            Ok(None) => {}
            Err(e) => warn!(err = %e, "seeding failed; continuing without sample data"),
        }
    }

    let app: Router = routes::build_router(state, build_cors());

    let addr = load_bind_addr(&cfg)?;
    info!(%addr, backend = ?cfg.storage.backend, "starting server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(err = %e, "failed to listen for ctrl_c");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_addr_from_config() {
        let mut cfg = AppConfig::default();
        cfg.server.host = "0.0.0.0".into();
        cfg.server.port = 9090;
        assert_eq!(load_bind_addr(&cfg).unwrap().to_string(), "0.0.0.0:9090");
    }

    #[test]
    fn bad_host_is_invalid_config() {
        let mut cfg = AppConfig::default();
        cfg.server.host = "not a host".into();
        assert!(matches!(load_bind_addr(&cfg), Err(StartupError::InvalidConfig(_))));
    }

    #[tokio::test]
    async fn file_backend_creates_data_dir() -> anyhow::Result<()> {
        let dir = std::env::temp_dir().join(format!("bank-admin-startup-{}", std::process::id()));
        let mut cfg = AppConfig::default();
        cfg.storage.backend = StorageBackend::File;
        cfg.storage.data_dir = dir.join("nested");
        let (accounts, cards) = open_stores(&cfg).await?;
        assert!(accounts.list().await?.is_empty());
        assert!(cards.list().await?.is_empty());
        assert!(cfg.storage.data_dir.is_dir());
        let _ = std::fs::remove_dir_all(&dir);
        Ok(())
    }
}
