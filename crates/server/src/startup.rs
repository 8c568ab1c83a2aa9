use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::{AppConfig, StorageBackend};
use tower_http::cors::CorsLayer;
use tracing::info;

use service::customer::{
    repo::{MapCustomerRepository, SeaOrmCustomerRepository},
    CustomerRepository,
};

use crate::errors::StartupError;
use crate::routes::{self, ServerState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Construct the customer store selected by `storage.backend`.
pub async fn build_repository(cfg: &AppConfig) -> anyhow::Result<Arc<dyn CustomerRepository>> {
    let repo: Arc<dyn CustomerRepository> = match cfg.storage.backend {
        StorageBackend::Postgres => {
            let db = models::db::connect_with_config(&cfg.database).await?;
            Arc::new(SeaOrmCustomerRepository { db })
        }
        StorageBackend::Memory => Arc::new(MapCustomerRepository::in_memory().await),
        StorageBackend::File => Arc::new(MapCustomerRepository::open(&cfg.storage.file_path).await?),
    };
    info!(backend = ?cfg.storage.backend, "customer store ready");
    Ok(repo)
}

/// Wire state and router together for an already-built store.
pub fn build_app(repo: Arc<dyn CustomerRepository>) -> Router {
    routes::build_router(ServerState::new(repo), build_cors())
}

fn bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    let raw = cfg.bind_addr();
    raw.parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bind address {raw}: {e}")))
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // no signal handler available; run until the process is killed
        std::future::pending::<()>().await;
    }
    info!("received Ctrl+C, shutting down");
}

/// Public entry: build the app from `cfg` and serve until Ctrl+C.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let addr = bind_addr(&cfg)?;
    let repo = build_repository(&cfg).await?;
    let app = build_app(repo);

    info!(%addr, "starting customer api");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
