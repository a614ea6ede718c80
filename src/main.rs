use std::net::SocketAddr;
use std::sync::Arc;

use animal_quiz_backend::{
    config::{get_config, init_config, Config, LogFormat},
    database::{pool::create_pool, MemoryStore, PgStore, Store},
    routes, AppState,
};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_config()?;
    let config = get_config();
    init_tracing(config);

    let store = open_store(config).await?;
    let app_state = AppState::initialize(store, config).await?;
    let app = routes::router(app_state);

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
}

async fn open_store(config: &Config) -> anyhow::Result<Arc<dyn Store>> {
    if config.database_url.is_some() {
        let pool = create_pool(config).await?;
        info!("Connected to PostgreSQL");
        Ok(Arc::new(PgStore::new(pool)))
    } else {
        warn!("DATABASE_URL is not set, records are kept in memory only");
        Ok(Arc::new(MemoryStore::new()))
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {:?}", e);
        return;
    }
    info!("Shutdown signal received");
}
