use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use sea_orm::DatabaseConnection;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use product_catalog_api::{
    config::{AppConfig, StorageBackend},
    db::{create_orm_conn, run_migrations},
    repository::{DatabaseProductRepository, InMemoryProductRepository, ProductRepository},
    routes::create_app,
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,product_catalog_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;

    let mut db: Option<DatabaseConnection> = None;
    let products: Arc<dyn ProductRepository> = match config.storage {
        StorageBackend::Memory => Arc::new(InMemoryProductRepository::new()),
        StorageBackend::Database => {
            let url = config
                .database_url
                .as_deref()
                .context("DATABASE_URL is required for the database backend")?;
            let conn = create_orm_conn(url, config.db_max_connections).await?;
            run_migrations(&conn, &config.migrations_dir).await?;
            db = Some(conn.clone());
            Arc::new(DatabaseProductRepository::new(conn))
        }
    };
    tracing::info!(storage = products.backend(), "product repository ready");

    let app = create_app(AppState::new(products));

    let addr = SocketAddr::from((config.host.parse::<std::net::IpAddr>()?, config.port));
    tracing::info!("listening on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(conn) = db {
        conn.close().await?;
        tracing::info!("database connections closed");
    }
    tracing::info!("server stopped");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
