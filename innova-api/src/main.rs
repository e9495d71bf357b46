use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use innova_api::{app, AppState, AuthConfig};
use innova_store::app_config::{Config, StoreBackend};
use innova_store::{DbClient, InMemoryStore, MongoBookingRepository, MongoReviewRepository, MongoRoomRepository};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "innova_api=debug,innova_store=debug,tower_http=debug,axum::rejection=trace".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("Failed to load config")?;
    tracing::info!(
        "Starting Innova API on port {} ({:?})",
        config.server.port,
        config.server.environment
    );

    let auth = AuthConfig::from_config(&config);
    let allowed_origins = config.cors.allowed_origins.clone();

    let (app_state, db) = match config.database.backend {
        StoreBackend::Mongo => {
            let db = DbClient::new(&config.database.url, &config.database.name)
                .await
                .context("Failed to configure MongoDB client")?;
            db.ping().await.context("Failed to reach MongoDB")?;

            let state = AppState {
                rooms: Arc::new(MongoRoomRepository::new(&db)),
                bookings: Arc::new(MongoBookingRepository::new(&db)),
                reviews: Arc::new(MongoReviewRepository::new(&db)),
                auth,
                allowed_origins,
            };
            (state, Some(db))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using the in-memory store; data is lost on exit");
            let store = Arc::new(InMemoryStore::new());
            let state = AppState {
                rooms: store.clone(),
                bookings: store.clone(),
                reviews: store,
                auth,
                allowed_origins,
            };
            (state, None)
        }
    };

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app(app_state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    if let Some(db) = db {
        db.shutdown().await;
    }
    tracing::info!("Innova API stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
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
    tracing::info!("Shutdown signal received. Draining connections...");
}
