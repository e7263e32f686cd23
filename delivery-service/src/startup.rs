//! Application startup and lifecycle management.

use std::net::SocketAddr;
use std::sync::Arc;

use service_core::error::AppError;
use tokio::net::TcpListener;

use crate::config::Config;
use crate::services::{Database, DeliveryRepository};
use crate::{build_router, db, AppState};

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application: connect to Postgres, run migrations, bind the
    /// listener (port 0 = random port for testing).
    pub async fn build(config: Config) -> Result<Self, AppError> {
        let pool = db::create_pool(&config.database).await.map_err(|e| {
            tracing::error!("Failed to create database pool: {}", e);
            AppError::DatabaseError(anyhow::anyhow!(e))
        })?;

        db::run_migrations(&pool).await.map_err(|e| {
            tracing::error!("Failed to run migrations: {}", e);
            AppError::DatabaseError(anyhow::anyhow!(e))
        })?;

        let repository: Arc<dyn DeliveryRepository> = Arc::new(Database::new(pool));
        let state = AppState::new(config.clone(), repository);

        let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Delivery service listening on port {}", port);

        Ok(Self {
            port,
            listener,
            state,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn state(&self) -> AppState {
        self.state.clone()
    }

    /// Run the application until stopped.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = build_router(self.state);
        axum::serve(self.listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received SIGINT, starting graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}
