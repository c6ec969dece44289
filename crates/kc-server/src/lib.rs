//! # kc-server
//!
//! Main Axum server for Keycloak Rust.
//!
//! This crate provides the HTTP server combining:
//! - Admin REST API endpoints for client installation downloads
//! - Health check endpoints
//!
//! ## Usage
//!
//! ```ignore
//! use kc_server::{Server, ServerConfig};
//!
//! let config = ServerConfig::from_env()?;
//! let server = Server::new(config).await?;
//! server.run().await?;
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod config;
pub mod providers;
pub mod router;
pub mod state;

pub use config::ServerConfig;
pub use router::create_router;
pub use state::AppState;

use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;

use kc_storage::MemoryStore;

/// The Keycloak Rust server.
pub struct Server {
    state: AppState,
}

impl Server {
    /// Creates a new server instance.
    ///
    /// Deploys the built-in providers and loads the realm import file, if
    /// one is configured.
    ///
    /// ## Errors
    ///
    /// Returns an error if a provider fails to deploy or the import fails.
    pub async fn new(config: ServerConfig) -> anyhow::Result<Self> {
        let registry = providers::build_registry(&config.installation).await?;
        let store = Arc::new(MemoryStore::new());

        if let Some(path) = &config.import_file {
            providers::seed_store(&store, path).await?;
        } else {
            tracing::warn!("no realm import file configured, storage starts empty");
        }

        Ok(Self {
            state: AppState::new(config, store, registry),
        })
    }

    /// Runs the server.
    ///
    /// This starts the HTTP server and blocks until it receives a shutdown signal.
    ///
    /// ## Errors
    ///
    /// Returns an error if the listener cannot be bound.
    pub async fn run(self) -> anyhow::Result<()> {
        let config = self.state.config();
        let listener = TcpListener::bind((config.host.as_str(), config.port))
            .await
            .with_context(|| format!("binding {}:{}", config.host, config.port))?;

        self.serve(listener, shutdown_signal()).await
    }

    /// Serves requests on `listener` until `shutdown` completes.
    ///
    /// ## Errors
    ///
    /// Returns an error if serving fails.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> anyhow::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(
            base_url = %self.state.config().base_url,
            "Server listening on http://{addr}"
        );

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }

    /// Returns the in-memory store.
    #[must_use]
    pub fn store(&self) -> &Arc<MemoryStore> {
        &self.state.store
    }

    /// Returns the server configuration.
    #[must_use]
    pub const fn config(&self) -> &ServerConfig {
        &self.state.config
    }

    /// Creates the router without starting the server.
    ///
    /// This is useful for integration testing.
    pub fn router(&self) -> Router {
        create_router(self.state.clone())
    }
}

/// Waits for a shutdown signal.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
