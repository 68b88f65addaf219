//! API server implementation.

use std::net::SocketAddr;
use std::sync::Arc;

use hive_logs::RecordStore;
use tokio::net::TcpListener;
use tracing::info;

use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult};
use crate::routes::create_router;
use crate::state::ApiState;

/// HTTP server for log ingestion and retrieval.
///
/// Serves the versioned REST API plus a health endpoint, with per-client
/// rate limiting on the versioned routes.
#[derive(Debug, Clone)]
pub struct ApiServer {
    state: Arc<ApiState>,
}

impl ApiServer {
    /// Create a new API server over the given store.
    #[must_use]
    pub fn new(config: ApiConfig, store: Arc<dyn RecordStore>) -> Self {
        let state = Arc::new(ApiState::new(config, store));
        Self { state }
    }

    /// Get the server state for external access.
    #[must_use]
    pub fn state(&self) -> Arc<ApiState> {
        self.state.clone()
    }

    /// Start the server and listen for connections.
    ///
    /// This method runs until the server encounters a fatal error.
    ///
    /// # Errors
    ///
    /// Returns an error if binding to the address fails.
    pub async fn serve(&self, addr: SocketAddr) -> ApiResult<()> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| ApiError::BindFailed(addr, e))?;

        info!(addr = %addr, "API server listening");

        let router = create_router(self.state.clone());

        axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;

        Ok(())
    }

    /// Start the server with graceful shutdown support.
    ///
    /// The server will shut down when the provided future completes.
    ///
    /// # Errors
    ///
    /// Returns an error if binding to the address fails.
    pub async fn serve_with_shutdown<F>(&self, addr: SocketAddr, shutdown: F) -> ApiResult<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| ApiError::BindFailed(addr, e))?;

        info!(addr = %addr, "API server listening");

        let router = create_router(self.state.clone());

        axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;

        info!("API server shut down");
        Ok(())
    }

    /// Create the router without starting the server.
    ///
    /// Useful for testing or embedding in another server.
    #[must_use]
    pub fn router(&self) -> axum::Router {
        create_router(self.state.clone())
    }
}
