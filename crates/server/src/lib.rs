#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod api;
mod error;

pub use api::handlers::{INSTRUCTIONS, MISSING_DOMAIN, RecordStatus, StatusResponse};
pub use error::{Result, ServerError};

use std::net::SocketAddr;
use std::sync::Arc;

use certd_cache::{CacheConfig, Coordinator, Status};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Configuration for the certificate server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind the HTTP listener.
    pub listen: SocketAddr,
    pub cache: CacheConfig,
}

/// HTTP front end for the certificate cache.
///
/// Follows the start/use/stop lifecycle pattern:
///
/// ```ignore
/// let server = CertServer::start(config).await?;
/// // ... serve traffic ...
/// server.stop().await?;
/// ```
///
/// The cache lives exactly as long as the server: it is created empty by
/// `start` and dropped by `stop`.
pub struct CertServer {
    addr: SocketAddr,
    coordinator: Arc<Coordinator>,
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

impl CertServer {
    /// Issue the own certificate, then bind and start serving.
    ///
    /// No request is accepted before the own certificate exists.
    pub async fn start(config: ServerConfig) -> Result<Self> {
        let coordinator = Arc::new(Coordinator::new(config.cache)?);

        coordinator.bootstrap().await;
        let own = coordinator.store().get(coordinator.self_name()).map(|r| r.status());
        if own != Some(Status::Certified) {
            return Err(ServerError::Bootstrap(format!(
                "own certificate for {} is {own:?}",
                coordinator.self_name()
            )));
        }

        let listener = TcpListener::bind(config.listen)
            .await
            .map_err(|source| ServerError::Bind { address: config.listen.to_string(), source })?;
        let addr = listener
            .local_addr()
            .map_err(|source| ServerError::Bind { address: config.listen.to_string(), source })?;

        let router = api::router(api::AppState { coordinator: Arc::clone(&coordinator) });
        let cancel = CancellationToken::new();
        let shutdown = cancel.clone();
        let handle = tokio::spawn(async move {
            if let Err(e) =
                axum::serve(listener, router).with_graceful_shutdown(shutdown.cancelled_owned()).await
            {
                tracing::warn!("http server: {e}");
            }
        });

        tracing::info!(addr = %addr, self_name = %coordinator.self_name(), "certificate server listening");
        Ok(Self { addr, coordinator, cancel, handle })
    }

    /// The address the server is listening on.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn coordinator(&self) -> &Arc<Coordinator> {
        &self.coordinator
    }

    /// Stop accepting connections and wait for in-flight requests.
    pub async fn stop(self) -> Result<()> {
        self.cancel.cancel();
        let _ = self.handle.await;
        tracing::info!("certificate server stopped");
        Ok(())
    }
}
