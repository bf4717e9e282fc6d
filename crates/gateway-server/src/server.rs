//! HTTP server.

use crate::{routes::create_router, shutdown, state::AppState};
use std::future::Future;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::info;

/// The gateway HTTP server
pub struct Server {
    state: AppState,
}

impl Server {
    /// Create a server listening on `server.host`/`server.port` of the
    /// state's configuration
    #[must_use]
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Bind and serve until a shutdown signal arrives
    ///
    /// # Errors
    /// Returns error if the address cannot be bound or serving fails
    pub async fn run(self) -> std::io::Result<()> {
        self.run_until(std::future::pending()).await
    }

    /// Bind and serve until `trigger` completes or a shutdown signal arrives
    ///
    /// # Errors
    /// Returns error if the address cannot be bound or serving fails
    pub async fn run_until<F>(self, trigger: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let server = &self.state.config.server;
        let listener = TcpListener::bind((server.host.as_str(), server.port)).await?;
        self.serve(listener, trigger).await
    }

    /// Serve on an already bound listener
    ///
    /// # Errors
    /// Returns error if serving fails
    pub async fn serve<F>(self, listener: TcpListener, trigger: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr: SocketAddr = listener.local_addr()?;
        let gateway = &self.state.gateway;
        info!(
            %addr,
            providers = ?gateway.registry().provider_ids(),
            fallback_service = gateway.fallback_service().unwrap_or("none"),
            "Site summary gateway listening"
        );

        let app = create_router(self.state);
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown::shutdown_on(trigger))
            .await?;

        info!("Server stopped");
        Ok(())
    }
}
