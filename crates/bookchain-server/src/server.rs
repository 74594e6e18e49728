use std::sync::Arc;

use bookchain_ledger::{Chain, ChainReader};
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::router::build_router;
use crate::state::AppState;

/// Bookchain HTTP server. Owns its configuration and shares the chain
/// with every request handler.
pub struct BookchainServer {
    config: ServerConfig,
    chain: Arc<Chain>,
}

impl BookchainServer {
    pub fn new(config: ServerConfig, chain: Arc<Chain>) -> Self {
        Self { config, chain }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn chain(&self) -> &Arc<Chain> {
        &self.chain
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        build_router(AppState::new(Arc::clone(&self.chain), self.config.clone()))
    }

    /// Log every block currently on the chain.
    pub fn log_chain(&self) -> ServerResult<()> {
        for block in self.chain.read()? {
            tracing::info!(
                position = block.position(),
                prev_hash = %block.prev_hash(),
                payload = %block.payload(),
                hash = %block.hash(),
                "block"
            );
        }
        Ok(())
    }

    /// Bind the configured address and serve until Ctrl-C.
    pub async fn serve(self) -> ServerResult<()> {
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        self.serve_on(listener).await
    }

    /// Serve on an already bound listener until Ctrl-C.
    pub async fn serve_on(self, listener: TcpListener) -> ServerResult<()> {
        self.log_chain()?;
        let app = self.router();
        tracing::info!("bookchain server listening on {}", listener.local_addr()?);
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "could not listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_construction() {
        let server = BookchainServer::new(ServerConfig::default(), Arc::new(Chain::new()));
        assert_eq!(server.config().bind_addr, "127.0.0.1:3000".parse().unwrap());
        assert_eq!(server.chain().block_count().unwrap(), 1);
    }

    #[test]
    fn router_builds() {
        let server = BookchainServer::new(ServerConfig::default(), Arc::new(Chain::new()));
        let _router = server.router();
        server.log_chain().unwrap();
    }
}
