use std::sync::Arc;

use bookchain_ledger::Chain;

use crate::config::ServerConfig;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub chain: Arc<Chain>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(chain: Arc<Chain>, config: ServerConfig) -> Self {
        Self {
            chain,
            config: Arc::new(config),
        }
    }
}
