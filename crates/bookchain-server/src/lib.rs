//! HTTP server for Bookchain.
//!
//! A thin boundary over the chain: decodes checkout events and book records
//! from JSON request bodies and serializes the chain for reads. The chain
//! itself is constructed by the caller and injected through [`AppState`].

pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use router::build_router;
pub use server::BookchainServer;
pub use state::AppState;
