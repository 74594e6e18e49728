//! Append-only checkout chain for Bookchain.
//!
//! This crate is the heart of Bookchain. It provides:
//! - [`Block`], sealed at construction with a hash over its own fields
//! - [`Chain`], rooted at a genesis block and extended only by validated append
//! - `ChainWriter` / `ChainReader` trait boundaries
//! - Full-chain audit reporting every corruption it finds

pub mod audit;
pub mod block;
pub mod chain;
pub mod error;
pub mod traits;

pub use audit::{AuditReport, ChainAuditor, Violation, ViolationKind};
pub use block::Block;
pub use chain::{validate_link, Chain};
pub use error::{ChainError, LinkageViolation};
pub use traits::{ChainReader, ChainWriter};
