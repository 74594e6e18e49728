use bookchain_types::CheckoutEvent;

use crate::block::Block;
use crate::error::ChainError;

/// Write boundary for chain append operations.
pub trait ChainWriter: Send + Sync {
    /// Build a block for `payload` on top of the current tail and append it.
    fn append(&self, payload: CheckoutEvent) -> Result<Block, ChainError>;

    /// Append a block that was constructed elsewhere, if it links to the tail.
    fn extend(&self, candidate: Block) -> Result<Block, ChainError>;
}

/// Read boundary for chain queries.
pub trait ChainReader: Send + Sync {
    /// Consistent snapshot of every block, genesis first.
    fn read(&self) -> Result<Vec<Block>, ChainError>;

    fn tail(&self) -> Result<Block, ChainError>;

    fn get(&self, position: u64) -> Result<Option<Block>, ChainError>;

    fn block_count(&self) -> Result<u64, ChainError>;
}
