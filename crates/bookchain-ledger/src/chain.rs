use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use bookchain_types::CheckoutEvent;

use crate::block::Block;
use crate::error::{ChainError, LinkageViolation};
use crate::traits::{ChainReader, ChainWriter};

/// In-memory checkout chain.
///
/// Always holds at least the genesis block. Appends run under the write
/// lock from reading the tail to pushing the new block, so two concurrent
/// appends can never build on the same tail. Reads take the read lock and
/// return a cloned snapshot.
pub struct Chain {
    inner: RwLock<Vec<Block>>,
}

impl Chain {
    /// Create a chain holding only a freshly stamped genesis block.
    pub fn new() -> Self {
        Self::from_genesis(Block::genesis())
    }

    fn from_genesis(genesis: Block) -> Self {
        tracing::debug!(hash = %genesis.hash(), "chain initialised with genesis block");
        Self {
            inner: RwLock::new(vec![genesis]),
        }
    }

    /// The genesis block.
    pub fn genesis(&self) -> Result<Block, ChainError> {
        let blocks = self.read_guard()?;
        blocks.first().cloned().ok_or(ChainError::MissingGenesis)
    }

    fn read_guard(&self) -> Result<RwLockReadGuard<'_, Vec<Block>>, ChainError> {
        self.inner.read().map_err(|_| ChainError::LockPoisoned)
    }

    fn write_guard(&self) -> Result<RwLockWriteGuard<'_, Vec<Block>>, ChainError> {
        self.inner.write().map_err(|_| ChainError::LockPoisoned)
    }

    fn link(blocks: &mut Vec<Block>, candidate: Block) -> Result<Block, ChainError> {
        let tail = blocks.last().ok_or(ChainError::MissingGenesis)?;
        if let Err(violation) = validate_link(tail, &candidate) {
            tracing::warn!(
                position = candidate.position(),
                tail = tail.position(),
                %violation,
                "rejected block"
            );
            return Err(ChainError::Rejected(violation));
        }

        tracing::info!(
            position = candidate.position(),
            hash = %candidate.hash(),
            "appended block"
        );
        blocks.push(candidate.clone());
        Ok(candidate)
    }
}

#[cfg(test)]
impl Chain {
    pub(crate) fn inner_for_tests(&self) -> &RwLock<Vec<Block>> {
        &self.inner
    }
}

impl Default for Chain {
    fn default() -> Self {
        Self::new()
    }
}

/// Decide whether `candidate` may directly follow `tail`.
///
/// Checks, in order: the candidate's prev hash is the tail's hash, the
/// candidate's stored hash matches its fields, and its position is one
/// past the tail's.
pub fn validate_link(tail: &Block, candidate: &Block) -> Result<(), LinkageViolation> {
    if candidate.prev_hash() != tail.hash() {
        return Err(LinkageViolation::PrevHashMismatch {
            expected: tail.hash().to_string(),
            found: candidate.prev_hash().to_string(),
        });
    }

    if !candidate.verify_hash(candidate.hash()) {
        return Err(LinkageViolation::HashMismatch {
            position: candidate.position(),
        });
    }

    if tail.position().checked_add(1) != Some(candidate.position()) {
        return Err(LinkageViolation::PositionGap {
            tail: tail.position(),
            found: candidate.position(),
        });
    }

    Ok(())
}

impl ChainWriter for Chain {
    fn append(&self, payload: CheckoutEvent) -> Result<Block, ChainError> {
        let mut blocks = self.write_guard()?;
        let tail = blocks.last().ok_or(ChainError::MissingGenesis)?;
        let candidate = Block::new(payload, tail);
        Self::link(&mut blocks, candidate)
    }

    fn extend(&self, candidate: Block) -> Result<Block, ChainError> {
        let mut blocks = self.write_guard()?;
        Self::link(&mut blocks, candidate)
    }
}

impl ChainReader for Chain {
    fn read(&self) -> Result<Vec<Block>, ChainError> {
        let blocks = self.read_guard()?;
        tracing::debug!(count = blocks.len(), "chain snapshot taken");
        Ok(blocks.clone())
    }

    fn tail(&self) -> Result<Block, ChainError> {
        let blocks = self.read_guard()?;
        blocks.last().cloned().ok_or(ChainError::MissingGenesis)
    }

    fn get(&self, position: u64) -> Result<Option<Block>, ChainError> {
        let blocks = self.read_guard()?;
        let Ok(index) = usize::try_from(position) else {
            return Ok(None);
        };
        Ok(blocks.get(index).cloned())
    }

    fn block_count(&self) -> Result<u64, ChainError> {
        Ok(self.read_guard()?.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checkout(book: &str, user: &str) -> CheckoutEvent {
        CheckoutEvent::new(book, user, "2024-01-01")
    }

    #[test]
    fn fresh_chain_holds_only_genesis() {
        let chain = Chain::new();
        let blocks = chain.read().unwrap();
        assert_eq!(blocks.len(), 1);
        assert!(blocks[0].is_genesis());
        assert_eq!(chain.genesis().unwrap(), blocks[0]);
        assert_eq!(chain.tail().unwrap(), blocks[0]);
    }

    #[test]
    fn append_extends_tail() {
        let chain = Chain::new();
        let genesis = chain.genesis().unwrap();

        let b1 = chain.append(checkout("b1", "alice")).unwrap();
        let b2 = chain.append(checkout("b2", "bob")).unwrap();

        assert_eq!(b1.position(), 1);
        assert_eq!(b1.prev_hash(), genesis.hash());
        assert_eq!(b2.position(), 2);
        assert_eq!(b2.prev_hash(), b1.hash());
        assert_eq!(chain.block_count().unwrap(), 3);
        assert_eq!(chain.tail().unwrap(), b2);
    }

    #[test]
    fn stale_candidate_is_rejected() {
        let chain = Chain::new();
        let genesis = chain.genesis().unwrap();
        chain.append(checkout("b1", "alice")).unwrap();

        let stale = Block::new(checkout("b2", "bob"), &genesis);
        let error = chain.extend(stale).unwrap_err();

        assert!(matches!(
            error,
            ChainError::Rejected(LinkageViolation::PrevHashMismatch { .. })
        ));
        assert_eq!(chain.block_count().unwrap(), 2);
    }

    #[test]
    fn tampered_candidate_is_rejected() {
        let chain = Chain::new();
        let mut candidate = Block::new(checkout("b1", "alice"), &chain.tail().unwrap());
        candidate.payload_mut().user = "mallory".into();

        let error = chain.extend(candidate).unwrap_err();
        assert_eq!(
            error,
            ChainError::Rejected(LinkageViolation::HashMismatch { position: 1 })
        );
        assert_eq!(chain.block_count().unwrap(), 1);
    }

    #[test]
    fn validate_link_reports_position_gap() {
        let genesis = Block::genesis();
        let b1 = Block::new(checkout("b1", "alice"), &genesis);

        // Links to genesis but claims position 2.
        let skipped = Block::new(checkout("b2", "bob"), &b1).resealed_with_prev_hash(genesis.hash());
        assert_eq!(
            validate_link(&genesis, &skipped),
            Err(LinkageViolation::PositionGap { tail: 0, found: 2 })
        );
        assert_eq!(validate_link(&genesis, &b1), Ok(()));
    }

    #[test]
    fn get_by_position() {
        let chain = Chain::new();
        let b1 = chain.append(checkout("b1", "alice")).unwrap();
        assert_eq!(chain.get(1).unwrap(), Some(b1));
        assert!(chain.get(0).unwrap().unwrap().is_genesis());
        assert_eq!(chain.get(2).unwrap(), None);
        assert_eq!(chain.get(u64::MAX).unwrap(), None);
    }

    #[test]
    fn read_returns_snapshot() {
        let chain = Chain::new();
        let snapshot = chain.read().unwrap();
        chain.append(checkout("b1", "alice")).unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(chain.read().unwrap().len(), 2);
    }

    #[test]
    fn poisoned_lock_surfaces_as_error() {
        let chain = std::sync::Arc::new(Chain::new());
        let poisoner = std::sync::Arc::clone(&chain);
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.inner.write().unwrap();
            panic!("poison the chain lock");
        })
        .join();

        assert_eq!(chain.read().unwrap_err(), ChainError::LockPoisoned);
        assert_eq!(
            chain.append(checkout("b1", "alice")).unwrap_err(),
            ChainError::LockPoisoned
        );
    }
}
