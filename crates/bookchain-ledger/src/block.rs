use std::fmt;

use bookchain_crypto::ChainHasher;
use bookchain_types::CheckoutEvent;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// A sealed record holding one checkout event and its chain linkage.
///
/// Fields are private: a block is created only by [`Block::new`] or
/// [`Block::genesis`], which stamp the timestamp and compute the hash over
/// the block's own fields. Nothing can set `hash` on its own.
///
/// Serializes as `position`, `payload`, `timestamp`, `hash`, `prev_hash`.
/// A deserialized block is untrusted until it passes chain validation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    position: u64,
    payload: CheckoutEvent,
    timestamp: String,
    hash: String,
    prev_hash: String,
}

impl Block {
    /// Build the block that follows `predecessor`.
    ///
    /// Always succeeds; whether the block may join a chain is decided by
    /// the chain's linkage validation.
    pub fn new(payload: CheckoutEvent, predecessor: &Block) -> Self {
        Self::seal(
            predecessor.position.saturating_add(1),
            payload,
            now_timestamp(),
            predecessor.hash.clone(),
        )
    }

    /// The fixed first block: position 0, empty prev hash, sentinel payload.
    pub fn genesis() -> Self {
        Self::seal(0, CheckoutEvent::genesis(), now_timestamp(), String::new())
    }

    fn seal(position: u64, payload: CheckoutEvent, timestamp: String, prev_hash: String) -> Self {
        let mut block = Self {
            position,
            payload,
            timestamp,
            hash: String::new(),
            prev_hash,
        };
        block.hash = block.compute_hash();
        block
    }

    /// Hash of the block's current fields. Never touches the stored hash.
    pub fn compute_hash(&self) -> String {
        ChainHasher::block_hash(
            self.position,
            &self.timestamp,
            &self.payload.canonical_bytes(),
            &self.prev_hash,
        )
    }

    /// Recompute the hash and compare it with `expected`.
    pub fn verify_hash(&self, expected: &str) -> bool {
        self.compute_hash() == expected
    }

    /// Returns `true` if the stored hash matches the block's fields.
    pub fn is_intact(&self) -> bool {
        self.verify_hash(&self.hash)
    }

    /// Returns `true` if this block has the shape required of a genesis block.
    pub fn is_genesis(&self) -> bool {
        self.position == 0 && self.prev_hash.is_empty() && self.payload.is_genesis
    }

    pub fn position(&self) -> u64 {
        self.position
    }

    pub fn payload(&self) -> &CheckoutEvent {
        &self.payload
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn hash(&self) -> &str {
        &self.hash
    }

    pub fn prev_hash(&self) -> &str {
        &self.prev_hash
    }

    /// First eight hex characters of the hash.
    pub fn short_hash(&self) -> &str {
        self.hash.get(..8).unwrap_or(self.hash.as_str())
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} [{}] {}", self.position, self.short_hash(), self.payload)
    }
}

#[cfg(test)]
impl Block {
    pub(crate) fn payload_mut(&mut self) -> &mut CheckoutEvent {
        &mut self.payload
    }

    pub(crate) fn resealed_with_prev_hash(mut self, prev_hash: &str) -> Self {
        self.prev_hash = prev_hash.to_string();
        self.hash = self.compute_hash();
        self
    }
}

fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Nanos, true)
}
