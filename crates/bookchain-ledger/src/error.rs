/// Why a candidate block may not extend the chain.
///
/// Checks run in this order and the first failure is reported.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LinkageViolation {
    #[error("prev_hash {found:?} does not match tail hash {expected:?}")]
    PrevHashMismatch { expected: String, found: String },

    #[error("stored hash does not match recomputed hash at position {position}")]
    HashMismatch { position: u64 },

    #[error("position {found} does not follow tail position {tail}")]
    PositionGap { tail: u64, found: u64 },
}

/// Errors produced by chain operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChainError {
    /// The candidate failed linkage validation. The chain is unchanged.
    #[error("append rejected: {0}")]
    Rejected(#[from] LinkageViolation),

    #[error("chain has no genesis block")]
    MissingGenesis,

    #[error("chain lock poisoned")]
    LockPoisoned,
}
