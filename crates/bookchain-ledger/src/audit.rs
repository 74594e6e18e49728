use bookchain_crypto::ChainHasher;
use serde::Serialize;

use crate::block::Block;
use crate::error::ChainError;
use crate::traits::ChainReader;

/// Result of a full-chain audit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AuditReport {
    pub block_count: u64,
    pub genesis_valid: bool,
    pub positions_sequential: bool,
    pub links_intact: bool,
    pub hashes_intact: bool,
    pub violations: Vec<Violation>,
}

impl AuditReport {
    /// Returns `true` if all checks passed.
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }
}

/// A specific corruption detected during an audit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Index of the offending block in the sequence.
    pub index: u64,
    pub kind: ViolationKind,
    pub description: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    MissingGenesis,
    MalformedGenesis,
    PositionGap,
    BrokenLink,
    MalformedHash,
    HashMismatch,
}

/// Re-validates every block already sealed into a chain.
///
/// Unlike append validation, an audit does not stop at the first problem:
/// it reports every violation it finds and never repairs anything.
pub struct ChainAuditor;

impl ChainAuditor {
    /// Audit a live chain through its read boundary.
    pub fn audit<R: ChainReader>(reader: &R) -> Result<AuditReport, ChainError> {
        let blocks = reader.read()?;
        Ok(Self::audit_blocks(&blocks))
    }

    /// Audit a snapshot of blocks, genesis first.
    pub fn audit_blocks(blocks: &[Block]) -> AuditReport {
        let mut violations = Vec::new();
        let mut genesis_valid = true;
        let mut positions_sequential = true;
        let mut links_intact = true;
        let mut hashes_intact = true;

        match blocks.first() {
            None => {
                genesis_valid = false;
                violations.push(Violation {
                    index: 0,
                    kind: ViolationKind::MissingGenesis,
                    description: "chain is empty".into(),
                });
            }
            Some(first) if !first.is_genesis() => {
                genesis_valid = false;
                violations.push(Violation {
                    index: 0,
                    kind: ViolationKind::MalformedGenesis,
                    description: format!(
                        "first block must be a genesis block at position 0 with empty prev_hash, got {first}"
                    ),
                });
            }
            Some(_) => {}
        }

        for (index, block) in blocks.iter().enumerate() {
            let index = index as u64;

            if block.position() != index {
                positions_sequential = false;
                violations.push(Violation {
                    index,
                    kind: ViolationKind::PositionGap,
                    description: format!("expected position {index}, found {}", block.position()),
                });
            }

            if index > 0 {
                let previous = &blocks[(index - 1) as usize];
                if block.prev_hash() != previous.hash() {
                    links_intact = false;
                    violations.push(Violation {
                        index,
                        kind: ViolationKind::BrokenLink,
                        description: "prev_hash does not match predecessor hash".into(),
                    });
                }
            }

            if !ChainHasher::is_digest_hex(block.hash()) {
                hashes_intact = false;
                violations.push(Violation {
                    index,
                    kind: ViolationKind::MalformedHash,
                    description: format!("stored hash {:?} is not a hex digest", block.hash()),
                });
            } else if !block.is_intact() {
                hashes_intact = false;
                violations.push(Violation {
                    index,
                    kind: ViolationKind::HashMismatch,
                    description: "stored hash does not match recomputed hash".into(),
                });
            }
        }

        if !violations.is_empty() {
            tracing::warn!(count = violations.len(), "chain audit found violations");
        }

        AuditReport {
            block_count: blocks.len() as u64,
            genesis_valid,
            positions_sequential,
            links_intact,
            hashes_intact,
            violations,
        }
    }
}
