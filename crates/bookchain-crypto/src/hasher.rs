/// Length of a block digest rendered as lowercase hex.
pub const DIGEST_HEX_LEN: usize = 64;

/// Number of digest bytes kept for a book identifier.
pub const BOOK_ID_LEN: usize = 16;

/// BLAKE3 hasher for chain blocks and book records.
///
/// The block digest covers the concatenation, in fixed order, of the
/// decimal position, the timestamp, the canonical payload bytes and the
/// predecessor hash. Changing any of them changes the digest.
pub struct ChainHasher;

impl ChainHasher {
    /// Digest of a block's canonical fields, as 64 lowercase hex characters.
    pub fn block_hash(position: u64, timestamp: &str, payload: &[u8], prev_hash: &str) -> String {
        let mut hasher = blake3::Hasher::new();
        hasher.update(position.to_string().as_bytes());
        hasher.update(timestamp.as_bytes());
        hasher.update(payload);
        hasher.update(prev_hash.as_bytes());
        hex::encode(hasher.finalize().as_bytes())
    }

    /// Recompute a block digest and compare it against `expected`.
    pub fn verify_block_hash(
        position: u64,
        timestamp: &str,
        payload: &[u8],
        prev_hash: &str,
        expected: &str,
    ) -> bool {
        Self::block_hash(position, timestamp, payload, prev_hash) == expected
    }

    /// Identifier for a book: the first [`BOOK_ID_LEN`] bytes of the digest
    /// over `isbn ++ publish_date`, as lowercase hex.
    pub fn book_id(isbn: &str, publish_date: &str) -> String {
        let mut hasher = blake3::Hasher::new();
        hasher.update(isbn.as_bytes());
        hasher.update(publish_date.as_bytes());
        hex::encode(&hasher.finalize().as_bytes()[..BOOK_ID_LEN])
    }

    /// Returns `true` if `s` has the shape of a block digest.
    pub fn is_digest_hex(s: &str) -> bool {
        s.len() == DIGEST_HEX_LEN
            && s.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
    }
}
