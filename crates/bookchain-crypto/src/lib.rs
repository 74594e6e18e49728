//! Hashing primitives for Bookchain.
//!
//! Provides the BLAKE3 block digest that links the chain together and the
//! shorter digest used to derive book identifiers.
//!
//! All crypto operations wrap established libraries, no custom cryptography.

pub mod hasher;

pub use hasher::{ChainHasher, BOOK_ID_LEN, DIGEST_HEX_LEN};
