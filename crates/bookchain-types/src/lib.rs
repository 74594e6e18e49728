//! Foundation types for Bookchain.
//!
//! Every other Bookchain crate depends on `bookchain-types`.
//!
//! # Key Types
//!
//! - [`CheckoutEvent`]: the payload sealed into each block of the chain
//! - [`Book`]: a catalogue record created by the HTTP surface

pub mod book;
pub mod checkout;

pub use book::Book;
pub use checkout::CheckoutEvent;
