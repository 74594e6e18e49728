use std::fmt;

use serde::{Deserialize, Serialize};

/// A single book checkout, the payload carried by every block.
///
/// The chain treats all fields as opaque data: `book_id` is not checked
/// against any catalogue and no field is validated beyond decoding.
///
/// Wire names follow the historical JSON format (`check_date` rather than
/// `checkout_date`); `checkout_date` is accepted on input as an alias.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckoutEvent {
    /// Identifier of the book being checked out.
    pub book_id: String,
    /// Who checked the book out.
    pub user: String,
    /// Checkout date as supplied by the caller.
    #[serde(rename = "check_date", alias = "checkout_date")]
    pub checkout_date: String,
    /// Set only on the sentinel payload of the genesis block.
    pub is_genesis: bool,
}

impl CheckoutEvent {
    /// Create a regular (non-genesis) checkout event.
    pub fn new(
        book_id: impl Into<String>,
        user: impl Into<String>,
        checkout_date: impl Into<String>,
    ) -> Self {
        Self {
            book_id: book_id.into(),
            user: user.into(),
            checkout_date: checkout_date.into(),
            is_genesis: false,
        }
    }

    /// The sentinel payload of the genesis block: every string empty.
    pub fn genesis() -> Self {
        Self {
            is_genesis: true,
            ..Self::default()
        }
    }

    /// Stable byte encoding used as hash input.
    ///
    /// Compact JSON with keys in lexicographic order. The field list is
    /// spelled out so that adding a field to the struct never silently
    /// changes existing block hashes.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        serde_json::json!({
            "book_id": self.book_id,
            "check_date": self.checkout_date,
            "is_genesis": self.is_genesis,
            "user": self.user,
        })
        .to_string()
        .into_bytes()
    }
}

impl fmt::Display for CheckoutEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_genesis {
            return write!(f, "genesis");
        }
        write!(
            f,
            "{} checked out {} on {}",
            self.user, self.book_id, self.checkout_date
        )
    }
}
