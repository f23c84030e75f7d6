//! Data models for Shelfdesk

pub mod book;
pub mod member;
pub mod transaction;

use serde::{de::DeserializeOwned, Serialize};

// Re-export commonly used types
pub use book::{Book, BookPatch, NewBook};
pub use member::{Member, MemberPatch, NewMember};
pub use transaction::{NewTransaction, Transaction, TransactionPatch, TransactionStatus};

/// Which collection a record belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Book,
    Member,
    Transaction,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            EntityKind::Book => "Book",
            EntityKind::Member => "Member",
            EntityKind::Transaction => "Transaction",
        };
        write!(f, "{}", label)
    }
}

/// A record kept in a fixture-backed collection.
///
/// Every entity carries an integer id assigned by the store on create, is
/// built from an id-less `New` value, and is mutated through a partial
/// `Patch` whose present fields overwrite the stored ones.
pub trait Entity: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Creation payload (the entity without its id)
    type New: Send;
    /// Partial update payload
    type Patch: Send;

    /// Reported in not-found errors and logs
    const KIND: EntityKind;

    fn id(&self) -> i32;

    fn from_new(id: i32, new: Self::New) -> Self;

    /// Overwrite fields present in `patch`; the id is never touched
    fn apply(&mut self, patch: Self::Patch);
}
