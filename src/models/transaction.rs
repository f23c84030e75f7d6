//! Lending transaction model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{Entity, EntityKind};

/// Lifecycle state of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionStatus {
    Borrowed,
    Returned,
    /// Never entered automatically; only set through an explicit status update
    Overdue,
}

impl TransactionStatus {
    /// Borrowed and overdue transactions are still open (not yet returned)
    pub fn is_open(self) -> bool {
        matches!(self, TransactionStatus::Borrowed | TransactionStatus::Overdue)
    }
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            TransactionStatus::Borrowed => "BORROWED",
            TransactionStatus::Returned => "RETURNED",
            TransactionStatus::Overdue => "OVERDUE",
        };
        write!(f, "{}", label)
    }
}

/// One borrow of one book by one member.
///
/// `book_id` and `member_id` are plain references; nothing checks that they
/// resolve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: i32,
    pub book_id: i32,
    pub member_id: i32,
    pub borrowed_at: NaiveDate,
    pub due_at: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub returned_at: Option<NaiveDate>,
    pub status: TransactionStatus,
}

#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub book_id: i32,
    pub member_id: i32,
    pub borrowed_at: NaiveDate,
    pub due_at: NaiveDate,
    pub returned_at: Option<NaiveDate>,
    pub status: TransactionStatus,
}

/// Partial update of a transaction; `returned_at: Some(None)` clears the date
#[derive(Debug, Clone, Default)]
pub struct TransactionPatch {
    pub book_id: Option<i32>,
    pub member_id: Option<i32>,
    pub borrowed_at: Option<NaiveDate>,
    pub due_at: Option<NaiveDate>,
    pub returned_at: Option<Option<NaiveDate>>,
    pub status: Option<TransactionStatus>,
}

impl Entity for Transaction {
    type New = NewTransaction;
    type Patch = TransactionPatch;

    const KIND: EntityKind = EntityKind::Transaction;

    fn id(&self) -> i32 {
        self.id
    }

    fn from_new(id: i32, new: NewTransaction) -> Self {
        Self {
            id,
            book_id: new.book_id,
            member_id: new.member_id,
            borrowed_at: new.borrowed_at,
            due_at: new.due_at,
            returned_at: new.returned_at,
            status: new.status,
        }
    }

    fn apply(&mut self, patch: TransactionPatch) {
        if let Some(book_id) = patch.book_id {
            self.book_id = book_id;
        }
        if let Some(member_id) = patch.member_id {
            self.member_id = member_id;
        }
        if let Some(borrowed_at) = patch.borrowed_at {
            self.borrowed_at = borrowed_at;
        }
        if let Some(due_at) = patch.due_at {
            self.due_at = due_at;
        }
        if let Some(returned_at) = patch.returned_at {
            self.returned_at = returned_at;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
    }
}
