//! Lending transaction service

use chrono::NaiveDate;

use crate::{
    error::AppResult,
    models::{NewTransaction, Transaction, TransactionPatch, TransactionStatus},
    repository::Repository,
};

#[derive(Clone)]
pub struct TransactionsService {
    repository: Repository,
}

impl TransactionsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn get_all(&self) -> AppResult<Vec<Transaction>> {
        self.repository.transactions.get_all().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Option<Transaction>> {
        self.repository.transactions.get_by_id(id).await
    }

    pub async fn create(&self, tx: NewTransaction) -> AppResult<Transaction> {
        self.repository.transactions.create(tx).await
    }

    pub async fn update(&self, id: i32, patch: TransactionPatch) -> AppResult<Transaction> {
        self.repository.transactions.update(id, patch).await
    }

    /// The open transaction of a book, if any. At most one is expected but
    /// nothing enforces it; the first one wins.
    pub async fn open_by_book(&self, book_id: i32) -> AppResult<Option<Transaction>> {
        self.repository
            .transactions
            .find(|t| t.book_id == book_id && t.status.is_open())
            .await
    }

    /// Everything a member still has out
    pub async fn open_by_member(&self, member_id: i32) -> AppResult<Vec<Transaction>> {
        self.repository
            .transactions
            .filter(|t| t.member_id == member_id && t.status.is_open())
            .await
    }

    /// Set the status; `returned_at` replaces the stored date only when given
    pub async fn update_status(
        &self,
        id: i32,
        status: TransactionStatus,
        returned_at: Option<NaiveDate>,
    ) -> AppResult<Transaction> {
        let patch = TransactionPatch {
            status: Some(status),
            returned_at: returned_at.map(Some),
            ..Default::default()
        };
        let updated = self.update(id, patch).await?;
        tracing::info!(transaction_id = id, status = %status, "transaction status updated");
        Ok(updated)
    }
}
