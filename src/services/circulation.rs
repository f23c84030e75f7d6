//! Borrow and return workflows
//!
//! Each workflow chains two dependent mutations on separate collections. They
//! are not atomic as a pair: if the second step fails, the first one stays
//! applied.

use chrono::{Days, Local, NaiveDate};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::{Book, EntityKind, Member, NewTransaction, Transaction, TransactionStatus},
    services::{
        auth::login_route, books::BooksService, members::MembersService,
        session::SessionService, transactions::TransactionsService,
    },
};

pub const BORROW_ROUTE: &str = "/borrow";
pub const RETURN_ROUTE: &str = "/return";

/// Current local calendar date
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Detail route of a book
pub fn book_route(book_id: i32) -> String {
    format!("/books/{}", book_id)
}

/// What the borrow form offers
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BorrowForm {
    pub member: Option<Member>,
    /// Books with at least one copy available
    pub books: Vec<Book>,
    pub default_due_at: NaiveDate,
}

/// Result of a completed borrow
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BorrowOutcome {
    pub message: String,
    pub redirect: String,
    pub book: Book,
    pub transaction: Transaction,
}

/// An open transaction joined with its book, which may no longer resolve
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OpenLoan {
    pub transaction: Transaction,
    pub book: Option<Book>,
}

/// What the return form offers
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReturnForm {
    pub open_transactions: Vec<OpenLoan>,
}

/// Result of a completed return
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReturnOutcome {
    pub message: String,
    pub redirect: String,
    pub book: Book,
    pub transaction: Transaction,
}

/// Join open transactions with the catalog snapshot
pub fn open_loans(books: &[Book], open: Vec<Transaction>) -> Vec<OpenLoan> {
    open.into_iter()
        .map(|transaction| OpenLoan {
            book: books.iter().find(|b| b.id == transaction.book_id).cloned(),
            transaction,
        })
        .collect()
}

#[derive(Clone)]
pub struct CirculationService {
    books: BooksService,
    members: MembersService,
    transactions: TransactionsService,
    session: SessionService,
    default_duration_days: u32,
}

impl CirculationService {
    pub fn new(
        books: BooksService,
        members: MembersService,
        transactions: TransactionsService,
        session: SessionService,
        default_duration_days: u32,
    ) -> Self {
        Self {
            books,
            members,
            transactions,
            session,
            default_duration_days,
        }
    }

    /// Due date offered when the borrow form opens
    pub fn default_due_date(&self, today: NaiveDate) -> NaiveDate {
        today
            .checked_add_days(Days::new(u64::from(self.default_duration_days)))
            .unwrap_or(today)
    }

    pub async fn borrow_form(&self, today: NaiveDate) -> AppResult<BorrowForm> {
        let member_id = self.session_member(BORROW_ROUTE).await?;
        Ok(BorrowForm {
            member: self.members.get_by_id(member_id).await?,
            books: self.books.available().await?,
            default_due_at: self.default_due_date(today),
        })
    }

    /// Borrow a book for the session member.
    ///
    /// Takes a copy off the shelf, then records the transaction. A failure
    /// while recording does not put the copy back.
    pub async fn borrow(
        &self,
        book_id: Option<i32>,
        due_at: Option<NaiveDate>,
        today: NaiveDate,
    ) -> AppResult<BorrowOutcome> {
        let member_id = self.session_member(BORROW_ROUTE).await?;
        let book_id = book_id.ok_or_else(|| AppError::Validation("A book is required".to_string()))?;
        let due_at = due_at.ok_or_else(|| AppError::Validation("A due date is required".to_string()))?;

        let book = self.books.borrow(book_id).await.inspect_err(|e| {
            tracing::warn!(book_id, member_id, "borrow failed: {}", e);
        })?;

        let transaction = self
            .transactions
            .create(NewTransaction {
                book_id,
                member_id,
                borrowed_at: today,
                due_at,
                returned_at: None,
                status: TransactionStatus::Borrowed,
            })
            .await
            .inspect_err(|e| {
                tracing::warn!(book_id, member_id, "borrow recorded no transaction: {}", e);
            })?;

        tracing::info!(
            book_id,
            member_id,
            transaction_id = transaction.id,
            due_at = %due_at,
            "book borrowed"
        );

        Ok(BorrowOutcome {
            message: "Book borrowed successfully".to_string(),
            redirect: book_route(book_id),
            book,
            transaction,
        })
    }

    pub async fn return_form(&self) -> AppResult<ReturnForm> {
        let member_id = self.session_member(RETURN_ROUTE).await?;
        let books = self.books.get_all().await?;
        let open = self.transactions.open_by_member(member_id).await?;
        Ok(ReturnForm {
            open_transactions: open_loans(&books, open),
        })
    }

    /// Return the book of a transaction.
    ///
    /// Only the session member's open transactions can be returned; any other
    /// id is not found and nothing changes. The copy goes back on the shelf
    /// before the transaction is closed; a failure while closing does not undo
    /// the copy count.
    pub async fn return_book(
        &self,
        transaction_id: Option<i32>,
        today: NaiveDate,
    ) -> AppResult<ReturnOutcome> {
        let member_id = self.session_member(RETURN_ROUTE).await?;
        let transaction_id = transaction_id
            .ok_or_else(|| AppError::Validation("A transaction is required".to_string()))?;

        let tx = self
            .transactions
            .open_by_member(member_id)
            .await?
            .into_iter()
            .find(|t| t.id == transaction_id)
            .ok_or_else(|| {
                tracing::warn!(transaction_id, member_id, "return failed: no such open transaction");
                AppError::NotFound(EntityKind::Transaction)
            })?;

        let book = self.books.return_copy(tx.book_id).await.inspect_err(|e| {
            tracing::warn!(transaction_id, book_id = tx.book_id, "return failed: {}", e);
        })?;

        let transaction = self
            .transactions
            .update_status(tx.id, TransactionStatus::Returned, Some(today))
            .await
            .inspect_err(|e| {
                tracing::warn!(transaction_id, "return left transaction open: {}", e);
            })?;

        tracing::info!(transaction_id, book_id = tx.book_id, member_id, "book returned");

        Ok(ReturnOutcome {
            message: "Book returned successfully".to_string(),
            redirect: book_route(tx.book_id),
            book,
            transaction,
        })
    }

    async fn session_member(&self, route: &str) -> AppResult<i32> {
        self.session
            .member_id()
            .await
            .ok_or_else(|| AppError::LoginRequired {
                redirect: login_route(route),
            })
    }
}
