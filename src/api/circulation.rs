//! Borrow and return endpoints (session member required)

use axum::{extract::State, http::StatusCode, Json};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    error::AppResult,
    services::circulation::{today, BorrowForm, BorrowOutcome, ReturnForm, ReturnOutcome},
};

use super::SessionMember;

/// Borrow form submission
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BorrowRequest {
    #[validate(required(message = "A book is required"))]
    pub book_id: Option<i32>,
    /// Due date (YYYY-MM-DD)
    #[validate(required(message = "A due date is required"))]
    pub due_at: Option<NaiveDate>,
}

/// Return form submission
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReturnRequest {
    #[validate(required(message = "A transaction is required"))]
    pub transaction_id: Option<i32>,
}

/// Borrow form: session member, available books, default due date
#[utoipa::path(
    get,
    path = "/borrow",
    tag = "circulation",
    responses(
        (status = 200, description = "Borrow form", body = BorrowForm),
        (status = 401, description = "No session member", body = crate::error::ErrorResponse)
    )
)]
pub async fn borrow_form(
    State(state): State<crate::AppState>,
    SessionMember(_member_id): SessionMember,
) -> AppResult<Json<BorrowForm>> {
    let form = state.services.circulation.borrow_form(today()).await?;
    Ok(Json(form))
}

/// Borrow a book for the session member
#[utoipa::path(
    post,
    path = "/borrow",
    tag = "circulation",
    request_body = BorrowRequest,
    responses(
        (status = 201, description = "Book borrowed", body = BorrowOutcome),
        (status = 400, description = "Missing book or due date"),
        (status = 401, description = "No session member", body = crate::error::ErrorResponse),
        (status = 404, description = "Book not found"),
        (status = 409, description = "No copies available")
    )
)]
pub async fn borrow(
    State(state): State<crate::AppState>,
    SessionMember(_member_id): SessionMember,
    Json(request): Json<BorrowRequest>,
) -> AppResult<(StatusCode, Json<BorrowOutcome>)> {
    request.validate()?;
    let outcome = state
        .services
        .circulation
        .borrow(request.book_id, request.due_at, today())
        .await?;
    Ok((StatusCode::CREATED, Json(outcome)))
}

/// Return form: the session member's open transactions with their books
#[utoipa::path(
    get,
    path = "/return",
    tag = "circulation",
    responses(
        (status = 200, description = "Return form", body = ReturnForm),
        (status = 401, description = "No session member", body = crate::error::ErrorResponse)
    )
)]
pub async fn return_form(
    State(state): State<crate::AppState>,
    SessionMember(_member_id): SessionMember,
) -> AppResult<Json<ReturnForm>> {
    let form = state.services.circulation.return_form().await?;
    Ok(Json(form))
}

/// Return the book of a transaction
#[utoipa::path(
    post,
    path = "/return",
    tag = "circulation",
    request_body = ReturnRequest,
    responses(
        (status = 200, description = "Book returned", body = ReturnOutcome),
        (status = 401, description = "No session member", body = crate::error::ErrorResponse),
        (status = 404, description = "Transaction not found")
    )
)]
pub async fn return_book(
    State(state): State<crate::AppState>,
    SessionMember(_member_id): SessionMember,
    Json(request): Json<ReturnRequest>,
) -> AppResult<Json<ReturnOutcome>> {
    request.validate()?;
    let outcome = state
        .services
        .circulation
        .return_book(request.transaction_id, today())
        .await?;
    Ok(Json(outcome))
}
