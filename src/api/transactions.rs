//! Transaction endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::{EntityKind, Transaction, TransactionStatus},
};

/// Status change request
#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusRequest {
    pub status: TransactionStatus,
    /// Kept as stored when omitted
    pub returned_at: Option<NaiveDate>,
}

/// List all transactions
#[utoipa::path(
    get,
    path = "/transactions",
    tag = "transactions",
    responses(
        (status = 200, description = "All transactions", body = Vec<Transaction>)
    )
)]
pub async fn list_transactions(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<Transaction>>> {
    Ok(Json(state.services.transactions.get_all().await?))
}

/// Get transaction by ID
#[utoipa::path(
    get,
    path = "/transactions/{id}",
    tag = "transactions",
    params(("id" = i32, Path, description = "Transaction ID")),
    responses(
        (status = 200, description = "Transaction", body = Transaction),
        (status = 404, description = "Transaction not found")
    )
)]
pub async fn get_transaction(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Transaction>> {
    let tx = state
        .services
        .transactions
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(EntityKind::Transaction))?;
    Ok(Json(tx))
}

/// Set the status of a transaction
#[utoipa::path(
    put,
    path = "/transactions/{id}/status",
    tag = "transactions",
    params(("id" = i32, Path, description = "Transaction ID")),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Transaction updated", body = Transaction),
        (status = 404, description = "Transaction not found")
    )
)]
pub async fn update_status(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(request): Json<UpdateStatusRequest>,
) -> AppResult<Json<Transaction>> {
    let tx = state
        .services
        .transactions
        .update_status(id, request.status, request.returned_at)
        .await?;
    Ok(Json(tx))
}
