//! Member directory endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{EntityKind, Member, MemberPatch, NewMember, Transaction},
};

/// Member directory with the currently selected member
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemberDirectory {
    pub members: Vec<Member>,
    pub logged_in_member: Option<Member>,
}

/// List members
#[utoipa::path(
    get,
    path = "/members",
    tag = "members",
    responses(
        (status = 200, description = "Member directory", body = MemberDirectory)
    )
)]
pub async fn list_members(
    State(state): State<crate::AppState>,
) -> AppResult<Json<MemberDirectory>> {
    let members = state.services.members.get_all().await?;
    let current = state.services.session.member_id().await;
    let logged_in_member = current.and_then(|id| members.iter().find(|m| m.id == id).cloned());

    Ok(Json(MemberDirectory {
        members,
        logged_in_member,
    }))
}

/// Get member by ID
#[utoipa::path(
    get,
    path = "/members/{id}",
    tag = "members",
    params(("id" = i32, Path, description = "Member ID")),
    responses(
        (status = 200, description = "Member details", body = Member),
        (status = 404, description = "Member not found")
    )
)]
pub async fn get_member(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Member>> {
    let member = state
        .services
        .members
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(EntityKind::Member))?;
    Ok(Json(member))
}

/// Register a member
#[utoipa::path(
    post,
    path = "/members",
    tag = "members",
    request_body = NewMember,
    responses(
        (status = 201, description = "Member registered", body = Member),
        (status = 400, description = "Invalid input")
    )
)]
pub async fn create_member(
    State(state): State<crate::AppState>,
    Json(member): Json<NewMember>,
) -> AppResult<(StatusCode, Json<Member>)> {
    member.validate()?;
    let created = state.services.members.create(member).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Patch a member
#[utoipa::path(
    put,
    path = "/members/{id}",
    tag = "members",
    params(("id" = i32, Path, description = "Member ID")),
    request_body = MemberPatch,
    responses(
        (status = 200, description = "Member updated", body = Member),
        (status = 404, description = "Member not found")
    )
)]
pub async fn update_member(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(patch): Json<MemberPatch>,
) -> AppResult<Json<Member>> {
    patch.validate()?;
    let member = state.services.members.update(id, patch).await?;
    Ok(Json(member))
}

/// Open (borrowed or overdue) transactions of a member
#[utoipa::path(
    get,
    path = "/members/{id}/transactions",
    tag = "members",
    params(("id" = i32, Path, description = "Member ID")),
    responses(
        (status = 200, description = "Open transactions", body = Vec<Transaction>)
    )
)]
pub async fn get_open_transactions(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<Transaction>>> {
    let txs = state.services.transactions.open_by_member(id).await?;
    Ok(Json(txs))
}
