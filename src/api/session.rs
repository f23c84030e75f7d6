//! Session endpoints: select and clear the acting member

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::Member,
    services::auth::LoginOutcome,
};

/// Login form
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(
        required(message = "A member is required"),
        range(min = 1, message = "Member id must be at least 1")
    )]
    pub member_id: Option<i32>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct LoginQuery {
    /// Route to return to after login (defaults to /books)
    pub redirect: Option<String>,
}

/// Current session
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub logged_in: bool,
    pub member_id: Option<i32>,
    pub member: Option<Member>,
}

/// Get the current session
#[utoipa::path(
    get,
    path = "/session",
    tag = "session",
    responses(
        (status = 200, description = "Current session", body = SessionResponse)
    )
)]
pub async fn get_session(
    State(state): State<crate::AppState>,
) -> AppResult<Json<SessionResponse>> {
    let member_id = state.services.session.member_id().await;
    let member = state.services.auth.current_member().await?;
    Ok(Json(SessionResponse {
        logged_in: member_id.is_some(),
        member_id,
        member,
    }))
}

/// Select an active member as the session member
#[utoipa::path(
    post,
    path = "/session/login",
    tag = "session",
    params(LoginQuery),
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = LoginOutcome),
        (status = 400, description = "No member selected"),
        (status = 401, description = "Invalid or inactive member")
    )
)]
pub async fn login(
    State(state): State<crate::AppState>,
    Query(query): Query<LoginQuery>,
    Json(request): Json<LoginRequest>,
) -> AppResult<Json<LoginOutcome>> {
    request.validate()?;
    let member_id = request
        .member_id
        .ok_or_else(|| AppError::Validation("A member is required".to_string()))?;

    let outcome = state
        .services
        .auth
        .login(member_id, query.redirect.as_deref())
        .await?;
    Ok(Json(outcome))
}

/// Clear the session member
#[utoipa::path(
    post,
    path = "/session/logout",
    tag = "session",
    responses(
        (status = 204, description = "Logged out")
    )
)]
pub async fn logout(State(state): State<crate::AppState>) -> StatusCode {
    state.services.auth.logout().await;
    StatusCode::NO_CONTENT
}
