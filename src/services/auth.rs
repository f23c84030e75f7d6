//! Member login workflow

use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::Member,
    services::{members::MembersService, session::SessionService},
};

/// Route the client lands on after logging in when none was asked for
pub const DEFAULT_REDIRECT: &str = "/books";

/// Member login route that sends the client back to `target` afterwards
pub fn login_route(target: &str) -> String {
    format!("/members?redirect={}", target)
}

/// Result of a successful login
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginOutcome {
    pub member: Member,
    /// Route to navigate to next
    pub redirect: String,
}

#[derive(Clone)]
pub struct AuthService {
    members: MembersService,
    session: SessionService,
}

impl AuthService {
    pub fn new(members: MembersService, session: SessionService) -> Self {
        Self { members, session }
    }

    /// Select `member_id` as the session member.
    ///
    /// Unknown and inactive members are rejected and leave the session as it
    /// was. The redirect target must be a local route; anything else falls
    /// back to the book list.
    pub async fn login(&self, member_id: i32, redirect: Option<&str>) -> AppResult<LoginOutcome> {
        let member = match self.members.get_by_id(member_id).await? {
            Some(member) if member.is_active => member,
            _ => {
                tracing::warn!(member_id, "login rejected: invalid or inactive member");
                return Err(AppError::Authentication(
                    "Invalid or inactive member".to_string(),
                ));
            }
        };

        self.session.login(member.id).await;
        tracing::info!(member_id = member.id, "member logged in");

        let redirect = redirect
            .filter(|r| r.starts_with('/') && !r.starts_with("//"))
            .unwrap_or(DEFAULT_REDIRECT)
            .to_string();

        Ok(LoginOutcome { member, redirect })
    }

    pub async fn logout(&self) {
        if let Some(member_id) = self.session.member_id().await {
            tracing::info!(member_id, "member logged out");
        }
        self.session.logout().await;
    }

    /// The session member's record, if one is selected and still exists
    pub async fn current_member(&self) -> AppResult<Option<Member>> {
        match self.session.member_id().await {
            Some(id) => self.members.get_by_id(id).await,
            None => Ok(None),
        }
    }
}
