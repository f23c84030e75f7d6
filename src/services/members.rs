//! Member directory service

use crate::{
    error::AppResult,
    models::{Member, MemberPatch, NewMember},
    repository::Repository,
};

#[derive(Clone)]
pub struct MembersService {
    repository: Repository,
}

impl MembersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn get_all(&self) -> AppResult<Vec<Member>> {
        self.repository.members.get_all().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Option<Member>> {
        self.repository.members.get_by_id(id).await
    }

    /// Register a new member
    pub async fn create(&self, member: NewMember) -> AppResult<Member> {
        let created = self.repository.members.create(member).await?;
        tracing::info!(member_id = created.id, "member registered");
        Ok(created)
    }

    pub async fn update(&self, id: i32, patch: MemberPatch) -> AppResult<Member> {
        self.repository.members.update(id, patch).await
    }
}
