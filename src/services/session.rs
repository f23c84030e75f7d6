//! Session holder: the member currently acting at the desk

use std::sync::Arc;

use tokio::sync::RwLock;

/// At most one selected member per running instance.
///
/// `login` performs no check of its own; callers verify the member first.
#[derive(Clone, Default)]
pub struct SessionService {
    member_id: Arc<RwLock<Option<i32>>>,
}

impl SessionService {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn login(&self, member_id: i32) {
        *self.member_id.write().await = Some(member_id);
    }

    pub async fn logout(&self) {
        *self.member_id.write().await = None;
    }

    pub async fn member_id(&self) -> Option<i32> {
        *self.member_id.read().await
    }

    pub async fn is_logged_in(&self) -> bool {
        self.member_id().await.is_some()
    }
}
