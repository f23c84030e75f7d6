//! Member model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_with::rust::double_option;
use utoipa::ToSchema;
use validator::Validate;

use super::{Entity, EntityKind};

/// Library member; only active members may be selected as the session member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: i32,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Date the member joined (YYYY-MM-DD)
    pub membership_date: NaiveDate,
    pub is_active: bool,
}

/// Register member request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewMember {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    pub phone: Option<String>,
    pub membership_date: NaiveDate,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

/// Partial member update
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemberPatch {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    #[serde(default, with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub phone: Option<Option<String>>,
    pub membership_date: Option<NaiveDate>,
    pub is_active: Option<bool>,
}

impl Entity for Member {
    type New = NewMember;
    type Patch = MemberPatch;

    const KIND: EntityKind = EntityKind::Member;

    fn id(&self) -> i32 {
        self.id
    }

    fn from_new(id: i32, new: NewMember) -> Self {
        Self {
            id,
            name: new.name,
            email: new.email,
            phone: new.phone,
            membership_date: new.membership_date,
            is_active: new.is_active,
        }
    }

    fn apply(&mut self, patch: MemberPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(phone) = patch.phone {
            self.phone = phone;
        }
        if let Some(date) = patch.membership_date {
            self.membership_date = date;
        }
        if let Some(active) = patch.is_active {
            self.is_active = active;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_member_defaults_to_active() {
        let new: NewMember = serde_json::from_str(
            r#"{"name":"Ada","email":"ada@example.org","membershipDate":"2024-02-01"}"#,
        )
        .unwrap();
        assert!(new.is_active);
        assert!(new.validate().is_ok());

        let member = Member::from_new(7, new);
        assert_eq!(member.id, 7);
        assert_eq!(
            member.membership_date,
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()
        );
    }

    #[test]
    fn test_invalid_email_rejected() {
        let new: NewMember = serde_json::from_str(
            r#"{"name":"Ada","email":"not-an-email","membershipDate":"2024-02-01"}"#,
        )
        .unwrap();
        assert!(new.validate().is_err());
    }

    #[test]
    fn test_patch_deactivates() {
        let mut member = Member {
            id: 1,
            name: "Grace".into(),
            email: "grace@example.org".into(),
            phone: Some("555-0100".into()),
            membership_date: NaiveDate::from_ymd_opt(2023, 5, 4).unwrap(),
            is_active: true,
        };
        member.apply(MemberPatch {
            is_active: Some(false),
            ..Default::default()
        });
        assert!(!member.is_active);
        assert_eq!(member.phone.as_deref(), Some("555-0100"));
    }
}
