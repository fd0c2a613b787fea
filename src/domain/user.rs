//! User accounts.

use super::record::{FieldValue, Record};
use serde::{Deserialize, Serialize};

/// Access role of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Customer,
    Moderator,
}

impl UserRole {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Customer => "customer",
            Self::Moderator => "moderator",
        }
    }
}

/// Account standing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    Inactive,
    Suspended,
}

impl UserStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Suspended => "suspended",
        }
    }
}

/// A registered user as stored in the `users` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub status: UserStatus,
    pub registration_date: String,
    pub last_login: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl Record for User {
    const FIELD_KEYS: &'static [&'static str] = &[
        "id",
        "name",
        "email",
        "role",
        "status",
        "registrationDate",
        "lastLogin",
        "avatar",
    ];

    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, key: &str) -> Option<FieldValue> {
        Some(match key {
            "id" => FieldValue::text(&self.id),
            "name" => FieldValue::text(&self.name),
            "email" => FieldValue::text(&self.email),
            "role" => FieldValue::text(self.role.as_str()),
            "status" => FieldValue::text(self.status.as_str()),
            "registrationDate" => FieldValue::text(&self.registration_date),
            "lastLogin" => FieldValue::text(&self.last_login),
            "avatar" => FieldValue::optional(self.avatar.as_deref()),
            _ => return None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_camel_case_document() {
        let json = r#"{
            "id": "1",
            "name": "John Doe",
            "email": "john.doe@example.com",
            "role": "customer",
            "status": "active",
            "registrationDate": "2024-01-15",
            "lastLogin": "2024-01-20"
        }"#;

        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.role, UserRole::Customer);
        assert_eq!(user.registration_date, "2024-01-15");
        assert!(user.avatar.is_none());
        assert_eq!(user.field("avatar"), Some(FieldValue::Empty));
        assert_eq!(user.field("unknown"), None);
    }
}
