//! Blog user as returned by the API.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Access level of a [`User`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular author/reader.
    #[default]
    User,
    /// May use the admin dashboard.
    Admin,
}

impl Role {
    /// Wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown role name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role `{0}`, expected `user` or `admin`")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// A registered user.
///
/// Owned by the server; the client only keeps a cached copy for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Server identifier (`_id` on the wire, `id` accepted too).
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Access level.
    #[serde(default)]
    pub role: Role,
    /// Avatar URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// Free-form bio.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[allow(missing_docs)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[allow(missing_docs)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl User {
    /// True if this user may reach admin-only views.
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_accepts_underscore_and_plain_id() {
        let a: User = serde_json::from_str(
            r#"{"_id":"u1","name":"Ann","email":"a@x.io","role":"admin"}"#,
        )
        .unwrap();
        let b: User =
            serde_json::from_str(r#"{"id":"u1","name":"Ann","email":"a@x.io"}"#).unwrap();

        assert_eq!(a.id, b.id);
        assert!(a.is_admin());
        assert_eq!(b.role, Role::User);
    }

    #[test]
    fn parse_role() {
        assert_eq!("Admin".parse::<Role>().unwrap(), Role::Admin);
        assert!("root".parse::<Role>().is_err());
    }

    #[test]
    fn timestamps_are_optional() {
        let user: User = serde_json::from_str(
            r#"{"_id":"u1","name":"Ann","email":"a@x.io","createdAt":"2024-03-01T10:00:00.000Z"}"#,
        )
        .unwrap();
        assert!(user.created_at.is_some());
        assert!(user.updated_at.is_none());
    }
}
