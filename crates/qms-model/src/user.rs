use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{ModelError, RecordId};

labelled_enum! {
    /// Management roles that sign in to dashboards and exports.
    UserRole as "user role" {
        ShiftIncharge => "Shift Incharge",
        Manager => "Manager",
    }
}

labelled_enum! {
    UserStatus as "user status" {
        Active => "active",
        Disabled => "disabled",
    }
}

/// A registered management account.
///
/// `password_hash` is an Argon2 PHC string; plain passwords are never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: RecordId,
    pub name: String,
    pub employee_id: String,
    pub username: String,
    pub mobile: String,
    pub email: String,
    pub role: UserRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
    pub status: UserStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }
}

/// Registration form. Carries the plain password only until it is hashed.
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub name: String,
    pub employee_id: String,
    pub username: String,
    pub mobile: String,
    pub email: String,
    pub role: UserRole,
    pub password: String,
}

impl NewUser {
    pub fn validate(&self) -> Result<(), ModelError> {
        let required = [
            ("name", &self.name),
            ("employeeId", &self.employee_id),
            ("username", &self.username),
            ("password", &self.password),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ModelError::MissingField(field));
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for NewUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewUser")
            .field("name", &self.name)
            .field("employee_id", &self.employee_id)
            .field("username", &self.username)
            .field("role", &self.role)
            .field("password", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}
