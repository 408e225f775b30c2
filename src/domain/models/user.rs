use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

pub mod roles {
    pub const STUDENT: &str = "student";
    pub const LECTURER: &str = "lecturer";
    pub const STAFF: &str = "staff";
    pub const ADMIN: &str = "admin";

    pub const ALL: [&str; 4] = [STUDENT, LECTURER, STAFF, ADMIN];
}

/// Roles whose bookings skip the pending queue.
pub fn can_auto_approve(role: &str) -> bool {
    matches!(role, roles::LECTURER | roles::STAFF | roles::ADMIN)
}

/// Roles allowed to work the approval queue.
pub fn is_staff(role: &str) -> bool {
    matches!(role, roles::STAFF | roles::ADMIN)
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub full_name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: String,
    pub student_id: Option<String>,
    pub phone: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

pub struct NewUserParams {
    pub full_name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub student_id: Option<String>,
    pub phone: Option<String>,
}

impl User {
    pub fn new(params: NewUserParams) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            full_name: params.full_name,
            email: params.email,
            password_hash: params.password_hash,
            role: params.role,
            student_id: params.student_id,
            phone: params.phone,
            is_active: true,
            created_at: Utc::now(),
        }
    }
}
