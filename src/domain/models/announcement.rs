use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

pub mod categories {
    pub const ACADEMIC: &str = "academic";
    pub const DEPARTMENT_EVENT: &str = "department_event";
    pub const LAB_SCHEDULE: &str = "lab_schedule";
    pub const GENERAL: &str = "general";

    pub const ALL: [&str; 4] = [ACADEMIC, DEPARTMENT_EVENT, LAB_SCHEDULE, GENERAL];
}

pub mod priorities {
    pub const NORMAL: &str = "normal";
    pub const IMPORTANT: &str = "important";
    pub const URGENT: &str = "urgent";

    pub const ALL: [&str; 3] = [NORMAL, IMPORTANT, URGENT];
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub priority: String,
    pub target_roles: Json<Vec<String>>,
    pub created_by: String,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub view_count: i32,
    pub created_at: DateTime<Utc>,
}

pub struct NewAnnouncementParams {
    pub title: String,
    pub description: String,
    pub category: String,
    pub priority: String,
    pub target_roles: Vec<String>,
    pub created_by: String,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
}

impl Announcement {
    pub fn new(params: NewAnnouncementParams) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: params.title,
            description: params.description,
            category: params.category,
            priority: params.priority,
            target_roles: Json(params.target_roles),
            created_by: params.created_by,
            start_date: params.start_date,
            end_date: params.end_date,
            is_active: true,
            view_count: 0,
            created_at: Utc::now(),
        }
    }
}

/// Announcement joined with its author's name for API responses.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AnnouncementDetail {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub priority: String,
    pub target_roles: Json<Vec<String>>,
    pub created_by: String,
    pub author_name: String,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub view_count: i32,
    pub created_at: DateTime<Utc>,
}
