use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A fixed weekly class occupying a classroom on one weekday.
/// `day_of_week` is 0 = Sunday .. 6 = Saturday.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RegularSchedule {
    pub id: String,
    pub classroom_id: String,
    pub course_name: String,
    pub course_code: Option<String>,
    pub lecturer: String,
    pub day_of_week: i32,
    pub start_time: String,
    pub end_time: String,
    pub semester: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

pub struct NewScheduleParams {
    pub classroom_id: String,
    pub course_name: String,
    pub course_code: Option<String>,
    pub lecturer: String,
    pub day_of_week: i32,
    pub start_time: String,
    pub end_time: String,
    pub semester: String,
}

impl RegularSchedule {
    pub fn new(params: NewScheduleParams) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            classroom_id: params.classroom_id,
            course_name: params.course_name,
            course_code: params.course_code,
            lecturer: params.lecturer,
            day_of_week: params.day_of_week,
            start_time: params.start_time,
            end_time: params.end_time,
            semester: params.semester,
            is_active: true,
            created_at: Utc::now(),
        }
    }
}
