use crate::domain::services::availability::DayAvailability;
use chrono::NaiveDate;
use serde::Serialize;
use sqlx::types::Json;

#[derive(Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Serialize)]
pub struct DataResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self { success: true, message: None, data }
    }

    pub fn with_message(message: impl Into<String>, data: T) -> Self {
        Self { success: true, message: Some(message.into()), data }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
}

#[derive(Serialize)]
pub struct PagedResponse<T> {
    pub success: bool,
    pub count: i64,
    pub pagination: Pagination,
    pub data: Vec<T>,
}

impl<T> PagedResponse<T> {
    pub fn new(count: i64, page: i64, limit: i64, data: Vec<T>) -> Self {
        Self {
            success: true,
            count,
            pagination: Pagination {
                page,
                limit,
                total_pages: (count + limit - 1) / limit,
            },
            data,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassroomSummary {
    pub id: String,
    pub name: String,
    pub capacity: i32,
    pub facilities: Json<Vec<String>>,
}

/// Availability payload: `availableSlots` are "HH:MM" pairs, `occupiedSlots`
/// keep their minute offsets plus `type` and `label` tags.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
    pub success: bool,
    pub classroom: ClassroomSummary,
    pub date: NaiveDate,
    pub day_of_week: i32,
    #[serde(flatten)]
    pub slots: DayAvailability,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEventProps {
    pub purpose: String,
    pub number_of_people: i32,
    pub classroom: String,
    pub user: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    pub start: String,
    pub end: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub status: String,
    pub extended_props: CalendarEventProps,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarResponse {
    pub success: bool,
    pub events: Vec<CalendarEvent>,
}
