use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

pub mod status {
    pub const PENDING: &str = "pending";
    pub const APPROVED: &str = "approved";
    pub const REJECTED: &str = "rejected";
    pub const COMPLETED: &str = "completed";
    pub const CANCELLED: &str = "cancelled";
}

/// Duration bounds enforced before a booking reaches the conflict engine.
pub const MIN_DURATION_MINUTES: u16 = 30;
pub const MAX_DURATION_MINUTES: u16 = 240;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub classroom_id: String,
    pub user_id: String,
    pub booking_date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub purpose: String,
    pub number_of_people: i32,
    pub status: String,
    pub approved_by: Option<String>,
    pub approved_at: Option<DateTime<Utc>>,
    pub rejection_reason: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

pub struct NewBookingParams {
    pub classroom_id: String,
    pub user_id: String,
    pub booking_date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub purpose: String,
    pub number_of_people: i32,
    pub status: String,
    pub approved_by: Option<String>,
    pub approved_at: Option<DateTime<Utc>>,
}

impl Booking {
    pub fn new(params: NewBookingParams) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            classroom_id: params.classroom_id,
            user_id: params.user_id,
            booking_date: params.booking_date,
            start_time: params.start_time,
            end_time: params.end_time,
            purpose: params.purpose,
            number_of_people: params.number_of_people,
            status: params.status,
            approved_by: params.approved_by,
            approved_at: params.approved_at,
            rejection_reason: None,
            notes: None,
            created_at: Utc::now(),
        }
    }
}

/// Projection consumed by the conflict engine: an approved booking for one
/// classroom/day plus the requester's name for display labels.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ApprovedBooking {
    pub id: String,
    pub classroom_id: String,
    pub booking_date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub requester_name: String,
}

/// Booking joined with classroom and user names for API responses and
/// notification emails.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BookingDetail {
    pub id: String,
    pub classroom_id: String,
    pub classroom_name: String,
    pub user_id: String,
    pub requester_name: String,
    pub requester_email: String,
    pub booking_date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub purpose: String,
    pub number_of_people: i32,
    pub status: String,
    pub approved_by: Option<String>,
    pub approver_name: Option<String>,
    pub approved_at: Option<DateTime<Utc>>,
    pub rejection_reason: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}
