use crate::domain::models::{
    announcement::{Announcement, AnnouncementDetail},
    auth::RefreshTokenRecord,
    booking::{ApprovedBooking, Booking, BookingDetail},
    classroom::Classroom,
    job::Job,
    schedule::RegularSchedule,
    user::User,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Read side of the recurring-schedule store consumed by the conflict and
/// availability engines. Kept separate from the full repository so the
/// engines can be handed exactly the queries they depend on.
#[async_trait]
pub trait ScheduleSource: Send + Sync {
    async fn find_active_for_day(
        &self,
        classroom_id: &str,
        day_of_week: i32,
    ) -> Result<Vec<RegularSchedule>, AppError>;
}

/// Read side of the booking store consumed by the conflict and availability
/// engines. `day_start`/`day_end` are the two explicit boundaries of the
/// calendar day, half-open.
#[async_trait]
pub trait BookingSource: Send + Sync {
    async fn find_approved_for_day(
        &self,
        classroom_id: &str,
        day_start: NaiveDate,
        day_end: NaiveDate,
        exclude_id: Option<&str>,
    ) -> Result<Vec<ApprovedBooking>, AppError>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &User) -> Result<User, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError>;
}

#[async_trait]
pub trait ClassroomRepository: Send + Sync {
    async fn create(&self, classroom: &Classroom) -> Result<Classroom, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Classroom>, AppError>;
    async fn list_active(&self) -> Result<Vec<Classroom>, AppError>;
    async fn update(&self, classroom: &Classroom) -> Result<Classroom, AppError>;
}

#[derive(Debug, Default, Clone)]
pub struct ScheduleFilter {
    pub classroom_id: Option<String>,
    pub day_of_week: Option<i32>,
    pub semester: Option<String>,
}

#[async_trait]
pub trait ScheduleRepository: ScheduleSource {
    async fn create(&self, schedule: &RegularSchedule) -> Result<RegularSchedule, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<RegularSchedule>, AppError>;
    async fn list(&self, filter: &ScheduleFilter) -> Result<Vec<RegularSchedule>, AppError>;
    async fn update(&self, schedule: &RegularSchedule) -> Result<RegularSchedule, AppError>;
}

#[derive(Debug, Default, Clone)]
pub struct BookingFilter {
    pub status: Option<String>,
    pub classroom_id: Option<String>,
    pub user_id: Option<String>,
    pub date: Option<NaiveDate>,
    pub limit: i64,
    pub offset: i64,
}

#[async_trait]
pub trait BookingRepository: BookingSource {
    async fn create(&self, booking: &Booking) -> Result<Booking, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>, AppError>;
    async fn find_detail(&self, id: &str) -> Result<Option<BookingDetail>, AppError>;
    async fn list(&self, filter: &BookingFilter) -> Result<Vec<BookingDetail>, AppError>;
    async fn count(&self, filter: &BookingFilter) -> Result<i64, AppError>;
    async fn list_approved_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        classroom_id: Option<&str>,
    ) -> Result<Vec<BookingDetail>, AppError>;
    async fn update(&self, booking: &Booking) -> Result<Booking, AppError>;
}

#[derive(Debug, Default, Clone)]
pub struct AnnouncementFilter {
    pub category: Option<String>,
    pub priority: Option<String>,
    pub limit: i64,
    pub offset: i64,
}

#[async_trait]
pub trait AnnouncementRepository: Send + Sync {
    async fn create(&self, announcement: &Announcement) -> Result<Announcement, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Announcement>, AppError>;
    async fn find_detail(&self, id: &str) -> Result<Option<AnnouncementDetail>, AppError>;
    async fn list(&self, filter: &AnnouncementFilter) -> Result<Vec<AnnouncementDetail>, AppError>;
    async fn count(&self, filter: &AnnouncementFilter) -> Result<i64, AppError>;
    async fn update(&self, announcement: &Announcement) -> Result<Announcement, AppError>;
    async fn increment_view_count(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn create_refresh_token(&self, record: &RefreshTokenRecord) -> Result<(), AppError>;
    async fn find_refresh_token(&self, token_hash: &str) -> Result<Option<RefreshTokenRecord>, AppError>;
    async fn delete_refresh_token(&self, token_hash: &str) -> Result<(), AppError>;
    async fn delete_refresh_family(&self, family_id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait JobRepository: Send + Sync {
    async fn create(&self, job: &Job) -> Result<Job, AppError>;
    async fn find_pending(&self, limit: i32) -> Result<Vec<Job>, AppError>;
    async fn update_status(&self, id: &str, status: &str, error_message: Option<String>) -> Result<(), AppError>;
    async fn cancel_for_booking(&self, booking_id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait EmailService: Send + Sync {
    async fn send(
        &self,
        recipient: &str,
        subject: &str,
        html_body: &str,
        attachment_name: Option<&str>,
        attachment_data: Option<&[u8]>,
    ) -> Result<(), AppError>;
}
