use crate::domain::{
    models::booking::{ApprovedBooking, Booking, BookingDetail},
    ports::{BookingFilter, BookingRepository, BookingSource},
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::SqlitePool;

const DETAIL_SELECT: &str = "SELECT b.id, b.classroom_id, c.name AS classroom_name, b.user_id,
       u.full_name AS requester_name, u.email AS requester_email,
       b.booking_date, b.start_time, b.end_time, b.purpose, b.number_of_people,
       b.status, b.approved_by, a.full_name AS approver_name, b.approved_at,
       b.rejection_reason, b.notes, b.created_at
  FROM bookings b
  JOIN classrooms c ON c.id = b.classroom_id
  JOIN users u ON u.id = b.user_id
  LEFT JOIN users a ON a.id = b.approved_by";

pub struct SqliteBookingRepo {
    pool: SqlitePool,
}

impl SqliteBookingRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingSource for SqliteBookingRepo {
    async fn find_approved_for_day(
        &self,
        classroom_id: &str,
        day_start: NaiveDate,
        day_end: NaiveDate,
        exclude_id: Option<&str>,
    ) -> Result<Vec<ApprovedBooking>, AppError> {
        sqlx::query_as::<_, ApprovedBooking>(
            "SELECT b.id, b.classroom_id, b.booking_date, b.start_time, b.end_time,
                    u.full_name AS requester_name
               FROM bookings b
               JOIN users u ON u.id = b.user_id
              WHERE b.classroom_id = ?1
                AND b.status = 'approved'
                AND b.booking_date >= ?2 AND b.booking_date < ?3
                AND (?4 IS NULL OR b.id != ?4)
              ORDER BY b.start_time ASC",
        )
        .bind(classroom_id)
        .bind(day_start)
        .bind(day_end)
        .bind(exclude_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }
}

#[async_trait]
impl BookingRepository for SqliteBookingRepo {
    async fn create(&self, booking: &Booking) -> Result<Booking, AppError> {
        sqlx::query_as::<_, Booking>(
            "INSERT INTO bookings (id, classroom_id, user_id, booking_date, start_time, end_time, purpose, number_of_people, status, approved_by, approved_at, rejection_reason, notes, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *",
        )
        .bind(&booking.id)
        .bind(&booking.classroom_id)
        .bind(&booking.user_id)
        .bind(booking.booking_date)
        .bind(&booking.start_time)
        .bind(&booking.end_time)
        .bind(&booking.purpose)
        .bind(booking.number_of_people)
        .bind(&booking.status)
        .bind(&booking.approved_by)
        .bind(booking.approved_at)
        .bind(&booking.rejection_reason)
        .bind(&booking.notes)
        .bind(booking.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_detail(&self, id: &str) -> Result<Option<BookingDetail>, AppError> {
        sqlx::query_as::<_, BookingDetail>(&format!("{DETAIL_SELECT} WHERE b.id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(&self, filter: &BookingFilter) -> Result<Vec<BookingDetail>, AppError> {
        sqlx::query_as::<_, BookingDetail>(&format!(
            "{DETAIL_SELECT}
              WHERE (?1 IS NULL OR b.status = ?1)
                AND (?2 IS NULL OR b.classroom_id = ?2)
                AND (?3 IS NULL OR b.user_id = ?3)
                AND (?4 IS NULL OR b.booking_date = ?4)
              ORDER BY b.booking_date DESC, b.created_at DESC
              LIMIT ?5 OFFSET ?6"
        ))
        .bind(&filter.status)
        .bind(&filter.classroom_id)
        .bind(&filter.user_id)
        .bind(filter.date)
        .bind(filter.limit)
        .bind(filter.offset)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn count(&self, filter: &BookingFilter) -> Result<i64, AppError> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM bookings b
              WHERE (?1 IS NULL OR b.status = ?1)
                AND (?2 IS NULL OR b.classroom_id = ?2)
                AND (?3 IS NULL OR b.user_id = ?3)
                AND (?4 IS NULL OR b.booking_date = ?4)",
        )
        .bind(&filter.status)
        .bind(&filter.classroom_id)
        .bind(&filter.user_id)
        .bind(filter.date)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn list_approved_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        classroom_id: Option<&str>,
    ) -> Result<Vec<BookingDetail>, AppError> {
        sqlx::query_as::<_, BookingDetail>(&format!(
            "{DETAIL_SELECT}
              WHERE b.status = 'approved'
                AND b.booking_date >= ?1 AND b.booking_date <= ?2
                AND (?3 IS NULL OR b.classroom_id = ?3)
              ORDER BY b.booking_date ASC, b.start_time ASC"
        ))
        .bind(start)
        .bind(end)
        .bind(classroom_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn update(&self, booking: &Booking) -> Result<Booking, AppError> {
        sqlx::query_as::<_, Booking>(
            "UPDATE bookings
             SET status = ?, approved_by = ?, approved_at = ?, rejection_reason = ?, notes = ?
             WHERE id = ?
             RETURNING *",
        )
        .bind(&booking.status)
        .bind(&booking.approved_by)
        .bind(booking.approved_at)
        .bind(&booking.rejection_reason)
        .bind(&booking.notes)
        .bind(&booking.id)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }
}
