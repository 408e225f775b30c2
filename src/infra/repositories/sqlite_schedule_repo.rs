use crate::domain::{
    models::schedule::RegularSchedule,
    ports::{ScheduleFilter, ScheduleRepository, ScheduleSource},
};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteScheduleRepo {
    pool: SqlitePool,
}

impl SqliteScheduleRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ScheduleSource for SqliteScheduleRepo {
    async fn find_active_for_day(
        &self,
        classroom_id: &str,
        day_of_week: i32,
    ) -> Result<Vec<RegularSchedule>, AppError> {
        sqlx::query_as::<_, RegularSchedule>(
            "SELECT * FROM regular_schedules
             WHERE classroom_id = ? AND day_of_week = ? AND is_active = 1
             ORDER BY start_time ASC",
        )
        .bind(classroom_id)
        .bind(day_of_week)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }
}

#[async_trait]
impl ScheduleRepository for SqliteScheduleRepo {
    async fn create(&self, schedule: &RegularSchedule) -> Result<RegularSchedule, AppError> {
        sqlx::query_as::<_, RegularSchedule>(
            "INSERT INTO regular_schedules (id, classroom_id, course_name, course_code, lecturer, day_of_week, start_time, end_time, semester, is_active, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *",
        )
        .bind(&schedule.id)
        .bind(&schedule.classroom_id)
        .bind(&schedule.course_name)
        .bind(&schedule.course_code)
        .bind(&schedule.lecturer)
        .bind(schedule.day_of_week)
        .bind(&schedule.start_time)
        .bind(&schedule.end_time)
        .bind(&schedule.semester)
        .bind(schedule.is_active)
        .bind(schedule.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<RegularSchedule>, AppError> {
        sqlx::query_as::<_, RegularSchedule>("SELECT * FROM regular_schedules WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(&self, filter: &ScheduleFilter) -> Result<Vec<RegularSchedule>, AppError> {
        sqlx::query_as::<_, RegularSchedule>(
            "SELECT * FROM regular_schedules
             WHERE is_active = 1
               AND (?1 IS NULL OR classroom_id = ?1)
               AND (?2 IS NULL OR day_of_week = ?2)
               AND (?3 IS NULL OR semester = ?3)
             ORDER BY day_of_week ASC, start_time ASC",
        )
        .bind(&filter.classroom_id)
        .bind(filter.day_of_week)
        .bind(&filter.semester)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn update(&self, schedule: &RegularSchedule) -> Result<RegularSchedule, AppError> {
        sqlx::query_as::<_, RegularSchedule>(
            "UPDATE regular_schedules
             SET classroom_id = ?, course_name = ?, course_code = ?, lecturer = ?, day_of_week = ?,
                 start_time = ?, end_time = ?, semester = ?, is_active = ?
             WHERE id = ?
             RETURNING *",
        )
        .bind(&schedule.classroom_id)
        .bind(&schedule.course_name)
        .bind(&schedule.course_code)
        .bind(&schedule.lecturer)
        .bind(schedule.day_of_week)
        .bind(&schedule.start_time)
        .bind(&schedule.end_time)
        .bind(&schedule.semester)
        .bind(schedule.is_active)
        .bind(&schedule.id)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }
}
