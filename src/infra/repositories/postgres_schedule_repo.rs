use crate::domain::{
    models::schedule::RegularSchedule,
    ports::{ScheduleFilter, ScheduleRepository, ScheduleSource},
};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresScheduleRepo {
    pool: PgPool,
}

impl PostgresScheduleRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ScheduleSource for PostgresScheduleRepo {
    async fn find_active_for_day(
        &self,
        classroom_id: &str,
        day_of_week: i32,
    ) -> Result<Vec<RegularSchedule>, AppError> {
        sqlx::query_as::<_, RegularSchedule>(
            "SELECT * FROM regular_schedules
             WHERE classroom_id = $1 AND day_of_week = $2 AND is_active = TRUE
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
impl ScheduleRepository for PostgresScheduleRepo {
    async fn create(&self, schedule: &RegularSchedule) -> Result<RegularSchedule, AppError> {
        sqlx::query_as::<_, RegularSchedule>(
            "INSERT INTO regular_schedules (id, classroom_id, course_name, course_code, lecturer, day_of_week, start_time, end_time, semester, is_active, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
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
        sqlx::query_as::<_, RegularSchedule>("SELECT * FROM regular_schedules WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(&self, filter: &ScheduleFilter) -> Result<Vec<RegularSchedule>, AppError> {
        sqlx::query_as::<_, RegularSchedule>(
            "SELECT * FROM regular_schedules
             WHERE is_active = TRUE
               AND ($1::text IS NULL OR classroom_id = $1)
               AND ($2::int IS NULL OR day_of_week = $2)
               AND ($3::text IS NULL OR semester = $3)
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
             SET classroom_id = $1, course_name = $2, course_code = $3, lecturer = $4, day_of_week = $5,
                 start_time = $6, end_time = $7, semester = $8, is_active = $9
             WHERE id = $10
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
