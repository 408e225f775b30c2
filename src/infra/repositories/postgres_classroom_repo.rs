use crate::domain::{models::classroom::Classroom, ports::ClassroomRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresClassroomRepo {
    pool: PgPool,
}

impl PostgresClassroomRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClassroomRepository for PostgresClassroomRepo {
    async fn create(&self, classroom: &Classroom) -> Result<Classroom, AppError> {
        sqlx::query_as::<_, Classroom>(
            "INSERT INTO classrooms (id, name, building, floor, capacity, facilities, is_active, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING *",
        )
        .bind(&classroom.id)
        .bind(&classroom.name)
        .bind(&classroom.building)
        .bind(classroom.floor)
        .bind(classroom.capacity)
        .bind(&classroom.facilities)
        .bind(classroom.is_active)
        .bind(classroom.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Classroom>, AppError> {
        sqlx::query_as::<_, Classroom>("SELECT * FROM classrooms WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_active(&self) -> Result<Vec<Classroom>, AppError> {
        sqlx::query_as::<_, Classroom>("SELECT * FROM classrooms WHERE is_active = TRUE ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, classroom: &Classroom) -> Result<Classroom, AppError> {
        sqlx::query_as::<_, Classroom>(
            "UPDATE classrooms SET name = $1, building = $2, floor = $3, capacity = $4, facilities = $5, is_active = $6
             WHERE id = $7
             RETURNING *",
        )
        .bind(&classroom.name)
        .bind(&classroom.building)
        .bind(classroom.floor)
        .bind(classroom.capacity)
        .bind(&classroom.facilities)
        .bind(classroom.is_active)
        .bind(&classroom.id)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }
}
