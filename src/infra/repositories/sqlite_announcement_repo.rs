use crate::domain::{
    models::announcement::{Announcement, AnnouncementDetail},
    ports::{AnnouncementFilter, AnnouncementRepository},
};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

const DETAIL_SELECT: &str = "SELECT n.id, n.title, n.description, n.category, n.priority, n.target_roles,
       n.created_by, u.full_name AS author_name, n.start_date, n.end_date,
       n.is_active, n.view_count, n.created_at
  FROM announcements n
  JOIN users u ON u.id = n.created_by";

pub struct SqliteAnnouncementRepo {
    pool: SqlitePool,
}

impl SqliteAnnouncementRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AnnouncementRepository for SqliteAnnouncementRepo {
    async fn create(&self, announcement: &Announcement) -> Result<Announcement, AppError> {
        sqlx::query_as::<_, Announcement>(
            "INSERT INTO announcements (id, title, description, category, priority, target_roles, created_by, start_date, end_date, is_active, view_count, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *",
        )
        .bind(&announcement.id)
        .bind(&announcement.title)
        .bind(&announcement.description)
        .bind(&announcement.category)
        .bind(&announcement.priority)
        .bind(&announcement.target_roles)
        .bind(&announcement.created_by)
        .bind(announcement.start_date)
        .bind(announcement.end_date)
        .bind(announcement.is_active)
        .bind(announcement.view_count)
        .bind(announcement.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Announcement>, AppError> {
        sqlx::query_as::<_, Announcement>("SELECT * FROM announcements WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_detail(&self, id: &str) -> Result<Option<AnnouncementDetail>, AppError> {
        sqlx::query_as::<_, AnnouncementDetail>(&format!("{DETAIL_SELECT} WHERE n.id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(&self, filter: &AnnouncementFilter) -> Result<Vec<AnnouncementDetail>, AppError> {
        sqlx::query_as::<_, AnnouncementDetail>(&format!(
            "{DETAIL_SELECT}
              WHERE n.is_active = 1
                AND (?1 IS NULL OR n.category = ?1)
                AND (?2 IS NULL OR n.priority = ?2)
              ORDER BY n.created_at DESC
              LIMIT ?3 OFFSET ?4"
        ))
        .bind(&filter.category)
        .bind(&filter.priority)
        .bind(filter.limit)
        .bind(filter.offset)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn count(&self, filter: &AnnouncementFilter) -> Result<i64, AppError> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM announcements n
              WHERE n.is_active = 1
                AND (?1 IS NULL OR n.category = ?1)
                AND (?2 IS NULL OR n.priority = ?2)",
        )
        .bind(&filter.category)
        .bind(&filter.priority)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn update(&self, announcement: &Announcement) -> Result<Announcement, AppError> {
        sqlx::query_as::<_, Announcement>(
            "UPDATE announcements
             SET title = ?, description = ?, category = ?, priority = ?, target_roles = ?,
                 start_date = ?, end_date = ?, is_active = ?
             WHERE id = ?
             RETURNING *",
        )
        .bind(&announcement.title)
        .bind(&announcement.description)
        .bind(&announcement.category)
        .bind(&announcement.priority)
        .bind(&announcement.target_roles)
        .bind(announcement.start_date)
        .bind(announcement.end_date)
        .bind(announcement.is_active)
        .bind(&announcement.id)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn increment_view_count(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("UPDATE announcements SET view_count = view_count + 1 WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Announcement not found".into()));
        }
        Ok(())
    }
}
